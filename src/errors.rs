//! Errores del engine (taxonomía única para stores, steps y composición).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("artifact '{0}' not found")] ArtifactNotFound(String),
    #[error("invalid artifact name: '{0}'")] InvalidArtifactName(String),
    #[error("serialization failed: {0}")] Serialization(String),
    #[error("io: {0}")] Io(String),
    #[error("step failed: {0}")] Step(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
