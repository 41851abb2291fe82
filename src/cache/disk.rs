//! Cache en disco: una entrada JSON por clave bajo `{root}/{step}/{clave}`.
//!
//! Separar por nombre de step evita colisiones entre steps distintos con
//! argumentos y configuración idénticos. Las entradas sobreviven al proceso
//! y se escriben de forma atómica.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use super::key::step_cache_key;
use crate::errors::PipelineError;
use crate::fsutil::write_atomic;
use crate::model::{BoundArgs, ParamSpec, StepOutputs};
use crate::pipeline::Pipeline;
use crate::step::Step;

/// Step decorado con memoización persistente en disco.
#[derive(Debug)]
pub struct DiskCacheStep<S: Step> {
    inner: S,
    directory: PathBuf,
}

impl<S: Step> DiskCacheStep<S> {
    /// Entradas bajo `{root}/{nombre del step}`. El directorio se crea en
    /// la primera escritura.
    pub fn new(inner: S, root: impl AsRef<Path>) -> Self {
        let directory = root.as_ref().join(inner.name());
        Self { inner, directory }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }

    fn read_entry(&self, key: &str) -> Result<Option<StepOutputs>, PipelineError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write_entry(&self, key: &str, outputs: &StepOutputs) -> Result<(), PipelineError> {
        let bytes = serde_json::to_vec(outputs)?;
        write_atomic(&self.entry_path(key), &bytes)
    }
}

impl<S: Step> Step for DiskCacheStep<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn params(&self) -> Vec<ParamSpec> {
        self.inner.params()
    }

    fn config(&self) -> Result<Value, PipelineError> {
        self.inner.config()
    }

    fn execute(&self, pipeline: &mut Pipeline, args: &BoundArgs) -> Result<StepOutputs, PipelineError> {
        let key = step_cache_key(&self.inner, args)?;
        if let Some(hit) = self.read_entry(&key)? {
            debug!("cache hit (disco) para step '{}'", self.inner.name());
            return Ok(hit);
        }
        debug!("cache miss (disco) para step '{}'", self.inner.name());
        let outputs = self.inner.execute(pipeline, args)?;
        self.write_entry(&key, &outputs)?;
        Ok(outputs)
    }

    fn execute_inverse(&self, pipeline: &mut Pipeline, kwargs: StepOutputs) -> Result<StepOutputs, PipelineError> {
        self.inner.execute_inverse(pipeline, kwargs)
    }
}
