//! Almacenamiento de artifacts con nombre.
//!
//! Dos backends intercambiables detrás del mismo trait: en memoria (valores
//! directos en un mapa) y en disco (un archivo JSON por artifact). El store
//! pertenece a un único pipeline; la visibilidad entre pipelines pasa por la
//! cadena de parents, nunca por compartir el store.

pub mod disk;
pub mod memory;

pub use disk::DiskArtifactStore;
pub use memory::InMemoryArtifactStore;

use std::fmt::Debug;

use serde_json::Value;

use crate::errors::PipelineError;

/// Contrato de un backend de artifacts.
pub trait ArtifactStore: Debug {
    /// Inserta o sobreescribe (sin aviso) el artifact `name`.
    fn save(&mut self, name: &str, value: Value) -> Result<(), PipelineError>;
    /// Devuelve el valor almacenado, `Ok(None)` si no existe.
    fn load(&self, name: &str) -> Result<Option<Value>, PipelineError>;
    /// Elimina el artifact; no falla si no existe.
    fn delete(&mut self, name: &str) -> Result<(), PipelineError>;
    /// Elimina todas las entradas del store.
    fn clear(&mut self) -> Result<(), PipelineError>;
    /// Pide liberar capacidad de respaldo, si el backend tiene alguna.
    fn shrink(&mut self) {}
}
