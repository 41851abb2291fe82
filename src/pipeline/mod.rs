//! Engine de pipelines: orden de steps, binding de parámetros, historia.

pub mod core;
pub mod history;

pub use self::core::{Pipeline, SharedPipeline, StorageMode};
pub use history::StepRecord;
