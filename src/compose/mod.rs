//! Composición de pipelines en un DAG con scheduling topológico.

pub mod composition;
pub mod topo;

pub use composition::Composition;
