//! Tipos de modelo compartidos por engine, steps y cache.

pub mod outputs;
pub mod params;

pub use outputs::StepOutputs;
pub use params::{bind_defaults, BoundArgs, ParamSpec};
