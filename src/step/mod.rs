//! Contrato de steps y macro de declaración.

pub mod definition;
pub mod macros;

pub use definition::Step;
