//! Registro de ejecución (stack de historia del pipeline).

use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::step::Step;

/// Entrada del stack de historia: qué step corrió y cuánto tardó. Guardar
/// el handle al step (y no un índice) permite el replay inverso aunque la
/// lista de steps del pipeline cambie después de correr.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: Rc<dyn Step>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl StepRecord {
    pub fn step_name(&self) -> &str {
        self.step.name()
    }
}
