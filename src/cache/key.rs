//! Derivación de la clave de cache.
//!
//! La clave es función pura de tres cosas: versión del formato, argumentos
//! ligados (con defaults declarados ya aplicados) y snapshot de
//! configuración del step. Nada de estado ambiental ni timestamps.

use serde_json::{json, Value};

use crate::constants::CACHE_KEY_VERSION;
use crate::errors::PipelineError;
use crate::hashing::hash_value;
use crate::model::{bind_defaults, BoundArgs};
use crate::step::Step;

/// Clave contenido-direccionada para un par `args` + `config`.
pub fn cache_key(args: &BoundArgs, config: &Value) -> String {
    hash_value(&json!({
        "cache_version": CACHE_KEY_VERSION,
        "args": args.to_value(),
        "config": config,
    }))
}

/// Aplica la regla de binding del engine sobre los argumentos dados y
/// deriva la clave del step. Un requerido ausente corta acá, antes de
/// consultar el backend.
pub(crate) fn step_cache_key(step: &dyn Step, args: &BoundArgs) -> Result<String, PipelineError> {
    let bound = bind_defaults(&step.params(), args)?;
    let config = step.config()?;
    Ok(cache_key(&bound, &config))
}
