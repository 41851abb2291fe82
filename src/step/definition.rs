use std::fmt::Debug;

use serde_json::{Map, Value};

use crate::errors::PipelineError;
use crate::model::{BoundArgs, ParamSpec, StepOutputs};
use crate::pipeline::Pipeline;

/// Trait que define un Step. La identidad lógica es el nombre; el contrato
/// de datos son los parámetros declarados.
pub trait Step: Debug {
    /// Nombre estable del step dentro del pipeline.
    fn name(&self) -> &str;

    /// Parámetros declarados. El engine resuelve cada uno como artifact
    /// antes de ejecutar: sin default es requerido, con default es opcional.
    fn params(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    /// Snapshot JSON de la configuración propia del step (sus campos
    /// seteables). Participa de la clave de cache junto a los argumentos.
    fn config(&self) -> Result<Value, PipelineError> {
        Ok(Value::Object(Map::new()))
    }

    /// Ejecuta el step con los argumentos ya resueltos. Las salidas
    /// devueltas se persisten como artifacts del pipeline dueño.
    fn execute(&self, pipeline: &mut Pipeline, args: &BoundArgs) -> Result<StepOutputs, PipelineError>;

    /// Transformación inversa para el replay del stack de historia. El
    /// default es la identidad: el step deja pasar los kwargs sin tocarlos.
    fn execute_inverse(&self, pipeline: &mut Pipeline, kwargs: StepOutputs) -> Result<StepOutputs, PipelineError> {
        let _ = pipeline;
        Ok(kwargs)
    }
}
