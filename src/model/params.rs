//! Descriptores de parámetros y argumentos ligados.
//!
//! El contrato de ejecución de un step se declara como lista explícita de
//! `ParamSpec` (nombre + default opcional). El engine recorre esa lista para
//! resolver artifacts antes de ejecutar; la capa de cache reutiliza la misma
//! regla de binding para derivar claves. El parámetro reservado del pipeline
//! no se declara: viaja como argumento explícito de `execute`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::PipelineError;

/// Descriptor de un parámetro declarado por un step.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    /// `None` lo marca requerido; `Some(v)` lo hace opcional con default `v`.
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), default: None }
    }

    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self { name: name.into(), default: Some(default) }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Argumentos ya ligados a los nombres declarados por un step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: Map<String, Value>,
}

impl BoundArgs {
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Variante builder de `insert`.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Devuelve el argumento o corta con `ArtifactNotFound` si no fue ligado.
    pub fn required(&self, name: &str) -> Result<&Value, PipelineError> {
        self.values
            .get(name)
            .ok_or_else(|| PipelineError::ArtifactNotFound(name.to_string()))
    }

    /// Decodifica el argumento al tipo pedido.
    pub fn decode<T: DeserializeOwned>(&self, name: &str) -> Result<T, PipelineError> {
        let value = self.required(name)?;
        serde_json::from_value(value.clone())
            .map_err(|e| PipelineError::Serialization(format!("argumento '{name}': {e}")))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Representación JSON del binding (input de las claves de cache).
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

/// Completa `given` con los defaults declarados en `specs`: la misma regla
/// de binding que aplica el engine. Un requerido ausente corta con
/// `ArtifactNotFound`; claves no declaradas en `specs` se ignoran.
pub fn bind_defaults(specs: &[ParamSpec], given: &BoundArgs) -> Result<BoundArgs, PipelineError> {
    let mut bound = BoundArgs::new();
    for spec in specs {
        match given.value(&spec.name) {
            Some(v) => bound.insert(spec.name.clone(), v.clone()),
            None => match &spec.default {
                Some(d) => bound.insert(spec.name.clone(), d.clone()),
                None => return Err(PipelineError::ArtifactNotFound(spec.name.clone())),
            },
        }
    }
    Ok(bound)
}
