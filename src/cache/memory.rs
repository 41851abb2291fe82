//! Cache en memoria compartible entre steps.
//!
//! `MemoryCache` es un handle clonable sobre un único mapa clave -> outputs;
//! todos los clones ven las mismas entradas. La clave NO incluye el nombre
//! del step: dos steps distintos que compartan handle y produzcan el mismo
//! par {args, config} colisionan en la misma entrada, a diferencia del
//! backend en disco que separa por directorio. El dueño del handle define
//! su ciclo de vida; no hay singleton de proceso.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use serde_json::Value;

use super::key::step_cache_key;
use crate::errors::PipelineError;
use crate::model::{BoundArgs, ParamSpec, StepOutputs};
use crate::pipeline::Pipeline;
use crate::step::Step;

/// Handle clonable al mapa compartido de resultados memoizados.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Rc<RefCell<HashMap<String, StepOutputs>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self { entries: Rc::new(RefCell::new(HashMap::new())) }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<StepOutputs> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: String, outputs: StepOutputs) {
        self.entries.borrow_mut().insert(key, outputs);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Step decorado con memoización en memoria.
#[derive(Debug)]
pub struct MemoryCacheStep<S: Step> {
    inner: S,
    cache: MemoryCache,
}

impl<S: Step> MemoryCacheStep<S> {
    pub fn new(inner: S, cache: MemoryCache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }
}

impl<S: Step> Step for MemoryCacheStep<S> {
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
        if let Some(hit) = self.cache.get(&key) {
            debug!("cache hit (memoria) para step '{}'", self.inner.name());
            return Ok(hit);
        }
        debug!("cache miss (memoria) para step '{}'", self.inner.name());
        let outputs = self.inner.execute(pipeline, args)?;
        self.cache.insert(key, outputs.clone());
        Ok(outputs)
    }

    fn execute_inverse(&self, pipeline: &mut Pipeline, kwargs: StepOutputs) -> Result<StepOutputs, PipelineError> {
        self.inner.execute_inverse(pipeline, kwargs)
    }
}
