//! Implementación del engine de pipelines.
//!
//! Un `Pipeline` es una lista ordenada de steps más un store de artifacts
//! propio. Ejecutar es secuencial: para cada step se resuelven sus
//! parámetros declarados contra la cadena de artifacts (store propio y
//! luego parents), se ejecuta y se persisten sus salidas. Cada ejecución
//! queda registrada en el stack de historia para el replay inverso.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use chrono::Utc;
use log::{debug, info};
use serde_json::Value;

use super::history::StepRecord;
use crate::config::StorageConfig;
use crate::errors::PipelineError;
use crate::model::{BoundArgs, StepOutputs};
use crate::step::Step;
use crate::store::{ArtifactStore, DiskArtifactStore, InMemoryArtifactStore};

/// Handle compartido a un pipeline. Es la moneda del grafo de composición:
/// los parents se guardan como `Weak` (un pipeline nunca es dueño de sus
/// ancestros), los hijos toman referencias fuertes desde afuera.
pub type SharedPipeline = Rc<RefCell<Pipeline>>;

/// Backend de artifacts elegido al construir el pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Valores directos en un mapa. Para artifacts chicos y tests.
    Memory,
    /// Un archivo JSON por artifact bajo la raíz configurada por entorno,
    /// namespaceado por nombre de pipeline.
    Disk,
}

/// Motor de ejecución secuencial de steps sobre un store de artifacts.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    steps: Vec<Rc<dyn Step>>,
    store: Box<dyn ArtifactStore>,
    parents: Vec<Weak<RefCell<Pipeline>>>,
    finished: bool,
    history: Vec<StepRecord>,
}

impl Pipeline {
    /// Crea un pipeline con el backend indicado. Con `StorageMode::Disk` la
    /// raíz sale de `PIPELAB_ARTIFACT_DIR` (o su default).
    pub fn new(name: impl Into<String>, steps: Vec<Rc<dyn Step>>, mode: StorageMode) -> Self {
        let name = name.into();
        let store: Box<dyn ArtifactStore> = match mode {
            StorageMode::Memory => Box::new(InMemoryArtifactStore::new()),
            StorageMode::Disk => {
                let root = StorageConfig::from_env().artifact_root;
                Box::new(DiskArtifactStore::new(root, &name))
            }
        };
        Self::with_store(name, steps, store)
    }

    /// Crea un pipeline con un store explícito (raíces custom, tests).
    pub fn with_store(name: impl Into<String>,
                      steps: Vec<Rc<dyn Step>>,
                      store: Box<dyn ArtifactStore>)
                      -> Self {
        Self { name: name.into(),
               steps,
               store,
               parents: Vec::new(),
               finished: false,
               history: Vec::new() }
    }

    /// Envuelve el pipeline en el handle compartido que usa la composición.
    pub fn into_shared(self) -> SharedPipeline {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` una vez que un `run` completó todos los steps.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn steps(&self) -> &[Rc<dyn Step>] {
        &self.steps
    }

    /// Stack de historia: un registro por step ejecutado, en orden.
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    /// Agrega un step al final de la lista.
    pub fn add_step(&mut self, step: Rc<dyn Step>) {
        self.steps.push(step);
    }

    /// Inserta un step en `position`, corriendo los siguientes. Posiciones
    /// más allá del final saturan a un append.
    pub fn insert_step(&mut self, step: Rc<dyn Step>, position: usize) {
        let position = position.min(self.steps.len());
        self.steps.insert(position, step);
    }

    /// Registra un parent para la resolución de artifacts. Registrar dos
    /// veces el mismo pipeline es un no-op.
    pub fn add_parent(&mut self, parent: &SharedPipeline) {
        let candidate = Rc::downgrade(parent);
        let already = self.parents.iter().any(|w| w.ptr_eq(&candidate));
        if !already {
            self.parents.push(candidate);
        }
    }

    pub(crate) fn clear_parents(&mut self) {
        self.parents.clear();
    }

    /// Parents vivos, en orden de registración.
    pub fn parents(&self) -> Vec<SharedPipeline> {
        self.parents.iter().filter_map(Weak::upgrade).collect()
    }

    /// Guarda (o sobreescribe) un artifact en el store propio.
    pub fn save_artifact(&mut self, name: &str, value: Value) -> Result<(), PipelineError> {
        self.store.save(name, value)
    }

    /// Elimina un artifact del store propio; no falla si no existe.
    pub fn delete_artifact(&mut self, name: &str) -> Result<(), PipelineError> {
        self.store.delete(name)
    }

    /// Devuelve el artifact o `ArtifactNotFound` si no aparece en el store
    /// propio ni en toda la cadena de ancestros.
    pub fn get_artifact(&self, name: &str) -> Result<Value, PipelineError> {
        let mut visited: Vec<*const Pipeline> = vec![self as *const Pipeline];
        self.lookup_chain(name, &mut visited)?
            .ok_or_else(|| PipelineError::ArtifactNotFound(name.to_string()))
    }

    /// Variante con default: la ausencia no es error.
    pub fn get_artifact_or(&self, name: &str, default: Value) -> Result<Value, PipelineError> {
        let mut visited: Vec<*const Pipeline> = vec![self as *const Pipeline];
        Ok(self.lookup_chain(name, &mut visited)?.unwrap_or(default))
    }

    /// Lookup con primer-hit-gana: store propio, después cada parent en
    /// orden de registración con su propia cadena completa (DFS). El set
    /// `visited` (identidad por puntero) corta revisitas: un ciclo de
    /// parents degrada a miss en lugar de recursión infinita.
    fn lookup_chain(&self, name: &str, visited: &mut Vec<*const Pipeline>) -> Result<Option<Value>, PipelineError> {
        if let Some(found) = self.store.load(name)? {
            return Ok(Some(found));
        }
        for parent in &self.parents {
            let cell = match parent.upgrade() {
                Some(cell) => cell,
                None => continue,
            };
            let ptr = cell.as_ptr() as *const Pipeline;
            if visited.contains(&ptr) {
                continue;
            }
            visited.push(ptr);
            let ancestor = cell.borrow();
            if let Some(found) = ancestor.lookup_chain(name, visited)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Ejecuta todos los steps en orden de declaración. Un pipeline ya
    /// terminado es un no-op (re-ejecutar requiere `clear`). Si un step
    /// falla, el error se propaga y el pipeline queda sin terminar, con los
    /// artifacts e historia de los steps que sí completaron.
    pub fn run(&mut self, verbose: bool) -> Result<(), PipelineError> {
        if self.finished {
            if verbose {
                info!("pipeline '{}' already executed, skipping", self.name);
            } else {
                debug!("pipeline '{}' already executed, skipping", self.name);
            }
            return Ok(());
        }

        // while en vez de for: un step puede agregar steps durante el run y
        // el recorrido los tiene que ver.
        let mut index = 0;
        while index < self.steps.len() {
            let step = Rc::clone(&self.steps[index]);
            if verbose {
                info!("running step '{}'", step.name());
            } else {
                debug!("running step '{}'", step.name());
            }

            let args = self.bind_step_args(step.as_ref())?;
            let started_at = Utc::now();
            let timer = Instant::now();
            let outputs = step.execute(self, &args)?;
            let duration = timer.elapsed();

            self.persist_outputs(outputs)?;
            if verbose {
                info!("step '{}' executed in {:.2}s", step.name(), duration.as_secs_f64());
            } else {
                debug!("step '{}' executed in {:.2}s", step.name(), duration.as_secs_f64());
            }
            self.history.push(StepRecord { step, started_at, duration });
            index += 1;
        }
        self.finished = true;
        Ok(())
    }

    /// Resuelve los parámetros declarados del step contra la cadena de
    /// artifacts: un requerido ausente corta con `ArtifactNotFound`, un
    /// opcional ausente cae a su default declarado.
    fn bind_step_args(&self, step: &dyn Step) -> Result<BoundArgs, PipelineError> {
        let mut args = BoundArgs::new();
        for spec in step.params() {
            let value = match spec.default {
                None => self.get_artifact(&spec.name)?,
                Some(default) => self.get_artifact_or(&spec.name, default)?,
            };
            args.insert(spec.name, value);
        }
        Ok(args)
    }

    fn persist_outputs(&mut self, outputs: StepOutputs) -> Result<(), PipelineError> {
        for (name, value) in outputs {
            self.save_artifact(&name, value)?;
        }
        Ok(())
    }

    /// Recorre el stack de historia al revés alimentando a cada
    /// `execute_inverse` el resultado del paso posterior, arrancando por
    /// `seed`. Steps sin inversa propia dejan pasar los kwargs intactos.
    pub fn reverse_steps(&mut self, seed: StepOutputs) -> Result<StepOutputs, PipelineError> {
        let executed: Vec<Rc<dyn Step>> = self.history
                                              .iter()
                                              .rev()
                                              .map(|record| Rc::clone(&record.step))
                                              .collect();
        let mut accumulated = seed;
        for step in executed {
            accumulated = step.execute_inverse(self, accumulated)?;
        }
        Ok(accumulated)
    }

    /// Vacía el store propio, la historia y el flag de terminado, dejando
    /// el pipeline listo para re-ejecutar. Con `collect` además pide a los
    /// contenedores liberar capacidad de respaldo.
    pub fn clear(&mut self, collect: bool) -> Result<(), PipelineError> {
        self.store.clear()?;
        self.history.clear();
        if collect {
            self.store.shrink();
            self.history.shrink_to_fit();
        }
        self.finished = false;
        Ok(())
    }
}
