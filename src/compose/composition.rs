//! Composición de pipelines: un DAG declarado como adyacencia ordenada
//! padre -> hijos.

use std::rc::Rc;

use super::topo::topological_order;
use crate::errors::PipelineError;
use crate::pipeline::SharedPipeline;

/// Grafo de pipelines con visibilidad de artifacts padre -> hijo y
/// scheduler topológico. La adyacencia conserva el orden de declaración,
/// que es el que desempata entre hermanos al ejecutar.
#[derive(Debug)]
pub struct Composition {
    adjacency: Vec<(SharedPipeline, Vec<SharedPipeline>)>,
}

impl Composition {
    /// Construye la composición y recablea los parents: la lista de parents
    /// de TODO pipeline referenciado se resetea y se reconstruye solo desde
    /// esta adyacencia. Un pipeline puede tener varios padres y varios
    /// hijos. Precondición no verificada: el grafo es acíclico.
    pub fn new(adjacency: Vec<(SharedPipeline, Vec<SharedPipeline>)>) -> Self {
        let composition = Self { adjacency };
        composition.rewire_parents();
        composition
    }

    /// Todos los pipelines referenciados, sin duplicados, en orden de
    /// primera aparición (cada clave y después sus hijos).
    pub fn pipelines(&self) -> Vec<SharedPipeline> {
        let mut collected: Vec<SharedPipeline> = Vec::new();
        for (parent, children) in &self.adjacency {
            push_unique(&mut collected, parent);
            for child in children {
                push_unique(&mut collected, child);
            }
        }
        collected
    }

    /// Raíces del grafo: pipelines sin parents después del recableado.
    pub fn roots(&self) -> Vec<SharedPipeline> {
        self.pipelines()
            .into_iter()
            .filter(|pipeline| pipeline.borrow().parents().is_empty())
            .collect()
    }

    /// Orden topológico de ejecución: todo pipeline precede a sus
    /// descendientes; hermanos quedan en orden de adyacencia.
    pub fn topological_order(&self) -> Vec<SharedPipeline> {
        let roots = self.roots();
        topological_order(&self.adjacency, &roots)
    }

    /// Ejecuta los pipelines secuencialmente en orden topológico. Sin
    /// aislamiento de fallas: el primer error aborta los restantes.
    pub fn run(&self, verbose: bool) -> Result<(), PipelineError> {
        for pipeline in self.topological_order() {
            pipeline.borrow_mut().run(verbose)?;
        }
        Ok(())
    }

    fn rewire_parents(&self) {
        for pipeline in self.pipelines() {
            pipeline.borrow_mut().clear_parents();
        }
        for (parent, children) in &self.adjacency {
            for child in children {
                child.borrow_mut().add_parent(parent);
            }
        }
    }
}

fn push_unique(collected: &mut Vec<SharedPipeline>, candidate: &SharedPipeline) {
    let already = collected.iter().any(|existing| Rc::ptr_eq(existing, candidate));
    if !already {
        collected.push(Rc::clone(candidate));
    }
}
