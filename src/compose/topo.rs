//! Orden topológico del grafo de pipelines.
//!
//! DFS post-order desde cada raíz más una inversión final. Raíces e hijos
//! se recorren en orden de declaración invertido para que, tras invertir la
//! lista acumulada, los hermanos queden en el orden en que aparecen en la
//! adyacencia. El set de visitados (identidad por puntero) garantiza
//! terminación incluso si la precondición de aciclicidad fue violada.

use std::cell::RefCell;
use std::rc::Rc;

use crate::pipeline::{Pipeline, SharedPipeline};

pub(crate) fn topological_order(adjacency: &[(SharedPipeline, Vec<SharedPipeline>)],
                                roots: &[SharedPipeline])
                                -> Vec<SharedPipeline> {
    let mut visited: Vec<*const RefCell<Pipeline>> = Vec::new();
    let mut postorder: Vec<SharedPipeline> = Vec::new();
    for root in roots.iter().rev() {
        visit(root, adjacency, &mut visited, &mut postorder);
    }
    postorder.reverse();
    postorder
}

fn visit(node: &SharedPipeline,
         adjacency: &[(SharedPipeline, Vec<SharedPipeline>)],
         visited: &mut Vec<*const RefCell<Pipeline>>,
         postorder: &mut Vec<SharedPipeline>) {
    let ptr = Rc::as_ptr(node);
    if visited.contains(&ptr) {
        return;
    }
    visited.push(ptr);
    let children = adjacency.iter().find(|(candidate, _)| Rc::ptr_eq(candidate, node));
    if let Some((_, children)) = children {
        for child in children.iter().rev() {
            visit(child, adjacency, visited, postorder);
        }
    }
    postorder.push(Rc::clone(node));
}
