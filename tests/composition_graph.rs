//! Composición: recableado de parents, orden topológico y ejecución.

use std::cell::RefCell;
use std::rc::Rc;

use pipelab::{pipeline_step, BoundArgs, Composition, Pipeline, PipelineError, SharedPipeline,
              Step, StepOutputs, StorageMode};
use serde_json::json;

/// Step manual que deja la etiqueta de su pipeline en una traza compartida.
#[derive(Debug)]
struct VisitStep {
    label: &'static str,
    trace: Rc<RefCell<Vec<&'static str>>>,
}

impl Step for VisitStep {
    fn name(&self) -> &str {
        "visit"
    }

    fn execute(&self, _pipeline: &mut Pipeline, _args: &BoundArgs) -> Result<StepOutputs, PipelineError> {
        self.trace.borrow_mut().push(self.label);
        Ok(StepOutputs::new())
    }
}

pipeline_step! {
    step EmitBase {
        name: "emit_base",
        params { },
        execute(_s, _pipeline, _args) {
            Ok(StepOutputs::new().with("base", json!(5)))
        }
    }
}

pipeline_step! {
    step ConsumeBase {
        name: "consume_base",
        params { base },
        execute(_s, _pipeline, args) {
            let base: i64 = args.decode("base")?;
            Ok(StepOutputs::new().with("result", json!(base + 1)))
        }
    }
}

pipeline_step! {
    step FailingStep {
        name: "explota",
        params { },
        execute(_s, _pipeline, _args) {
            Err(PipelineError::Step("paso roto".into()))
        }
    }
}

fn named(name: &str) -> SharedPipeline {
    Pipeline::new(name, vec![], StorageMode::Memory).into_shared()
}

fn order_names(order: &[SharedPipeline]) -> Vec<String> {
    order.iter().map(|p| p.borrow().name().to_string()).collect()
}

#[test]
fn new_rewires_parents_from_adjacency() {
    let a = named("a");
    let b = named("b");

    // parent previo que el recableado tiene que descartar
    let stale = named("viejo");
    b.borrow_mut().add_parent(&stale);

    let _comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b)])]);

    let parents = b.borrow().parents();
    assert_eq!(parents.len(), 1);
    assert!(Rc::ptr_eq(&parents[0], &a));
    assert!(a.borrow().parents().is_empty());
}

#[test]
fn chain_orders_parent_before_child() {
    let a = named("a");
    let b = named("b");
    let c = named("c");
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b)]),
                                     (Rc::clone(&b), vec![Rc::clone(&c)])]);
    assert_eq!(order_names(&comp.topological_order()), ["a", "b", "c"]);
}

#[test]
fn siblings_keep_adjacency_order() {
    let a = named("a");
    let b = named("b");
    let c = named("c");
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b), Rc::clone(&c)]),
                                     (Rc::clone(&b), vec![Rc::clone(&c)])]);
    assert_eq!(order_names(&comp.topological_order()), ["a", "b", "c"]);
}

#[test]
fn diamond_schedules_all_dependencies_first() {
    let a = named("a");
    let b = named("b");
    let c = named("c");
    let d = named("d");
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b), Rc::clone(&c)]),
                                     (Rc::clone(&b), vec![Rc::clone(&d)]),
                                     (Rc::clone(&c), vec![Rc::clone(&d)])]);

    assert_eq!(order_names(&comp.topological_order()), ["a", "b", "c", "d"]);

    // el hijo del diamante ve a los dos padres
    let parents = d.borrow().parents();
    assert_eq!(parents.len(), 2);
    assert!(Rc::ptr_eq(&parents[0], &b));
    assert!(Rc::ptr_eq(&parents[1], &c));
}

#[test]
fn disconnected_roots_schedule_in_declaration_order() {
    let r1 = named("r1");
    let r2 = named("r2");
    let x = named("x");
    let y = named("y");
    let comp = Composition::new(vec![(Rc::clone(&r1), vec![Rc::clone(&x)]),
                                     (Rc::clone(&r2), vec![Rc::clone(&y)])]);
    assert_eq!(order_names(&comp.topological_order()), ["r1", "x", "r2", "y"]);
}

#[test]
fn pipelines_lists_each_node_once() {
    let a = named("a");
    let b = named("b");
    let c = named("c");
    let d = named("d");
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b), Rc::clone(&c)]),
                                     (Rc::clone(&b), vec![Rc::clone(&d)]),
                                     (Rc::clone(&c), vec![Rc::clone(&d)])]);
    assert_eq!(order_names(&comp.pipelines()), ["a", "b", "c", "d"]);
}

#[test]
fn multi_parent_child_reads_both_namespaces() {
    let left = named("izquierda");
    let right = named("derecha");
    let child = named("hijo");
    left.borrow_mut().save_artifact("l", json!(1)).unwrap();
    right.borrow_mut().save_artifact("r", json!(2)).unwrap();

    let _comp = Composition::new(vec![(Rc::clone(&left), vec![Rc::clone(&child)]),
                                      (Rc::clone(&right), vec![Rc::clone(&child)])]);

    assert_eq!(child.borrow().get_artifact("l").unwrap(), json!(1));
    assert_eq!(child.borrow().get_artifact("r").unwrap(), json!(2));
}

#[test]
fn run_executes_children_after_parents() {
    let parent_steps: Vec<Rc<dyn Step>> = vec![Rc::new(EmitBase::new())];
    let parent = Pipeline::new("productor", parent_steps, StorageMode::Memory).into_shared();

    let child_steps: Vec<Rc<dyn Step>> = vec![Rc::new(ConsumeBase::new())];
    let child = Pipeline::new("consumidor", child_steps, StorageMode::Memory).into_shared();

    let comp = Composition::new(vec![(Rc::clone(&parent), vec![Rc::clone(&child)])]);
    comp.run(false).unwrap();

    assert!(parent.borrow().finished());
    assert!(child.borrow().finished());
    assert_eq!(child.borrow().get_artifact("result").unwrap(), json!(6));
}

#[test]
fn run_visits_each_pipeline_once_in_order() {
    let trace = Rc::new(RefCell::new(Vec::new()));
    let visiting = |label: &'static str| -> SharedPipeline {
        let steps: Vec<Rc<dyn Step>> =
            vec![Rc::new(VisitStep { label, trace: Rc::clone(&trace) })];
        Pipeline::new(label, steps, StorageMode::Memory).into_shared()
    };

    let a = visiting("a");
    let b = visiting("b");
    let c = visiting("c");
    // c es alcanzable por dos caminos pero corre una sola vez
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b), Rc::clone(&c)]),
                                     (Rc::clone(&b), vec![Rc::clone(&c)])]);
    comp.run(false).unwrap();

    assert_eq!(*trace.borrow(), ["a", "b", "c"]);
}

#[test]
fn failure_in_parent_aborts_descendants() {
    let parent_steps: Vec<Rc<dyn Step>> = vec![Rc::new(FailingStep::new())];
    let parent = Pipeline::new("roto", parent_steps, StorageMode::Memory).into_shared();

    let child_steps: Vec<Rc<dyn Step>> = vec![Rc::new(ConsumeBase::new())];
    let child = Pipeline::new("consumidor", child_steps, StorageMode::Memory).into_shared();

    let comp = Composition::new(vec![(Rc::clone(&parent), vec![Rc::clone(&child)])]);
    let err = comp.run(false).unwrap_err();
    assert_eq!(err, PipelineError::Step("paso roto".into()));

    assert!(!parent.borrow().finished());
    assert!(!child.borrow().finished());
    assert!(child.borrow().history().is_empty());
}

#[test]
fn cycle_terminates_with_empty_schedule() {
    let a = named("a");
    let b = named("b");
    let comp = Composition::new(vec![(Rc::clone(&a), vec![Rc::clone(&b)]),
                                     (Rc::clone(&b), vec![Rc::clone(&a)])]);

    // sin raíces no hay nada que ejecutar, pero el scheduler termina
    assert!(comp.topological_order().is_empty());
    comp.run(false).unwrap();
    assert!(!a.borrow().finished());
    assert!(!b.borrow().finished());
}
