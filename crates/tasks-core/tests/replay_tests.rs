use serde_json::json;
use tasks_core::errors::TaskError;
use tasks_core::repo::{build_target_definition, InMemoryTargetRepository, TargetRepository};
use tasks_core::step::{StepDefinition, StepRunResult, StepStatus};
use tasks_core::{EventStore, ExecutionContext, InMemoryEventStore, TaskEventKind, Variables};
use uuid::Uuid;

struct Noop(&'static str);

impl StepDefinition for Noop {
    fn id(&self) -> &str { self.0 }
    fn base_params(&self) -> serde_json::Value { json!({}) }
    fn describe(&self, _target: &str, _vars: &Variables) -> Result<String, TaskError> { Ok(self.0.into()) }
    fn run(&self, _ctx: &ExecutionContext) -> StepRunResult { StepRunResult::Success { outputs: vec![] } }
}

#[test]
fn replay_marks_failed_step_and_keeps_rest_pending() {
    let def = build_target_definition("lint", "", &["stack"], vec![Box::new(Noop("a")), Box::new(Noop("b"))]);
    let run_id = Uuid::new_v4();
    let mut store = InMemoryEventStore::default();
    store.append_kind(run_id,
                      TaskEventKind::TargetInitialized { target: "lint".into(),
                                                         definition_hash: def.definition_hash.clone(),
                                                         step_count: 2 });
    store.append_kind(run_id, TaskEventKind::StepStarted { step_index: 0, step_id: "a".into() });
    store.append_kind(run_id,
                      TaskEventKind::StepFailed { step_index: 0,
                                                  step_id: "a".into(),
                                                  error: TaskError::ExternalToolFailure { program: "uv".into(),
                                                                                          code: 1 } });

    let inst = InMemoryTargetRepository::new().load(run_id, &store.list(run_id), &def);

    assert!(inst.failed);
    assert!(!inst.completed);
    assert_eq!(inst.steps[0].status, StepStatus::Failed);
    assert_eq!(inst.steps[1].status, StepStatus::Pending);
    assert_eq!(inst.cursor, 1);
}

#[test]
fn definition_hash_depends_on_steps_and_required_vars() {
    let a = build_target_definition("t", "", &["stack"], vec![Box::new(Noop("a"))]);
    let b = build_target_definition("t", "other description", &["stack"], vec![Box::new(Noop("a"))]);
    let c = build_target_definition("t", "", &[], vec![Box::new(Noop("a"))]);
    let d = build_target_definition("t", "", &["stack"], vec![Box::new(Noop("b"))]);

    assert_eq!(a.definition_hash, b.definition_hash);
    assert_ne!(a.definition_hash, c.definition_hash);
    assert_ne!(a.definition_hash, d.definition_hash);
}

#[test]
fn events_serialize_with_tag() {
    let mut store = InMemoryEventStore::default();
    let run_id = Uuid::new_v4();
    let ev = store.append_kind(run_id, TaskEventKind::TargetCompleted { run_fingerprint: "fp".into() });

    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v["kind"]["event"], "target_completed");
    assert_eq!(v["seq"], 0);
}
