//! Tipos de repositorio: estado reconstruido (`TargetInstance`) y definición
//! (`TargetDefinition`).
//!
//! El repositorio aplica un replay lineal: consume los eventos de un run en
//! orden y deriva el estado de cada step, el cursor y si el run terminó.
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::event::{TaskEvent, TaskEventKind};
use crate::hashing::hash_value;
use crate::step::{StepDefinition, StepStatus};

pub struct TargetInstance {
    pub id: Uuid,
    pub steps: Vec<StepSlot>,
    pub cursor: usize,
    pub completed: bool,
    pub failed: bool,
}

/// Estado de un step en la instancia.
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub outputs: Vec<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Trait para reconstruir (`replay`) el estado de un run a partir de eventos.
pub trait TargetRepository {
    fn load(&self, run_id: Uuid, events: &[TaskEvent], definition: &TargetDefinition) -> TargetInstance;
}

/// Definición inmutable de un target.
pub struct TargetDefinition {
    pub name: String,
    pub description: String,
    /// Variables que deben llegar no vacías antes de ejecutar cualquier step.
    pub required: Vec<String>,
    pub steps: Vec<Box<dyn StepDefinition>>,
    pub definition_hash: String,
}

impl TargetDefinition {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Debug for TargetDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetDefinition")
         .field("name", &self.name)
         .field("required", &self.required)
         .field("steps", &self.steps.iter().map(|s| s.id()).collect::<Vec<_>>())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTargetRepository;

impl InMemoryTargetRepository {
    pub fn new() -> Self {
        Self
    }
}

impl TargetRepository for InMemoryTargetRepository {
    fn load(&self, run_id: Uuid, events: &[TaskEvent], definition: &TargetDefinition) -> TargetInstance {
        let mut steps: Vec<StepSlot> = definition.steps
                                                 .iter()
                                                 .map(|s| StepSlot { step_id: s.id().to_string(),
                                                                     status: StepStatus::Pending,
                                                                     outputs: vec![],
                                                                     started_at: None,
                                                                     finished_at: None })
                                                 .collect();
        let mut completed = false;
        let mut failed = false;
        for ev in events {
            match &ev.kind {
                TaskEventKind::TargetInitialized { .. } | TaskEventKind::StepSignal { .. } => {}
                TaskEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                        slot.started_at = Some(ev.ts);
                    }
                }
                TaskEventKind::StepFinished { step_index, outputs, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::FinishedOk;
                        slot.outputs = outputs.clone();
                        slot.finished_at = Some(ev.ts);
                    }
                }
                TaskEventKind::StepFailed { step_index, .. } => {
                    failed = true;
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.finished_at = Some(ev.ts);
                    }
                }
                TaskEventKind::TargetCompleted { .. } => completed = true,
            }
        }
        let cursor = steps.iter()
                          .position(|s| matches!(s.status, StepStatus::Pending))
                          .unwrap_or(steps.len());
        TargetInstance { id: run_id,
                         steps,
                         cursor,
                         completed,
                         failed }
    }
}

/// Construye la definición de un target y calcula su `definition_hash` a
/// partir del nombre, las variables requeridas y `id` + `base_params` de
/// cada step, en orden.
pub fn build_target_definition(name: &str,
                               description: &str,
                               required: &[&str],
                               steps: Vec<Box<dyn StepDefinition>>)
                               -> TargetDefinition {
    let step_json: Vec<serde_json::Value> = steps.iter()
                                                 .map(|s| json!({ "id": s.id(), "params": s.base_params() }))
                                                 .collect();
    let definition_hash = hash_value(&json!({
        "target": name,
        "required": required,
        "steps": step_json,
    }));
    TargetDefinition { name: name.to_string(),
                       description: description.to_string(),
                       required: required.iter().map(|s| s.to_string()).collect(),
                       steps,
                       definition_hash }
}
