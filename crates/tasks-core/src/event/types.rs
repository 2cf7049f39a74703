//! Tipos de evento de una ejecución y estructura `TaskEvent`.
//!
//! Cada ejecución de un target emite eventos a un `EventStore` append-only.
//! El repositorio reconstruye el estado de la ejecución (replay) a partir de
//! ellos, y el binario puede volcarlos a un journal JSON lines.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TaskError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskEventKind {
    /// Primer evento de un `run_id`: fija target, `definition_hash` y cantidad de steps.
    TargetInitialized {
        target: String,
        definition_hash: String,
        step_count: usize,
    },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    StepFinished {
        step_index: usize,
        step_id: String,
        outputs: Vec<String>,
    },
    /// Fallo terminal: el target no continúa (fail-fast).
    StepFailed {
        step_index: usize,
        step_id: String,
        error: TaskError,
    },
    StepSignal {
        step_index: usize,
        step_id: String,
        signal: String,
        data: serde_json::Value,
    },
    /// Cierre con fingerprint agregado de la ejecución.
    TargetCompleted { run_fingerprint: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub seq: u64, // orden de append dentro del run
    pub run_id: Uuid,
    pub kind: TaskEventKind,
    pub ts: DateTime<Utc>,
}
