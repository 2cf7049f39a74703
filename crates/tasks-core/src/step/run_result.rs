use serde_json::Value;

use crate::errors::TaskError;

/// Resultado abstracto de ejecutar un step.
#[derive(Debug)]
pub enum StepRunResult {
    Success { outputs: Vec<String> },
    SuccessWithSignals { outputs: Vec<String>, signals: Vec<StepSignal> },
    Failure { error: TaskError },
}

/// Hito ligero emitido por un step; no altera el estado del target.
#[derive(Debug, Clone)]
pub struct StepSignal {
    pub signal: String,
    pub data: Value,
}
