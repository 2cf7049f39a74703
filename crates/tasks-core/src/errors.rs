//! Errores del motor de targets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{GENERIC_FAILURE_CODE, TOOL_NOT_EXECUTABLE_CODE, TOOL_NOT_FOUND_CODE};

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum TaskError {
    /// Variable requerida ausente o vacía. Se detecta antes de lanzar procesos.
    #[error("Please specify a {variable} name (usage: {target} {variable}=<name>)")]
    MissingArgument { variable: String, target: String },
    /// Un proceso externo terminó con código distinto de cero.
    #[error("`{program}` exited with status {code}")]
    ExternalToolFailure { program: String, code: i32 },
    #[error("`{program}` not found")]
    ToolNotFound { program: String },
    /// El programa existe pero no tiene permiso de ejecución.
    #[error("`{program}` is not executable")]
    ToolNotExecutable { program: String },
    #[error("artifact not found: {path}")]
    ArtifactNotFound { path: String },
    #[error("io: {0}")]
    Io(String),
    #[error("target already completed")]
    TargetCompleted,
    #[error("internal: {0}")]
    Internal(String),
}

impl TaskError {
    /// Código de salida del proceso que corresponde a este error.
    ///
    /// Los fallos de herramientas externas propagan su propio código; el
    /// resto se reporta como fallo genérico.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::ExternalToolFailure { code, .. } if *code != 0 => *code,
            TaskError::ToolNotFound { .. } => TOOL_NOT_FOUND_CODE,
            TaskError::ToolNotExecutable { .. } => TOOL_NOT_EXECUTABLE_CODE,
            _ => GENERIC_FAILURE_CODE,
        }
    }
}

impl From<std::io::Error> for TaskError {
    fn from(e: std::io::Error) -> Self {
        TaskError::Io(e.to_string())
    }
}
