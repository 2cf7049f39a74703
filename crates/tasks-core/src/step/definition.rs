use serde_json::Value;

use crate::errors::TaskError;
use crate::model::{ExecutionContext, Variables};
use super::run_result::StepRunResult;

/// Trait que define un Step.
pub trait StepDefinition {
    /// Identificador estable y único dentro del target.
    fn id(&self) -> &str;

    /// Parámetros estáticos del step; participan en el `definition_hash`.
    fn base_params(&self) -> Value;

    /// Descripción de lo que haría el step con estas variables (dry run).
    fn describe(&self, target: &str, variables: &Variables) -> Result<String, TaskError>;

    /// Ejecución bloqueante del step.
    fn run(&self, ctx: &ExecutionContext) -> StepRunResult;
}
