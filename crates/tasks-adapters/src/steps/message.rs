//! MessageStep: imprime una línea de progreso (el `@echo` de una receta).

use serde_json::{json, Value};
use tasks_core::step::{StepDefinition, StepRunResult};
use tasks_core::{ExecutionContext, TaskError, Variables};

#[derive(Debug, Clone)]
pub struct MessageStep {
    id: String,
    text: String,
}

impl MessageStep {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(),
               text: text.into() }
    }
}

impl StepDefinition for MessageStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_params(&self) -> Value {
        json!({ "text": self.text })
    }

    fn describe(&self, target: &str, variables: &Variables) -> Result<String, TaskError> {
        Ok(format!("echo \"{}\"", variables.render(&self.text, target)?))
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        match ctx.variables.render(&self.text, ctx.target) {
            Ok(line) => {
                println!("{line}");
                StepRunResult::Success { outputs: vec![] }
            }
            Err(error) => StepRunResult::Failure { error },
        }
    }
}
