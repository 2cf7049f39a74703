//! CommandStep: lanza un proceso externo y propaga su código de salida.
//!
//! Los argumentos y los valores de entorno son plantillas: `{stack}` se
//! sustituye por la variable de la invocación antes de lanzar el proceso.

use serde_json::{json, Value};
use tasks_core::step::{StepDefinition, StepRunResult};
use tasks_core::{CommandSpec, ExecutionContext, TaskError, Variables};

#[derive(Debug, Clone)]
pub struct CommandStep {
    id: String,
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    quiet: bool,
}

impl CommandStep {
    pub fn new(id: impl Into<String>, program: impl Into<String>) -> Self {
        Self { id: id.into(),
               program: program.into(),
               args: Vec::new(),
               envs: Vec::new(),
               quiet: false }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Descarta la salida estándar del proceso.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    fn spec(&self, target: &str, variables: &Variables) -> Result<CommandSpec, TaskError> {
        let mut spec = CommandSpec::new(self.program.clone()).quiet(self.quiet);
        for a in &self.args {
            spec = spec.arg(variables.render(a, target)?);
        }
        for (k, v) in &self.envs {
            spec = spec.env(k.clone(), variables.render(v, target)?);
        }
        Ok(spec)
    }
}

impl StepDefinition for CommandStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_params(&self) -> Value {
        json!({
            "program": self.program,
            "args": self.args,
            "envs": self.envs,
            "quiet": self.quiet,
        })
    }

    fn describe(&self, target: &str, variables: &Variables) -> Result<String, TaskError> {
        Ok(self.spec(target, variables)?.to_string())
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        let spec = match self.spec(ctx.target, ctx.variables) {
            Ok(s) => s,
            Err(error) => return StepRunResult::Failure { error },
        };
        match ctx.runner.run(&spec, ctx.root) {
            Ok(0) => StepRunResult::Success { outputs: vec!["exit:0".to_string()] },
            Ok(code) => StepRunResult::Failure { error: TaskError::ExternalToolFailure { program: self.program.clone(),
                                                                                          code } },
            Err(error) => StepRunResult::Failure { error },
        }
    }
}
