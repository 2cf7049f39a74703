use tasks_core::TaskError;
use thiserror::Error;

/// Errores del binario: invocación inválida o fallo del target.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown target `{0}` (run `moments-tasks help` to list targets)")]
    UnknownTarget(String),
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),
    #[error(transparent)]
    Task(#[from] TaskError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownTarget(_) | CliError::InvalidInvocation(_) => 2,
            CliError::Task(e) => e.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(CliError::UnknownTarget("deploy".into()).exit_code(), 2);
        assert_eq!(CliError::InvalidInvocation("stray".into()).exit_code(), 2);
    }

    #[test]
    fn task_errors_keep_their_code_and_message() {
        let err: CliError = TaskError::MissingArgument { variable: "stack".into(),
                                                         target: "lint".into() }.into();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Please specify a stack name (usage: lint stack=<name>)");
    }
}
