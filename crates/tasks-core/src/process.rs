//! Puerto para lanzar procesos externos.
//!
//! El core sólo describe el comando (`CommandSpec`); la implementación real
//! vive en `tasks-adapters` y los tests usan runners falsos que registran
//! las invocaciones.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::TaskError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Variables de entorno añadidas al entorno heredado.
    pub envs: Vec<(String, String)>,
    /// Descarta stdout del proceso (equivalente a `> /dev/null`).
    pub quiet: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(),
               args: Vec::new(),
               envs: Vec::new(),
               quiet: false }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
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

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Forma legible tipo shell: `K=V programa arg1 arg2 [> /dev/null]`.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.envs {
            write!(f, "{k}={v} ")?;
        }
        write!(f, "{}", self.program)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        if self.quiet {
            write!(f, " > /dev/null")?;
        }
        Ok(())
    }
}

/// Ejecuta un comando de forma bloqueante y devuelve su código de salida.
///
/// `Err` se reserva para fallos al lanzar el proceso; un código distinto de
/// cero es un `Ok` y lo interpreta el step.
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> Result<i32, TaskError>;
}

impl<P: ProcessRunner + ?Sized> ProcessRunner for &P {
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> Result<i32, TaskError> {
        (**self).run(spec, cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_env_and_redirect() {
        let spec = CommandSpec::new("cdk").args(["synth", "MomentsAppStack"])
                                          .env("PYTHONPATH", ".")
                                          .quiet(true);
        assert_eq!(spec.to_string(), "PYTHONPATH=. cdk synth MomentsAppStack > /dev/null");
    }
}
