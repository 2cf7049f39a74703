//! Runner de procesos real.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;
use tasks_core::{CommandSpec, ProcessRunner, TaskError};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Un programa relativo con separador (`.venv/bin/coverage`) se resuelve
    /// contra `cwd`; un nombre simple se busca en `PATH`.
    fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
        let path = Path::new(program);
        if path.is_relative() && path.components().count() > 1 {
            cwd.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> Result<i32, TaskError> {
        debug!("[tasks-adapters] exec: {spec}");
        let mut cmd = Command::new(Self::resolve_program(&spec.program, cwd));
        cmd.args(&spec.args)
           .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
           .current_dir(cwd);
        if spec.quiet {
            cmd.stdout(Stdio::null());
        }
        let status = cmd.status().map_err(|e| match e.kind() {
                                     ErrorKind::NotFound => TaskError::ToolNotFound { program: spec.program.clone() },
                                     ErrorKind::PermissionDenied => {
                                         TaskError::ToolNotExecutable { program: spec.program.clone() }
                                     }
                                     _ => TaskError::Io(format!("failed to run `{}`: {e}", spec.program)),
                                 })?;
        // Terminado por señal: sin código, se reporta como fallo genérico
        Ok(status.code().unwrap_or(1))
    }
}
