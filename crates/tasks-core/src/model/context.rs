use std::path::{Path, PathBuf};

use super::Variables;
use crate::process::ProcessRunner;

/// Contexto de ejecución entregado a `StepDefinition::run`.
pub struct ExecutionContext<'a> {
    pub target: &'a str,
    pub variables: &'a Variables,
    /// Raíz del proyecto; las rutas relativas de los steps se resuelven aquí.
    pub root: &'a Path,
    pub runner: &'a dyn ProcessRunner,
}

impl ExecutionContext<'_> {
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}
