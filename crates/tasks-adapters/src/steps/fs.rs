//! Steps de filesystem: crear el directorio de snapshot y copiar el template
//! sintetizado dentro de él.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{json, Value};
use tasks_core::hashing::hash_bytes;
use tasks_core::step::{StepDefinition, StepRunResult};
use tasks_core::{ExecutionContext, TaskError, Variables};

/// `mkdir -p <dir>` relativo a la raíz del proyecto.
#[derive(Debug, Clone)]
pub struct EnsureDirStep {
    id: String,
    dir: String,
}

impl EnsureDirStep {
    pub fn new(id: impl Into<String>, dir: impl Into<String>) -> Self {
        Self { id: id.into(),
               dir: dir.into() }
    }
}

impl StepDefinition for EnsureDirStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_params(&self) -> Value {
        json!({ "dir": self.dir })
    }

    fn describe(&self, _target: &str, _variables: &Variables) -> Result<String, TaskError> {
        Ok(format!("mkdir -p {}", self.dir))
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        match fs::create_dir_all(ctx.resolve(&self.dir)) {
            Ok(()) => StepRunResult::Success { outputs: vec![self.dir.clone()] },
            Err(e) => StepRunResult::Failure { error: e.into() },
        }
    }
}

/// Copia `source` dentro de `dest_dir` conservando el nombre de archivo y
/// verifica que el contenido copiado sea idéntico (digest blake3).
#[derive(Debug, Clone)]
pub struct CopyFileStep {
    id: String,
    source: String,
    dest_dir: String,
}

impl CopyFileStep {
    pub fn new(id: impl Into<String>, source: impl Into<String>, dest_dir: impl Into<String>) -> Self {
        Self { id: id.into(),
               source: source.into(),
               dest_dir: dest_dir.into() }
    }

    fn copy_verified(&self, root: &Path) -> Result<String, TaskError> {
        let src = root.join(&self.source);
        if !src.is_file() {
            return Err(TaskError::ArtifactNotFound { path: self.source.clone() });
        }
        let file_name = src.file_name()
                           .ok_or_else(|| TaskError::Internal(format!("`{}` has no file name", self.source)))?;
        let dest = root.join(&self.dest_dir).join(file_name);
        fs::copy(&src, &dest)?;

        let src_digest = hash_bytes(&fs::read(&src)?);
        let dest_digest = hash_bytes(&fs::read(&dest)?);
        if src_digest != dest_digest {
            return Err(TaskError::Io(format!("copy of `{}` does not match its source", self.source)));
        }
        debug!("[tasks-adapters] {} -> {} ({})", self.source, dest.display(), src_digest);
        Ok(src_digest)
    }
}

impl StepDefinition for CopyFileStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_params(&self) -> Value {
        json!({ "source": self.source, "dest_dir": self.dest_dir })
    }

    fn describe(&self, _target: &str, _variables: &Variables) -> Result<String, TaskError> {
        Ok(format!("cp {} {}/", self.source, self.dest_dir))
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        match self.copy_verified(ctx.root) {
            Ok(digest) => StepRunResult::Success { outputs: vec![format!("blake3:{digest}")] },
            Err(error) => StepRunResult::Failure { error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasks_core::{CommandSpec, ProcessRunner};

    struct NoProcesses;

    impl ProcessRunner for NoProcesses {
        fn run(&self, spec: &CommandSpec, _cwd: &Path) -> Result<i32, TaskError> {
            panic!("unexpected process: {spec}");
        }
    }

    fn ctx<'a>(root: &'a Path, vars: &'a Variables) -> ExecutionContext<'a> {
        ExecutionContext { target: "synth-moments-app",
                           variables: vars,
                           root,
                           runner: &NoProcesses }
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let vars = Variables::new();
        let step = EnsureDirStep::new("mkdir", "a/b/c");

        assert!(matches!(step.run(&ctx(dir.path(), &vars)), StepRunResult::Success { .. }));
        assert!(dir.path().join("a/b/c").is_dir());
        // idempotente
        assert!(matches!(step.run(&ctx(dir.path(), &vars)), StepRunResult::Success { .. }));
    }

    #[test]
    fn copy_preserves_content_and_reports_digest() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::create_dir_all(dir.path().join("snap")).unwrap();
        fs::write(dir.path().join("out/T.template.json"), b"{\"Resources\":{}}").unwrap();
        let vars = Variables::new();
        let step = CopyFileStep::new("copy", "out/T.template.json", "snap");

        match step.run(&ctx(dir.path(), &vars)) {
            StepRunResult::Success { outputs } => {
                assert_eq!(outputs, vec![format!("blake3:{}", hash_bytes(b"{\"Resources\":{}}"))]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(fs::read(dir.path().join("snap/T.template.json")).unwrap(), b"{\"Resources\":{}}");
    }

    #[test]
    fn copy_of_missing_source_is_artifact_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let vars = Variables::new();
        let step = CopyFileStep::new("copy", "cdk.out/Missing.template.json", "snap");

        match step.run(&ctx(dir.path(), &vars)) {
            StepRunResult::Failure { error: TaskError::ArtifactNotFound { path } } => {
                assert_eq!(path, "cdk.out/Missing.template.json");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
