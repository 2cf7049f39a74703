//! OpenFileStep: abre un reporte con el primer visor disponible.
//!
//! Si el archivo no existe informa al usuario y emite la señal
//! `artifact_not_found`; no es un error. Si ningún visor funciona se imprime
//! la ruta para abrirla a mano.

use log::debug;
use serde_json::{json, Value};
use tasks_core::step::{StepDefinition, StepRunResult, StepSignal};
use tasks_core::{CommandSpec, ExecutionContext, TaskError, Variables};

pub const ARTIFACT_NOT_FOUND_SIGNAL: &str = "artifact_not_found";

#[derive(Debug, Clone)]
pub struct OpenFileStep {
    id: String,
    path: String,
    openers: Vec<String>,
    missing_message: String,
}

impl OpenFileStep {
    pub fn new(id: impl Into<String>,
               path: impl Into<String>,
               openers: Vec<String>,
               missing_message: impl Into<String>)
               -> Self {
        Self { id: id.into(),
               path: path.into(),
               openers,
               missing_message: missing_message.into() }
    }
}

impl StepDefinition for OpenFileStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_params(&self) -> Value {
        json!({ "path": self.path, "openers": self.openers })
    }

    fn describe(&self, _target: &str, _variables: &Variables) -> Result<String, TaskError> {
        let fallback = format!("echo \"{}\"", self.path);
        if self.openers.is_empty() {
            return Ok(format!("[ -f {p} ] && {fallback}", p = self.path));
        }
        let chain: Vec<String> = self.openers.iter().map(|o| format!("{o} {}", self.path)).collect();
        Ok(format!("[ -f {p} ] && ({} || {fallback})", chain.join(" || "), p = self.path))
    }

    fn run(&self, ctx: &ExecutionContext) -> StepRunResult {
        if !ctx.resolve(&self.path).is_file() {
            println!("{}", self.missing_message);
            return StepRunResult::SuccessWithSignals { outputs: vec![],
                                                       signals: vec![StepSignal { signal:
                                                                                      ARTIFACT_NOT_FOUND_SIGNAL.into(),
                                                                                  data: json!({ "path": self.path }) }] };
        }
        for opener in &self.openers {
            let spec = CommandSpec::new(opener.clone()).arg(self.path.clone()).quiet(true);
            match ctx.runner.run(&spec, ctx.root) {
                Ok(0) => return StepRunResult::Success { outputs: vec![format!("opened-with:{opener}")] },
                Ok(code) => debug!("[tasks-adapters] {opener} exited with {code}, trying next viewer"),
                Err(e) => debug!("[tasks-adapters] {opener} unavailable: {e}"),
            }
        }
        println!("Open {} in your browser", ctx.resolve(&self.path).display());
        StepRunResult::Success { outputs: vec!["printed-path".to_string()] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    struct ScriptedRunner {
        codes: Vec<Result<i32, TaskError>>,
        calls: RefCell<Vec<String>>,
    }

    impl tasks_core::ProcessRunner for ScriptedRunner {
        fn run(&self, spec: &CommandSpec, _cwd: &Path) -> Result<i32, TaskError> {
            let n = self.calls.borrow().len();
            self.calls.borrow_mut().push(spec.program.clone());
            self.codes.get(n).cloned().unwrap_or(Ok(0))
        }
    }

    fn step() -> OpenFileStep {
        OpenFileStep::new("open", "report/index.html", vec!["open".into(), "xdg-open".into()], "no report")
    }

    fn run_with(root: &Path, runner: &ScriptedRunner) -> StepRunResult {
        let vars = Variables::new();
        let ctx = ExecutionContext { target: "coverage",
                                     variables: &vars,
                                     root,
                                     runner };
        step().run(&ctx)
    }

    fn with_report() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("report")).unwrap();
        std::fs::write(dir.path().join("report/index.html"), "<html></html>").unwrap();
        dir
    }

    #[test]
    fn missing_report_signals_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner { codes: vec![], calls: RefCell::new(vec![]) };

        let res = run_with(dir.path(), &runner);

        assert!(matches!(res, StepRunResult::SuccessWithSignals { ref signals, .. }
                         if signals[0].signal == ARTIFACT_NOT_FOUND_SIGNAL));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn falls_back_to_second_viewer() {
        let dir = with_report();
        let runner = ScriptedRunner { codes: vec![Err(TaskError::ToolNotFound { program: "open".into() }), Ok(0)],
                                      calls: RefCell::new(vec![]) };

        let res = run_with(dir.path(), &runner);

        assert!(matches!(res, StepRunResult::Success { ref outputs } if outputs[0] == "opened-with:xdg-open"));
        assert_eq!(*runner.calls.borrow(), vec!["open", "xdg-open"]);
    }

    #[test]
    fn prints_path_when_no_viewer_works() {
        let dir = with_report();
        let runner = ScriptedRunner { codes: vec![Ok(1), Ok(2)], calls: RefCell::new(vec![]) };

        let res = run_with(dir.path(), &runner);

        assert!(matches!(res, StepRunResult::Success { ref outputs } if outputs[0] == "printed-path"));
    }

    #[test]
    fn describe_chains_viewers_then_echo() {
        let out = step().describe("coverage", &Variables::new()).unwrap();
        assert_eq!(out,
                   "[ -f report/index.html ] && (open report/index.html || xdg-open report/index.html || echo \"report/index.html\")");
    }

    #[test]
    fn describe_without_viewers_only_echoes() {
        let bare = OpenFileStep::new("open", "report/index.html", vec![], "no report");
        let out = bare.describe("coverage", &Variables::new()).unwrap();
        assert_eq!(out, "[ -f report/index.html ] && echo \"report/index.html\"");
    }
}
