//! Ejecución de una invocación: resolver el target, correrlo (o sólo
//! describirlo en dry run) y volcar los eventos al journal si está activo.
use std::fmt::Write as _;

use log::{debug, warn};
use tasks_adapters::catalog::targets;
use tasks_adapters::{find_target, SystemProcessRunner, ToolConfig};
use tasks_core::{ProcessRunner, TaskEngine};

use crate::config::RunnerConfig;
use crate::errors::CliError;
use crate::invocation::Invocation;
use crate::journal;

/// Texto de `help`: uso, flags y un renglón por target.
pub fn render_help(tools: &ToolConfig) -> String {
    let mut out = String::from("Usage: moments-tasks [--dry-run] [--journal <path>] <target> [key=value ...]\n\nTargets:\n");
    for t in targets(tools) {
        let vars: Vec<String> = t.required.iter().map(|v| format!("{v}=<name>")).collect();
        let _ = writeln!(out, "  {:<18} {:<14} {}", t.name, vars.join(" "), t.description);
    }
    let _ = writeln!(out, "  {:<18} {:<14} {}", "help", "", "Show this message");
    out
}

pub fn execute(invocation: &Invocation, config: &RunnerConfig) -> Result<(), CliError> {
    execute_with(invocation, config, SystemProcessRunner)
}

/// Igual que `execute` pero con un `ProcessRunner` arbitrario.
pub fn execute_with<P: ProcessRunner>(invocation: &Invocation,
                                      config: &RunnerConfig,
                                      runner: P)
                                      -> Result<(), CliError> {
    let name = match invocation.target.as_deref() {
        None | Some("help") => {
            print!("{}", render_help(&config.tools));
            return Ok(());
        }
        Some(name) => name,
    };
    let definition = find_target(name, &config.tools).ok_or_else(|| CliError::UnknownTarget(name.to_string()))?;
    let mut engine = TaskEngine::in_memory(runner, config.root.clone());

    if invocation.dry_run {
        for line in engine.plan(&definition, &invocation.variables)? {
            println!("{line}");
        }
        return Ok(());
    }

    let result = engine.run_target(&definition, &invocation.variables);

    let journal_path = invocation.journal.as_ref().or(config.journal.as_ref());
    if let (Some(path), Some(run_id)) = (journal_path, engine.last_run_id()) {
        match journal::append_events(path, &definition.name, &engine.events_for(run_id)) {
            Ok(n) => debug!("journal: {n} eventos -> {}", path.display()),
            Err(e) => warn!("journal {} no escrito: {e}", path.display()),
        }
    }

    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;
    use tasks_core::{CommandSpec, TaskError};

    #[derive(Default)]
    struct CountingRunner {
        calls: RefCell<usize>,
    }

    impl ProcessRunner for CountingRunner {
        fn run(&self, _spec: &CommandSpec, _cwd: &Path) -> Result<i32, TaskError> {
            *self.calls.borrow_mut() += 1;
            Ok(0)
        }
    }

    fn config(root: &Path) -> RunnerConfig {
        RunnerConfig { root: root.to_path_buf(),
                       tools: ToolConfig::default(),
                       journal: None }
    }

    #[test]
    fn help_lists_every_target() {
        let help = render_help(&ToolConfig::default());
        for name in tasks_adapters::catalog::TARGET_NAMES {
            assert!(help.contains(name), "help should mention {name}");
        }
        assert!(help.contains("stack=<name>"));
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CountingRunner::default();
        let inv = Invocation::parse(["-n", "test", "stack=moments_app"]).unwrap();

        execute_with(&inv, &config(dir.path()), &runner).unwrap();

        assert_eq!(*runner.calls.borrow(), 0);
    }

    #[test]
    fn dry_run_still_checks_required_variables() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::parse(["-n", "lint"]).unwrap();

        let err = execute_with(&inv, &config(dir.path()), &CountingRunner::default()).unwrap_err();

        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::parse(["deploy"]).unwrap();

        let err = execute_with(&inv, &config(dir.path()), &CountingRunner::default()).unwrap_err();

        assert!(matches!(err, CliError::UnknownTarget(ref t) if t == "deploy"));
    }

    #[test]
    fn journal_records_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("journal.jsonl");
        let inv = Invocation::parse(["diff-moments-app"]).unwrap();
        let cfg = RunnerConfig { journal: Some(journal.clone()),
                                 ..config(dir.path()) };
        let runner = CountingRunner::default();

        execute_with(&inv, &cfg, &runner).unwrap();

        assert_eq!(*runner.calls.borrow(), 1);
        let text = std::fs::read_to_string(journal).unwrap();
        // I, S, F, C
        assert_eq!(text.lines().count(), 4);
    }
}
