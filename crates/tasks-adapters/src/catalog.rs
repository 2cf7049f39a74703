//! Catálogo de targets del proyecto Moments.
//!
//! Cada target es una secuencia fija de steps. Los nombres de las
//! herramientas vienen de `ToolConfig` para poder sustituirlas (CI, tests).

use tasks_core::repo::{build_target_definition, TargetDefinition};
use tasks_core::StepDefinition;

use crate::steps::{CommandStep, CopyFileStep, EnsureDirStep, MessageStep, OpenFileStep};

pub const STACK_VAR: &str = "stack";
pub const MOMENTS_APP_STACK: &str = "MomentsAppStack";
pub const CDK_OUT_TEMPLATE: &str = "cdk.out/MomentsAppStack.template.json";
pub const SNAPSHOT_DIR: &str = "tests/unit/snapshots/test_stack_snapshot/synthesized";
pub const COVERAGE_HTML_INDEX: &str = "build/coverage-html/index.html";
pub const COVERAGE_XML: &str = "coverage.xml";
pub const UNIT_TESTS_DIR: &str = "tests/unit";
pub const MENTOR_DOCS: [&str; 2] = ["docs/mentor/cdk_stack_walkthrough.md", "docs/mentor/testing_strategy.md"];

/// Herramientas externas que lanzan los targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Gestor de dependencias; sus comandos corren vía `uv run`.
    pub uv: String,
    pub cdk: String,
    /// Entorno virtual usado directamente por `test-cov`.
    pub venv: String,
    /// Visor de los documentos de `mentor`.
    pub viewer: String,
    /// Visores probados en orden por `coverage`.
    pub openers: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { uv: "uv".into(),
               cdk: "cdk".into(),
               venv: ".venv".into(),
               viewer: "open".into(),
               openers: vec!["open".into(), "xdg-open".into()] }
    }
}

impl ToolConfig {
    fn venv_bin(&self, program: &str) -> String {
        format!("{}/bin/{program}", self.venv.trim_end_matches('/'))
    }
}

/// Nombres de todos los targets, en el orden en que se listan en `help`.
pub const TARGET_NAMES: [&str; 8] = ["test",
                                     "test-fast",
                                     "test-cov",
                                     "lint",
                                     "coverage",
                                     "diff-moments-app",
                                     "synth-moments-app",
                                     "mentor"];

fn format_check(tools: &ToolConfig) -> CommandStep {
    CommandStep::new("format-check", tools.uv.clone()).args(["run", "black", "--check", "."])
}

fn boxed<S: StepDefinition + 'static>(step: S) -> Box<dyn StepDefinition> {
    Box::new(step)
}

fn test_target(tools: &ToolConfig) -> TargetDefinition {
    let pytest = CommandStep::new("pytest-cov", tools.uv.clone()).args(["run",
                                                                        "pytest",
                                                                        "--cov={stack}",
                                                                        "--cov-report=term-missing",
                                                                        "--cov-report=xml:coverage.xml"])
                                                                 .env("PYTHONPATH", ".");
    build_target_definition("test",
                            "Format check, then tests with coverage (terminal summary + coverage.xml)",
                            &[STACK_VAR],
                            vec![boxed(format_check(tools)), boxed(pytest)])
}

fn test_fast_target(tools: &ToolConfig) -> TargetDefinition {
    let pytest = CommandStep::new("pytest-fast", tools.uv.clone()).args(["run", "pytest", UNIT_TESTS_DIR, "-q", "-k", "{stack}"])
                                                                  .env("PYTHONPATH", ".")
                                                                  .env("CDK_DISABLE_BUNDLING", "1")
                                                                  .env("CDK_DISABLE_ASSET_STAGING", "1")
                                                                  .env("PYTEST_DISABLE_PLUGIN_AUTOLOAD", "1");
    build_target_definition("test-fast",
                            "Unit tests without asset bundling, staging or pytest plugins",
                            &[STACK_VAR],
                            vec![boxed(pytest)])
}

fn test_cov_target(tools: &ToolConfig) -> TargetDefinition {
    let coverage = tools.venv_bin("coverage");
    let run = CommandStep::new("coverage-run", coverage.clone()).args(["run",
                                                                       "--source={stack}",
                                                                       "-m",
                                                                       "pytest",
                                                                       UNIT_TESTS_DIR])
                                                                .env("PYTHONPATH", ".");
    let xml = CommandStep::new("coverage-xml", coverage.clone()).args(["xml", "-o", COVERAGE_XML]);
    let report = CommandStep::new("coverage-report", coverage).args(["report"]);
    build_target_definition("test-cov",
                            "Coverage run through the virtualenv for CI (coverage.xml + terminal summary)",
                            &[STACK_VAR],
                            vec![boxed(run), boxed(xml), boxed(report)])
}

fn lint_target(tools: &ToolConfig) -> TargetDefinition {
    build_target_definition("lint", "Format check only", &[STACK_VAR], vec![boxed(format_check(tools))])
}

fn coverage_target(tools: &ToolConfig) -> TargetDefinition {
    let open = OpenFileStep::new("open-report",
                                 COVERAGE_HTML_INDEX,
                                 tools.openers.clone(),
                                 format!("Coverage report not found at {COVERAGE_HTML_INDEX}. Run `test stack=<name>` first."));
    build_target_definition("coverage", "Open the HTML coverage report", &[], vec![boxed(open)])
}

fn diff_target(tools: &ToolConfig) -> TargetDefinition {
    let diff = CommandStep::new("cdk-diff", tools.cdk.clone()).args(["diff", MOMENTS_APP_STACK]);
    build_target_definition("diff-moments-app",
                            "Infrastructure diff of MomentsAppStack",
                            &[],
                            vec![boxed(diff)])
}

fn synth_target(tools: &ToolConfig) -> TargetDefinition {
    let steps = vec![boxed(MessageStep::new("announce", format!("Synthesizing {MOMENTS_APP_STACK}..."))),
                     boxed(CommandStep::new("cdk-synth", tools.cdk.clone()).args(["synth", MOMENTS_APP_STACK])
                                                                           .quiet()),
                     boxed(EnsureDirStep::new("snapshot-dir", SNAPSHOT_DIR)),
                     boxed(CopyFileStep::new("copy-template", CDK_OUT_TEMPLATE, SNAPSHOT_DIR)),
                     boxed(MessageStep::new("done",
                                            format!("Snapshot updated: {SNAPSHOT_DIR}/{MOMENTS_APP_STACK}.template.json")))];
    build_target_definition("synth-moments-app",
                            "Synthesize MomentsAppStack and refresh the template snapshot",
                            &[],
                            steps)
}

fn mentor_target(tools: &ToolConfig) -> TargetDefinition {
    let steps = vec![boxed(MessageStep::new("announce", "Opening mentor documents...")),
                     boxed(CommandStep::new("open-docs", tools.viewer.clone()).args(MENTOR_DOCS)),
                     boxed(MessageStep::new("done", "Mentor documents opened."))];
    build_target_definition("mentor", "Open the learning documents", &[], steps)
}

/// Todos los targets, en el orden de `TARGET_NAMES`.
pub fn targets(tools: &ToolConfig) -> Vec<TargetDefinition> {
    vec![test_target(tools),
         test_fast_target(tools),
         test_cov_target(tools),
         lint_target(tools),
         coverage_target(tools),
         diff_target(tools),
         synth_target(tools),
         mentor_target(tools)]
}

pub fn find_target(name: &str, tools: &ToolConfig) -> Option<TargetDefinition> {
    targets(tools).into_iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasks_core::Variables;

    #[test]
    fn catalog_matches_target_names() {
        let names: Vec<String> = targets(&ToolConfig::default()).into_iter().map(|t| t.name).collect();
        assert_eq!(names, TARGET_NAMES);
    }

    #[test]
    fn only_test_targets_require_stack() {
        for t in targets(&ToolConfig::default()) {
            let expects_stack = matches!(t.name.as_str(), "test" | "test-fast" | "test-cov" | "lint");
            assert_eq!(t.required == vec![STACK_VAR.to_string()], expects_stack, "target {}", t.name);
        }
    }

    #[test]
    fn test_cov_uses_virtualenv_directly() {
        let tools = ToolConfig { venv: "/opt/venv/".into(),
                                 ..Default::default() };
        let t = find_target("test-cov", &tools).unwrap();
        let vars: Variables = [("stack", "moments_app")].into_iter().collect();
        let first = t.steps[0].describe(&t.name, &vars).unwrap();
        assert_eq!(first, "PYTHONPATH=. /opt/venv/bin/coverage run --source=moments_app -m pytest tests/unit");
    }

    #[test]
    fn unknown_target_is_none() {
        assert!(find_target("deploy", &ToolConfig::default()).is_none());
    }
}
