//! moments-tasks: runner de targets de automatización para el stack CDK de
//! Moments (tests, lint, coverage, diff/synth y documentos de aprendizaje).
pub mod app;
pub mod config;
pub mod errors;
pub mod invocation;
pub mod journal;

pub use config::{RunnerConfig, CONFIG};
pub use errors::CliError;
pub use invocation::Invocation;
