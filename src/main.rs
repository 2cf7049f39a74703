//! moments-tasks - runner de targets del proyecto Moments.
//!
//! Usage:
//!   moments-tasks <target> [stack=<name>]   Run a target
//!   moments-tasks -n <target> [...]         Print the steps without running them
//!   moments-tasks help                      List targets

use std::process::ExitCode;

use moments_tasks::{app, Invocation, CONFIG};
use tracing_subscriber::EnvFilter;

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).ok()
                      .filter(|c| *c != 0)
                      .map(ExitCode::from)
                      .unwrap_or(ExitCode::FAILURE)
}

fn main() -> ExitCode {
    // Cargar .env si existe (MOMENTS_TASKS_*)
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let invocation = match Invocation::parse(std::env::args().skip(1)) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("{e}");
            return exit_code(e.exit_code());
        }
    };

    match app::execute(&invocation, &CONFIG) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            exit_code(e.exit_code())
        }
    }
}
