//! tasks-adapters: Steps concretos, runner de procesos real y catálogo de
//! targets del proyecto Moments.
//!
//! Este crate provee:
//! - `SystemProcessRunner`: implementación de `ProcessRunner` sobre
//!   `std::process::Command`.
//! - Steps: `CommandStep`, `EnsureDirStep`, `CopyFileStep`, `OpenFileStep`,
//!   `MessageStep`.
//! - `catalog`: los targets invocables (`test`, `lint`, `synth-moments-app`, ...).

pub mod catalog;
pub mod process;
pub mod steps;

pub use catalog::{find_target, targets, ToolConfig};
pub use process::SystemProcessRunner;
