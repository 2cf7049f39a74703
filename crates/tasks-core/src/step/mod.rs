//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de trabajo de un target (un proceso externo, una
//! operación de filesystem o un mensaje). Este módulo define:
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `StepRunResult` y señales (`StepSignal`).
//! - `StepStatus`: estado reconstruido por el repositorio.

pub mod definition;
mod run_result;
mod status;

pub use definition::StepDefinition;
pub use run_result::{StepRunResult, StepSignal};
pub use status::StepStatus;
