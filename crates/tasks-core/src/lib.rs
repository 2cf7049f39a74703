//! tasks-core: Motor lineal fail-fast para targets de automatización.
//!
//! Un target es una secuencia ordenada de steps. El engine valida las
//! variables requeridas, ejecuta cada step en orden y se detiene en el primer
//! fallo. Cada ejecución emite eventos a un `EventStore` append-only.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod process;
pub mod repo;
pub mod step;

pub use engine::TaskEngine;
pub use errors::TaskError;
pub use event::{EventStore, InMemoryEventStore, TaskEvent, TaskEventKind};
pub use model::{ExecutionContext, Variables};
pub use process::{CommandSpec, ProcessRunner};
pub use repo::{build_target_definition, InMemoryTargetRepository, TargetDefinition, TargetRepository};
pub use step::{StepDefinition, StepRunResult, StepSignal, StepStatus};
