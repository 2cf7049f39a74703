pub mod types;
pub use types::{build_target_definition, InMemoryTargetRepository, StepSlot, TargetDefinition, TargetInstance, TargetRepository};
