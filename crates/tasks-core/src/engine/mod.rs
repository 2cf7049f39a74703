//! Engine module for TaskEngine implementation
//!
//! Runs a target's steps in order with fail-fast semantics and records every
//! transition in the event store.

pub mod core;

pub use core::TaskEngine;

pub use crate::event::{EventStore, InMemoryEventStore, TaskEvent, TaskEventKind};
pub use crate::repo::{TargetDefinition, TargetRepository, InMemoryTargetRepository};
pub use crate::step::{StepRunResult, StepStatus};
