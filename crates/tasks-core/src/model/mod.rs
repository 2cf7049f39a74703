//! Modelos neutrales de una invocación (variables, contexto de ejecución).

pub mod context;
pub mod variables;

pub use context::ExecutionContext;
pub use variables::Variables;
