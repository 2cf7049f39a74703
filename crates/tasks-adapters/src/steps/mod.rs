//! Steps concretos usados por el catálogo de targets.

pub mod command;
pub mod fs;
pub mod message;
pub mod open;

pub use command::CommandStep;
pub use fs::{CopyFileStep, EnsureDirStep};
pub use message::MessageStep;
pub use open::OpenFileStep;
