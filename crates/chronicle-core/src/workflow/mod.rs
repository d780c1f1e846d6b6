//! Workflow helpers for Chronicle

mod scaffold;
mod validation;
mod version;

pub use scaffold::*;
pub use validation::*;
pub use version::*;
