pub mod explain;
pub mod interpreter;

pub use interpreter::*;

use thiserror::Error;

/// Per-fact interpretation failures. Never surfaced to the caller: each one
/// degrades its fact to `status = unknown`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpretationError {
    #[error("No reference range configured for {name}")]
    UnconfiguredParameter { name: String },

    #[error("Severity for {name} is not a finite number")]
    NonFiniteSeverity { name: String },
}
