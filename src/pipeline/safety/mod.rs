//! Output safety filter.
//!
//! Diagnostic assertions are hedged ("may be compatible with"), medication
//! amounts are redacted, and a disclaimer is appended exactly once.

pub mod filter;
pub mod patterns;
pub mod types;

pub use filter::*;
pub use types::*;
