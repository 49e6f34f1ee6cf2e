//! Labsight: rule-based lab report interpretation.
//!
//! Free-text lab reports go through four stages: parameter extraction,
//! range-based interpretation, safety rewriting and recommendation lookup.
//! The output is advisory only; it is not a diagnosis.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod rules;

pub use models::{ExtractedFact, InterpretedFact, Recommendation, Risk, SexCategory, Status, Urgency};
pub use pipeline::{LabReportPipeline, PipelineError, PipelineResult};
pub use rules::RuleBook;

use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber. `RUST_LOG` wins over the default
/// filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
