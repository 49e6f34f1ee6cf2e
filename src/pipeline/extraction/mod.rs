pub mod extractor;

pub use extractor::*;

use thiserror::Error;

use crate::models::ExtractedFact;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Report text is empty")]
    EmptyInput,

    #[error("Malformed numeric value for {name}")]
    MalformedValue { name: String },
}

/// Turns raw report text into parameter facts.
pub trait FactExtractor {
    fn extract(&self, report_text: &str) -> Result<Vec<ExtractedFact>, ExtractionError>;
}
