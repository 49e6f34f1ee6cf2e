use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::enums::{Risk, Status, Urgency};

/// One parameter mention found in a report line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFact {
    /// Canonical parameter name (e.g. `hemoglobin`).
    pub name: String,
    /// Measured value; `None` when the line mentions the parameter without a number.
    pub value: Option<f64>,
    /// Canonical unit spelling, or empty when no unit followed the value.
    pub unit: String,
    /// The lowercased, trimmed line the fact came from.
    pub raw_line: String,
}

impl ExtractedFact {
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// An extracted fact annotated against its reference range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretedFact {
    #[serde(flatten)]
    pub fact: ExtractedFact,
    pub status: Status,
    pub risk: Risk,
    pub urgency: Urgency,
    pub explanation: String,
    pub suggested_action: String,
}

impl InterpretedFact {
    pub fn name(&self) -> &str {
        &self.fact.name
    }
}

/// Advisory texts for one marker/status pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub marker: String,
    pub status: String,
    pub recommendation_texts: BTreeSet<String>,
}
