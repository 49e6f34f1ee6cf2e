use serde::{Deserialize, Serialize};

/// Phrase substituted for assertive diagnostic language.
pub const HEDGE_PHRASE: &str = "may be compatible with";

/// Marker substituted for medication amounts.
pub const DOSAGE_REDACTION: &str = "[dosage removed]";

/// Appended to every non-empty sanitized text, at most once.
pub const DISCLAIMER: &str =
    "Disclaimer: This is an educational summary and not a medical diagnosis. Consult a clinician.";

/// Separator placed between the text and [`DISCLAIMER`].
pub const DISCLAIMER_SEPARATOR: &str = "\n\n";

/// Classification of rewritten content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewriteCategory {
    /// "you have [condition]" and similar assertions.
    DiagnosticLanguage,
    /// Amount + mass/volume unit, optionally with "take"/"start".
    DosageInstruction,
}

/// One rule that fired during sanitization. Carries no patient text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rewrite {
    pub category: RewriteCategory,
    pub rule: String,
    pub occurrences: usize,
}

/// Sanitized text plus an audit trail of what changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SanitizedText {
    pub text: String,
    pub rewrites: Vec<Rewrite>,
    pub disclaimer_appended: bool,
}

impl SanitizedText {
    pub fn was_rewritten(&self) -> bool {
        !self.rewrites.is_empty()
    }

    pub fn count(&self, category: RewriteCategory) -> usize {
        self.rewrites
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.occurrences)
            .sum()
    }
}
