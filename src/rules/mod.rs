//! Static rule tables: parameter dictionary, reference ranges, severity
//! policy and recommendation texts.
//!
//! A [`RuleBook`] is built once (builtin tables, optionally overridden by a
//! JSON rule file) and then shared read-only across pipeline invocations.

pub mod dictionary;
pub mod ranges;
pub mod recommendations;
pub mod severity;

pub use dictionary::*;
pub use ranges::*;
pub use recommendations::*;
pub use severity::*;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rule file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid reference range for {name}: low {low} must not exceed high {high}")]
    InvalidRange { name: String, low: f64, high: f64 },

    #[error("Invalid severity threshold {field}: {value}")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Parameter {0} has no synonyms")]
    EmptySynonyms(String),
}

/// Every lookup table the pipeline reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleBook {
    pub dictionary: ParameterDictionary,
    pub ranges: RangeTable,
    pub severity: SeverityPolicy,
    pub recommendations: RecommendationTable,
}

/// Partial rule file. Each present section replaces the builtin one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverrides {
    #[serde(default)]
    pub dictionary: Option<ParameterDictionary>,
    #[serde(default)]
    pub ranges: Option<RangeTable>,
    #[serde(default)]
    pub severity: Option<SeverityPolicy>,
    #[serde(default)]
    pub recommendations: Option<RecommendationTable>,
}

impl RuleBook {
    pub fn builtin() -> Self {
        Self {
            dictionary: ParameterDictionary::builtin(),
            ranges: RangeTable::builtin(),
            severity: SeverityPolicy::builtin(),
            recommendations: RecommendationTable::builtin(),
        }
    }

    /// Builtin tables with the sections present in `overrides` swapped in.
    pub fn with_overrides(overrides: RuleOverrides) -> Result<Self, ConfigError> {
        let builtin = Self::builtin();
        let book = Self {
            dictionary: overrides.dictionary.map_or(builtin.dictionary, |d| {
                ParameterDictionary::new(d.entries().to_vec())
            }),
            ranges: overrides.ranges.map_or(builtin.ranges, RangeTable::normalized),
            severity: overrides.severity.map_or(builtin.severity, SeverityPolicy::normalized),
            recommendations: overrides
                .recommendations
                .map_or(builtin.recommendations, RecommendationTable::normalized),
        };
        book.validate()?;
        Ok(book)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let overrides: RuleOverrides = serde_json::from_str(json)?;
        Self::with_overrides(overrides)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            parameters = book.dictionary.len(),
            ranges = book.ranges.len(),
            "Loaded rule file"
        );
        Ok(book)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in self.dictionary.entries() {
            if entry.synonyms.iter().all(|s| s.is_empty()) {
                return Err(ConfigError::EmptySynonyms(entry.name.clone()));
            }
        }

        for (name, by_sex) in self.ranges.iter() {
            for (_, range) in by_sex.iter() {
                if !range.low.is_finite() || !range.high.is_finite() || range.low > range.high {
                    return Err(ConfigError::InvalidRange {
                        name: name.to_string(),
                        low: range.low,
                        high: range.high,
                    });
                }
            }
        }

        let policy = &self.severity;
        let named = [
            ("low_moderate_fraction", policy.low_moderate_fraction),
            ("monitor_multiplier", policy.monitor_multiplier),
            ("default_urgent_multiplier", policy.default_urgent_multiplier),
        ];
        let overrides = policy
            .urgent_overrides
            .iter()
            .map(|(name, value)| (name.as_str(), *value));
        for (field, value) in named.into_iter().chain(overrides) {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}
