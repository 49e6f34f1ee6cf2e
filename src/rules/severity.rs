//! Severity heuristics used to grade out-of-range values.
//!
//! The thresholds are policy, not derived behavior, so they live here as
//! data the interpreter reads rather than literals inside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dictionary::canonical_name;

/// Fraction below `low` above which a low value counts as moderate risk.
pub const DEFAULT_LOW_MODERATE_FRACTION: f64 = 0.25;
/// Multiplier of `high` at which a high value starts to need monitoring.
pub const DEFAULT_MONITOR_MULTIPLIER: f64 = 1.5;
/// Multiplier of `high` at which a high value becomes urgent, unless overridden.
pub const DEFAULT_URGENT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPolicy {
    pub low_moderate_fraction: f64,
    pub monitor_multiplier: f64,
    pub default_urgent_multiplier: f64,
    /// Per-parameter urgent multipliers.
    pub urgent_overrides: BTreeMap<String, f64>,
}

impl SeverityPolicy {
    pub fn builtin() -> Self {
        let urgent_overrides = [("glucose", 3.0), ("creatinine", 2.5)]
            .into_iter()
            .map(|(name, m)| (name.to_string(), m))
            .collect();
        Self {
            low_moderate_fraction: DEFAULT_LOW_MODERATE_FRACTION,
            monitor_multiplier: DEFAULT_MONITOR_MULTIPLIER,
            default_urgent_multiplier: DEFAULT_URGENT_MULTIPLIER,
            urgent_overrides,
        }
    }

    pub(crate) fn normalized(self) -> Self {
        let urgent_overrides = self
            .urgent_overrides
            .into_iter()
            .map(|(name, m)| (canonical_name(&name), m))
            .collect();
        Self {
            urgent_overrides,
            ..self
        }
    }

    pub fn urgent_threshold(&self, name: &str) -> f64 {
        self.urgent_overrides
            .get(name)
            .copied()
            .unwrap_or(self.default_urgent_multiplier)
    }
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}
