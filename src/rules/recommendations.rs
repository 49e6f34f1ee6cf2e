use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::dictionary::canonical_name;
use crate::models::Status;

/// Marker used for the fallback recommendation.
pub const GENERAL_MARKER: &str = "general";
/// Status reported with the fallback recommendation.
pub const NEUTRAL_STATUS: &str = "neutral";
pub const GENERAL_HEALTH_RECOMMENDATION: &str =
    "Maintain a balanced diet, regular exercise, and follow-up with your healthcare provider.";

/// Advisory texts keyed by parameter, then status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable {
    entries: BTreeMap<String, HashMap<Status, Vec<String>>>,
}

impl RecommendationTable {
    pub fn new(entries: BTreeMap<String, HashMap<Status, Vec<String>>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, by_status)| (canonical_name(&name), by_status))
            .collect();
        Self { entries }
    }

    pub(crate) fn normalized(self) -> Self {
        Self::new(self.entries)
    }

    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert("hemoglobin", Status::Low, &[
            "Increase dietary iron (spinach, legumes).",
            "Ask clinician about iron supplementation if needed.",
        ]);
        table.insert("hemoglobin", Status::High, &[
            "High hemoglobin may require medical evaluation.",
            "Stay hydrated and monitor changes.",
        ]);
        table.insert("hemoglobin", Status::Normal, &[
            "Maintain a balanced intake of iron-rich foods and stay hydrated.",
        ]);
        table.insert("cholesterol", Status::High, &[
            "Reduce saturated fats and increase fiber.",
            "Schedule a follow-up lipid panel and clinician consultation.",
        ]);
        table.insert("cholesterol", Status::Normal, &[
            "Continue a heart-healthy diet and regular exercise.",
        ]);
        table.insert("glucose", Status::High, &[
            "Reduce simple carbohydrates and sugary foods.",
            "Schedule fasting blood glucose test and clinician screening.",
        ]);
        table.insert("glucose", Status::Normal, &[
            "Maintain balanced meals and regular physical activity.",
        ]);
        table
    }

    fn insert(&mut self, name: &str, status: Status, texts: &[&str]) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .insert(status, texts.iter().map(|t| t.to_string()).collect());
    }

    /// Advice for `(name, status)`; empty when the pair has no entry.
    pub fn lookup(&self, name: &str, status: Status) -> &[String] {
        self.entries
            .get(name)
            .and_then(|by_status| by_status.get(&status))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
