use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dictionary::canonical_name;
use crate::models::SexCategory;

/// Inclusive normal interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Ranges for one parameter, split by sex category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SexRanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<ReferenceRange>,
}

impl SexRanges {
    fn get(&self, sex: SexCategory) -> Option<ReferenceRange> {
        match sex {
            SexCategory::Male => self.male,
            SexCategory::Female => self.female,
            SexCategory::All => self.all,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (SexCategory, ReferenceRange)> + '_ {
        [
            (SexCategory::Male, self.male),
            (SexCategory::Female, self.female),
            (SexCategory::All, self.all),
        ]
        .into_iter()
        .filter_map(|(sex, range)| range.map(|r| (sex, r)))
    }
}

/// Reference range table keyed by canonical parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    ranges: BTreeMap<String, SexRanges>,
}

impl RangeTable {
    /// Keys are canonicalized so they line up with dictionary names.
    pub fn new(ranges: BTreeMap<String, SexRanges>) -> Self {
        let ranges = ranges
            .into_iter()
            .map(|(name, by_sex)| (canonical_name(&name), by_sex))
            .collect();
        Self { ranges }
    }

    pub(crate) fn normalized(self) -> Self {
        Self::new(self.ranges)
    }

    pub fn builtin() -> Self {
        let mut ranges = BTreeMap::new();
        let mut put = |name: &str, male: Option<(f64, f64)>, female: Option<(f64, f64)>, all: (f64, f64)| {
            let to_range = |(low, high): (f64, f64)| ReferenceRange::new(low, high);
            ranges.insert(
                name.to_string(),
                SexRanges {
                    male: male.map(to_range),
                    female: female.map(to_range),
                    all: Some(to_range(all)),
                },
            );
        };
        put("hemoglobin", Some((13.5, 17.5)), Some((12.0, 15.5)), (12.0, 17.5));
        put("wbc", None, None, (4.0, 11.0));
        put("rbc", Some((4.5, 5.9)), Some((4.0, 5.2)), (4.0, 5.9));
        put("platelets", None, None, (150.0, 450.0));
        put("cholesterol", None, None, (0.0, 200.0));
        put("glucose", None, None, (70.0, 99.0));
        put("creatinine", None, None, (0.7, 1.3));
        put("bun", None, None, (7.0, 20.0));
        put("a1c", None, None, (4.0, 5.6));
        Self { ranges }
    }

    /// Sex-specific range, falling back to `all`. `None` when the parameter
    /// is not configured at all.
    pub fn resolve(&self, name: &str, sex: SexCategory) -> Option<ReferenceRange> {
        let entry = self.ranges.get(name)?;
        entry.get(sex).or(entry.all)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SexRanges)> {
        self.ranges.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
