use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use super::{ExtractionError, FactExtractor};
use crate::models::ExtractedFact;
use crate::rules::{ParameterDictionary, RuleBook};

/// Numeric token plus optional unit, matched against lowercased lines.
///
/// Group 1: the number. It must not be glued to a preceding word character
/// or dot, so the `1` in `a1c` is skipped.
/// Group 2: a second decimal part (`1.2.3`); such tokens are malformed.
/// Group 3: the unit token.
static VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^\w.])([-+]?\d+(?:\.\d+)?)(\.\d)?(?:\s*(mg/dl|g/dl|mmol/l|%|x\s?10\^3\s*/\s*[µμu]l|/\s*[µμu]l))?",
    )
    .expect("Invalid value regex pattern")
});

/// Map a matched (lowercase) unit token to its conventional spelling.
fn canonical_unit(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.as_str() {
        "mg/dl" => "mg/dL".to_string(),
        "g/dl" => "g/dL".to_string(),
        "mmol/l" => "mmol/L".to_string(),
        "%" => "%".to_string(),
        s if s.starts_with('x') => "x10^3/µL".to_string(),
        s if s.starts_with('/') => "/µL".to_string(),
        other => other.to_string(),
    }
}

/// First well-formed numeric token on the line, with its unit.
fn find_measurement(line: &str) -> Option<Captures<'_>> {
    VALUE_RE.captures_iter(line).find(|caps| caps.get(2).is_none())
}

/// Value and unit for a matched line. Value is `None` when the line has no
/// usable number.
fn measure(name: &str, line: &str) -> (Option<f64>, String) {
    let Some(caps) = find_measurement(line) else {
        return (None, String::new());
    };

    let number = caps.get(1).map_or("", |m| m.as_str());
    let unit = caps
        .get(3)
        .map(|m| canonical_unit(m.as_str()))
        .unwrap_or_default();

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => (Some(value), unit),
        _ => {
            let err = ExtractionError::MalformedValue {
                name: name.to_string(),
            };
            tracing::warn!(error = %err, "Recording mention without value");
            (None, String::new())
        }
    }
}

/// Scan `report_text` for parameter mentions.
///
/// Lines are lowercased and trimmed; each line yields at most one fact (the
/// first dictionary entry that matches) and each parameter is reported once
/// (its first line wins).
pub fn extract_facts(
    report_text: &str,
    dictionary: &ParameterDictionary,
) -> Result<Vec<ExtractedFact>, ExtractionError> {
    if report_text.trim().is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let text = report_text.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut facts = Vec::new();
    let mut mentions = 0usize;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(name) = dictionary.match_line(line) else {
            continue;
        };
        mentions += 1;
        if !seen.insert(name) {
            continue;
        }

        let (value, unit) = measure(name, line);
        facts.push(ExtractedFact {
            name: name.to_string(),
            value,
            unit,
            raw_line: line.to_string(),
        });
    }

    tracing::debug!(
        mentions,
        facts = facts.len(),
        without_value = facts.iter().filter(|f| f.value.is_none()).count(),
        "Extraction complete"
    );

    Ok(facts)
}

/// Dictionary-driven extractor over a shared [`RuleBook`].
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    rules: Arc<RuleBook>,
}

impl RuleExtractor {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }
}

impl FactExtractor for RuleExtractor {
    fn extract(&self, report_text: &str) -> Result<Vec<ExtractedFact>, ExtractionError> {
        extract_facts(report_text, &self.rules.dictionary)
    }
}
