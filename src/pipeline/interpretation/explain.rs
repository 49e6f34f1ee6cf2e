//! Templated sentences for interpreted facts.

use crate::models::{Status, Urgency};
use crate::pipeline::title_case;
use crate::rules::ReferenceRange;

pub const MISSING_VALUE_ACTION: &str =
    "Repeat the measurement or check the report for the recorded value.";
pub const MISSING_RANGE_ACTION: &str =
    "Provide additional clinical context or reference range data for this parameter.";

pub fn missing_value(name: &str) -> String {
    format!(
        "{} was mentioned but no measurable value was detected.",
        title_case(name)
    )
}

pub fn missing_range(name: &str) -> String {
    format!(
        "No reference range is configured for {}, so this value cannot be interpreted.",
        title_case(name)
    )
}

pub fn arithmetic_fault(name: &str) -> String {
    format!(
        "{} could not be compared with its reference range.",
        title_case(name)
    )
}

fn status_clause(status: Status) -> &'static str {
    match status {
        Status::High => "This is above the expected range (status: HIGH).",
        Status::Low => "This is below the expected range (status: LOW).",
        Status::Normal => "This is within the normal range.",
        Status::Unknown => "This could not be classified.",
    }
}

/// `"{Name} = {value}{ unit}. Normal range: {low} - {high}."` followed by the
/// status clause, an urgency clause when urgent and an age note when known.
pub fn range_explanation(
    name: &str,
    value: f64,
    unit: &str,
    range: ReferenceRange,
    status: Status,
    urgency: Urgency,
    age: Option<u32>,
) -> String {
    let unit = if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    };
    let mut text = format!(
        "{} = {value}{unit}. Normal range: {} - {}. {}",
        title_case(name),
        range.low,
        range.high,
        status_clause(status),
    );

    if urgency == Urgency::Urgent {
        text.push_str(" The value is far above the reference limit; seek clinician advice promptly.");
    }

    if let Some(age) = age {
        text.push_str(&format!(
            " Interpreted for age {age}; age-specific ranges may differ."
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_layout() {
        let text = range_explanation(
            "glucose",
            260.0,
            "mg/dL",
            ReferenceRange::new(70.0, 99.0),
            Status::High,
            Urgency::Monitor,
            None,
        );
        assert_eq!(
            text,
            "Glucose = 260 mg/dL. Normal range: 70 - 99. This is above the expected range (status: HIGH)."
        );
    }

    #[test]
    fn unitless_value_has_no_trailing_space() {
        let text = range_explanation(
            "creatinine",
            1.1,
            "",
            ReferenceRange::new(0.7, 1.3),
            Status::Normal,
            Urgency::None,
            None,
        );
        assert!(text.starts_with("Creatinine = 1.1. Normal range: 0.7 - 1.3."));
        assert!(text.ends_with("within the normal range."));
    }

    #[test]
    fn urgent_and_age_clauses_appended_in_order() {
        let text = range_explanation(
            "glucose",
            310.0,
            "mg/dL",
            ReferenceRange::new(70.0, 99.0),
            Status::High,
            Urgency::Urgent,
            Some(54),
        );
        let urgent = text.find("seek clinician advice promptly").unwrap();
        let age = text.find("Interpreted for age 54").unwrap();
        assert!(urgent < age);
    }

    #[test]
    fn missing_value_sentence_is_title_cased() {
        assert_eq!(
            missing_value("wbc"),
            "Wbc was mentioned but no measurable value was detected."
        );
    }
}
