use std::sync::Arc;

use super::explain;
use super::InterpretationError;
use crate::models::{ExtractedFact, InterpretedFact, Risk, SexCategory, Status, Urgency};
use crate::rules::{ReferenceRange, RuleBook, SeverityPolicy};

const LOW_MODERATE_ACTION: &str =
    "Discuss this result with your clinician and arrange a repeat test.";
const LOW_MILD_ACTION: &str = "Consider a repeat test at your next routine check-up.";
const HIGH_URGENT_ACTION: &str = "Seek clinician advice promptly.";
const HIGH_MONITOR_ACTION: &str =
    "Arrange a follow-up test and review the result with your clinician.";
const HIGH_MILD_ACTION: &str = "Recheck this value at your next routine check-up.";
const NORMAL_ACTION: &str = "Maintain current healthy habits and routine check-ups.";
const FAULT_ACTION: &str = "Review the recorded value with your clinician.";

/// Outcome of comparing one value with its range.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Grade {
    status: Status,
    risk: Risk,
    urgency: Urgency,
    action: &'static str,
}

/// Zero denominators are treated as 1.
fn guarded(denominator: f64) -> f64 {
    if denominator == 0.0 {
        1.0
    } else {
        denominator
    }
}

fn finite(name: &str, x: f64) -> Result<f64, InterpretationError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(InterpretationError::NonFiniteSeverity {
            name: name.to_string(),
        })
    }
}

fn grade(
    name: &str,
    value: f64,
    range: ReferenceRange,
    policy: &SeverityPolicy,
) -> Result<Grade, InterpretationError> {
    let value = finite(name, value)?;

    if value < range.low {
        let fraction = finite(name, (range.low - value) / guarded(range.low))?;
        let grade = if fraction > policy.low_moderate_fraction {
            Grade {
                status: Status::Low,
                risk: Risk::Moderate,
                urgency: Urgency::None,
                action: LOW_MODERATE_ACTION,
            }
        } else {
            Grade {
                status: Status::Low,
                risk: Risk::Low,
                urgency: Urgency::None,
                action: LOW_MILD_ACTION,
            }
        };
        return Ok(grade);
    }

    if value > range.high {
        let multiplier = finite(name, value / guarded(range.high))?;
        let grade = if multiplier >= policy.urgent_threshold(name) {
            Grade {
                status: Status::High,
                risk: Risk::High,
                urgency: Urgency::Urgent,
                action: HIGH_URGENT_ACTION,
            }
        } else if multiplier >= policy.monitor_multiplier {
            Grade {
                status: Status::High,
                risk: Risk::Moderate,
                urgency: Urgency::Monitor,
                action: HIGH_MONITOR_ACTION,
            }
        } else {
            Grade {
                status: Status::High,
                risk: Risk::Low,
                urgency: Urgency::None,
                action: HIGH_MILD_ACTION,
            }
        };
        return Ok(grade);
    }

    Ok(Grade {
        status: Status::Normal,
        risk: Risk::None,
        urgency: Urgency::None,
        action: NORMAL_ACTION,
    })
}

fn unknown(fact: &ExtractedFact, explanation: String, action: &str) -> InterpretedFact {
    InterpretedFact {
        fact: fact.clone(),
        status: Status::Unknown,
        risk: Risk::Unknown,
        urgency: Urgency::None,
        explanation,
        suggested_action: action.to_string(),
    }
}

fn interpret_measured(
    fact: &ExtractedFact,
    value: f64,
    sex: SexCategory,
    age: Option<u32>,
    rules: &RuleBook,
) -> Result<InterpretedFact, InterpretationError> {
    let range = rules.ranges.resolve(&fact.name, sex).ok_or_else(|| {
        InterpretationError::UnconfiguredParameter {
            name: fact.name.clone(),
        }
    })?;
    let grade = grade(&fact.name, value, range, &rules.severity)?;

    Ok(InterpretedFact {
        fact: fact.clone(),
        status: grade.status,
        risk: grade.risk,
        urgency: grade.urgency,
        explanation: explain::range_explanation(
            &fact.name,
            value,
            &fact.unit,
            range,
            grade.status,
            grade.urgency,
            age,
        ),
        suggested_action: grade.action.to_string(),
    })
}

/// Interpret one fact. Never fails: missing values, missing ranges and
/// arithmetic faults all become `status = unknown`.
pub fn interpret_fact(
    fact: &ExtractedFact,
    sex: SexCategory,
    age: Option<u32>,
    rules: &RuleBook,
) -> InterpretedFact {
    let Some(value) = fact.value else {
        return unknown(
            fact,
            explain::missing_value(&fact.name),
            explain::MISSING_VALUE_ACTION,
        );
    };

    match interpret_measured(fact, value, sex, age, rules) {
        Ok(interpreted) => interpreted,
        Err(err @ InterpretationError::UnconfiguredParameter { .. }) => {
            tracing::debug!(error = %err, "Interpreting as unknown");
            unknown(
                fact,
                explain::missing_range(&fact.name),
                explain::MISSING_RANGE_ACTION,
            )
        }
        Err(err @ InterpretationError::NonFiniteSeverity { .. }) => {
            tracing::warn!(error = %err, "Interpreting as unknown");
            unknown(fact, explain::arithmetic_fault(&fact.name), FAULT_ACTION)
        }
    }
}

/// One interpreted fact per input fact, in input order.
pub fn interpret_facts(
    facts: &[ExtractedFact],
    sex: SexCategory,
    age: Option<u32>,
    rules: &RuleBook,
) -> Vec<InterpretedFact> {
    let interpreted: Vec<InterpretedFact> = facts
        .iter()
        .map(|fact| interpret_fact(fact, sex, age, rules))
        .collect();

    tracing::debug!(
        facts = interpreted.len(),
        unknown = interpreted.iter().filter(|f| f.status == Status::Unknown).count(),
        urgent = interpreted.iter().filter(|f| f.urgency == Urgency::Urgent).count(),
        "Interpretation complete"
    );

    interpreted
}

/// Range-based interpreter over a shared [`RuleBook`].
#[derive(Debug, Clone)]
pub struct RangeInterpreter {
    rules: Arc<RuleBook>,
}

impl RangeInterpreter {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }

    pub fn interpret(
        &self,
        facts: &[ExtractedFact],
        sex: SexCategory,
        age: Option<u32>,
    ) -> Vec<InterpretedFact> {
        interpret_facts(facts, sex, age, &self.rules)
    }
}
