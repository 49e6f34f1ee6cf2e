use std::collections::BTreeSet;

use crate::models::{InterpretedFact, Recommendation};
use crate::rules::{
    RecommendationTable, GENERAL_HEALTH_RECOMMENDATION, GENERAL_MARKER, NEUTRAL_STATUS,
};

/// Single fallback entry returned when nothing in the table matched.
pub fn general_recommendation() -> Recommendation {
    Recommendation {
        marker: GENERAL_MARKER.to_string(),
        status: NEUTRAL_STATUS.to_string(),
        recommendation_texts: BTreeSet::from([GENERAL_HEALTH_RECOMMENDATION.to_string()]),
    }
}

/// Look up advice for each `(name, status)` pair. Facts without an entry are
/// skipped; an empty result is replaced by [`general_recommendation`].
pub fn recommend(interpreted: &[InterpretedFact], table: &RecommendationTable) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = interpreted
        .iter()
        .filter(|fact| !fact.name().is_empty())
        .filter_map(|fact| {
            let name = fact.name().to_lowercase();
            let texts = table.lookup(&name, fact.status);
            if texts.is_empty() {
                return None;
            }
            Some(Recommendation {
                marker: name,
                status: fact.status.as_str().to_string(),
                recommendation_texts: texts.iter().cloned().collect(),
            })
        })
        .collect();

    if recommendations.is_empty() {
        tracing::debug!("No table entry matched; using general recommendation");
        recommendations.push(general_recommendation());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::models::{ExtractedFact, Risk, Status, Urgency};

    fn interpreted(name: &str, status: Status) -> InterpretedFact {
        InterpretedFact {
            fact: ExtractedFact {
                name: name.into(),
                value: Some(1.0),
                unit: String::new(),
                raw_line: String::new(),
            },
            status,
            risk: Risk::None,
            urgency: Urgency::None,
            explanation: String::new(),
            suggested_action: String::new(),
        }
    }

    fn assert_single_general(recs: &[Recommendation]) {
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].marker, "general");
        assert_eq!(recs[0].status, "neutral");
        assert!(recs[0]
            .recommendation_texts
            .contains(GENERAL_HEALTH_RECOMMENDATION));
    }

    #[test]
    fn empty_input_gets_general_advice() {
        assert_single_general(&recommend(&[], &RecommendationTable::builtin()));
    }

    #[test]
    fn unmatched_facts_get_general_advice() {
        let facts = [
            interpreted("platelets", Status::High),
            interpreted("glucose", Status::Unknown),
            interpreted("ferritin", Status::Low),
        ];
        assert_single_general(&recommend(&facts, &RecommendationTable::builtin()));
    }

    #[test]
    fn matched_facts_in_input_order() {
        let facts = [
            interpreted("glucose", Status::High),
            interpreted("platelets", Status::Low),
            interpreted("hemoglobin", Status::Low),
        ];
        let recs = recommend(&facts, &RecommendationTable::builtin());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].marker, "glucose");
        assert_eq!(recs[0].status, "high");
        assert_eq!(recs[1].marker, "hemoglobin");
        assert_eq!(recs[1].recommendation_texts.len(), 2);
    }

    #[test]
    fn duplicate_texts_collapse() {
        let mut by_status = HashMap::new();
        by_status.insert(Status::Low, vec!["Eat iron.".to_string(), "Eat iron.".to_string()]);
        let table = RecommendationTable::new(BTreeMap::from([("ferritin".to_string(), by_status)]));
        let recs = recommend(&[interpreted("ferritin", Status::Low)], &table);
        assert_eq!(recs[0].recommendation_texts.len(), 1);
    }

    #[test]
    fn empty_name_skipped() {
        let recs = recommend(&[interpreted("", Status::High)], &RecommendationTable::builtin());
        assert_single_general(&recs);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let recs = recommend(&[interpreted("Glucose", Status::Normal)], &RecommendationTable::builtin());
        assert_eq!(recs[0].marker, "glucose");
    }
}
