use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::types::{Rewrite, RewriteCategory, DOSAGE_REDACTION, HEDGE_PHRASE};

/// A compiled pattern with its replacement and audit metadata.
struct SafetyPattern {
    regex: Regex,
    category: RewriteCategory,
    replacement: &'static str,
    description: &'static str,
}

/// Diagnostic assertions, most specific first so "you have been diagnosed
/// with" is rewritten as a whole before the bare "you have" rule runs.
static DIAGNOSTIC_PATTERNS: LazyLock<Vec<SafetyPattern>> = LazyLock::new(|| {
    vec![
        diagnostic(
            r"(?i)\byou\s+(?:have\s+been|are|were)\s+diagnosed\s+with\b",
            "Diagnosis claim: 'you are diagnosed with'",
        ),
        diagnostic(
            r"(?i)\byou\s+are\s+suffering\s+from\b",
            "Direct diagnosis: 'you are suffering from'",
        ),
        diagnostic(
            r"(?i)\bthis\s+(?:means|indicates|confirms|proves)\s+(?:that\s+)?you\s+have\b",
            "Indirect diagnosis: 'this means you have'",
        ),
        diagnostic(
            r"(?i)\byou\s+(?:likely|probably|possibly|definitely|clearly)\s+have\b",
            "Hedged diagnosis: 'you likely have'",
        ),
        diagnostic(
            r"(?i)\byou\s+(?:appear|seem)\s+to\s+have\b",
            "Implied diagnosis: 'you appear to have'",
        ),
        diagnostic(r"(?i)\byou\s+have\b", "Direct diagnosis: 'you have'"),
        diagnostic(
            r"(?i)\b(?:is|are)\s+diagnostic\s+(?:of|for)\b",
            "Result asserted as diagnostic",
        ),
    ]
});

/// Medication amounts, including per-day or per-weight rates (`mg/day`,
/// `mg/kg/day`). A unit over a volume (`mg/dL`, `g/L`, `IU/mL`) is a lab
/// concentration and is left alone; see [`is_concentration`].
static DOSAGE_PATTERNS: LazyLock<Vec<SafetyPattern>> = LazyLock::new(|| {
    vec![
        dosage(
            r"(?i)\b(?:take|taking|took|give|administer|use|start(?:ing)?|increase\s+to|decrease\s+to)\s+\d+(?:\.\d+)?\s*(?:mg|mcg|µg|μg|g|ml|iu|units?)\b(?P<rate>(?:\s*/\s*\w+)+)?",
            "Imperative dose: 'take 10 mg'",
        ),
        dosage(
            r"(?i)\b\d+(?:\.\d+)?\s*(?:mg|mcg|µg|μg|g|ml|iu|milligrams?|micrograms?|grams?)\b(?P<rate>(?:\s*/\s*\w+)+)?",
            "Bare dose amount: '500 mg'",
        ),
    ]
});

/// Volume denominators that make an amount a lab concentration.
const CONCENTRATION_DENOMINATORS: &[&str] = &["dl", "l", "ml", "µl", "μl", "ul"];

/// True when the first denominator of `rate` (`kg` in `/kg/day`) is a
/// volume.
fn is_concentration(rate: &str) -> bool {
    rate.split('/')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .is_some_and(|denominator| {
            CONCENTRATION_DENOMINATORS.contains(&denominator.to_lowercase().as_str())
        })
}

fn diagnostic(regex_str: &str, description: &'static str) -> SafetyPattern {
    SafetyPattern {
        regex: Regex::new(regex_str).expect("Invalid safety regex pattern"),
        category: RewriteCategory::DiagnosticLanguage,
        replacement: HEDGE_PHRASE,
        description,
    }
}

fn dosage(regex_str: &str, description: &'static str) -> SafetyPattern {
    SafetyPattern {
        regex: Regex::new(regex_str).expect("Invalid safety regex pattern"),
        category: RewriteCategory::DosageInstruction,
        replacement: DOSAGE_REDACTION,
        description,
    }
}

fn apply(pattern: &SafetyPattern, text: &str) -> (String, usize) {
    let mut hits = 0;
    let rewritten = pattern
        .regex
        .replace_all(text, |caps: &Captures<'_>| {
            if caps.name("rate").is_some_and(|rate| is_concentration(rate.as_str())) {
                caps[0].to_string()
            } else {
                hits += 1;
                pattern.replacement.to_string()
            }
        })
        .into_owned();
    (rewritten, hits)
}

/// Run diagnostic then dosage patterns over `text`, in declaration order.
pub fn rewrite_patterns(text: &str) -> (String, Vec<Rewrite>) {
    let mut result = text.to_string();
    let mut rewrites = Vec::new();

    for patterns in [&*DIAGNOSTIC_PATTERNS, &*DOSAGE_PATTERNS] {
        for sp in patterns {
            let (next, hits) = apply(sp, &result);
            if hits > 0 {
                rewrites.push(Rewrite {
                    category: sp.category,
                    rule: sp.description.to_string(),
                    occurrences: hits,
                });
                result = next;
            }
        }
    }

    (result, rewrites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(text: &str) -> String {
        rewrite_patterns(text).0
    }

    // =================================================================
    // DIAGNOSTIC
    // =================================================================

    #[test]
    fn you_have_is_hedged() {
        assert_eq!(
            rewritten("you have elevated cholesterol"),
            "may be compatible with elevated cholesterol"
        );
    }

    #[test]
    fn case_insensitive_detection() {
        for text in ["You have anemia.", "YOU HAVE anemia.", "you  Have anemia."] {
            assert_eq!(rewritten(text), "may be compatible with anemia.", "text: {text}");
        }
    }

    #[test]
    fn longer_phrase_rewritten_as_a_whole() {
        assert_eq!(
            rewritten("You have been diagnosed with diabetes."),
            "may be compatible with diabetes."
        );
        assert_eq!(
            rewritten("This means that you have anemia."),
            "may be compatible with anemia."
        );
        assert_eq!(
            rewritten("You are suffering from fatigue."),
            "may be compatible with fatigue."
        );
    }

    #[test]
    fn hedged_and_implied_forms() {
        for text in [
            "You likely have an infection.",
            "You probably have type 2 diabetes.",
            "You appear to have a thyroid condition.",
            "You seem to have a chronic condition.",
        ] {
            let out = rewritten(text);
            assert!(out.starts_with("may be compatible with"), "text: {text} -> {out}");
        }
    }

    #[test]
    fn diagnostic_result_phrase() {
        assert_eq!(
            rewritten("This result is diagnostic of diabetes."),
            "This result may be compatible with diabetes."
        );
    }

    #[test]
    fn sentence_structure_preserved() {
        let out = rewritten("Glucose: high. Based on this, you have prediabetes. Recheck soon.");
        assert_eq!(
            out,
            "Glucose: high. Based on this, may be compatible with prediabetes. Recheck soon."
        );
    }

    #[test]
    fn words_containing_you_are_not_matched() {
        assert_eq!(rewritten("Bayou haven"), "Bayou haven");
        assert_eq!(rewritten("youth have fun"), "youth have fun");
    }

    // =================================================================
    // DOSAGE
    // =================================================================

    #[test]
    fn imperative_dose_redacted() {
        assert_eq!(rewritten("Take 10 mg daily."), "[dosage removed] daily.");
        assert_eq!(rewritten("take 5mg at night"), "[dosage removed] at night");
        assert_eq!(rewritten("Start 1000 IU of vitamin D."), "[dosage removed] of vitamin D.");
    }

    #[test]
    fn dose_rates_redacted_with_their_denominator() {
        for (text, expected) in [
            ("Take 1000 mg/day of metformin.", "[dosage removed] of metformin."),
            ("Give 15 mg/kg.", "[dosage removed]."),
            ("take 2 g / dose", "[dosage removed]"),
            ("Use 1 tab: 50 mg/tab", "Use 1 tab: [dosage removed]"),
            ("Give 10 mg/kg/day in two doses.", "[dosage removed] in two doses."),
            ("metformin 500 mg/day", "metformin [dosage removed]"),
        ] {
            assert_eq!(rewritten(text), expected, "text: {text}");
        }
    }

    #[test]
    fn bare_dose_redacted() {
        assert_eq!(
            rewritten("metformin 500 mg twice daily"),
            "metformin [dosage removed] twice daily"
        );
        assert_eq!(rewritten("0.5 mcg"), "[dosage removed]");
        assert_eq!(
            rewritten("paracetamol 1 g every 6 hours"),
            "paracetamol [dosage removed] every 6 hours"
        );
        assert_eq!(rewritten("lactulose 15 ml at night"), "lactulose [dosage removed] at night");
        assert_eq!(rewritten("vitamin D 2000 IU"), "vitamin D [dosage removed]");
    }

    #[test]
    fn lab_concentrations_untouched() {
        for text in [
            "Glucose = 260 mg/dL. Normal range: 70 - 99.",
            "Creatinine = 1.1 mg/dl.",
            "Hemoglobin = 11.2 g/dL.",
            "Glucose = 5.4 mmol/L.",
            "Albumin = 4.0 g/L.",
            "ALT = 30 IU/L.",
            "Ferritin = 80 ng/mL, B12 = 400 pg/ml.",
            "Troponin 0.01 mg / dL",
        ] {
            let (out, rewrites) = rewrite_patterns(text);
            assert_eq!(out, text);
            assert!(rewrites.is_empty(), "unexpected rewrite in: {text}");
        }
    }

    #[test]
    fn rewrites_record_category_and_count() {
        let (_, rewrites) = rewrite_patterns("You have X. You have Y. Take 5 mg.");
        let diagnostic: usize = rewrites
            .iter()
            .filter(|r| r.category == RewriteCategory::DiagnosticLanguage)
            .map(|r| r.occurrences)
            .sum();
        assert_eq!(diagnostic, 2);
        assert!(rewrites
            .iter()
            .any(|r| r.category == RewriteCategory::DosageInstruction));
    }

    #[test]
    fn clean_text_unchanged() {
        let text = "Hemoglobin: low — Hemoglobin = 11.2 g/dL. Normal range: 12 - 15.5.";
        let (out, rewrites) = rewrite_patterns(text);
        assert_eq!(out, text);
        assert!(rewrites.is_empty());
    }

    #[test]
    fn rewriting_is_stable() {
        let texts = [
            "you have you have high glucose",
            "You have been diagnosed with anemia. Take 20 mg of iron.",
            "this means you you have have",
            "take 5 5 mg now",
            "Glucose 260 mg/dL, take 500mg metformin",
        ];
        for text in texts {
            let once = rewritten(text);
            assert_eq!(rewritten(&once), once, "text: {text}");
        }
    }
}
