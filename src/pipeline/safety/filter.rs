use super::patterns::rewrite_patterns;
use super::types::{RewriteCategory, SanitizedText, DISCLAIMER, DISCLAIMER_SEPARATOR};

/// Rewrites generated text into advisory, non-prescriptive language.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyFilter;

impl SafetyFilter {
    pub fn new() -> Self {
        Self
    }

    /// Pattern rewriting only, no disclaimer. Used for short advisory texts.
    pub fn rewrite(&self, text: &str) -> String {
        rewrite_patterns(text).0
    }

    /// Rewrite `text` and append the disclaimer unless already present.
    /// Empty input is returned unchanged.
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitize_with_report(text).text
    }

    pub fn sanitize_with_report(&self, text: &str) -> SanitizedText {
        if text.is_empty() {
            return SanitizedText {
                text: String::new(),
                rewrites: Vec::new(),
                disclaimer_appended: false,
            };
        }

        let (mut result, rewrites) = rewrite_patterns(text);

        let disclaimer_appended = !has_disclaimer(&result);
        if disclaimer_appended {
            result.push_str(DISCLAIMER_SEPARATOR);
            result.push_str(DISCLAIMER);
        }

        let sanitized = SanitizedText {
            text: result,
            rewrites,
            disclaimer_appended,
        };
        log_sanitize_outcome(&sanitized);
        sanitized
    }
}

/// Case-insensitive check for the disclaimer sentence.
pub fn has_disclaimer(text: &str) -> bool {
    text.to_lowercase().contains(&DISCLAIMER.to_lowercase())
}

/// Log a sanitize outcome WITHOUT patient data.
fn log_sanitize_outcome(sanitized: &SanitizedText) {
    if sanitized.was_rewritten() {
        tracing::info!(
            diagnostic = sanitized.count(RewriteCategory::DiagnosticLanguage),
            dosage = sanitized.count(RewriteCategory::DosageInstruction),
            disclaimer_appended = sanitized.disclaimer_appended,
            "Safety filter: text rewritten"
        );
    } else {
        tracing::debug!(
            disclaimer_appended = sanitized.disclaimer_appended,
            "Safety filter: clean pass"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(text: &str) -> String {
        SafetyFilter::new().sanitize(text)
    }

    #[test]
    fn hedges_diagnosis_and_appends_disclaimer_once() {
        let out = sanitize("Cholesterol: high. you have elevated cholesterol");
        assert!(out.contains("may be compatible with elevated cholesterol"));
        assert!(out.ends_with(DISCLAIMER));
        assert_eq!(out.matches(DISCLAIMER).count(), 1);
    }

    #[test]
    fn empty_input_unchanged() {
        assert_eq!(sanitize(""), "");
        let report = SafetyFilter::new().sanitize_with_report("");
        assert!(!report.disclaimer_appended);
    }

    #[test]
    fn clean_text_only_gains_disclaimer() {
        let text = "Glucose: normal — Glucose = 90 mg/dL.";
        assert_eq!(sanitize(text), format!("{text}\n\n{DISCLAIMER}"));
    }

    #[test]
    fn idempotent() {
        let texts = [
            "you have elevated cholesterol",
            "Take 10 mg daily. You are diagnosed with anemia.",
            "Glucose: high — Glucose = 310 mg/dL. seek clinician advice promptly.",
            "   ",
            "x",
        ];
        for text in texts {
            let once = sanitize(text);
            assert_eq!(sanitize(&once), once, "text: {text:?}");
        }
    }

    #[test]
    fn existing_disclaimer_in_other_case_not_duplicated() {
        let text = format!("Summary.\n\n{}", DISCLAIMER.to_uppercase());
        let out = sanitize(&text);
        assert_eq!(out, text);
    }

    #[test]
    fn echoed_summary_keeps_single_disclaimer() {
        let summary = sanitize("Hemoglobin: low");
        let chat = format!("Here is your summary:\n{summary}");
        let out = sanitize(&chat);
        assert_eq!(out.to_lowercase().matches(&DISCLAIMER.to_lowercase()).count(), 1);
    }

    #[test]
    fn report_lists_rewrites() {
        let report = SafetyFilter::new().sanitize_with_report("You have X. Take 5 mg.");
        assert!(report.disclaimer_appended);
        assert_eq!(report.count(RewriteCategory::DiagnosticLanguage), 1);
        assert_eq!(report.count(RewriteCategory::DosageInstruction), 1);
    }

    #[test]
    fn rewrite_skips_disclaimer() {
        let out = SafetyFilter::new().rewrite("you have low iron");
        assert_eq!(out, "may be compatible with low iron");
        assert!(!has_disclaimer(&out));
    }
}
