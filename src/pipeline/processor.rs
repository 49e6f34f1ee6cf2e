//! Lab report pipeline coordinator.
//!
//! Single entry point that drives the four stages in a fixed order:
//! extract → interpret → summarize → safety filter + recommend.
//!
//! The coordinator is the only place where stage failures become a
//! structured response. Errors and panics from any stage end up as
//! `error = true` with empty collections; nothing escapes to the caller.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::extraction::{ExtractionError, FactExtractor, RuleExtractor};
use super::interpretation::RangeInterpreter;
use super::recommendation::recommend;
use super::safety::SafetyFilter;
use super::title_case;
use crate::models::{ExtractedFact, InterpretedFact, Recommendation, SexCategory};
use crate::rules::RuleBook;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Top-level pipeline failures reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("empty input")]
    EmptyInput,

    #[error("pipeline fault: {0}")]
    Fault(String),
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::EmptyInput => Self::EmptyInput,
            other => Self::Fault(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything the pipeline produced for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub extracted: Vec<ExtractedFact>,
    pub interpreted: Vec<InterpretedFact>,
    pub raw_summary: String,
    pub safe_summary: String,
    pub recommendations: Vec<Recommendation>,
}

impl PipelineResult {
    /// Failure result with every collection empty.
    pub fn failure(err: &PipelineError) -> Self {
        Self {
            error: true,
            message: Some(err.to_string()),
            extracted: Vec::new(),
            interpreted: Vec::new(),
            raw_summary: String::new(),
            safe_summary: String::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.error
    }
}

/// `"{Name}: {status} — {explanation}"`, one line per fact, input order.
pub fn build_summary(interpreted: &[InterpretedFact]) -> String {
    interpreted
        .iter()
        .map(|fact| {
            format!(
                "{}: {} — {}",
                title_case(fact.name()),
                fact.status,
                fact.explanation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "stage panicked".to_string()
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs lab reports through the pipeline.
///
/// Cheap to clone; the rule tables are shared read-only, so one instance can
/// serve concurrent invocations without locking.
#[derive(Clone)]
pub struct LabReportPipeline {
    rules: Arc<RuleBook>,
    extractor: Arc<dyn FactExtractor + Send + Sync>,
    interpreter: RangeInterpreter,
    safety: SafetyFilter,
}

impl LabReportPipeline {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self {
            extractor: Arc::new(RuleExtractor::new(Arc::clone(&rules))),
            interpreter: RangeInterpreter::new(Arc::clone(&rules)),
            safety: SafetyFilter::new(),
            rules,
        }
    }

    /// Replace the extraction stage.
    pub fn with_extractor(mut self, extractor: Arc<dyn FactExtractor + Send + Sync>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Process one report. Always returns a complete result; failures are
    /// reported through `error`/`message`.
    pub fn run(&self, report_text: &str, sex: SexCategory, age: Option<u32>) -> PipelineResult {
        if report_text.trim().is_empty() {
            tracing::warn!("Pipeline: empty report text, no stage invoked");
            return PipelineResult::failure(&PipelineError::EmptyInput);
        }

        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(report_text, sex, age)
        }));

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                tracing::error!(error = %err, "Pipeline stage failed");
                PipelineResult::failure(&err)
            }
            Err(payload) => {
                let err = PipelineError::Fault(panic_detail(payload.as_ref()));
                tracing::error!(error = %err, "Pipeline stage panicked");
                PipelineResult::failure(&err)
            }
        };

        tracing::info!(
            error = result.error,
            facts = result.interpreted.len(),
            recommendations = result.recommendations.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Pipeline run complete"
        );

        result
    }

    fn run_stages(
        &self,
        report_text: &str,
        sex: SexCategory,
        age: Option<u32>,
    ) -> Result<PipelineResult, PipelineError> {
        let extracted = self.extractor.extract(report_text)?;
        let interpreted = self.interpreter.interpret(&extracted, sex, age);
        let raw_summary = build_summary(&interpreted);
        let safe_summary = self.safety.sanitize(&raw_summary);

        let recommendations = recommend(&interpreted, &self.rules.recommendations)
            .into_iter()
            .map(|rec| Recommendation {
                recommendation_texts: rec
                    .recommendation_texts
                    .iter()
                    .map(|text| self.safety.rewrite(text))
                    .collect(),
                ..rec
            })
            .collect();

        Ok(PipelineResult {
            error: false,
            message: None,
            extracted,
            interpreted,
            raw_summary,
            safe_summary,
            recommendations,
        })
    }
}

impl Default for LabReportPipeline {
    fn default() -> Self {
        Self::new(Arc::new(RuleBook::builtin()))
    }
}

impl std::fmt::Debug for LabReportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabReportPipeline")
            .field("parameters", &self.rules.dictionary.len())
            .field("ranges", &self.rules.ranges.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
