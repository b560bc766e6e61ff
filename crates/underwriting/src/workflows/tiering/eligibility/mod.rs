mod exceptions;
mod rules;

pub use exceptions::ExceptionReason;

use super::classifier::{TierClassifier, TierResult};
use super::domain::{ExperienceFacts, ReviewStatus, ScoreInputs};
use super::error::UnderwritingError;
use exceptions::detect_exception;
use rules::loan_type_verdict;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the loan-type experience rules and exception checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator {
    classifier: TierClassifier,
}

impl EligibilityEvaluator {
    pub fn new(classifier: TierClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    pub fn evaluate(
        &self,
        facts: &ExperienceFacts,
        scores: &ScoreInputs,
    ) -> Result<EvaluationOutcome, UnderwritingError> {
        self.evaluate_with_tier(facts, scores).map(|(_, outcome)| outcome)
    }

    /// Same as [`evaluate`](Self::evaluate) but also hands back the tier it computed.
    pub fn evaluate_with_tier(
        &self,
        facts: &ExperienceFacts,
        scores: &ScoreInputs,
    ) -> Result<(TierResult, EvaluationOutcome), UnderwritingError> {
        facts.validate()?;
        let tier_result = self.classifier.compute_tier(scores)?;

        let exception = detect_exception(scores, &tier_result, facts);
        let verdict = loan_type_verdict(facts);

        let outcome = EvaluationOutcome {
            outcome: verdict.decision,
            exception_flag: exception.is_some(),
            exception_reason: exception,
            review_reason: verdict.review_reason.map(str::to_string),
        };

        Ok((tier_result, outcome))
    }
}

/// Result of the loan-type experience rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityDecision {
    Pass,
    ManualReview,
}

impl EligibilityDecision {
    pub fn label(&self) -> &'static str {
        match self {
            EligibilityDecision::Pass => "Pass",
            EligibilityDecision::ManualReview => "Manual Review",
        }
    }
}

/// Eligibility decision plus the independently computed exception signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub outcome: EligibilityDecision,
    pub exception_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_reason: Option<ExceptionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_reason: Option<String>,
}

impl EvaluationOutcome {
    /// Collapses the decision and exception into the shared status vocabulary.
    pub fn review_status(&self) -> ReviewStatus {
        match (self.outcome, self.exception_flag) {
            (EligibilityDecision::ManualReview, _) => ReviewStatus::ManualReview,
            (EligibilityDecision::Pass, true) => ReviewStatus::Warning,
            (EligibilityDecision::Pass, false) => ReviewStatus::Pass,
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = self.outcome.label().to_string();
        if let Some(reason) = &self.review_reason {
            summary.push_str(&format!(": {reason}"));
        }
        if let Some(exception) = &self.exception_reason {
            summary.push_str(&format!(" (exception: {})", exception.label()));
        }
        summary
    }
}
