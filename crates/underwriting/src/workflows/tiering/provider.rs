use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::TierResult;
use super::domain::{BorrowerSnapshot, LoanId, ReviewStatus};
use super::eligibility::EvaluationOutcome;

/// Source of borrower scores and exit history, implemented against upstream systems.
pub trait BorrowerDataProvider: Send + Sync {
    fn fetch(&self, loan_id: &LoanId) -> Result<Option<BorrowerSnapshot>, ProviderError>;
    fn loan_ids(&self) -> Result<Vec<LoanId>, ProviderError>;
}

/// Error enumeration for provider failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("loan not found")]
    NotFound,
    #[error("borrower data unavailable: {0}")]
    Unavailable(String),
}

/// Tier, eligibility and shared status for a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieringReview {
    pub loan_id: LoanId,
    pub tier_result: TierResult,
    pub eligibility: EvaluationOutcome,
    pub status: ReviewStatus,
    pub evaluated_at: DateTime<Utc>,
}

impl TieringReview {
    pub fn view(&self) -> TieringReviewView {
        TieringReviewView {
            loan_id: self.loan_id.clone(),
            tier: self.tier_result.tier.label(),
            composite_score: self.tier_result.composite_score,
            status: self.status.label(),
            decision_rationale: self.eligibility.summary(),
        }
    }
}

/// Flattened representation for list screens.
#[derive(Debug, Clone, Serialize)]
pub struct TieringReviewView {
    pub loan_id: LoanId,
    pub tier: &'static str,
    pub composite_score: f64,
    pub status: &'static str,
    pub decision_rationale: String,
}
