use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::classifier::TierClassifier;
use super::domain::LoanId;
use super::eligibility::EligibilityEvaluator;
use super::error::UnderwritingError;
use super::provider::{BorrowerDataProvider, ProviderError, TieringReview};

/// Service composing the borrower data provider with the classifier and evaluator.
pub struct TieringService<P> {
    provider: Arc<P>,
    evaluator: EligibilityEvaluator,
}

impl<P> TieringService<P>
where
    P: BorrowerDataProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            evaluator: EligibilityEvaluator::new(TierClassifier::new()),
        }
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    /// Fetch a loan's borrower data and run the tier and eligibility checks.
    pub fn review(&self, loan_id: &LoanId) -> Result<TieringReview, TieringServiceError> {
        let snapshot = self
            .provider
            .fetch(loan_id)?
            .ok_or(ProviderError::NotFound)?;

        let (tier_result, eligibility) = self
            .evaluator
            .evaluate_with_tier(&snapshot.facts, &snapshot.scores)
            .inspect_err(|err| warn!(%loan_id, error = %err, "borrower data rejected"))?;

        let status = eligibility.review_status();
        if let Some(reason) = eligibility.exception_reason {
            warn!(%loan_id, exception = reason.label(), "tiering exception flagged");
        }
        info!(
            %loan_id,
            tier = tier_result.tier.label(),
            score = tier_result.composite_score,
            status = status.label(),
            "tiering review complete"
        );

        Ok(TieringReview {
            loan_id: snapshot.loan_id,
            tier_result,
            eligibility,
            status,
            evaluated_at: Utc::now(),
        })
    }

    /// Review every loan the provider knows about, keeping per-loan failures.
    pub fn review_all(
        &self,
    ) -> Result<Vec<(LoanId, Result<TieringReview, TieringServiceError>)>, TieringServiceError>
    {
        let loan_ids = self.provider.loan_ids()?;
        debug!(count = loan_ids.len(), "reviewing loan batch");

        Ok(loan_ids
            .into_iter()
            .map(|loan_id| {
                let review = self.review(&loan_id);
                (loan_id, review)
            })
            .collect())
    }
}

/// Error raised by the tiering service.
#[derive(Debug, thiserror::Error)]
pub enum TieringServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Underwriting(#[from] UnderwritingError),
}
