//! Borrower experience tiering and loan-type eligibility.
//!
//! The classifier and evaluator are pure functions over validated value types. The service
//! layer pulls borrower data through [`BorrowerDataProvider`] and the router exposes both the
//! stateless checks and provider-backed loan reviews over HTTP.

pub mod classifier;
pub mod domain;
pub mod eligibility;
mod error;
pub mod import;
pub mod provider;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{LendingCaps, TierClassifier, TierResult};
pub use domain::{
    BorrowerSnapshot, ExperienceFacts, LoanId, LoanType, ReviewStatus, ScoreInputs, Tier,
};
pub use eligibility::{
    EligibilityDecision, EligibilityEvaluator, EvaluationOutcome, ExceptionReason,
};
pub use error::UnderwritingError;
pub use import::{BorrowerCsvImporter, BorrowerImportError};
pub use provider::{BorrowerDataProvider, ProviderError, TieringReview, TieringReviewView};
pub use router::{tiering_router, EligibilityRequest, EligibilityResponse};
pub use service::{TieringService, TieringServiceError};
