use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::classifier::TierResult;
use super::domain::{ExperienceFacts, LoanId, ReviewStatus, ScoreInputs};
use super::eligibility::EvaluationOutcome;
use super::error::UnderwritingError;
use super::provider::{BorrowerDataProvider, ProviderError};
use super::service::{TieringService, TieringServiceError};

/// Eligibility request body; the loan type stays a string so unsupported products get a typed error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub scores: ScoreInputs,
    pub loan_type: String,
    pub verified_exits_count: u32,
    pub verified_volume_usd: f64,
    #[serde(default)]
    pub rehab_cost_usd: Option<f64>,
    #[serde(default)]
    pub total_project_cost_usd: Option<f64>,
}

impl EligibilityRequest {
    pub fn into_facts(self) -> Result<(ExperienceFacts, ScoreInputs), UnderwritingError> {
        let facts = ExperienceFacts {
            loan_type: self.loan_type.parse()?,
            verified_exits_count: self.verified_exits_count,
            verified_volume_usd: self.verified_volume_usd,
            rehab_cost_usd: self.rehab_cost_usd,
            total_project_cost_usd: self.total_project_cost_usd,
        };
        Ok((facts, self.scores))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub tier: TierResult,
    pub eligibility: EvaluationOutcome,
    pub status: ReviewStatus,
}

/// Router builder exposing HTTP endpoints for tiering and eligibility checks.
pub fn tiering_router<P>(service: Arc<TieringService<P>>) -> Router
where
    P: BorrowerDataProvider + 'static,
{
    Router::new()
        .route("/api/v1/underwriting/tier", post(tier_handler::<P>))
        .route(
            "/api/v1/underwriting/eligibility",
            post(eligibility_handler::<P>),
        )
        .route(
            "/api/v1/underwriting/loans/:loan_id/review",
            get(review_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn tier_handler<P>(
    State(service): State<Arc<TieringService<P>>>,
    axum::Json(scores): axum::Json<ScoreInputs>,
) -> Response
where
    P: BorrowerDataProvider + 'static,
{
    match service.evaluator().classifier().compute_tier(&scores) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => unprocessable(error),
    }
}

pub(crate) async fn eligibility_handler<P>(
    State(service): State<Arc<TieringService<P>>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response
where
    P: BorrowerDataProvider + 'static,
{
    let evaluated = request.into_facts().and_then(|(facts, scores)| {
        service.evaluator().evaluate_with_tier(&facts, &scores)
    });

    match evaluated {
        Ok((tier, eligibility)) => {
            let status = eligibility.review_status();
            let body = EligibilityResponse {
                tier,
                eligibility,
                status,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => unprocessable(error),
    }
}

pub(crate) async fn review_handler<P>(
    State(service): State<Arc<TieringService<P>>>,
    Path(loan_id): Path<String>,
) -> Response
where
    P: BorrowerDataProvider + 'static,
{
    let id = LoanId(loan_id);
    match service.review(&id) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(TieringServiceError::Provider(ProviderError::NotFound)) => {
            let payload = json!({
                "loan_id": id.0,
                "error": "loan not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(TieringServiceError::Underwriting(error)) => unprocessable(error),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn unprocessable(error: UnderwritingError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
