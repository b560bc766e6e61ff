use crate::infra::{AppState, InMemoryBorrowerProvider};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{Cursor, Read};
use std::sync::Arc;
use underwriting::config::BatchConfig;
use underwriting::error::AppError;
use underwriting::workflows::tiering::{
    tiering_router, BorrowerCsvImporter, BorrowerDataProvider, LoanId, TieringReviewView,
    TieringService,
};

#[derive(Debug, Deserialize)]
pub(crate) struct BatchReviewRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchReviewResponse {
    pub(crate) reviewed: usize,
    pub(crate) reviews: Vec<TieringReviewView>,
    pub(crate) failures: Vec<BatchFailure>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchFailure {
    pub(crate) loan_id: LoanId,
    pub(crate) error: String,
}

pub(crate) fn with_tiering_routes<P>(service: Arc<TieringService<P>>) -> axum::Router
where
    P: BorrowerDataProvider + 'static,
{
    tiering_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/underwriting/batch",
            axum::routing::post(batch_review_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_review_endpoint(
    Extension(limits): Extension<BatchConfig>,
    Json(payload): Json<BatchReviewRequest>,
) -> Result<Json<BatchReviewResponse>, AppError> {
    let service = import_batch(Cursor::new(payload.csv.into_bytes()), &limits)?;
    Ok(Json(batch_response(&service)?))
}

/// Loads a borrower export into a throwaway provider, refusing exports over the row limit.
pub(crate) fn import_batch<R: Read>(
    reader: R,
    limits: &BatchConfig,
) -> Result<TieringService<InMemoryBorrowerProvider>, AppError> {
    let snapshots = BorrowerCsvImporter::from_reader(reader)?;
    if snapshots.len() > limits.max_rows {
        return Err(AppError::BatchTooLarge {
            rows: snapshots.len(),
            limit: limits.max_rows,
        });
    }

    let provider = Arc::new(InMemoryBorrowerProvider::from_snapshots(snapshots));
    Ok(TieringService::new(provider))
}

pub(crate) fn batch_response<P>(
    service: &TieringService<P>,
) -> Result<BatchReviewResponse, AppError>
where
    P: BorrowerDataProvider + 'static,
{
    let mut reviews = Vec::new();
    let mut failures = Vec::new();

    for (loan_id, result) in service.review_all()? {
        match result {
            Ok(review) => reviews.push(review.view()),
            Err(err) => failures.push(BatchFailure {
                loan_id,
                error: err.to_string(),
            }),
        }
    }

    Ok(BatchReviewResponse {
        reviewed: reviews.len() + failures.len(),
        reviews,
        failures,
    })
}
