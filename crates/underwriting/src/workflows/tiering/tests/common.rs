use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::tiering::domain::{
    BorrowerSnapshot, ExperienceFacts, LoanId, LoanType, ScoreInputs,
};
use crate::workflows::tiering::provider::{BorrowerDataProvider, ProviderError};
use crate::workflows::tiering::{tiering_router, TieringService};

pub(super) fn scores(
    experience: f64,
    guarantor: f64,
    liquidity: f64,
    performance: f64,
) -> ScoreInputs {
    ScoreInputs {
        borrower_experience_score: experience,
        guarantor_record_score: guarantor,
        liquidity_ratio: liquidity,
        performance_record_score: performance,
    }
}

/// Gold tier with healthy liquidity.
pub(super) fn strong_scores() -> ScoreInputs {
    scores(80.0, 70.0, 45.0, 90.0)
}

/// Composite 31.0: Bronze tier, liquidity above the exception floor.
pub(super) fn bronze_scores() -> ScoreInputs {
    scores(20.0, 50.0, 40.0, 50.0)
}

pub(super) fn facts(loan_type: LoanType, exits: u32, volume: f64) -> ExperienceFacts {
    ExperienceFacts {
        loan_type,
        verified_exits_count: exits,
        verified_volume_usd: volume,
        rehab_cost_usd: None,
        total_project_cost_usd: None,
    }
}

pub(super) fn flip_facts(rehab: f64, exits: u32, volume: f64) -> ExperienceFacts {
    ExperienceFacts {
        rehab_cost_usd: Some(rehab),
        ..facts(LoanType::FixAndFlip, exits, volume)
    }
}

pub(super) fn snapshot(
    loan_id: &str,
    scores: ScoreInputs,
    facts: ExperienceFacts,
) -> BorrowerSnapshot {
    BorrowerSnapshot {
        loan_id: LoanId(loan_id.to_string()),
        scores,
        facts,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProvider {
    pub(super) snapshots: Arc<Mutex<BTreeMap<LoanId, BorrowerSnapshot>>>,
}

impl MemoryProvider {
    pub(super) fn with(snapshots: Vec<BorrowerSnapshot>) -> Self {
        let provider = Self::default();
        {
            let mut guard = provider.snapshots.lock().expect("provider mutex poisoned");
            for snapshot in snapshots {
                guard.insert(snapshot.loan_id.clone(), snapshot);
            }
        }
        provider
    }
}

impl BorrowerDataProvider for MemoryProvider {
    fn fetch(&self, loan_id: &LoanId) -> Result<Option<BorrowerSnapshot>, ProviderError> {
        let guard = self.snapshots.lock().expect("provider mutex poisoned");
        Ok(guard.get(loan_id).cloned())
    }

    fn loan_ids(&self) -> Result<Vec<LoanId>, ProviderError> {
        let guard = self.snapshots.lock().expect("provider mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }
}

pub(super) struct UnavailableProvider;

impl BorrowerDataProvider for UnavailableProvider {
    fn fetch(&self, _loan_id: &LoanId) -> Result<Option<BorrowerSnapshot>, ProviderError> {
        Err(ProviderError::Unavailable("entity service offline".to_string()))
    }

    fn loan_ids(&self) -> Result<Vec<LoanId>, ProviderError> {
        Err(ProviderError::Unavailable("entity service offline".to_string()))
    }
}

pub(super) fn demo_provider() -> MemoryProvider {
    MemoryProvider::with(vec![
        snapshot(
            "LN-100",
            strong_scores(),
            flip_facts(300_000.0, 2, 900_000.0),
        ),
        snapshot(
            "LN-200",
            scores(90.0, 90.0, 20.0, 90.0),
            facts(LoanType::Dscr, 4, 2_000_000.0),
        ),
        snapshot(
            "LN-300",
            scores(120.0, 90.0, 50.0, 90.0),
            facts(LoanType::Construction, 2, 600_000.0),
        ),
    ])
}

pub(super) fn build_service() -> TieringService<MemoryProvider> {
    TieringService::new(Arc::new(demo_provider()))
}

pub(super) fn router_with_service(service: TieringService<MemoryProvider>) -> axum::Router {
    tiering_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
