use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use underwriting::workflows::tiering::{
    BorrowerDataProvider, BorrowerSnapshot, ExperienceFacts, LoanId, LoanType, ProviderError,
    ScoreInputs,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Provider backed by a map; stands in for entity lookup and exit-history services.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBorrowerProvider {
    snapshots: Arc<Mutex<BTreeMap<LoanId, BorrowerSnapshot>>>,
}

impl InMemoryBorrowerProvider {
    pub(crate) fn from_snapshots(snapshots: Vec<BorrowerSnapshot>) -> Self {
        let provider = Self::default();
        for snapshot in snapshots {
            provider.insert(snapshot);
        }
        provider
    }

    pub(crate) fn insert(&self, snapshot: BorrowerSnapshot) {
        let mut guard = self.snapshots.lock().expect("provider mutex poisoned");
        guard.insert(snapshot.loan_id.clone(), snapshot);
    }
}

impl BorrowerDataProvider for InMemoryBorrowerProvider {
    fn fetch(&self, loan_id: &LoanId) -> Result<Option<BorrowerSnapshot>, ProviderError> {
        let guard = self.snapshots.lock().expect("provider mutex poisoned");
        Ok(guard.get(loan_id).cloned())
    }

    fn loan_ids(&self) -> Result<Vec<LoanId>, ProviderError> {
        let guard = self.snapshots.lock().expect("provider mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }
}

/// Seed loans covering each loan type and both exception paths.
pub(crate) fn demo_portfolio() -> Vec<BorrowerSnapshot> {
    vec![
        demo_snapshot(
            "LN-24001",
            [92.0, 88.0, 75.0, 90.0],
            ExperienceFacts {
                loan_type: LoanType::FixAndFlip,
                verified_exits_count: 6,
                verified_volume_usd: 4_200_000.0,
                rehab_cost_usd: Some(310_000.0),
                total_project_cost_usd: Some(1_150_000.0),
            },
        ),
        demo_snapshot(
            "LN-24002",
            [74.0, 70.0, 24.0, 80.0],
            ExperienceFacts {
                loan_type: LoanType::Dscr,
                verified_exits_count: 4,
                verified_volume_usd: 1_800_000.0,
                rehab_cost_usd: None,
                total_project_cost_usd: None,
            },
        ),
        demo_snapshot(
            "LN-24003",
            [62.0, 55.0, 48.0, 60.0],
            ExperienceFacts {
                loan_type: LoanType::Construction,
                verified_exits_count: 1,
                verified_volume_usd: 350_000.0,
                rehab_cost_usd: Some(880_000.0),
                total_project_cost_usd: Some(1_000_000.0),
            },
        ),
        demo_snapshot(
            "LN-24004",
            [28.0, 45.0, 52.0, 40.0],
            ExperienceFacts {
                loan_type: LoanType::Dscr,
                verified_exits_count: 2,
                verified_volume_usd: 3_400_000.0,
                rehab_cost_usd: None,
                total_project_cost_usd: None,
            },
        ),
        demo_snapshot(
            "LN-24005",
            [35.0, 50.0, 60.0, 45.0],
            ExperienceFacts {
                loan_type: LoanType::FixAndFlip,
                verified_exits_count: 0,
                verified_volume_usd: 0.0,
                rehab_cost_usd: Some(120_000.0),
                total_project_cost_usd: None,
            },
        ),
    ]
}

fn demo_snapshot(loan_id: &str, scores: [f64; 4], facts: ExperienceFacts) -> BorrowerSnapshot {
    let [experience, guarantor, liquidity, performance] = scores;
    BorrowerSnapshot {
        loan_id: LoanId(loan_id.to_string()),
        scores: ScoreInputs {
            borrower_experience_score: experience,
            guarantor_record_score: guarantor,
            liquidity_ratio: liquidity,
            performance_record_score: performance,
        },
        facts,
    }
}

pub(crate) fn demo_provider() -> InMemoryBorrowerProvider {
    InMemoryBorrowerProvider::from_snapshots(demo_portfolio())
}
