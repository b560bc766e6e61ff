mod schedule;

pub use schedule::{
    band_for, LendingCaps, TierBand, BORROWER_EXPERIENCE_WEIGHT,
    GUARANTOR_RECORD_WEIGHT, LIQUIDITY_WEIGHT, PERFORMANCE_RECORD_WEIGHT, TIER_SCHEDULE,
};

use super::domain::{ScoreInputs, Tier};
use super::error::UnderwritingError;
use serde::{Deserialize, Serialize};

/// Stateless classifier mapping weighted sub-scores onto the tier schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierClassifier;

impl TierClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_tier(&self, inputs: &ScoreInputs) -> Result<TierResult, UnderwritingError> {
        inputs.validate()?;

        let composite_score = composite_score(inputs);
        let band = band_for(composite_score);

        Ok(TierResult {
            composite_score,
            confidence: composite_score / 100.0,
            tier: band.tier,
            exposure_limit_usd: band.caps.exposure_limit_usd,
            ltc_cap_percent: band.caps.ltc_cap_percent,
            arv_cap_percent: band.caps.arv_cap_percent,
        })
    }
}

/// Weighted blend of the four sub-scores. Callers validate first.
pub(crate) fn composite_score(inputs: &ScoreInputs) -> f64 {
    inputs.borrower_experience_score * BORROWER_EXPERIENCE_WEIGHT
        + inputs.guarantor_record_score * GUARANTOR_RECORD_WEIGHT
        + inputs.liquidity_ratio * LIQUIDITY_WEIGHT
        + inputs.performance_record_score * PERFORMANCE_RECORD_WEIGHT
}

/// Tier assignment together with the lending caps it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    pub composite_score: f64,
    pub confidence: f64,
    pub tier: Tier,
    pub exposure_limit_usd: u64,
    pub ltc_cap_percent: u8,
    pub arv_cap_percent: u8,
}

impl TierResult {
    pub fn caps(&self) -> LendingCaps {
        LendingCaps {
            exposure_limit_usd: self.exposure_limit_usd,
            ltc_cap_percent: self.ltc_cap_percent,
            arv_cap_percent: self.arv_cap_percent,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} tier (composite {:.2}, confidence {:.0}%)",
            self.tier,
            self.composite_score,
            self.confidence * 100.0
        )
    }
}
