use serde::{Deserialize, Serialize};

use super::super::classifier::TierResult;
use super::super::domain::{ExperienceFacts, ScoreInputs, Tier};

const LIQUIDITY_FLOOR: f64 = 30.0;
const BRONZE_VOLUME_OVERRIDE_USD: f64 = 3_000_000.0;

/// Secondary risk signals tracked alongside the eligibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionReason {
    #[serde(rename = "Liquidity Below Threshold")]
    LiquidityBelowThreshold,
    #[serde(rename = "Tier Override - High Volume")]
    TierOverrideHighVolume,
}

impl ExceptionReason {
    pub fn label(&self) -> &'static str {
        match self {
            ExceptionReason::LiquidityBelowThreshold => "Liquidity Below Threshold",
            ExceptionReason::TierOverrideHighVolume => "Tier Override - High Volume",
        }
    }
}

/// First matching condition wins.
pub(crate) fn detect_exception(
    scores: &ScoreInputs,
    tier_result: &TierResult,
    facts: &ExperienceFacts,
) -> Option<ExceptionReason> {
    if scores.liquidity_ratio < LIQUIDITY_FLOOR {
        return Some(ExceptionReason::LiquidityBelowThreshold);
    }

    if tier_result.tier == Tier::Bronze && facts.verified_volume_usd > BRONZE_VOLUME_OVERRIDE_USD {
        return Some(ExceptionReason::TierOverrideHighVolume);
    }

    None
}
