use serde::{Deserialize, Serialize};

use super::super::domain::Tier;

pub const BORROWER_EXPERIENCE_WEIGHT: f64 = 0.60;
pub const GUARANTOR_RECORD_WEIGHT: f64 = 0.20;
pub const LIQUIDITY_WEIGHT: f64 = 0.10;
pub const PERFORMANCE_RECORD_WEIGHT: f64 = 0.10;

/// Lending limits granted to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingCaps {
    pub exposure_limit_usd: u64,
    pub ltc_cap_percent: u8,
    pub arv_cap_percent: u8,
}

/// One row of the tier schedule; `lower_bound` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBand {
    pub lower_bound: f64,
    pub tier: Tier,
    pub caps: LendingCaps,
}

/// Ordered by descending lower bound. The final row must accept every valid score.
pub static TIER_SCHEDULE: [TierBand; 4] = [
    TierBand {
        lower_bound: 85.0,
        tier: Tier::Platinum,
        caps: LendingCaps {
            exposure_limit_usd: 10_000_000,
            ltc_cap_percent: 90,
            arv_cap_percent: 75,
        },
    },
    TierBand {
        lower_bound: 70.0,
        tier: Tier::Gold,
        caps: LendingCaps {
            exposure_limit_usd: 5_000_000,
            ltc_cap_percent: 85,
            arv_cap_percent: 70,
        },
    },
    TierBand {
        lower_bound: 50.0,
        tier: Tier::Silver,
        caps: LendingCaps {
            exposure_limit_usd: 2_000_000,
            ltc_cap_percent: 80,
            arv_cap_percent: 65,
        },
    },
    TierBand {
        lower_bound: 0.0,
        tier: Tier::Bronze,
        caps: LendingCaps {
            exposure_limit_usd: 1_000_000,
            ltc_cap_percent: 75,
            arv_cap_percent: 60,
        },
    },
];

/// Returns the first band whose inclusive lower bound the score reaches.
pub fn band_for(composite_score: f64) -> &'static TierBand {
    let floor = &TIER_SCHEDULE[TIER_SCHEDULE.len() - 1];
    TIER_SCHEDULE
        .iter()
        .find(|band| composite_score >= band.lower_bound)
        .unwrap_or(floor)
}
