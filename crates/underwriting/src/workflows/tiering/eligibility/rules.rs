use super::super::domain::{ExperienceFacts, LoanType};
use super::EligibilityDecision;

const FLIP_HEAVY_REHAB_USD: f64 = 250_000.0;
const FLIP_HEAVY_REHAB_MIN_EXITS: u32 = 2;
const FLIP_LIGHT_REHAB_MIN_EXITS: u32 = 1;

const CONSTRUCTION_MIN_EXITS: u32 = 2;
const CONSTRUCTION_MIN_VOLUME_USD: f64 = 500_000.0;
const CONSTRUCTION_MIN_REHAB_USD: f64 = 250_000.0;
const CONSTRUCTION_BUDGET_TOLERANCE: f64 = 0.20;

const DSCR_MIN_EXITS: u32 = 3;
const DSCR_MIN_VOLUME_USD: f64 = 1_000_000.0;

const INSUFFICIENT_EXPERIENCE: &str = "Insufficient Experience";
const INSUFFICIENT_CONSTRUCTION_EXPERIENCE: &str = "Insufficient Construction Experience";
const INSUFFICIENT_RENTAL_EXPERIENCE: &str = "Insufficient Rental Experience";

pub(crate) struct RuleVerdict {
    pub decision: EligibilityDecision,
    pub review_reason: Option<&'static str>,
}

impl RuleVerdict {
    fn pass() -> Self {
        Self {
            decision: EligibilityDecision::Pass,
            review_reason: None,
        }
    }

    fn review(reason: Option<&'static str>) -> Self {
        Self {
            decision: EligibilityDecision::ManualReview,
            review_reason: reason,
        }
    }
}

pub(crate) fn loan_type_verdict(facts: &ExperienceFacts) -> RuleVerdict {
    match facts.loan_type {
        LoanType::FixAndFlip => fix_and_flip(facts),
        LoanType::Construction => construction(facts),
        LoanType::Dscr => dscr(facts),
    }
}

// A missing rehab cost satisfies neither rehab comparison.
fn fix_and_flip(facts: &ExperienceFacts) -> RuleVerdict {
    let exits = facts.verified_exits_count;

    match facts.rehab_cost_usd {
        Some(rehab) if rehab > FLIP_HEAVY_REHAB_USD && exits >= FLIP_HEAVY_REHAB_MIN_EXITS => {
            return RuleVerdict::pass();
        }
        Some(rehab) if rehab <= FLIP_HEAVY_REHAB_USD && exits >= FLIP_LIGHT_REHAB_MIN_EXITS => {
            return RuleVerdict::review(None);
        }
        _ => {}
    }

    if exits > 0 && facts.verified_volume_usd > 0.0 {
        RuleVerdict::pass()
    } else {
        RuleVerdict::review(Some(INSUFFICIENT_EXPERIENCE))
    }
}

fn construction(facts: &ExperienceFacts) -> RuleVerdict {
    if facts.verified_exits_count >= CONSTRUCTION_MIN_EXITS
        && facts.verified_volume_usd >= CONSTRUCTION_MIN_VOLUME_USD
    {
        return RuleVerdict::pass();
    }

    if let (Some(rehab), Some(total)) = (facts.rehab_cost_usd, facts.total_project_cost_usd) {
        let within_budget = (rehab - total).abs() < total * CONSTRUCTION_BUDGET_TOLERANCE;
        if rehab > CONSTRUCTION_MIN_REHAB_USD && within_budget {
            return RuleVerdict::pass();
        }
    }

    RuleVerdict::review(Some(INSUFFICIENT_CONSTRUCTION_EXPERIENCE))
}

fn dscr(facts: &ExperienceFacts) -> RuleVerdict {
    if facts.verified_exits_count >= DSCR_MIN_EXITS
        || facts.verified_volume_usd >= DSCR_MIN_VOLUME_USD
    {
        RuleVerdict::pass()
    } else {
        RuleVerdict::review(Some(INSUFFICIENT_RENTAL_EXPERIENCE))
    }
}
