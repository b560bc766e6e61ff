use super::common::*;
use crate::workflows::tiering::{
    EligibilityDecision, EligibilityEvaluator, ExceptionReason, ExperienceFacts, LoanType,
    ReviewStatus, Tier, UnderwritingError,
};

fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::default()
}

#[test]
fn low_liquidity_flags_exception_regardless_of_other_inputs() {
    let low = scores(95.0, 95.0, 29.9, 95.0);

    let outcome = evaluator()
        .evaluate(&facts(LoanType::Dscr, 5, 5_000_000.0), &low)
        .expect("valid inputs");

    assert!(outcome.exception_flag);
    assert_eq!(
        outcome.exception_reason,
        Some(ExceptionReason::LiquidityBelowThreshold)
    );
    assert_eq!(
        outcome.exception_reason.map(|reason| reason.label()),
        Some("Liquidity Below Threshold")
    );
    assert_eq!(outcome.outcome, EligibilityDecision::Pass);
    assert_eq!(outcome.review_status(), ReviewStatus::Warning);
}

#[test]
fn liquidity_at_threshold_does_not_fire() {
    let at_floor = scores(95.0, 95.0, 30.0, 95.0);

    let outcome = evaluator()
        .evaluate(&facts(LoanType::Dscr, 5, 5_000_000.0), &at_floor)
        .expect("valid inputs");

    assert!(!outcome.exception_flag);
    assert_eq!(outcome.exception_reason, None);
    assert_eq!(outcome.review_status(), ReviewStatus::Pass);
}

#[test]
fn high_volume_bronze_borrower_is_flagged_for_override() {
    let (tier, outcome) = evaluator()
        .evaluate_with_tier(&facts(LoanType::Dscr, 0, 3_000_001.0), &bronze_scores())
        .expect("valid inputs");

    assert_eq!(tier.tier, Tier::Bronze);
    assert!(outcome.exception_flag);
    assert_eq!(
        outcome.exception_reason.map(|reason| reason.label()),
        Some("Tier Override - High Volume")
    );
}

#[test]
fn override_requires_volume_strictly_above_three_million() {
    let outcome = evaluator()
        .evaluate(&facts(LoanType::Dscr, 0, 3_000_000.0), &bronze_scores())
        .expect("valid inputs");

    assert!(!outcome.exception_flag);
    assert_eq!(outcome.exception_reason, None);
}

#[test]
fn liquidity_reason_wins_when_both_conditions_hold() {
    let outcome = evaluator()
        .evaluate(
            &facts(LoanType::Dscr, 0, 4_000_000.0),
            &scores(20.0, 50.0, 10.0, 50.0),
        )
        .expect("valid inputs");

    assert_eq!(
        outcome.exception_reason,
        Some(ExceptionReason::LiquidityBelowThreshold)
    );
}

#[test]
fn override_does_not_apply_to_silver_and_above() {
    let outcome = evaluator()
        .evaluate(&facts(LoanType::Dscr, 0, 9_000_000.0), &strong_scores())
        .expect("valid inputs");

    assert!(!outcome.exception_flag);
}

#[test]
fn fix_and_flip_heavy_rehab_with_two_exits_passes() {
    let outcome = evaluator()
        .evaluate(&flip_facts(300_000.0, 2, 0.0), &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::Pass);
    assert_eq!(outcome.review_reason, None);
}

#[test]
fn fix_and_flip_heavy_rehab_with_one_exit_falls_back_to_volume() {
    let with_volume = evaluator()
        .evaluate(&flip_facts(300_000.0, 1, 450_000.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(with_volume.outcome, EligibilityDecision::Pass);

    let without_volume = evaluator()
        .evaluate(&flip_facts(300_000.0, 1, 0.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(without_volume.outcome, EligibilityDecision::ManualReview);
    assert_eq!(
        without_volume.review_reason.as_deref(),
        Some("Insufficient Experience")
    );
}

#[test]
fn fix_and_flip_light_rehab_with_experience_goes_to_review() {
    let outcome = evaluator()
        .evaluate(&flip_facts(250_000.0, 3, 2_000_000.0), &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::ManualReview);
    assert_eq!(outcome.review_reason, None);
    assert_eq!(outcome.review_status(), ReviewStatus::ManualReview);
}

#[test]
fn fix_and_flip_without_rehab_uses_exit_history() {
    let outcome = evaluator()
        .evaluate(&facts(LoanType::FixAndFlip, 1, 200_000.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(outcome.outcome, EligibilityDecision::Pass);

    let first_timer = evaluator()
        .evaluate(&facts(LoanType::FixAndFlip, 0, 0.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(first_timer.outcome, EligibilityDecision::ManualReview);
    assert_eq!(
        first_timer.review_reason.as_deref(),
        Some("Insufficient Experience")
    );
}

#[test]
fn construction_with_track_record_passes() {
    let outcome = evaluator()
        .evaluate(&facts(LoanType::Construction, 2, 500_000.0), &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::Pass);
}

#[test]
fn construction_budget_far_from_rehab_goes_to_review() {
    let construction = ExperienceFacts {
        rehab_cost_usd: Some(300_000.0),
        total_project_cost_usd: Some(1_000_000.0),
        ..facts(LoanType::Construction, 1, 100_000.0)
    };

    let outcome = evaluator()
        .evaluate(&construction, &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::ManualReview);
    assert_eq!(
        outcome.review_reason.as_deref(),
        Some("Insufficient Construction Experience")
    );
}

#[test]
fn construction_rehab_close_to_budget_passes() {
    let construction = ExperienceFacts {
        rehab_cost_usd: Some(900_000.0),
        total_project_cost_usd: Some(1_000_000.0),
        ..facts(LoanType::Construction, 0, 0.0)
    };

    let outcome = evaluator()
        .evaluate(&construction, &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::Pass);
}

#[test]
fn construction_budget_gap_of_exactly_twenty_percent_is_not_close_enough() {
    let on_the_line = ExperienceFacts {
        rehab_cost_usd: Some(800_000.0),
        total_project_cost_usd: Some(1_000_000.0),
        ..facts(LoanType::Construction, 1, 100_000.0)
    };
    let just_inside = ExperienceFacts {
        rehab_cost_usd: Some(800_001.0),
        ..on_the_line.clone()
    };

    let on_the_line = evaluator()
        .evaluate(&on_the_line, &strong_scores())
        .expect("valid inputs");
    let just_inside = evaluator()
        .evaluate(&just_inside, &strong_scores())
        .expect("valid inputs");

    assert_eq!(on_the_line.outcome, EligibilityDecision::ManualReview);
    assert_eq!(
        on_the_line.review_reason.as_deref(),
        Some("Insufficient Construction Experience")
    );
    assert_eq!(just_inside.outcome, EligibilityDecision::Pass);
}

#[test]
fn construction_needs_both_costs_for_budget_branch() {
    let construction = ExperienceFacts {
        rehab_cost_usd: Some(900_000.0),
        ..facts(LoanType::Construction, 0, 0.0)
    };

    let outcome = evaluator()
        .evaluate(&construction, &strong_scores())
        .expect("valid inputs");

    assert_eq!(outcome.outcome, EligibilityDecision::ManualReview);
}

#[test]
fn dscr_passes_on_exits_or_volume() {
    let by_exits = evaluator()
        .evaluate(&facts(LoanType::Dscr, 3, 0.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(by_exits.outcome, EligibilityDecision::Pass);

    let by_volume = evaluator()
        .evaluate(&facts(LoanType::Dscr, 0, 1_000_000.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(by_volume.outcome, EligibilityDecision::Pass);

    let short = evaluator()
        .evaluate(&facts(LoanType::Dscr, 2, 999_999.0), &strong_scores())
        .expect("valid inputs");
    assert_eq!(short.outcome, EligibilityDecision::ManualReview);
    assert_eq!(
        short.review_reason.as_deref(),
        Some("Insufficient Rental Experience")
    );
}

#[test]
fn invalid_scores_fail_before_evaluation() {
    let err = evaluator()
        .evaluate(
            &facts(LoanType::Dscr, 3, 0.0),
            &scores(101.0, 50.0, 50.0, 50.0),
        )
        .expect_err("score above range");

    assert!(matches!(
        err,
        UnderwritingError::InvalidInput {
            field: "borrower_experience_score",
            ..
        }
    ));
}

#[test]
fn negative_costs_fail_before_evaluation() {
    let err = evaluator()
        .evaluate(&flip_facts(-1.0, 2, 0.0), &strong_scores())
        .expect_err("negative rehab");

    assert!(matches!(
        err,
        UnderwritingError::InvalidInput {
            field: "rehab_cost_usd",
            ..
        }
    ));
}

#[test]
fn summary_mentions_reason_and_exception() {
    let outcome = evaluator()
        .evaluate(
            &facts(LoanType::Dscr, 0, 0.0),
            &scores(60.0, 60.0, 10.0, 60.0),
        )
        .expect("valid inputs");

    let summary = outcome.summary();
    assert!(summary.starts_with("Manual Review"));
    assert!(summary.contains("Insufficient Rental Experience"));
    assert!(summary.contains("Liquidity Below Threshold"));
}
