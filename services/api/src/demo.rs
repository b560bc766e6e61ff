use crate::infra::demo_provider;
use crate::routes::{batch_response, import_batch, BatchReviewResponse};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use underwriting::config::AppConfig;
use underwriting::error::AppError;
use underwriting::workflows::tiering::{
    EligibilityEvaluator, EvaluationOutcome, ExperienceFacts, LoanType, ScoreInputs, TierClassifier,
    TierResult, TieringService,
};

#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct ScoreArgs {
    /// Borrower experience score (0-100)
    #[arg(long)]
    pub(crate) experience: f64,
    /// Guarantor record score (0-100)
    #[arg(long)]
    pub(crate) guarantor: f64,
    /// Liquidity ratio (0-100)
    #[arg(long)]
    pub(crate) liquidity: f64,
    /// Performance record score (0-100)
    #[arg(long)]
    pub(crate) performance: f64,
}

impl ScoreArgs {
    fn inputs(&self) -> ScoreInputs {
        ScoreInputs {
            borrower_experience_score: self.experience,
            guarantor_record_score: self.guarantor,
            liquidity_ratio: self.liquidity,
            performance_record_score: self.performance,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    #[command(flatten)]
    pub(crate) scores: ScoreArgs,
    /// Loan product: fix_and_flip, construction or dscr
    #[arg(long)]
    pub(crate) loan_type: String,
    /// Verified exits on the borrower's record
    #[arg(long, default_value_t = 0)]
    pub(crate) exits: u32,
    /// Verified transaction volume in USD
    #[arg(long, default_value_t = 0.0)]
    pub(crate) volume: f64,
    /// Rehab budget in USD
    #[arg(long)]
    pub(crate) rehab_cost: Option<f64>,
    /// Total project cost in USD
    #[arg(long)]
    pub(crate) total_project_cost: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Borrower CSV export to review
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the batch result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_tier(args: ScoreArgs) -> Result<(), AppError> {
    let result = TierClassifier::new().compute_tier(&args.inputs())?;
    render_tier(&result);
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let loan_type: LoanType = args.loan_type.parse()?;
    let facts = ExperienceFacts {
        loan_type,
        verified_exits_count: args.exits,
        verified_volume_usd: args.volume,
        rehab_cost_usd: args.rehab_cost,
        total_project_cost_usd: args.total_project_cost,
    };

    let (tier, outcome) =
        EligibilityEvaluator::default().evaluate_with_tier(&facts, &args.scores.inputs())?;

    println!("{} eligibility check", loan_type);
    render_tier(&tier);
    render_outcome(&outcome);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let export = std::fs::File::open(&args.csv)?;
    let service = import_batch(export, &config.batch)?;
    let batch = batch_response(&service)?;

    if args.json {
        println!("{}", batch_json(&batch)?);
        return Ok(());
    }

    println!(
        "Reviewed {} loan(s) from {}",
        batch.reviewed,
        args.csv.display()
    );
    for review in &batch.reviews {
        println!(
            "- {} | {} ({:.1}) | {} | {}",
            review.loan_id,
            review.tier,
            review.composite_score,
            review.status,
            review.decision_rationale
        );
    }

    if !batch.failures.is_empty() {
        println!("\nRejected rows");
        for failure in &batch.failures {
            println!("- {}: {}", failure.loan_id, failure.error);
        }
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Borrower experience tiering demo");
    let service = TieringService::new(Arc::new(demo_provider()));

    for (loan_id, result) in service.review_all()? {
        match result {
            Ok(review) => {
                println!("\nLoan {} -> {}", loan_id, review.status);
                render_tier(&review.tier_result);
                render_outcome(&review.eligibility);
            }
            Err(err) => println!("\nLoan {} could not be reviewed: {}", loan_id, err),
        }
    }

    Ok(())
}

fn batch_json(batch: &BatchReviewResponse) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(batch)?)
}

fn render_tier(result: &TierResult) {
    let caps = result.caps();
    println!("  {}", result.summary());
    println!(
        "  Exposure limit ${} | LTC cap {}% | ARV cap {}%",
        caps.exposure_limit_usd, caps.ltc_cap_percent, caps.arv_cap_percent
    );
}

fn render_outcome(outcome: &EvaluationOutcome) {
    println!("  Eligibility: {}", outcome.summary());
    println!("  Review status: {}", outcome.review_status());
    match outcome.exception_reason {
        Some(reason) => println!("  Exception flagged: {}", reason.label()),
        None => println!("  Exceptions: none"),
    }
}
