use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnderwritingError;

/// Identifier wrapper for loans under review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub String);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized 0-100 sub-scores supplied by upstream verification systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub borrower_experience_score: f64,
    pub guarantor_record_score: f64,
    pub liquidity_ratio: f64,
    pub performance_record_score: f64,
}

impl ScoreInputs {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Rejects non-finite values and anything outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), UnderwritingError> {
        let fields = [
            ("borrower_experience_score", self.borrower_experience_score),
            ("guarantor_record_score", self.guarantor_record_score),
            ("liquidity_ratio", self.liquidity_ratio),
            ("performance_record_score", self.performance_record_score),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(UnderwritingError::invalid(field, value, "must be a finite number"));
            }
            if !(Self::MIN..=Self::MAX).contains(&value) {
                return Err(UnderwritingError::invalid(
                    field,
                    value,
                    "must be within [0, 100]",
                ));
            }
        }

        Ok(())
    }
}

/// Loan products with their own experience requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    FixAndFlip,
    Construction,
    Dscr,
}

impl LoanType {
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::FixAndFlip => "Fix & Flip",
            LoanType::Construction => "Construction",
            LoanType::Dscr => "DSCR",
        }
    }
}

impl FromStr for LoanType {
    type Err = UnderwritingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fix_and_flip" | "fix & flip" | "fix and flip" | "fixandflip" => Ok(Self::FixAndFlip),
            "construction" => Ok(Self::Construction),
            "dscr" => Ok(Self::Dscr),
            _ => Err(UnderwritingError::UnsupportedLoanType(value.trim().to_string())),
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verified track record used by the loan-type eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceFacts {
    pub loan_type: LoanType,
    pub verified_exits_count: u32,
    pub verified_volume_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rehab_cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_project_cost_usd: Option<f64>,
}

impl ExperienceFacts {
    /// Dollar amounts must be finite and non-negative; counts are unsigned by construction.
    pub fn validate(&self) -> Result<(), UnderwritingError> {
        check_amount("verified_volume_usd", self.verified_volume_usd)?;
        if let Some(rehab) = self.rehab_cost_usd {
            check_amount("rehab_cost_usd", rehab)?;
        }
        if let Some(total) = self.total_project_cost_usd {
            check_amount("total_project_cost_usd", total)?;
        }
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), UnderwritingError> {
    if !value.is_finite() {
        return Err(UnderwritingError::invalid(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(UnderwritingError::invalid(field, value, "must not be negative"));
    }
    Ok(())
}

/// Discrete borrower-risk classification, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Bronze => "Bronze",
        }
    }

    /// Higher rank means a stronger borrower (Bronze = 0).
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Platinum => 3,
            Tier::Gold => 2,
            Tier::Silver => 1,
            Tier::Bronze => 0,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical decision status shared by every review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pass,
    Fail,
    ManualReview,
    Warning,
    Pending,
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pass => "Pass",
            ReviewStatus::Fail => "Fail",
            ReviewStatus::ManualReview => "Manual Review",
            ReviewStatus::Warning => "Warning",
            ReviewStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the data provider knows about one loan's borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSnapshot {
    pub loan_id: LoanId,
    pub scores: ScoreInputs,
    pub facts: ExperienceFacts,
}
