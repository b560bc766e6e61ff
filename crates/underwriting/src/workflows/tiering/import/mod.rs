mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::domain::{BorrowerSnapshot, ExperienceFacts, LoanId, LoanType, ScoreInputs};
use super::error::UnderwritingError;
use parser::BorrowerRow;

#[derive(Debug)]
pub enum BorrowerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Underwriting {
        loan_id: String,
        source: UnderwritingError,
    },
    DuplicateLoan {
        loan_id: String,
    },
}

impl std::fmt::Display for BorrowerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowerImportError::Io(err) => write!(f, "failed to read borrower export: {}", err),
            BorrowerImportError::Csv(err) => write!(f, "invalid borrower CSV data: {}", err),
            BorrowerImportError::Underwriting { loan_id, source } => {
                write!(f, "borrower row for loan {}: {}", loan_id, source)
            }
            BorrowerImportError::DuplicateLoan { loan_id } => {
                write!(f, "loan {} appears more than once in the export", loan_id)
            }
        }
    }
}

impl std::error::Error for BorrowerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BorrowerImportError::Io(err) => Some(err),
            BorrowerImportError::Csv(err) => Some(err),
            BorrowerImportError::Underwriting { source, .. } => Some(source),
            BorrowerImportError::DuplicateLoan { .. } => None,
        }
    }
}

impl From<std::io::Error> for BorrowerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BorrowerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads borrower track-record exports into provider snapshots.
///
/// Score ranges are checked when a loan is reviewed, so a single out-of-range row surfaces as
/// that loan's failure instead of rejecting the whole export. Unknown loan types and repeated
/// loan ids fail here.
pub struct BorrowerCsvImporter;

impl BorrowerCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<BorrowerSnapshot>, BorrowerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BorrowerSnapshot>, BorrowerImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut seen = HashSet::with_capacity(rows.len());
        let mut snapshots = Vec::with_capacity(rows.len());

        for row in rows {
            if !seen.insert(row.loan_id.clone()) {
                return Err(BorrowerImportError::DuplicateLoan {
                    loan_id: row.loan_id,
                });
            }
            snapshots.push(snapshot_from_row(row)?);
        }

        Ok(snapshots)
    }
}

fn snapshot_from_row(row: BorrowerRow) -> Result<BorrowerSnapshot, BorrowerImportError> {
    let loan_type = row.loan_type.parse::<LoanType>().map_err(|source| {
        BorrowerImportError::Underwriting {
            loan_id: row.loan_id.clone(),
            source,
        }
    })?;

    Ok(BorrowerSnapshot {
        loan_id: LoanId(row.loan_id),
        scores: ScoreInputs {
            borrower_experience_score: row.borrower_experience_score,
            guarantor_record_score: row.guarantor_record_score,
            liquidity_ratio: row.liquidity_ratio,
            performance_record_score: row.performance_record_score,
        },
        facts: ExperienceFacts {
            loan_type,
            verified_exits_count: row.verified_exits,
            verified_volume_usd: row.verified_volume,
            rehab_cost_usd: row.rehab_cost,
            total_project_cost_usd: row.total_project_cost,
        },
    })
}
