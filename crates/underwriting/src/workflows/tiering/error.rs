/// Failures raised by the tier classifier and eligibility evaluator before any scoring happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnderwritingError {
    #[error("invalid {field} ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("unsupported loan type '{0}'")]
    UnsupportedLoanType(String),
}

impl UnderwritingError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason,
        }
    }
}
