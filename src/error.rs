//! Error types for the fallible edges of the crate (input loading and parsing)
//!
//! The appraisal engine itself never fails: degenerate inputs map to sentinel
//! results. Only reading and interpreting caller-supplied data can error.

use thiserror::Error;

/// A specialized Result type for loading and parsing appraisal inputs
pub type AppraisalResult<T> = Result<T, AppraisalError>;

/// Errors raised while reading or interpreting appraisal inputs
#[derive(Error, Debug)]
pub enum AppraisalError {
    /// Underlying file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record or header
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Contribution polarity other than benefit/cost
    #[error("Unknown contribution type: {0:?} (expected \"benefit\" or \"cost\")")]
    UnknownContributionType(String),

    /// Estimate basis other than pessimistic/likely/optimistic/pert
    #[error("Unknown estimate basis: {0:?}")]
    UnknownEstimateBasis(String),

    /// Appraisal periods are numbered from 1
    #[error("Invalid year {year} for {node_id}: periods start at 1")]
    InvalidYear {
        /// Line item that carried the bad year
        node_id: String,
        /// The rejected year value
        year: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppraisalError::InvalidYear { node_id: "b-1".to_string(), year: 0 };
        assert!(err.to_string().contains("b-1"));
        assert!(err.to_string().contains("start at 1"));

        let err = AppraisalError::UnknownContributionType("risk".to_string());
        assert!(err.to_string().contains("\"risk\""));
    }
}
