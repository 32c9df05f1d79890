// Error types for the merger calculator
// A zero denominator anywhere in the pipeline aborts the whole analysis.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergerError {
    /// A ratio was asked to divide by exactly zero
    #[error("division by zero while computing {quantity}")]
    DivisionByZero { quantity: &'static str },

    /// A boundary value (CSV cell, CLI flag, JSON field) was not usable
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("scenario file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergerError {
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, MergerError::DivisionByZero { .. })
    }
}

pub type AnalysisResult<T> = Result<T, MergerError>;
