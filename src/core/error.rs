use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("required input file not found: {0:?}")]
    MissingInput(PathBuf),

    #[error("invalid ratio table '{table}': {reason}")]
    InvalidDistribution { table: String, reason: String },

    #[error("{label}: tolerance {tolerance} not met after {attempts} attempts (max relative deviation {deviation:.3})")]
    ToleranceNotMet {
        label: String,
        tolerance: f64,
        attempts: usize,
        deviation: f64,
    },

    #[error("unknown build style '{0}' (expected single, single-shot, multi or incremental)")]
    UnknownBuildStyle(String),

    #[error("unknown reference dataset '{0}'")]
    UnknownDataset(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Fatal errors abort the run; everything else is logged and generation continues.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GenError::ToleranceNotMet { .. })
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
