use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("field returned a derivative of length {found}, expected {expected}")]
    DerivativeLength { expected: usize, found: usize },

    #[error("state became non-finite at t={t}")]
    NonFinite { t: f64 },

    #[error("trajectory shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("trajectory statistics: {0}")]
    Stats(#[from] MinMaxError),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
