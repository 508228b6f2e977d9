use thiserror::Error;

/// Failures surfaced to the user. Neither is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    LocationUnavailable(String),
    #[error("Inputs have to be positive numbers!")]
    InvalidInput,
}

pub type Result<T> = std::result::Result<T, Error>;
