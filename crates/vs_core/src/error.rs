use thiserror::Error;

/// Data-authoring errors, raised while resolving character/cancel tables at
/// load time. Runtime missing-data conditions (unset animation, absent
/// movedata) are never errors; they fall back per the engine contract.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown state name in table: {0}")]
    UnknownState(String),

    #[error("duplicate attack definition: {0}")]
    DuplicateAttack(String),

    #[error("attack table too large: {0} entries")]
    TooManyAttacks(usize),

    #[error("invalid character data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
