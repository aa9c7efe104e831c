use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("not enough unique items: found {found}, need at least {required}")]
    InsufficientItems { found: usize, required: usize },
    #[error("invalid card count: {0} (need at least 1)")]
    InvalidCardCount(usize),
    #[error("invalid card: {0}")]
    InvalidCard(String),
}
