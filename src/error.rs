use thiserror::Error;

/// Configuration errors, raised before any constraint is emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MimcError {
    #[error("permutation needs {rounds} round constants but only {available} are available")]
    InsufficientConstants { rounds: usize, available: usize },
    #[error("message must contain at least one block")]
    EmptyMessage,
}
