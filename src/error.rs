use std::io;

use thiserror::Error;

/// Error type for segtree
#[derive(Error, Debug)]
pub enum SegtreeError {
    /// The source sequence had no elements
    #[error("source sequence cannot be empty")]
    EmptyInput,

    /// A session line could not be understood
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The combine operation does not fit the element kind
    #[error("operation `{0}` does not accept these values")]
    ElementMismatch(String),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SegtreeError>;
