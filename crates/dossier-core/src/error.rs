use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Case file not found: {0}")]
    CaseFileNotFound(String),

    #[error("Unknown redaction term: {0}")]
    UnknownTerm(String),

    #[error("Guess not found: {0}")]
    GuessNotFound(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Narration error: {0}")]
    Narration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
