use thiserror::Error;

/// Failures that abort an evaluation run.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("QA handler failed: {0}")]
    Handler(String),

    #[error("Malformed QA response: {0}")]
    MalformedResponse(String),

    #[error("No gold label for question index {0}")]
    MissingGold(usize),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvalError>;
