use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
