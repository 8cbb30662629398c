use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Duplicate expanded claim type: {expanded}")]
    DuplicateExpandedKey { expanded: String },
    #[error("Ambiguous compact alias {compact}: already mapped from {existing}, requested for {expanded}")]
    AmbiguousCompactAlias {
        compact: String,
        existing: String,
        expanded: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CtError>;
