use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyParetoError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Empty Corpus: '{0}' has a total length of zero")]
    EmptyCorpus(String),
}

pub type KpResult<T> = Result<T, KeyParetoError>;
