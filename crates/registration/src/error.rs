use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognised environment: {0}")]
    UnrecognisedEnvironment(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
