use kinemeter_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KinemeterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("World error: {0}")]
    World(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, KinemeterError>;
