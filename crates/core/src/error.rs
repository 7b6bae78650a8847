use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptflowError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Invalid API response: {reason}")]
    InvalidResponse { reason: String },

    #[error("No content generated")]
    EmptyResponse,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scene {index} is out of range (script has {len} scenes)")]
    SegmentOutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, ScriptflowError>;
