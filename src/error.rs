use crate::pipeline::PipelineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthCheckError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API key is not set. Export OPENAI_API_KEY or run `authcheck config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AuthCheckError {
    /// 利用者向けの短いメッセージ（`Error:` で始まる）
    pub fn user_message(&self) -> String {
        match self {
            AuthCheckError::Pipeline(e) => e.user_message(),
            other => format!("Error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthCheckError>;
