use thiserror::Error;

/// Custom error types for the drafting pipeline.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI API: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI API response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI API returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing. Set OPENAI_API_KEY in the environment or a .env file.")]
    MissingApiKey,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No persisted run output at '{0}'. Run a generation pass first (without --render-only).")]
    MissingRunOutput(String),
    #[error("Run output at '{path}' has schema version {found}, expected {expected}. Re-generate it instead of reloading.")]
    SchemaVersionMismatch {
        path: String,
        found: u32,
        expected: u32,
    },
}
