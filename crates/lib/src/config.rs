//! # Application Configuration
//!
//! Everything that used to live in ambient environment reads is collected
//! here into one `AppConfig`, constructed once at process start and passed
//! by reference into every component that issues outbound calls or touches
//! the filesystem. Components never read the environment themselves.

use crate::errors::PromptError;
use std::env;
use std::path::PathBuf;

/// How `{Country}` placeholders inside section instruction text are handled
/// before the prompt is sent to the model.
///
/// The original templates interleave a structured `country` field with
/// literal placeholders in free text; which of the two the model should see
/// is a deliberate, tested configuration choice rather than an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderMode {
    /// Replace every `{Country}` occurrence with the run's country name.
    #[default]
    Substitute,
    /// Send the instruction text untouched, placeholders included.
    Verbatim,
}

/// Configuration for one pipeline run, resolved before any network call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat-completions endpoint of an OpenAI-compatible API.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Directory for persisted run outputs and rendered documents.
    pub out_dir: PathBuf,
    /// Directory holding `_common.txt` and `<country>.txt` approved-source lists.
    pub sources_dir: PathBuf,
    /// Directory holding scraped grounding bundles, keyed by country and section.
    pub context_dir: PathBuf,
    pub placeholder_mode: PlaceholderMode,
    /// How many sections may be in flight at once during drafting/verification.
    pub concurrency: usize,
}

impl AppConfig {
    /// Loads the configuration from the environment (and an optional `.env`
    /// file). Fails with a descriptive error if the API key is missing, so
    /// the process exits before issuing any network call.
    pub fn from_env() -> Result<Self, PromptError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PromptError::MissingApiKey)?;

        let api_url = env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());
        let model = env::var("PIFGEN_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            api_url,
            api_key,
            model,
            out_dir: path_var("PIFGEN_OUT_DIR", "out"),
            sources_dir: path_var("PIFGEN_SOURCES_DIR", "sources"),
            context_dir: path_var("PIFGEN_CONTEXT_DIR", "data/context"),
            placeholder_mode: PlaceholderMode::default(),
            concurrency: 2,
        })
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}
