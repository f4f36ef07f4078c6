pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI completion provider.
///
/// Both pipeline passes (section drafting and the compliance/fact-check
/// revision) go through this interface, so tests can substitute a mock
/// without touching the network.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// Implementations return the raw completion text. A response with no
    /// text content yields an empty string rather than an error; transport
    /// and API failures propagate unchanged.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
