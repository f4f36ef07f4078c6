use async_trait::async_trait;
use pifgen::errors::PromptError;
use pifgen::providers::ai::AiProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Mock AI Provider ---

/// A canned response, optionally delayed to exercise completion-order
/// shuffling in the pipeline.
#[derive(Clone, Debug)]
struct CannedResponse {
    text: String,
    delay: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, CannedResponse>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for prompts containing `key`. Keys are
    /// matched as substrings of the user or system prompt; when several
    /// match, the longest key wins. Drafting calls are usually keyed on a
    /// fragment of the section instructions, verification calls on a
    /// fragment of the draft text embedded in the review prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(
            key.to_string(),
            CannedResponse {
                text: response.to_string(),
                delay: None,
            },
        );
    }

    /// Like [`add_response`](Self::add_response), but the reply resolves
    /// only after `delay_ms`, so tests can force one section to finish
    /// after another.
    pub fn add_delayed_response(&self, key: &str, response: &str, delay_ms: u64) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(
            key.to_string(),
            CannedResponse {
                text: response.to_string(),
                delay: Some(Duration::from_millis(delay_ms)),
            },
        );
    }

    /// Retrieves the recorded (system, user) prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.push((system_prompt.to_string(), user_prompt.to_string()));
        }

        let canned = {
            let responses = self.responses.lock().unwrap();
            responses
                .iter()
                .filter(|(key, _)| {
                    user_prompt.contains(key.as_str()) || system_prompt.contains(key.as_str())
                })
                .max_by_key(|(key, _)| key.len())
                .map(|(_, canned)| canned.clone())
        };

        match canned {
            Some(canned) => {
                if let Some(delay) = canned.delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(canned.text)
            }
            None => Err(PromptError::AiApi(format!(
                "MockAiProvider: No response programmed for prompt. User prompt was: '{user_prompt}'"
            ))),
        }
    }
}
