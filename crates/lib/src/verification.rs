//! # Verification/Revision Pass
//!
//! Second pipeline pass: re-submits a drafted section with the compliance
//! rules and the approved-source list, and returns the rewritten text. The
//! response carries a trailing summary block introduced by
//! [`crate::prompts::verification::VERIFICATION_NOTES_HEADING`]; callers
//! must not assume it is absent.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::drafting::SectionDraft;
use crate::errors::PromptError;
use crate::prompts::verification::build_verification_prompt;
use crate::providers::ai::AiProvider;
use crate::sections::SectionSpec;

/// Second-pass text for a section, after the compliance rewrite. The draft
/// it was derived from is superseded, not mutated.
#[derive(Debug, Clone)]
pub struct VerifiedSection {
    pub key: String,
    pub title: String,
    pub text: String,
    pub verified_at: DateTime<Utc>,
}

/// Runs one compliance/fact-check pass over an already-drafted section.
pub struct Verifier<'a> {
    provider: &'a dyn AiProvider,
}

impl<'a> Verifier<'a> {
    pub fn new(provider: &'a dyn AiProvider) -> Self {
        Self { provider }
    }

    /// Verifies one draft. An empty draft is passed through the same call
    /// path and yields whatever the model returns, trimmed; an empty
    /// response yields an empty verified text.
    pub async fn verify(
        &self,
        spec: &SectionSpec,
        country: &str,
        draft: &SectionDraft,
        approved_sources: &str,
    ) -> Result<VerifiedSection, PromptError> {
        let (system, user) =
            build_verification_prompt(spec, country, &draft.text, approved_sources);

        debug!(section = spec.key, "--> Sending verification prompt");
        let raw = self.provider.generate(&system, &user).await?;
        debug!(section = spec.key, chars = raw.len(), "<-- Revision received");

        Ok(VerifiedSection {
            key: draft.key.clone(),
            title: draft.title.clone(),
            text: raw.trim().to_string(),
            verified_at: Utc::now(),
        })
    }
}
