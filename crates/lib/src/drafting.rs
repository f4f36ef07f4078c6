//! # Section Draft Generator
//!
//! First pipeline pass: one outbound call per section, returning the
//! model's trimmed text. No retries, no file writes; transport errors
//! propagate to the orchestrator unchanged.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::PromptError;
use crate::prompts::drafting::build_draft_prompt;
use crate::providers::ai::AiProvider;
use crate::sections::{substitute_country, SectionSpec};

/// First-pass generated text for a section, before compliance revision.
#[derive(Debug, Clone)]
pub struct SectionDraft {
    pub key: String,
    pub title: String,
    pub text: String,
    pub drafted_at: DateTime<Utc>,
}

/// Composes exactly one drafting request per section.
pub struct SectionDrafter<'a> {
    provider: &'a dyn AiProvider,
    config: &'a AppConfig,
}

impl<'a> SectionDrafter<'a> {
    pub fn new(provider: &'a dyn AiProvider, config: &'a AppConfig) -> Self {
        Self { provider, config }
    }

    /// Drafts one section. An empty model response yields an empty draft
    /// rather than an error.
    pub async fn draft(
        &self,
        spec: &SectionSpec,
        country: &str,
        grounding: Option<&str>,
        approved_sources: &str,
    ) -> Result<SectionDraft, PromptError> {
        let (system, user) = build_draft_prompt(
            spec,
            country,
            grounding,
            approved_sources,
            self.config.placeholder_mode,
        );

        debug!(section = spec.key, "--> Sending drafting prompt");
        let raw = self.provider.generate(&system, &user).await?;
        debug!(section = spec.key, chars = raw.len(), "<-- Draft received");

        Ok(SectionDraft {
            key: spec.key.to_string(),
            title: substitute_country(spec.title, country),
            text: raw.trim().to_string(),
            drafted_at: Utc::now(),
        })
    }
}
