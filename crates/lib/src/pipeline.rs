//! # Run Orchestrator
//!
//! Drives one run through its states: `Idle → Drafting → Verifying →
//! Persisted → Rendered`. Sections are a small task graph: each section's
//! verify task depends on its own draft task and on nothing else, so
//! independent sections fan out through a bounded, order-preserving buffer
//! while each section's draft strictly precedes its verify. Final output is
//! always assembled in catalog order, never completion order.
//!
//! There is no locking because there is no concurrent mutation: each
//! section's result slot is written exactly once, after its chain resolves.
//! Any task error aborts the whole run; in-flight siblings are dropped and
//! nothing is persisted.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::context::{load_approved_sources, GroundingStore};
use crate::drafting::SectionDrafter;
use crate::errors::PromptError;
use crate::providers::ai::AiProvider;
use crate::run_output::RunOutput;
use crate::sections::SECTIONS;
use crate::verification::{Verifier, VerifiedSection};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Drafting,
    Verifying,
    Persisted,
    Rendered,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Drafting => "drafting",
            RunPhase::Verifying => "verifying",
            RunPhase::Persisted => "persisted",
            RunPhase::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

/// Sequences generation, verification, and persistence for one country.
pub struct DraftPipeline<'a> {
    provider: &'a dyn AiProvider,
    config: &'a AppConfig,
    phase: Cell<RunPhase>,
}

impl<'a> DraftPipeline<'a> {
    pub fn new(provider: &'a dyn AiProvider, config: &'a AppConfig) -> Self {
        Self {
            provider,
            config,
            phase: Cell::new(RunPhase::Idle),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase.get()
    }

    /// Drafts and verifies every tracked section.
    ///
    /// Up to `config.concurrency` section chains are in flight at once; the
    /// returned vector is in catalog order regardless of completion order.
    pub async fn generate(&self, country: &str) -> Result<Vec<VerifiedSection>, PromptError> {
        self.phase.set(RunPhase::Drafting);
        info!("Run for '{country}' entered phase '{}'", self.phase.get());

        let approved_sources = load_approved_sources(&self.config.sources_dir, country);
        let grounding = GroundingStore::new(self.config.context_dir.clone());
        let drafter = SectionDrafter::new(self.provider, self.config);
        let verifier = Verifier::new(self.provider);

        let phase = &self.phase;
        let sources = approved_sources.as_str();
        let grounding = &grounding;
        let drafter = &drafter;
        let verifier = &verifier;

        let chains = SECTIONS.iter().map(|spec| async move {
            let bundle = grounding.load(country, spec.key);
            let draft = drafter
                .draft(spec, country, bundle.as_deref(), sources)
                .await?;
            // The run is in its verifying phase as soon as any section has
            // a draft available; drafting of other sections may continue.
            phase.set(RunPhase::Verifying);
            verifier.verify(spec, country, &draft, sources).await
        });

        let verified: Vec<VerifiedSection> = stream::iter(chains)
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        info!("All {} sections verified for '{country}'", verified.len());
        Ok(verified)
    }

    /// Persists the verified sections as one atomic run output and returns
    /// it together with its on-disk path.
    pub fn persist(
        &self,
        country: &str,
        sections: Vec<VerifiedSection>,
    ) -> Result<(RunOutput, PathBuf), PromptError> {
        let output = RunOutput::new(country, sections);
        let path = RunOutput::path_for(&self.config.out_dir, country);
        output.save(&path)?;
        self.phase.set(RunPhase::Persisted);
        info!("Run for '{country}' entered phase '{}'", self.phase.get());
        Ok((output, path))
    }

    /// Records that the persisted output has been rendered. Rendering
    /// itself lives in the render crate; the orchestrator only tracks the
    /// transition.
    pub fn mark_rendered(&self) {
        self.phase.set(RunPhase::Rendered);
    }
}
