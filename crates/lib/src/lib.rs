//! # pifgen
//!
//! Core library for drafting GEF Project Identification Form (PIF)
//! sections with an LLM completion API: per-section prompt assembly, a
//! compliance/fact-check revision pass, and a persistence layer for the
//! verified result. Rendering lives in the `pifgen-render` crate; the
//! `cli` crate wires both together.

pub mod config;
pub mod context;
pub mod drafting;
pub mod errors;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod run_output;
pub mod sections;
pub mod verification;

pub use config::{AppConfig, PlaceholderMode};
pub use errors::PromptError;
pub use pipeline::{DraftPipeline, RunPhase};
pub use run_output::{RunOutput, RunSection, RUN_OUTPUT_SCHEMA_VERSION};
