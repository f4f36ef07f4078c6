//! # Prompt Templates
//!
//! The fixed prompt text for both pipeline passes, plus the builders that
//! assemble a complete system/user prompt pair from a section spec, the
//! run configuration, and any grounding material. Templates live here as
//! constants so tests can pin their exact wording.

pub mod drafting;
pub mod verification;
