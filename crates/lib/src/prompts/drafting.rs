//! Prompt assembly for the first (drafting) pass.

use crate::config::PlaceholderMode;
use crate::sections::{substitute_country, SectionSpec, STANDARD_TEXT_BEGIN, STANDARD_TEXT_END};

/// The role/framing preamble for the drafting pass.
pub const DRAFT_SYSTEM_PROMPT: &str = "You are an expert drafter of GEF Project \
Identification Form (PIF) sections for climate transparency projects. Your primary \
focus is factuality and accuracy. You synthesize the provided material without \
inventing or speculating, and you write in a professional, factual tone in Markdown.";

/// Fixed source-restriction and formatting rules appended to every drafting prompt.
pub const DRAFT_RULES: &str = "# Rules
1. Base every claim on the provided material or the approved sources listed below; do not invent figures, dates, or institution names.
2. Where information is missing, state the gap plainly instead of filling it with assumptions.
3. Keep all quantitative data (amounts, years, percentages) exactly as given in the material.
4. Cite approved sources inline by name (e.g. \"as reported in the First BUR\").
5. Use plain Markdown: paragraphs separated by blank lines, '-' bullets, and **bold** for lead-in labels. No headings inside the section body.";

/// Addendum emitted when the section forbids numbered headings.
pub const NO_NUMBERED_HEADINGS_RULE: &str =
    "6. Do not introduce numbered headings or sub-section numbering of any kind.";

const STANDARD_TEXT_RULE: &str = "Reproduce the opening paragraph below verbatim at the \
start of the section, including both marker lines, and continue after it:";

/// Builds the (system, user) prompt pair for drafting one section.
///
/// The user prompt concatenates, in order: the section title, any required
/// standard text wrapped in the marker pair, the section instructions, any
/// grounding bundle text, the approved-source list, and the fixed rules.
pub fn build_draft_prompt(
    spec: &SectionSpec,
    country: &str,
    grounding: Option<&str>,
    approved_sources: &str,
    mode: PlaceholderMode,
) -> (String, String) {
    let title = substitute_country(spec.title, country);
    let instructions = match mode {
        PlaceholderMode::Substitute => substitute_country(spec.instructions, country),
        PlaceholderMode::Verbatim => spec.instructions.to_string(),
    };

    let mut user = format!("SECTION: {title}\nCOUNTRY: {country}\n");

    if let Some(standard) = spec.standard_text {
        let standard = match mode {
            PlaceholderMode::Substitute => substitute_country(standard, country),
            PlaceholderMode::Verbatim => standard.to_string(),
        };
        user.push_str(&format!(
            "\n{STANDARD_TEXT_RULE}\n{STANDARD_TEXT_BEGIN}\n{standard}\n{STANDARD_TEXT_END}\n"
        ));
    }

    user.push_str(&format!("\n# Instructions\n{instructions}\n"));

    if let Some(word_limit) = spec.word_limit {
        user.push_str(&format!("\nWord limit: about {word_limit} words.\n"));
    }

    if let Some(context) = grounding {
        user.push_str(&format!("\n# Country material\n{context}\n"));
    }

    user.push_str(&format!("\n# Approved sources\n{approved_sources}\n"));
    user.push_str(&format!("\n{DRAFT_RULES}\n"));
    if spec.forbid_numbered_headings {
        user.push_str(NO_NUMBERED_HEADINGS_RULE);
        user.push('\n');
    }

    (DRAFT_SYSTEM_PROMPT.to_string(), user)
}
