//! # Prompt Assembly Tests
//!
//! Validates that section specs, run configuration, and grounding material
//! translate into the exact prompt text sent to the model, including the
//! placeholder-substitution configuration choice and the standard-text
//! marker pair.

use pifgen::config::PlaceholderMode;
use pifgen::prompts::drafting::{build_draft_prompt, DRAFT_SYSTEM_PROMPT, NO_NUMBERED_HEADINGS_RULE};
use pifgen::prompts::verification::{
    build_verification_prompt, VERIFICATION_NOTES_HEADING, VERIFY_SYSTEM_PROMPT,
};
use pifgen::sections::{find, STANDARD_TEXT_BEGIN, STANDARD_TEXT_END};

/// With the default mode, every `{Country}` in the instructions reaches
/// the model already substituted.
#[test]
fn test_draft_prompt_substitutes_country() {
    let spec = find("policy_framework").unwrap();
    let (system, user) = build_draft_prompt(spec, "Cuba", None, "S1\tUNFCCC", PlaceholderMode::Substitute);
    assert_eq!(system, DRAFT_SYSTEM_PROMPT);
    assert!(user.contains("Cuba's national climate vision"));
    assert!(!user.contains("{Country}"));
}

/// In verbatim mode the placeholder text is sent as-is; only the
/// structured COUNTRY field names the country.
#[test]
fn test_draft_prompt_verbatim_placeholders() {
    let spec = find("policy_framework").unwrap();
    let (_, user) = build_draft_prompt(spec, "Cuba", None, "S1\tUNFCCC", PlaceholderMode::Verbatim);
    assert!(user.contains("{Country}'s national climate vision"));
    assert!(user.contains("COUNTRY: Cuba"));
}

/// Section titles are substituted regardless of the placeholder mode.
#[test]
fn test_draft_prompt_title_always_substituted() {
    let spec = find("climate_transparency").unwrap();
    let (_, user) = build_draft_prompt(spec, "Cuba", None, "S1\tUNFCCC", PlaceholderMode::Verbatim);
    assert!(user.contains("SECTION: Climate Transparency in Cuba"));
}

/// Standard text arrives wrapped in the marker pair so the model can be
/// told to reproduce markers and text verbatim.
#[test]
fn test_draft_prompt_wraps_standard_text_in_markers() {
    let spec = find("paris_etf").unwrap();
    let (_, user) = build_draft_prompt(spec, "Cuba", None, "S1\tUNFCCC", PlaceholderMode::Substitute);
    let begin = user.find(STANDARD_TEXT_BEGIN).expect("begin marker");
    let end = user.find(STANDARD_TEXT_END).expect("end marker");
    assert!(begin < end);
    assert!(user[begin..end].contains("Article 13 established the Enhanced Transparency Framework"));
}

/// The grounding bundle and approved sources are embedded under their own
/// headings, and the word limit is spelled out when the section defines one.
#[test]
fn test_draft_prompt_grounding_sources_and_word_limit() {
    let spec = find("ndc_tracking").unwrap();
    let (_, user) = build_draft_prompt(
        spec,
        "Cuba",
        Some("Extracted BUR text about tracking."),
        "S1\thttps://unfccc.int/reports",
        PlaceholderMode::Substitute,
    );
    assert!(user.contains("# Country material\nExtracted BUR text about tracking."));
    assert!(user.contains("# Approved sources\nS1\thttps://unfccc.int/reports"));
    assert!(user.contains("Word limit: about 400 words."));
}

/// The numbered-headings prohibition is only emitted for sections that
/// carry the flag.
#[test]
fn test_draft_prompt_numbered_headings_flag() {
    let flagged = find("rationale_intro").unwrap();
    let (_, user) = build_draft_prompt(flagged, "Cuba", None, "S1\tx", PlaceholderMode::Substitute);
    assert!(user.contains(NO_NUMBERED_HEADINGS_RULE));

    let unflagged = find("ndc_tracking").unwrap();
    let (_, user) = build_draft_prompt(unflagged, "Cuba", None, "S1\tx", PlaceholderMode::Substitute);
    assert!(!user.contains(NO_NUMBERED_HEADINGS_RULE));
}

/// The verification prompt embeds the draft, the source list, the marker
/// preservation rule, and asks for the trailing notes block.
#[test]
fn test_verification_prompt_embeds_draft_and_rules() {
    let spec = find("ndc_tracking").unwrap();
    let (system, user) =
        build_verification_prompt(spec, "Cuba", "Draft body text.", "S1\tUNFCCC");
    assert_eq!(system, VERIFY_SYSTEM_PROMPT);
    assert!(user.contains("# Draft to review\nDraft body text."));
    assert!(user.contains("[UNVERIFIED:"));
    assert!(user.contains(STANDARD_TEXT_BEGIN));
    assert!(user.contains(STANDARD_TEXT_END));
    assert!(user.contains(VERIFICATION_NOTES_HEADING));
}

/// Section-specific structural rules are appended for the sections that
/// define them and absent otherwise.
#[test]
fn test_verification_prompt_structural_rules() {
    let institutional = find("institutional_framework").unwrap();
    let (_, user) = build_verification_prompt(institutional, "Cuba", "Draft.", "S1\tx");
    assert!(user.contains("one '-' bullet each"));

    let narrative = find("ndc_tracking").unwrap();
    let (_, user) = build_verification_prompt(narrative, "Cuba", "Draft.", "S1\tx");
    assert!(!user.contains("one '-' bullet each"));
}
