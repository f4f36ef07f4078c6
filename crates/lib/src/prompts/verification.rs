//! Prompt assembly for the second (compliance/fact-check) pass.

use crate::sections::{substitute_country, SectionSpec};

/// The role/framing preamble for the verification pass.
pub const VERIFY_SYSTEM_PROMPT: &str = "You are a compliance reviewer for GEF PIF \
sections. You rewrite the submitted draft so that every claim is either supported by \
the approved sources or explicitly tagged as unverifiable. You return the full revised \
section text, not a critique.";

/// The heading that introduces the appended summary block. Callers must not
/// assume the block is absent; renderers display it as trailing content.
pub const VERIFICATION_NOTES_HEADING: &str = "Verification notes:";

/// Fixed compliance rules applied to every section.
pub const VERIFY_RULES: &str = "# Compliance rules
1. A claim that cannot be traced to an approved source must be rewritten to carry the tag [UNVERIFIED: short reason] instead of being asserted.
2. Reject sources older than ten years for current-state claims; keep them only for historical statements, with the year stated.
3. Any text between the markers [BEGIN STANDARD TEXT] and [END STANDARD TEXT] must be preserved verbatim, markers included. Do not rephrase, trim, or move it.
4. Keep all surviving figures and dates exactly as they appear in the draft.
5. Enforce structural rules by rewriting, not by flagging.";

/// Section-specific structural rules, keyed on the section.
fn structural_rule(spec: &SectionSpec) -> Option<&'static str> {
    match spec.key {
        "institutional_framework" => {
            Some("Institutions must appear as one '-' bullet each, with the institution name in **bold** followed by its role.")
        }
        "unfccc_reporting" => {
            Some("Keep the submissions as a compact table or list ordered by year, most recent first; one row per report.")
        }
        "baseline_initiatives" => {
            Some("Each initiative must be one '-' bullet: **programme name** first, then lead entity, duration, value, and ETF relationship.")
        }
        _ => None,
    }
}

/// Builds the (system, user) prompt pair for verifying one drafted section.
pub fn build_verification_prompt(
    spec: &SectionSpec,
    country: &str,
    draft: &str,
    approved_sources: &str,
) -> (String, String) {
    let mut user = format!(
        "SECTION: {title}\nCOUNTRY: {country}\n\n# Draft to review\n{draft}\n\n# Approved sources\n{approved_sources}\n\n{VERIFY_RULES}\n",
        title = substitute_country(spec.title, country),
    );

    if let Some(rule) = structural_rule(spec) {
        user.push_str(&format!("6. {rule}\n"));
    }

    user.push_str(&format!(
        "\nReturn the revised section text, followed by a short block starting with \
         '{VERIFICATION_NOTES_HEADING}' summarizing what was changed or tagged.\n"
    ));

    (VERIFY_SYSTEM_PROMPT.to_string(), user)
}
