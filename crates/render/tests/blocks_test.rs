//! # Structural Parser Property Tests
//!
//! Cross-cutting properties of the block parser over representative model
//! output, complementing the unit tests next to the implementation.

use pifgen_render::blocks::{parse_section, split_bold_runs, BlockKind};

fn concat(runs: &[pifgen_render::blocks::StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// For any line with balanced markers, concatenating the split runs in
/// order reproduces the line with the markers stripped.
#[test]
fn test_bold_split_reconstruction_property() {
    let lines = [
        "Plain text without markers.",
        "**Lead:** then the rest.",
        "a **b** c **d** e",
        "**x****y**",
        "Ends with bold **tail**",
        "",
    ];
    for line in lines {
        let runs = split_bold_runs(line);
        let stripped = line.replace("**", "");
        assert_eq!(concat(&runs), stripped, "line: {line:?}");
        // Alternation: no two consecutive runs share a style.
        for pair in runs.windows(2) {
            assert_ne!(pair[0].bold, pair[1].bold, "line: {line:?}");
        }
    }
}

/// Malformed marker pairs never panic and keep the unmatched marker as
/// literal text.
#[test]
fn test_unbalanced_markers_are_literal() {
    for line in ["** open only", "closed** wrong order", "a **b** c ** d"] {
        let runs = split_bold_runs(line);
        assert!(!runs.is_empty());
        assert!(concat(&runs).contains("**"), "line: {line:?}");
    }
}

/// A realistic verified section mixing narrative, bullets, and a fallback
/// table parses into the expected block sequence.
#[test]
fn test_realistic_section_parse() {
    let text = "\
Cuba reports under the ETF through CITMA.

- **Decree 86 (2019):** Summary text.
- **Resolution 12:** More text.

| Institution | Role |
|---|---|
| CITMA | Lead ministry |
| ONEI | National statistics |

Verification notes: two claims tagged.";

    let blocks = parse_section(text, false);
    let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Paragraph,
            BlockKind::Bullet,
            BlockKind::Bullet,
            BlockKind::Bullet,
            BlockKind::Bullet,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(concat(&blocks[3].runs), "CITMA: Lead ministry");
    assert_eq!(concat(&blocks[4].runs), "ONEI: National statistics");
    // The trailing verification summary renders as ordinary content.
    assert_eq!(
        concat(&blocks[5].runs),
        "Verification notes: two claims tagged."
    );
}

/// Parsing twice yields identical block sequences: no state leaks between
/// invocations.
#[test]
fn test_parser_has_no_hidden_state() {
    let text = "Para **bold**.\n\n- bullet one\n\n| a | b |\n|---|---|\n| c | d |";
    let a = parse_section(text, true);
    let b = parse_section(text, true);
    let c = parse_section(text, true);
    assert_eq!(a, b);
    assert_eq!(b, c);
}
