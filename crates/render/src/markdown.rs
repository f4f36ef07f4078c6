//! Markdown assembly of a run output: the same content as the PDF, kept in
//! the dialect the drafts are already written in.

use pifgen::run_output::RunOutput;

/// Joins the verified sections into one Markdown document with a document
/// heading and a `##` title per section. Section bodies are normalized to
/// blank-line-separated paragraphs but otherwise kept verbatim.
pub fn assemble_markdown(run: &RunOutput) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "# GEF-8 PROJECT IDENTIFICATION FORM (PIF) — {}\n",
        run.country
    ));

    for section in &run.sections {
        let body = section.text.trim();
        if body.is_empty() {
            continue;
        }
        lines.push(format!("## {}\n", section.title));
        let paragraphs: Vec<&str> = body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        lines.push(paragraphs.join("\n\n"));
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pifgen::run_output::{RunSection, RUN_OUTPUT_SCHEMA_VERSION};

    fn run_with(sections: Vec<RunSection>) -> RunOutput {
        RunOutput {
            schema_version: RUN_OUTPUT_SCHEMA_VERSION,
            country: "Cuba".to_string(),
            sections,
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_assemble_markdown_headings_and_order() {
        let run = run_with(vec![
            RunSection {
                key: "a".into(),
                title: "First".into(),
                text: "Alpha body.".into(),
            },
            RunSection {
                key: "b".into(),
                title: "Second".into(),
                text: "Beta body.".into(),
            },
        ]);
        let md = assemble_markdown(&run);
        assert!(md.starts_with("# GEF-8 PROJECT IDENTIFICATION FORM (PIF) — Cuba"));
        let first = md.find("## First").unwrap();
        let second = md.find("## Second").unwrap();
        assert!(first < second);
    }

    /// Empty sections are skipped entirely rather than leaving a bare
    /// heading behind.
    #[test]
    fn test_assemble_markdown_skips_empty_sections() {
        let run = run_with(vec![RunSection {
            key: "a".into(),
            title: "Empty".into(),
            text: "   ".into(),
        }]);
        let md = assemble_markdown(&run);
        assert!(!md.contains("## Empty"));
    }
}
