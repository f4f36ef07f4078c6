//! # Renderer Integration Tests
//!
//! Builds a run output, persists it, reloads it, and renders both output
//! formats, pinning the persistence/render round-trip guarantee: what was
//! generated is exactly what render-only mode renders.

use anyhow::Result;
use chrono::Utc;
use pifgen::run_output::{RunOutput, RunSection, RUN_OUTPUT_SCHEMA_VERSION};
use pifgen_render::blocks::parse_section;
use pifgen_render::markdown::assemble_markdown;
use pifgen_render::pdf::PdfRenderer;
use tempfile::TempDir;

fn sample_run() -> RunOutput {
    RunOutput {
        schema_version: RUN_OUTPUT_SCHEMA_VERSION,
        country: "Cuba".to_string(),
        sections: vec![
            RunSection {
                key: "rationale_intro".to_string(),
                title: "A. Project Rationale".to_string(),
                text: "Intro paragraph with **bold** text.\n\n- **Point:** detail".to_string(),
            },
            RunSection {
                key: "unfccc_reporting".to_string(),
                title: "Official Reporting to the UNFCCC".to_string(),
                text: "| Report | Year |\n|---|---|\n| First BUR | 2015 |".to_string(),
            },
            RunSection {
                key: "policy_framework".to_string(),
                title: "National Policy Framework".to_string(),
                text: "The Climate Law anchors reporting. It assigns mandates.".to_string(),
            },
        ],
        generated_at: Utc::now(),
    }
}

/// Rendering a persisted-and-reloaded run output derives exactly the same
/// blocks as rendering the in-memory original.
#[test]
fn test_persisted_reload_renders_identical_blocks() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");
    let run = sample_run();
    run.save(&path)?;
    let reloaded = RunOutput::load(&path)?;

    for (a, b) in run.sections.iter().zip(&reloaded.sections) {
        assert_eq!(a.text, b.text);
        assert_eq!(parse_section(&a.text, false), parse_section(&b.text, false));
    }
    Ok(())
}

/// The PDF path produces a non-trivial document file for a full run.
#[test]
fn test_pdf_render_writes_document() -> Result<()> {
    let tmp = TempDir::new()?;
    let pdf_path = tmp.path().join("cuba_PIF.pdf");

    let mut renderer = PdfRenderer::new("GEF-8 PIF — Cuba")?;
    renderer.render_run(&sample_run());
    renderer.save(&pdf_path)?;

    let bytes = std::fs::read(&pdf_path)?;
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
    Ok(())
}

/// A very long section flows across multiple pages instead of running off
/// the canvas.
#[test]
fn test_pdf_render_paginates_long_sections() -> Result<()> {
    let tmp = TempDir::new()?;
    let short_path = tmp.path().join("short.pdf");
    let long_path = tmp.path().join("long.pdf");

    let mut short = sample_run();
    short.sections.truncate(1);

    let mut long = sample_run();
    long.sections.truncate(1);
    long.sections[0].text = (0..200)
        .map(|i| format!("Paragraph number {i} with enough words to occupy a line or two."))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut renderer = PdfRenderer::new("short")?;
    renderer.render_run(&short);
    renderer.save(&short_path)?;

    let mut renderer = PdfRenderer::new("long")?;
    renderer.render_run(&long);
    renderer.save(&long_path)?;

    let short_bytes = std::fs::read(&short_path)?;
    let long_bytes = std::fs::read(&long_path)?;
    assert!(long_bytes.len() > short_bytes.len());
    Ok(())
}

/// Markdown assembly keeps document order and contains every non-empty
/// section body.
#[test]
fn test_markdown_assembly_matches_run() {
    let run = sample_run();
    let md = assemble_markdown(&run);
    assert!(md.contains("# GEF-8 PROJECT IDENTIFICATION FORM (PIF) — Cuba"));
    let rationale = md.find("## A. Project Rationale").unwrap();
    let reporting = md.find("## Official Reporting to the UNFCCC").unwrap();
    let policy = md.find("## National Policy Framework").unwrap();
    assert!(rationale < reporting && reporting < policy);
    assert!(md.contains("| First BUR | 2015 |"));
}
