//! # Run Output Persistence Tests
//!
//! The persisted run output is the unit of recoverability. These tests pin
//! the round-trip guarantee (reloaded text is byte-identical), the loud
//! failure on a missing file, and the versioned-schema check that replaces
//! silent shape drift.

use anyhow::Result;
use chrono::Utc;
use pifgen::run_output::{RunOutput, RunSection, RUN_OUTPUT_SCHEMA_VERSION};
use pifgen::PromptError;
use tempfile::TempDir;

fn sample_run() -> RunOutput {
    RunOutput {
        schema_version: RUN_OUTPUT_SCHEMA_VERSION,
        country: "Cuba".to_string(),
        sections: vec![
            RunSection {
                key: "rationale_intro".to_string(),
                title: "A. Project Rationale".to_string(),
                text: "Paragraph with **bold** text.\n\n- bullet".to_string(),
            },
            RunSection {
                key: "ndc_tracking".to_string(),
                title: "NDC Tracking Module".to_string(),
                text: "Second section text.".to_string(),
            },
        ],
        generated_at: Utc::now(),
    }
}

/// Saving and reloading preserves section order and byte-identical text.
#[test]
fn test_round_trip_is_lossless() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");
    let run = sample_run();
    run.save(&path)?;

    let reloaded = RunOutput::load(&path)?;
    assert_eq!(reloaded.country, run.country);
    assert_eq!(reloaded.sections, run.sections);
    Ok(())
}

/// `path_for` normalizes the country the same way lookups do.
#[test]
fn test_path_for_uses_country_key() {
    let path = RunOutput::path_for(std::path::Path::new("out"), "Costa Rica");
    assert_eq!(path, std::path::Path::new("out/costa_rica_run.json"));
}

/// Loading a missing run output is a descriptive error, surfaced before
/// any rendering starts.
#[test]
fn test_load_missing_file_is_descriptive() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");
    let err = RunOutput::load(&path).unwrap_err();
    assert!(matches!(err, PromptError::MissingRunOutput(_)));
    Ok(())
}

/// A persisted file from a different schema version fails loudly instead
/// of surfacing as a field-access panic later.
#[test]
fn test_load_rejects_wrong_schema_version() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");

    let mut value = serde_json::to_value(sample_run())?;
    value["schema_version"] = serde_json::json!(RUN_OUTPUT_SCHEMA_VERSION + 1);
    std::fs::write(&path, serde_json::to_string_pretty(&value)?)?;

    let err = RunOutput::load(&path).unwrap_err();
    match err {
        PromptError::SchemaVersionMismatch { found, expected, .. } => {
            assert_eq!(found, RUN_OUTPUT_SCHEMA_VERSION + 1);
            assert_eq!(expected, RUN_OUTPUT_SCHEMA_VERSION);
        }
        other => panic!("expected schema mismatch, got: {other:?}"),
    }
    Ok(())
}

/// A file with no version field at all is treated the same way.
#[test]
fn test_load_rejects_missing_schema_version() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");
    std::fs::write(&path, r#"{"country": "Cuba", "sections": []}"#)?;

    let err = RunOutput::load(&path).unwrap_err();
    assert!(matches!(
        err,
        PromptError::SchemaVersionMismatch { found: 0, .. }
    ));
    Ok(())
}

/// Saving replaces an existing run output atomically: after a second save
/// the file holds exactly the newer content and no temp file remains.
#[test]
fn test_save_replaces_previous_output() -> Result<()> {
    let tmp = TempDir::new()?;
    let path = RunOutput::path_for(tmp.path(), "Cuba");

    let first = sample_run();
    first.save(&path)?;

    let mut second = sample_run();
    second.sections[0].text = "Replacement text.".to_string();
    second.save(&path)?;

    let reloaded = RunOutput::load(&path)?;
    assert_eq!(reloaded.sections[0].text, "Replacement text.");
    assert!(!path.with_extension("json.tmp").exists());
    Ok(())
}
