//! # Persisted Run Output
//!
//! The full set of verified section texts for one country, written to disk
//! as a single JSON document. This is the unit of recoverability: a run can
//! stop after "generate + save" and a later `--render-only` invocation
//! reloads exactly this structure. The schema is versioned; a mismatched or
//! missing version is a loud error, not an unhandled field access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::country_key;
use crate::errors::PromptError;
use crate::verification::VerifiedSection;

pub const RUN_OUTPUT_SCHEMA_VERSION: u32 = 1;

/// One verified section as persisted, in final document order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunSection {
    pub key: String,
    pub title: String,
    pub text: String,
}

/// The aggregate output of one generation run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunOutput {
    pub schema_version: u32,
    pub country: String,
    pub sections: Vec<RunSection>,
    pub generated_at: DateTime<Utc>,
}

impl RunOutput {
    /// Assembles a run output from verified sections, which must already be
    /// in final document order.
    pub fn new(country: &str, sections: Vec<VerifiedSection>) -> Self {
        Self {
            schema_version: RUN_OUTPUT_SCHEMA_VERSION,
            country: country.to_string(),
            sections: sections
                .into_iter()
                .map(|s| RunSection {
                    key: s.key,
                    title: s.title,
                    text: s.text,
                })
                .collect(),
            generated_at: Utc::now(),
        }
    }

    /// The canonical on-disk location for a country's run output.
    pub fn path_for(out_dir: &Path, country: &str) -> PathBuf {
        out_dir.join(format!("{}_run.json", country_key(country)))
    }

    /// Writes the run output as a single atomic unit: the JSON is written
    /// to a temporary sibling file and renamed into place, so a reader
    /// never observes a partial document. Last writer wins.
    pub fn save(&self, path: &Path) -> Result<(), PromptError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, self)?;
        }
        fs::rename(&tmp_path, path)?;

        info!("Persisted run output for '{}' to {}", self.country, path.display());
        Ok(())
    }

    /// Reloads a persisted run output, failing loudly when the file is
    /// missing or its schema version does not match this build.
    pub fn load(path: &Path) -> Result<Self, PromptError> {
        if !path.exists() {
            return Err(PromptError::MissingRunOutput(path.display().to_string()));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let value: serde_json::Value = serde_json::from_reader(reader)?;

        let found = value
            .get("schema_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;
        if found != RUN_OUTPUT_SCHEMA_VERSION {
            return Err(PromptError::SchemaVersionMismatch {
                path: path.display().to_string(),
                found,
                expected: RUN_OUTPUT_SCHEMA_VERSION,
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}
