//! # Grounding Context
//!
//! Loads the optional material that anchors generation: approved-source
//! lists and extracted-text bundles produced by the companion report
//! scraper. Missing files mean "no additional context", never an error.

use std::fs;
use std::path::Path;
use tracing::debug;

/// Normalizes a country name into the key used for on-disk lookups.
pub fn country_key(country: &str) -> String {
    country.trim().to_lowercase().replace(' ', "_")
}

/// Loads the approved-source list for a country as a numbered table.
///
/// Sources come from `<sources_dir>/_common.txt` followed by
/// `<sources_dir>/<country>.txt`, one source per line, numbered `S1..Sn`.
/// When neither file exists, a single placeholder row is returned so the
/// prompt template always has something to point at.
pub fn load_approved_sources(sources_dir: &Path, country: &str) -> String {
    let mut lines = Vec::new();
    let mut idx = 1;

    for name in ["_common.txt".to_string(), format!("{}.txt", country_key(country))] {
        let path = sources_dir.join(&name);
        let Ok(content) = fs::read_to_string(&path) else {
            debug!("No source list at {}", path.display());
            continue;
        };
        for row in content.lines() {
            let row = row.trim();
            if row.is_empty() {
                continue;
            }
            lines.push(format!("S{idx}\t{row}"));
            idx += 1;
        }
    }

    if lines.is_empty() {
        lines.push("S1\t[TBD source placeholder]".to_string());
    }
    lines.join("\n")
}

/// Access to the scraper's extracted-text bundles, keyed by country and
/// section.
#[derive(Debug, Clone)]
pub struct GroundingStore {
    dir: std::path::PathBuf,
}

impl GroundingStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the bundle text for `<dir>/<country>/<section_key>.txt`, or
    /// `None` when the scraper has not produced one.
    pub fn load(&self, country: &str, section_key: &str) -> Option<String> {
        let path = self
            .dir
            .join(country_key(country))
            .join(format!("{section_key}.txt"));
        match fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(_) => {
                debug!("No grounding bundle at {}", path.display());
                None
            }
        }
    }
}
