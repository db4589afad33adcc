//! Reading and writing input/output documents.
//!
//! Files ending in `.toml` are TOML, everything else is JSON. TOML
//! documents need a top-level table, so lists live under a named key
//! (`[[subjects]]`, `[[entries]]`).

use std::error::Error;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use studyplan_core::{AnalyticsEntry, Subject};

pub type CmdResult<T = ()> = Result<T, Box<dyn Error>>;

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Parse a document from `path`.
pub fn read<T: DeserializeOwned>(path: &Path) -> CmdResult<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value = if is_toml(path) {
        toml::from_str(&content).map_err(|e| format!("invalid TOML in {}: {e}", path.display()))?
    } else {
        serde_json::from_str(&content).map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?
    };
    Ok(value)
}

/// Serialize `value` to `out`, or pretty JSON on stdout when `out` is None.
pub fn write<T: Serialize>(value: &T, out: Option<&Path>) -> CmdResult {
    match out {
        Some(path) => {
            let content = if is_toml(path) {
                toml::to_string_pretty(value)?
            } else {
                serde_json::to_string_pretty(value)?
            };
            std::fs::write(path, content)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            tracing::debug!(path = %path.display(), "wrote document");
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubjectsDoc {
    List(Vec<Subject>),
    Table { subjects: Vec<Subject> },
}

/// Subject roster: a JSON array, or a `subjects` list in either format.
pub fn read_subjects(path: &Path) -> CmdResult<Vec<Subject>> {
    Ok(match read::<SubjectsDoc>(path)? {
        SubjectsDoc::List(subjects) | SubjectsDoc::Table { subjects } => subjects,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyticsDoc {
    List(Vec<AnalyticsEntry>),
    Table { entries: Vec<AnalyticsEntry> },
}

/// Analytics log: a JSON array, or an `entries` list in either format.
pub fn read_analytics(path: &Path) -> CmdResult<Vec<AnalyticsEntry>> {
    Ok(match read::<AnalyticsDoc>(path)? {
        AnalyticsDoc::List(entries) | AnalyticsDoc::Table { entries } => entries,
    })
}
