use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Missing-answer sentinel. The Aggregate export leaves unanswered fields
/// blank, and every downstream classifier keys off this value.
pub const MISSING: &str = "nan";

/// One submitted form: field name → raw answer.
#[derive(Debug, Clone)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Raw answer for a field. Absent fields and blank answers both read as
    /// the missing sentinel.
    pub fn get(&self, field: &str) -> &str {
        match self.fields.get(field) {
            Some(v) if !v.trim().is_empty() => v,
            _ => MISSING,
        }
    }
}

/// Locate Aggregate result exports (`*results*.csv`) in a directory,
/// sorted by file name for a stable batch order.
pub fn discover_exports(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read export directory {}", dir.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && name.contains("results") && name.ends_with(".csv") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Read one export into raw rows, preserving file order.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open export {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields = headers
            .iter()
            .map(str::to_string)
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(RawRow { fields });
    }
    Ok(rows)
}

/// Discover and read every export under `dir` into one batch. Exports with
/// zero data rows are skipped with a warning rather than deleted.
pub fn load_batch(dir: &Path) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for path in discover_exports(dir)? {
        let file_rows = read_rows(&path)?;
        if file_rows.is_empty() {
            warn!("Skipping empty export {}", path.display());
            continue;
        }
        info!("Loaded {} rows from {}", file_rows.len(), path.display());
        rows.extend(file_rows);
    }
    Ok(rows)
}

// ── Tests ──
