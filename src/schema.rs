use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use serde::Deserialize;
use thiserror::Error;

const CHOICES_SHEET: &str = "choices";
const CATEGORY_COLUMN: &str = "list_name";
const OPTION_COLUMN: &str = "name";

/// Fatal for a batch: every row's output shape depends on the category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("choice schema has no options for category {category:?}")]
pub struct SchemaCategoryNotFound {
    pub category: String,
}

/// The form's valid-option catalogue, loaded once per run from the
/// workbook's `choices` sheet and treated as read-only thereafter.
#[derive(Debug, Clone)]
pub struct ChoiceSchema {
    entries: Vec<(String, String)>, // (category, option label)
}

impl ChoiceSchema {
    pub fn load(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open choice workbook {}", path.display()))?;
        let range = workbook
            .worksheet_range(CHOICES_SHEET)
            .ok_or_else(|| anyhow::anyhow!("Workbook has no {:?} sheet", CHOICES_SHEET))?
            .with_context(|| format!("Failed to read {:?} sheet", CHOICES_SHEET))?;

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| anyhow::anyhow!("{:?} sheet is empty", CHOICES_SHEET))?;
        let category_idx = column_index(header, CATEGORY_COLUMN)?;
        let option_idx = column_index(header, OPTION_COLUMN)?;

        let mut entries = Vec::new();
        for row in rows {
            let category = row.get(category_idx).and_then(cell_text);
            let option = row.get(option_idx).and_then(cell_text);
            if let (Some(category), Some(option)) = (category, option) {
                entries.push((category, option));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(c, o)| (c.to_string(), o.to_string()))
                .collect(),
        }
    }

    /// Sorted, deduplicated option labels for a category. Resolve once per
    /// batch; the same order must serve every row and the column names.
    pub fn resolve(&self, category: &str) -> Result<ResolvedCategory, SchemaCategoryNotFound> {
        let mut options: Vec<String> = self
            .entries
            .iter()
            .filter(|(c, _)| c == category)
            .map(|(_, o)| o.clone())
            .collect();
        options.sort();
        options.dedup();

        if options.is_empty() {
            return Err(SchemaCategoryNotFound {
                category: category.to_string(),
            });
        }
        Ok(ResolvedCategory { options })
    }
}

/// One category's canonical option order for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub options: Vec<String>,
}

impl ResolvedCategory {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

fn column_index(header: &[DataType], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|c| cell_text(c).is_some_and(|t| t.eq_ignore_ascii_case(name)))
        .ok_or_else(|| anyhow::anyhow!("{:?} sheet has no {:?} column", CHOICES_SHEET, name))
}

fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        DataType::Float(f) => Some(if f.fract() == 0.0 {
            format!("{:.0}", f)
        } else {
            f.to_string()
        }),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ── Pilot lookup ──

#[derive(Debug, Deserialize)]
struct PilotRecord {
    pilot: String,
    arn: String,
}

/// Pilot full name ("Family Given") → ARN identifier reference table.
#[derive(Debug, Clone, Default)]
pub struct PilotLookup {
    map: HashMap<String, String>,
}

impl PilotLookup {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open pilot list {}", path.display()))?;
        let mut map = HashMap::new();
        for record in reader.deserialize() {
            let record: PilotRecord = record?;
            map.insert(record.pilot, record.arn);
        }
        Ok(Self { map })
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }
}

// ── Tests ──
