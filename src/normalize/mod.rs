pub mod clean;
pub mod extract;

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;

use crate::ingest::RawRow;
use crate::schema::{ChoiceSchema, PilotLookup, ResolvedCategory, SchemaCategoryNotFound};

/// Category names the engine resolves from the choice schema. `HAZZARDS`
/// keeps the form's own spelling.
pub const HAZARDS_CATEGORY: &str = "HAZZARDS";
pub const INCIDENTS_CATEGORY: &str = "INCIDENT";
pub const MAINTENANCE_CATEGORY: &str = "MAINTENANCE";
pub const DISPOSAL_CATEGORY: &str = "DISPOSAL";

const CHUNK_SIZE: usize = 500;

/// One normalized scalar in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<u8> for Value {
    fn from(bit: u8) -> Self {
        Value::Int(i64::from(bit))
    }
}

impl fmt::Display for Value {
    /// CSV rendering. NaN floats serialize as an empty field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) if v.is_nan() => Ok(()),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(t) => f.write_str(t),
        }
    }
}

/// Failures that abort a single row. The batch continues without it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("malformed start timestamp {0:?}")]
    MalformedTimestamp(String),
    #[error("pilot name {0:?} does not split into given and family name")]
    AmbiguousPilotName(String),
    #[error("unrecognized position source {0:?}")]
    UnknownPositionSource(String),
}

/// The variable-width categories, resolved once per batch and shared
/// read-only by every row. The same resolved order serves the records and
/// the column names.
#[derive(Debug, Clone)]
pub struct CategoryLayout {
    pub hazards: ResolvedCategory,
    pub incidents: ResolvedCategory,
    pub maintenance: ResolvedCategory,
    pub disposal: ResolvedCategory,
}

impl CategoryLayout {
    pub fn resolve(schema: &ChoiceSchema) -> Result<Self, SchemaCategoryNotFound> {
        Ok(Self {
            hazards: schema.resolve(HAZARDS_CATEGORY)?,
            incidents: schema.resolve(INCIDENTS_CATEGORY)?,
            maintenance: schema.resolve(MAINTENANCE_CATEGORY)?,
            disposal: schema.resolve(DISPOSAL_CATEGORY)?,
        })
    }
}

/// A row dropped from the batch, with enough context to chase it up.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub index: usize,
    pub instance_id: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct NormalizedBatch {
    pub columns: Vec<String>,
    pub records: Vec<Vec<Value>>,
    pub skipped: Vec<SkippedRow>,
}

/// Normalize a batch. Category resolution happens once, before any row is
/// touched; a failure there aborts with nothing processed. Row failures
/// skip the offending row and the batch continues in input order.
pub fn assemble(
    rows: &[RawRow],
    schema: &ChoiceSchema,
    pilots: &PilotLookup,
) -> Result<NormalizedBatch, SchemaCategoryNotFound> {
    let layout = CategoryLayout::resolve(schema)?;
    let columns = column_names(&layout);

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (chunk_idx, chunk) in rows.chunks(CHUNK_SIZE).enumerate() {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|row| process_row(row, &layout, pilots))
            .collect();

        for (offset, result) in results.into_iter().enumerate() {
            let index = chunk_idx * CHUNK_SIZE + offset;
            match result {
                Ok(record) => {
                    debug_assert_eq!(record.len(), columns.len());
                    records.push(record);
                }
                Err(err) => {
                    let (instance_id, _) = extract::meta::extract(&rows[index]);
                    warn!("Skipping row {} ({}): {}", index, instance_id, err);
                    skipped.push(SkippedRow {
                        index,
                        instance_id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    Ok(NormalizedBatch {
        columns,
        records,
        skipped,
    })
}

/// Column names in the record composition order, with the resolved option
/// labels substituted into the variable-width segments.
pub fn column_names(layout: &CategoryLayout) -> Vec<String> {
    let mut columns: Vec<String> = [
        "date", "date_time", "pilot", "arn", "unit", "datum", "gps", "lat", "lon", "acc",
        "drone", "micasense", "prop", "bat_p4", "bat_mica", "bat_rtk", "casa_rule",
        "pre_brief", "pre_check", "risk",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    columns.extend(layout.hazards.options.iter().cloned());
    columns.extend(["haz_o_typ", "haz_othr"].map(String::from));
    columns.extend(["flt_time", "post_check", "near_miss"].map(String::from));
    columns.extend(layout.incidents.options.iter().cloned());
    columns.extend(["nm_o_typ", "nm_othr"].map(String::from));
    columns.extend(layout.disposal.options.iter().cloned());
    columns.extend(["disp_o_typ", "disp_othr"].map(String::from));
    columns.extend(layout.maintenance.options.iter().cloned());
    columns.extend(["mtain_o_typ", "mtain_othr"].map(String::from));
    columns.extend(["comment", "met_key", "meta_form"].map(String::from));
    columns
}

/// Run every extractor over one row in the fixed composition order.
fn process_row(
    row: &RawRow,
    layout: &CategoryLayout,
    pilots: &PilotLookup,
) -> Result<Vec<Value>, RowError> {
    let stamp = extract::datetime::extract(row)?;
    let pilot = extract::pilot::extract(row)?;
    let arn = extract::pilot::identifier(row, &pilot, pilots);
    let unit = extract::pilot::unit(row);
    let position = extract::position::extract(row)?;

    let mut record = vec![
        Value::Text(stamp.date),
        Value::Text(stamp.date_time),
        Value::Text(pilot),
        Value::Text(arn),
        Value::Text(unit),
    ];
    record.extend(position);
    record.extend(extract::equipment::extract(row));
    record.extend(extract::flight::pre_flight(row));
    record.extend(extract::risk::extract(row, &layout.hazards));
    record.extend(extract::flight::post_flight(row, &layout.incidents));
    record.extend(extract::upkeep::disposal(row, &layout.disposal));
    record.extend(extract::upkeep::maintenance(row, &layout.maintenance));
    record.push(extract::upkeep::comment(row));

    let (instance_id, instance_name) = extract::meta::extract(row);
    record.push(Value::Text(instance_id));
    record.push(Value::Text(instance_name));
    Ok(record)
}

// ── Tests ──
