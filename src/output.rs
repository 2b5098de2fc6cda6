use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::normalize::NormalizedBatch;

/// Write a normalized batch as CSV: column-name header, then one line per
/// record in batch order.
pub fn write_csv(path: &Path, batch: &NormalizedBatch) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output {}", path.display()))?;

    writer.write_record(&batch.columns)?;
    for record in &batch.records {
        writer.write_record(record.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;

    info!(
        "Wrote {} records ({} columns) to {}",
        batch.records.len(),
        batch.columns.len(),
        path.display()
    );
    Ok(())
}
