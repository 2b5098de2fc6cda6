pub mod datetime;
pub mod equipment;
pub mod flight;
pub mod meta;
pub mod pilot;
pub mod position;
pub mod risk;
pub mod upkeep;

use super::clean::{classify_presence, expand};
use super::Value;
use crate::ingest::RawRow;
use crate::schema::ResolvedCategory;

/// Expand a multi-select field and append its "other" label/flag pair.
/// Every variable-width segment of a record is built through here.
fn multi_select_with_other(
    row: &RawRow,
    field: &str,
    other_field: &str,
    category: &ResolvedCategory,
) -> Vec<Value> {
    let mut values: Vec<Value> = expand(row.get(field), &category.options)
        .into_iter()
        .map(Value::from)
        .collect();
    let (label, flag) = classify_presence(row.get(other_field));
    values.push(Value::Text(label));
    values.push(Value::Int(flag));
    values
}
