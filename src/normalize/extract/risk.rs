use super::multi_select_with_other;
use crate::ingest::RawRow;
use crate::normalize::clean::classify_flag;
use crate::normalize::Value;
use crate::schema::ResolvedCategory;

const RISK_FIELD: &str = "RISK:RISK_ASSESSMENT";
const HAZARDS_FIELD: &str = "RISK:HAZZARDS";
const HAZARD_OTHER_FIELD: &str = "RISK:HAZZARD_OTHER";

/// Risk-assessment flag, then the hazard multi-select and its "other" pair.
pub fn extract(row: &RawRow, hazards: &ResolvedCategory) -> Vec<Value> {
    let mut values = vec![classify_flag(row.get(RISK_FIELD))];
    values.extend(multi_select_with_other(
        row,
        HAZARDS_FIELD,
        HAZARD_OTHER_FIELD,
        hazards,
    ));
    values
}

// ── Tests ──
