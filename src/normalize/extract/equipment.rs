use crate::ingest::RawRow;
use crate::normalize::clean::{classify_flag, yes_no};
use crate::normalize::Value;

const DRONE_FIELD: &str = "DRONES:FINAL_DRONE";
const MICASENSE_FIELD: &str = "DRONES:FINAL_MICASENSE";
const PROPELLERS_FIELD: &str = "EQUIPMENT:PROPELLERS";
const BATTERY_P4_FIELD: &str = "EQUIPMENT:BATTERY_P4";
const BATTERY_MICA_FIELD: &str = "EQUIPMENT:BATTERY_MICA";
const BATTERY_RTK_FIELD: &str = "EQUIPMENT:BATTERY_RTK";

/// Airframe and sensor flags, then the consumables checklist. The
/// consumable answers stay textual Yes/No.
pub fn extract(row: &RawRow) -> Vec<Value> {
    vec![
        classify_flag(row.get(DRONE_FIELD)),
        classify_flag(row.get(MICASENSE_FIELD)),
        Value::Text(yes_no(row.get(PROPELLERS_FIELD))),
        Value::Text(yes_no(row.get(BATTERY_P4_FIELD))),
        Value::Text(yes_no(row.get(BATTERY_MICA_FIELD))),
        Value::Text(yes_no(row.get(BATTERY_RTK_FIELD))),
    ]
}

// ── Tests ──
