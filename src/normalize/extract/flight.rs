use super::multi_select_with_other;
use crate::ingest::RawRow;
use crate::normalize::clean::classify_flag;
use crate::normalize::Value;
use crate::schema::ResolvedCategory;

const CASA_RULES_FIELD: &str = "PRE_FLIGHT:CASA_RULES";
const PRE_BRIEFING_FIELD: &str = "PRE_FLIGHT:PRE_FLIGHT_BRIEFING";
const PRE_CHECK_FIELD: &str = "PRE_FLIGHT:PRE_FLIGHT_CHECK";

const FLIGHT_TIME_FIELD: &str = "POST_FLIGHT:FLIGHT_TIME";
const POST_CHECK_FIELD: &str = "POST_FLIGHT:POST_FLIGHT_CHECK";
const NEAR_MISS_FIELD: &str = "INC_NM:INCIDENT_NM";
const INCIDENT_FIELD: &str = "INC_NM:INCIDENT";
const INCIDENT_OTHER_FIELD: &str = "INC_NM:INCIDENT_OTHER";

/// CASA compliance, briefing, and pre-flight check flags.
pub fn pre_flight(row: &RawRow) -> Vec<Value> {
    vec![
        classify_flag(row.get(CASA_RULES_FIELD)),
        classify_flag(row.get(PRE_BRIEFING_FIELD)),
        classify_flag(row.get(PRE_CHECK_FIELD)),
    ]
}

/// Flight minutes, post-flight check, near-miss flag, then the incident
/// multi-select and its "other" pair.
pub fn post_flight(row: &RawRow, incidents: &ResolvedCategory) -> Vec<Value> {
    let mut values = vec![
        flight_minutes(row.get(FLIGHT_TIME_FIELD)),
        classify_flag(row.get(POST_CHECK_FIELD)),
        classify_flag(row.get(NEAR_MISS_FIELD)),
    ];
    values.extend(multi_select_with_other(
        row,
        INCIDENT_FIELD,
        INCIDENT_OTHER_FIELD,
        incidents,
    ));
    values
}

/// Recorded minutes coerced to an integer when the answer is numeric.
fn flight_minutes(raw: &str) -> Value {
    match classify_flag(raw) {
        Value::Text(text) => match text.parse::<f64>() {
            Ok(minutes) => Value::Int(minutes as i64),
            Err(_) => Value::Text(text),
        },
        value => value,
    }
}

// ── Tests ──
