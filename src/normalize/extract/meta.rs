use crate::ingest::RawRow;

const INSTANCE_ID_FIELD: &str = "meta:instanceID";
const INSTANCE_NAME_FIELD: &str = "meta:instanceName";

/// Submission identity (instance id and name), passed through unchanged.
pub fn extract(row: &RawRow) -> (String, String) {
    (
        row.get(INSTANCE_ID_FIELD).to_string(),
        row.get(INSTANCE_NAME_FIELD).to_string(),
    )
}
