use super::multi_select_with_other;
use crate::ingest::RawRow;
use crate::normalize::clean::{canonicalize, CaseStyle};
use crate::normalize::Value;
use crate::schema::ResolvedCategory;

const MAINTENANCE_FIELD: &str = "MAINTAIN:MAINTENANCE";
const MAINTENANCE_OTHER_FIELD: &str = "MAINTAIN:MAIN_OTHER";
const DISPOSAL_FIELD: &str = "MAINTAIN:DISPOSAL";
const DISPOSAL_OTHER_FIELD: &str = "MAINTAIN:DISPOSAL_OTHER";
const COMMENT_FIELD: &str = "MAINTAIN:COMMENT";

/// Maintenance-needed multi-select and its "other" pair.
pub fn maintenance(row: &RawRow, category: &ResolvedCategory) -> Vec<Value> {
    multi_select_with_other(row, MAINTENANCE_FIELD, MAINTENANCE_OTHER_FIELD, category)
}

/// Disposal multi-select and its "other" pair.
pub fn disposal(row: &RawRow, category: &ResolvedCategory) -> Vec<Value> {
    multi_select_with_other(row, DISPOSAL_FIELD, DISPOSAL_OTHER_FIELD, category)
}

/// Free-text comment, capitalized-cleaned.
pub fn comment(row: &RawRow) -> Value {
    Value::Text(canonicalize(row.get(COMMENT_FIELD), CaseStyle::Capitalized))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::MISSING;

    fn category(options: &[&str]) -> ResolvedCategory {
        ResolvedCategory {
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn maintenance_vector() {
        let row = RawRow::from_pairs([("MAINTAIN:MAINTENANCE", "batteries_swollen")]);
        let values = maintenance(
            &row,
            &category(&["batteries_swollen", "propeller_cracked"]),
        );
        assert_eq!(
            values,
            vec![
                Value::Int(1),
                Value::Int(0),
                Value::Text("None".into()),
                Value::Int(0),
            ]
        );
    }

    #[test]
    fn disposal_other_pair() {
        let row = RawRow::from_pairs([("MAINTAIN:DISPOSAL_OTHER", "sold_for_parts")]);
        let values = disposal(&row, &category(&["landfill"]));
        assert_eq!(
            values,
            vec![
                Value::Int(0),
                Value::Text("Sold for parts".into()),
                Value::Int(1),
            ]
        );
    }

    #[test]
    fn comment_cleaning() {
        let row = RawRow::from_pairs([("MAINTAIN:COMMENT", "gimbal_noise on takeoff")]);
        assert_eq!(
            comment(&row),
            Value::Text("Gimbal noise on takeoff".into())
        );
        assert_eq!(
            comment(&RawRow::from_pairs([])),
            Value::Text(MISSING.into())
        );
    }
}
