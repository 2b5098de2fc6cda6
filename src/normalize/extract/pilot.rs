use tracing::warn;

use crate::ingest::{RawRow, MISSING};
use crate::normalize::clean::{canonicalize, CaseStyle};
use crate::normalize::RowError;
use crate::schema::PilotLookup;

const PILOT_FIELD: &str = "PILOTS:FINAL_PILOT";
const OTHER_ARN_FIELD: &str = "PILOTS:OTHER_PILOT_ARN";
const UNIT_FIELD: &str = "PILOTS:FINAL_UNIT";

/// Title-case the recorded pilot and reformat as "Family, Given". The name
/// must split into exactly a given and a family token.
pub fn extract(row: &RawRow) -> Result<String, RowError> {
    let pilot = canonicalize(row.get(PILOT_FIELD), CaseStyle::Title);
    let parts: Vec<&str> = pilot.split(' ').collect();
    match parts.as_slice() {
        [given, family] => Ok(format!("{}, {}", family, given)),
        _ => Err(RowError::AmbiguousPilotName(pilot.clone())),
    }
}

/// Resolve the pilot's ARN. A non-missing "other pilot" answer re-derives
/// the identifier from the upper-cased formatted name rather than from the
/// raw answer itself; otherwise the reference table decides, with misses
/// degrading to "Unknown" as a data-quality signal, never an error.
pub fn identifier(row: &RawRow, pilot: &str, pilots: &PilotLookup) -> String {
    if row.get(OTHER_ARN_FIELD) != MISSING {
        return canonicalize(pilot, CaseStyle::Upper);
    }

    let lookup_name = pilot.replace(", ", " ");
    match pilots.lookup(&lookup_name) {
        Some(arn) => arn.to_string(),
        None => {
            warn!("No ARN on record for pilot {:?}", lookup_name);
            "Unknown".to_string()
        }
    }
}

/// Title-cleaned working unit.
pub fn unit(row: &RawRow) -> String {
    canonicalize(row.get(UNIT_FIELD), CaseStyle::Title)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_family_given() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_PILOT", "john_smith")]);
        assert_eq!(extract(&row).unwrap(), "Smith, John");
    }

    #[test]
    fn single_token_name_is_ambiguous() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_PILOT", "Madonna")]);
        assert!(matches!(
            extract(&row),
            Err(RowError::AmbiguousPilotName(_))
        ));
    }

    #[test]
    fn three_token_name_is_ambiguous() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_PILOT", "john paul smith")]);
        assert!(extract(&row).is_err());
    }

    #[test]
    fn missing_name_is_ambiguous() {
        let row = RawRow::from_pairs([("GPS_SELECT", "device")]);
        assert!(extract(&row).is_err());
    }

    #[test]
    fn identifier_from_lookup_table() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_PILOT", "john_smith")]);
        let pilots = PilotLookup::from_pairs([("Smith John", "ARN0042")]);
        assert_eq!(identifier(&row, "Smith, John", &pilots), "ARN0042");
    }

    #[test]
    fn identifier_miss_is_unknown() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_PILOT", "jane_citizen")]);
        assert_eq!(
            identifier(&row, "Citizen, Jane", &PilotLookup::default()),
            "Unknown"
        );
    }

    #[test]
    fn other_pilot_answer_rederives_from_name() {
        let row = RawRow::from_pairs([("PILOTS:OTHER_PILOT_ARN", "ARN9999")]);
        assert_eq!(
            identifier(&row, "Citizen, Jane", &PilotLookup::default()),
            "CITIZEN, JANE"
        );
    }

    #[test]
    fn unit_is_title_cleaned() {
        let row = RawRow::from_pairs([("PILOTS:FINAL_UNIT", "plant_industries")]);
        assert_eq!(unit(&row), "Plant Industries");
    }
}
