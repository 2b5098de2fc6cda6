use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::ingest::RawRow;
use crate::normalize::RowError;

const START_FIELD: &str = "START";

/// Normalized renderings of the form's start timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightTimestamp {
    /// DD/MM/YYYY
    pub date: String,
    /// DD/MM/YY
    pub short_date: String,
    /// YYYYMMDD, safe for photo file names
    pub photo_date: String,
    /// 12-hour clock with AM/PM, leading zero stripped
    pub time: String,
    /// Date and 12-hour time combined
    pub date_time: String,
}

/// Split the ISO-like `START` answer into its date and time renderings.
/// The `T` separator, the sub-second marker, and both halves must parse.
pub fn extract(row: &RawRow) -> Result<FlightTimestamp, RowError> {
    let start = row.get(START_FIELD);
    let malformed = || RowError::MalformedTimestamp(start.to_string());

    let (date_part, time_part) = start.split_once('T').ok_or_else(malformed)?;
    let (hms, _) = time_part.split_once('.').ok_or_else(malformed)?;

    let day = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| malformed())?;
    let clock = NaiveTime::parse_from_str(hms, "%H:%M:%S").map_err(|_| malformed())?;

    let (is_pm, hour) = clock.hour12();
    let time = format!(
        "{}:{:02}:{:02} {}",
        hour,
        clock.minute(),
        clock.second(),
        if is_pm { "PM" } else { "AM" }
    );

    let date = day.format("%d/%m/%Y").to_string();
    let date_time = format!("{} {}", date, time);

    Ok(FlightTimestamp {
        date,
        short_date: day.format("%d/%m/%y").to_string(),
        photo_date: day.format("%Y%m%d").to_string(),
        time,
        date_time,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn row(start: &str) -> RawRow {
        RawRow::from_pairs([("START", start)])
    }

    #[test]
    fn morning_timestamp() {
        let stamp = extract(&row("2021-03-05T09:15:30.000+09:30")).unwrap();
        assert_eq!(stamp.date, "05/03/2021");
        assert_eq!(stamp.short_date, "05/03/21");
        assert_eq!(stamp.photo_date, "20210305");
        assert_eq!(stamp.time, "9:15:30 AM");
        assert_eq!(stamp.date_time, "05/03/2021 9:15:30 AM");
    }

    #[test]
    fn afternoon_and_midnight_clock() {
        let stamp = extract(&row("2021-11-20T14:05:09.000+09:30")).unwrap();
        assert_eq!(stamp.time, "2:05:09 PM");

        let stamp = extract(&row("2021-11-20T00:10:00.000+09:30")).unwrap();
        assert_eq!(stamp.time, "12:10:00 AM");

        let stamp = extract(&row("2021-11-20T12:00:01.000+09:30")).unwrap();
        assert_eq!(stamp.time, "12:00:01 PM");
    }

    #[test]
    fn missing_separators_are_malformed() {
        assert!(matches!(
            extract(&row("2021-03-05 09:15:30")),
            Err(RowError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            extract(&row("2021-03-05T09:15:30")),
            Err(RowError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            extract(&row("nan")),
            Err(RowError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn garbage_halves_are_malformed() {
        assert!(extract(&row("2021-13-40T09:15:30.000")).is_err());
        assert!(extract(&row("2021-03-05T99:99:99.000")).is_err());
    }
}
