use crate::ingest::RawRow;
use crate::normalize::{RowError, Value};

const SOURCE_FIELD: &str = "GPS_SELECT";
const DEVICE_LAT_FIELD: &str = "GPS1:Latitude";
const DEVICE_LON_FIELD: &str = "GPS1:Longitude";
const DEVICE_ACC_FIELD: &str = "GPS1:Accuracy";
const EXT_LAT_FIELD: &str = "EXT_GPS_COORD_CENTRE2:EXT_GPS_COORD_CENTRE_LAT2";
const EXT_LON_FIELD: &str = "EXT_GPS_COORD_CENTRE2:EXT_GPS_COORD_CENTRE_LONG2";

const DEVICE_DATUM: &str = "wgs84";

/// Centre-point fix in record order: datum, source selector, latitude,
/// longitude, accuracy. Only the mobile device reports accuracy; external
/// receivers leave it NaN and their datum column carries the raw latitude
/// text. Any other selector value is rejected outright.
pub fn extract(row: &RawRow) -> Result<Vec<Value>, RowError> {
    let source = row.get(SOURCE_FIELD);
    let (datum, lat, lon, acc) = match source {
        "device" => (
            DEVICE_DATUM.to_string(),
            parse_coord(row.get(DEVICE_LAT_FIELD)),
            parse_coord(row.get(DEVICE_LON_FIELD)),
            parse_coord(row.get(DEVICE_ACC_FIELD)),
        ),
        "gps" => (
            row.get(EXT_LAT_FIELD).to_string(),
            parse_coord(row.get(EXT_LAT_FIELD)),
            parse_coord(row.get(EXT_LON_FIELD)),
            f64::NAN,
        ),
        other => return Err(RowError::UnknownPositionSource(other.to_string())),
    };

    Ok(vec![
        Value::Text(datum),
        Value::Text(source.to_string()),
        Value::Float(lat),
        Value::Float(lon),
        Value::Float(acc),
    ])
}

/// Unparseable coordinates degrade to NaN, which renders as an empty field.
fn parse_coord(raw: &str) -> f64 {
    raw.parse().unwrap_or(f64::NAN)
}

// ── Tests ──
