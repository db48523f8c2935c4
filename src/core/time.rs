use chrono::{DateTime, Utc};

/// Raw x values above this are already millisecond-scale.
pub const MILLISECOND_TIMESTAMP_THRESHOLD: f64 = 99_999_999_999.0;

/// Normalizes a raw axis timestamp to milliseconds.
///
/// Values above [`MILLISECOND_TIMESTAMP_THRESHOLD`] pass through; anything
/// smaller is read as seconds.
#[must_use]
pub fn normalize_timestamp_millis(raw: f64) -> f64 {
    if raw > MILLISECOND_TIMESTAMP_THRESHOLD {
        raw
    } else {
        raw * 1000.0
    }
}

/// Renders a millisecond timestamp as a UTC tooltip header.
#[must_use]
pub fn format_timestamp_millis(millis: f64) -> String {
    if !millis.is_finite() {
        return millis.to_string();
    }
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(millis.round() as i64) else {
        return millis.to_string();
    };
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}
