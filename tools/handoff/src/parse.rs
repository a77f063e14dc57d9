use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Text form of a scalar JSON value. Strings pass through; numbers and
/// booleans are rendered; null, arrays and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a transcript timestamp, keeping its own UTC offset.
///
/// Accepts RFC 3339, naive ISO-8601 (read as UTC) and integer epoch
/// seconds or milliseconds.
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    if let Ok(num) = raw.parse::<i64>() {
        return parse_timestamp_i64(num).map(|dt| dt.fixed_offset());
    }
    None
}

pub fn parse_timestamp_i64(num: i64) -> Option<DateTime<Utc>> {
    if num <= 0 {
        return None;
    }
    // Heuristic: treat values over ~year 2286 seconds as milliseconds.
    if num > 10_000_000_000 {
        let secs = num / 1000;
        let nsec = ((num % 1000) * 1_000_000) as u32;
        return Utc.timestamp_opt(secs, nsec).single();
    }
    Utc.timestamp_opt(num, 0).single()
}

/// Whole minutes from `start` to `end`, truncated toward zero.
pub fn minutes_between(start: &str, end: &str) -> Option<i64> {
    let start = parse_timestamp_str(start)?;
    let end = parse_timestamp_str(end)?;
    Some(end.signed_duration_since(start).num_minutes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_text_renders_numbers() {
        assert_eq!(scalar_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(scalar_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }

    #[test]
    fn parses_zulu_and_offset_timestamps() {
        let z = parse_timestamp_str("2025-11-10T02:52:43.237Z").unwrap();
        assert_eq!(z.offset().local_minus_utc(), 0);
        let offset = parse_timestamp_str("2025-11-10T10:00:00+02:00").unwrap();
        assert_eq!(offset.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn parses_naive_and_epoch_timestamps() {
        assert!(parse_timestamp_str("2025-11-10T10:00:00").is_some());
        assert!(parse_timestamp_str("2025-11-10 10:00:00.5").is_some());
        assert!(parse_timestamp_str("1762742400").is_some());
        assert!(parse_timestamp_str("1762742400000").is_some());
        assert!(parse_timestamp_str("yesterday").is_none());
    }

    #[test]
    fn minutes_truncate_toward_zero() {
        assert_eq!(
            minutes_between("2025-01-01T10:00:00Z", "2025-01-01T10:59:59Z"),
            Some(59)
        );
        assert_eq!(
            minutes_between("2025-01-01T10:00:00Z", "2025-01-01T09:58:30Z"),
            Some(-1)
        );
        assert_eq!(minutes_between("2025-01-01T10:00:00Z", "garbage"), None);
    }
}
