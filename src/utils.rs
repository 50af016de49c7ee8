// Utility functions
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Parses an RFC 3339 timestamp (`Z` or numeric offset) into `DateTime<Utc>`.
/// Strings without a zone are rejected.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Walks `path` through nested objects and arrays. Array steps take a decimal
/// index. Returns `None` on the first missing or mistyped step.
pub fn dig<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, step| match node {
        Value::Object(map) => map.get(*step),
        Value::Array(items) => step.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// `dig` narrowed to a non-empty string.
pub fn dig_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    dig(value, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_zulu_and_offsets_to_utc() {
        let z = parse_datetime("2024-01-08T16:00:00.000Z").unwrap();
        assert_eq!(z, Utc.with_ymd_and_hms(2024, 1, 8, 16, 0, 0).unwrap());

        let offset = parse_datetime("2024-01-09T01:00:00+09:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2024, 1, 8, 16, 0, 0).unwrap());
    }

    #[test]
    fn rejects_naive_and_garbage_timestamps() {
        assert!(parse_datetime("2024-01-08T16:00:00").is_none());
        assert!(parse_datetime("next tuesday").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn formats_calendar_date_in_utc() {
        let dt = parse_datetime("2024-01-07T23:30:00-02:00").unwrap();
        assert_eq!(format_date(dt), "2024-01-08");
    }

    #[test]
    fn dig_walks_objects_and_arrays() {
        let v = json!({"a": {"b": [{"c": 1}, {"c": 2}]}});
        assert_eq!(dig(&v, &["a", "b", "1", "c"]), Some(&json!(2)));
        assert_eq!(dig(&v, &[]), Some(&v));
    }

    #[test]
    fn dig_stops_on_missing_or_mistyped_steps() {
        let v = json!({"a": {"b": [1], "s": "text"}});
        assert!(dig(&v, &["a", "x"]).is_none());
        assert!(dig(&v, &["a", "b", "5"]).is_none());
        assert!(dig(&v, &["a", "b", "first"]).is_none());
        assert!(dig(&v, &["a", "s", "deeper"]).is_none());
    }

    #[test]
    fn dig_str_treats_empty_and_non_strings_as_absent() {
        let v = json!({"slug": "", "n": 3, "ok": "game"});
        assert_eq!(dig_str(&v, &["slug"]), None);
        assert_eq!(dig_str(&v, &["n"]), None);
        assert_eq!(dig_str(&v, &["ok"]), Some("game"));
    }
}
