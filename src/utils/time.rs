//! Time utilities

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// 현재 UTC 타임스탬프 (밀리초)
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// 밀리초 타임스탬프를 ISO 8601 문자열로 변환 (`2019-03-07T02:03:11.000Z`)
pub fn iso8601(ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse an ISO 8601 datetime into milliseconds; naive datetimes are UTC
pub fn parse8601(datetime: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime) {
        return Some(dt.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok()
}
