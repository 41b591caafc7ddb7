//! Serde helpers for backend timestamps.
//!
//! Some endpoints send RFC 3339 timestamps, others send offset-less ISO
//! timestamps (`2024-03-01T09:15:00`) or bare dates. Offset-less values are
//! interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a backend timestamp in any of the accepted shapes.
#[must_use]
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `#[serde(with = "timestamp::option")]` for `Option<DateTime<Utc>>` fields.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serialize as an RFC 3339 string, or `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from `null`, an RFC 3339 string, an offset-less ISO string
    /// or a bare date.
    ///
    /// # Errors
    ///
    /// Fails when a string is present but matches none of the shapes.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        super::parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "super::option")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse("2024-03-01T10:15:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_offsetless_as_utc() {
        let dt = parse("2024-03-01T09:15:30.123").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (1, 9, 15));
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse("2024-12-31").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (12, 31, 0));
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_option_field() {
        let s: Stamped = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert!(s.at.is_none());

        let s: Stamped = serde_json::from_str("{}").unwrap();
        assert!(s.at.is_none());

        let s: Stamped = serde_json::from_str(r#"{"at":"2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(s.at.unwrap().year(), 2024);

        assert!(serde_json::from_str::<Stamped>(r#"{"at":"soon"}"#).is_err());
    }
}
