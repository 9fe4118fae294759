//! ISO-8601 timestamps as they are written to the triple store and to JSON bodies.
//!
//! Timestamps always carry millisecond precision and a `Z` suffix, e.g. `2024-05-01T10:00:00.000Z`.

use chrono::{DateTime, SecondsFormat, Utc};

pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.with_timezone(&Utc))
}

/// Serde support for `Option<DateTime<Utc>>` fields. Use with `#[serde(with = "...")]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|value| super::parse(&value).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_uses_milliseconds_and_zulu() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format(&ts), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn parse_accepts_offsets() {
        let ts = parse("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(format(&ts), "2024-05-01T10:00:00.000Z");
    }
}
