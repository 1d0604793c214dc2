//! Serde helpers for the service's timestamp format.
//!
//! The v2 API writes `2008/03/05 08:35:34 -0800`; RFC 3339 is accepted as
//! well so values round-trip through our own serializer.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

const LEGACY_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

/// Parse either timestamp form.
pub(crate) fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, LEGACY_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Deserialize an optional timestamp.
///
/// Missing or null fields become `None`; a string in neither form is an
/// error.
pub(crate) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}
