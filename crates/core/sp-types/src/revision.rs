//! Resolved package revisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The resolved state of the latest artifact under a prefix.
///
/// A revision without a timestamp is *unresolved*: it signals that
/// resolution failed and is never considered newer than anything. Absent
/// fields are omitted when serialised, so an unresolved revision encodes as
/// `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Version of the artifact, or its key relative to the prefix
    #[serde(rename = "revision", default, skip_serializing_if = "String::is_empty")]
    pub identifier: String,

    /// Last modified time of the selected object
    #[serde(
        default,
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,

    /// Which system produced the revision
    #[serde(rename = "user", default, skip_serializing_if = "String::is_empty")]
    pub originator: String,

    /// Human-readable provenance of the artifact
    #[serde(
        rename = "revisionComment",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,

    /// Link back to the build that produced the artifact
    #[serde(
        rename = "trackbackUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trace_link: Option<String>,

    /// Extra key/value pairs exposed to downstream pipeline stages
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Revision {
    /// An unresolved revision.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Whether this revision carries a timestamp.
    pub fn is_resolved(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Strict "newer than" comparison.
    ///
    /// False whenever either side is unresolved; equal timestamps are not
    /// newer.
    pub fn is_newer_than(&self, other: &Revision) -> bool {
        match (self.timestamp, other.timestamp) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }
}

/// Wire format for revision timestamps.
///
/// Written as `yyyy-MM-ddTHH:mm:ss.SSSZ`. Reading also accepts any RFC 3339
/// timestamp.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Fixed millisecond-precision UTC format.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    /// Render a timestamp in [`FORMAT`].
    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    /// Parse a timestamp in [`FORMAT`] or RFC 3339.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
            .map(|naive| naive.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{s}'"))),
            None => Ok(None),
        }
    }
}
