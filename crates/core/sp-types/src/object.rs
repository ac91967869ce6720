//! Object descriptors and metadata reported by an object store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User metadata key carrying the artifact version.
pub const META_VERSION: &str = "version";

/// User metadata key carrying the artifact checksum.
pub const META_SHA: &str = "sha";

/// User metadata key carrying the build that produced the artifact.
pub const META_BUILD: &str = "build";

/// One entry of an object listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// The object key (full path within the bucket)
    pub key: String,

    /// Last modified timestamp
    pub last_modified: DateTime<Utc>,

    /// Display name or id of the object owner, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ObjectDescriptor {
    /// Create a descriptor without owner information.
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
            owner: None,
        }
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// User-supplied metadata of a single object.
///
/// Keys are normalised to lowercase, matching how S3 reports user metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    entries: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value; the key is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The artifact version, if recorded.
    pub fn version(&self) -> Option<&str> {
        self.get(META_VERSION)
    }

    /// The artifact checksum, if recorded.
    pub fn sha(&self) -> Option<&str> {
        self.get(META_SHA)
    }

    /// The producing build's URL, if recorded.
    pub fn build(&self) -> Option<&str> {
        self.get(META_BUILD)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ObjectMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
                .collect(),
        }
    }
}
