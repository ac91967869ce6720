//! Configuration value sets supplied by the orchestrator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sp_error::{PollerError, Result};

/// Repository field holding the bucket name.
pub const S3_BUCKET: &str = "S3_BUCKET";

/// Package field holding the object key prefix.
pub const S3_PATH: &str = "S3_PATH";

/// A single configuration field: its value plus optional display metadata.
///
/// Only `value` is meaningful on incoming requests; the display attributes
/// are filled in when the field schema is advertised to the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigProperty {
    /// User-supplied value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Label shown next to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Position of the field in the form (the orchestrator expects a string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<String>,

    /// Whether the value must be masked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    /// Whether a value must be supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Whether the value contributes to the material's identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_identity: Option<bool>,
}

impl ConfigProperty {
    /// Create an empty property.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the display order.
    pub fn with_display_order(mut self, order: impl Into<String>) -> Self {
        self.display_order = Some(order.into());
        self
    }

    /// Mark the value as secret.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Mark the field as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Mark the field as part of the material identity.
    pub fn with_part_of_identity(mut self, part_of_identity: bool) -> Self {
        self.part_of_identity = Some(part_of_identity);
        self
    }

    /// Whether the field is declared required.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Ordered mapping from field name to [`ConfigProperty`].
///
/// Built once per request from the orchestrator's JSON and read-only
/// afterwards. Field names are unique; inserting an existing name replaces
/// the previous entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValueSet {
    properties: IndexMap<String, ConfigProperty>,
}

impl ConfigValueSet {
    /// Create an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, keeping insertion order.
    pub fn with_property(mut self, name: impl Into<String>, property: ConfigProperty) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Add a field holding just a value.
    pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_property(name, ConfigProperty::new().with_value(value))
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&ConfigProperty> {
        self.properties.get(name)
    }

    /// Look up a required field's value.
    ///
    /// Fails with [`PollerError::Config`] when the field is absent, has no
    /// value, or the value is blank.
    pub fn value_of(&self, name: &str) -> Result<&str> {
        self.get(name)
            .and_then(|p| p.value.as_deref())
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PollerError::missing_field(name))
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigProperty)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
