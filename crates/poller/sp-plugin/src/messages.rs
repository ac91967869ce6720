//! Request and response bodies.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sp_error::{PollerError, Result};
use sp_types::{ConfigValueSet, Revision};

/// Body of requests that carry only repository configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositoryMessage {
    #[serde(default)]
    pub repository_configuration: ConfigValueSet,
}

/// Body of requests that carry repository and package configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageMessage {
    #[serde(default)]
    pub repository_configuration: ConfigValueSet,

    #[serde(default)]
    pub package_configuration: ConfigValueSet,
}

/// Body of a `latest-revision-since` request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RevisionSinceMessage {
    #[serde(default)]
    pub repository_configuration: ConfigValueSet,

    #[serde(default)]
    pub package_configuration: ConfigValueSet,

    #[serde(default)]
    pub previous_revision: Option<Revision>,
}

/// One configuration validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Identifies the extension and protocol versions to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginIdentifier {
    pub extension: String,
    pub versions: Vec<String>,
}

impl Default for PluginIdentifier {
    fn default() -> Self {
        Self {
            extension: crate::EXTENSION.to_string(),
            versions: crate::SUPPORTED_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect(),
        }
    }
}

/// Decode a JSON request body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| PollerError::Message(format!("invalid request body: {e}")))
}

/// Encode a JSON response body.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| PollerError::Message(format!("failed to encode response: {e}")))
}
