//! Configuration field schemas and validation.

use sp_types::{ConfigProperty, ConfigValueSet, S3_BUCKET, S3_PATH};

use crate::messages::ValidationError;

/// Advertises the configuration fields and validates user input against them.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationProvider;

impl ConfigurationProvider {
    pub fn new() -> Self {
        Self
    }

    /// Fields of a package repository: the bucket.
    pub fn repository_configuration(&self) -> ConfigValueSet {
        ConfigValueSet::new().with_property(S3_BUCKET, field("S3 Bucket", "0"))
    }

    /// Fields of a package within a repository: the key prefix.
    pub fn package_configuration(&self) -> ConfigValueSet {
        ConfigValueSet::new().with_property(S3_PATH, field("S3 Path", "0"))
    }

    /// Validate user-supplied repository configuration.
    pub fn validate_repository_configuration(
        &self,
        config: &ConfigValueSet,
    ) -> Vec<ValidationError> {
        validate(&self.repository_configuration(), config)
    }

    /// Validate user-supplied package configuration.
    pub fn validate_package_configuration(&self, config: &ConfigValueSet) -> Vec<ValidationError> {
        validate(&self.package_configuration(), config)
    }
}

fn field(display_name: &str, display_order: &str) -> ConfigProperty {
    ConfigProperty::new()
        .with_display_name(display_name)
        .with_display_order(display_order)
        .with_required(true)
        .with_secure(false)
        .with_part_of_identity(true)
}

/// Every required schema field must have a non-blank value.
fn validate(schema: &ConfigValueSet, config: &ConfigValueSet) -> Vec<ValidationError> {
    schema
        .iter()
        .filter(|(_, property)| property.is_required())
        .filter(|(name, _)| config.value_of(name).is_err())
        .map(|(name, property)| {
            let label = property.display_name.as_deref().unwrap_or(name);
            ValidationError::new(name, format!("{label} must not be empty"))
        })
        .collect()
}
