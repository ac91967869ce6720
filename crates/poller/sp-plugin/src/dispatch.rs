//! Request dispatch.
//!
//! Each request name maps to exactly one [`RequestKind`]; the plugin matches
//! on the kind to pick the handler. Handlers never see a malformed request
//! name, and store failures never reach this layer because the poller has
//! already turned them into results.

use sp_error::Result;
use sp_poller::Poller;
use sp_traits::ObjectStore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error};

use crate::messages::{PackageMessage, RepositoryMessage, RevisionSinceMessage, decode, encode};
use crate::provider::ConfigurationProvider;

/// Status code of a handled request.
pub const SUCCESS_CODE: u16 = 200;

/// Status code of an unknown request name.
pub const BAD_REQUEST_CODE: u16 = 400;

/// Status code of a request that could not be processed.
pub const ERROR_CODE: u16 = 500;

/// The requests a package repository plugin answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    RepositoryConfiguration,
    PackageConfiguration,
    ValidateRepositoryConfiguration,
    ValidatePackageConfiguration,
    CheckRepositoryConnection,
    CheckPackageConnection,
    LatestRevision,
    LatestRevisionSince,
}

impl RequestKind {
    /// Every request kind.
    pub const ALL: [RequestKind; 8] = [
        Self::RepositoryConfiguration,
        Self::PackageConfiguration,
        Self::ValidateRepositoryConfiguration,
        Self::ValidatePackageConfiguration,
        Self::CheckRepositoryConnection,
        Self::CheckPackageConnection,
        Self::LatestRevision,
        Self::LatestRevisionSince,
    ];

    /// The request name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RepositoryConfiguration => "repository-configuration",
            Self::PackageConfiguration => "package-configuration",
            Self::ValidateRepositoryConfiguration => "validate-repository-configuration",
            Self::ValidatePackageConfiguration => "validate-package-configuration",
            Self::CheckRepositoryConnection => "check-repository-connection",
            Self::CheckPackageConnection => "check-package-connection",
            Self::LatestRevision => "latest-revision",
            Self::LatestRevisionSince => "latest-revision-since",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request name outside [`RequestKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid request name {0}")]
pub struct UnknownRequest(pub String);

impl FromStr for RequestKind {
    type Err = UnknownRequest;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownRequest(s.to_string()))
    }
}

/// Reply to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginResponse {
    pub code: u16,
    pub body: Option<String>,
}

impl PluginResponse {
    pub fn success(body: Option<String>) -> Self {
        Self {
            code: SUCCESS_CODE,
            body,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: BAD_REQUEST_CODE,
            body: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_CODE,
            body: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        Ok(Self::success(Some(encode(value)?)))
    }
}

/// The package repository plugin.
///
/// Built once per process; holds only the poller and the configuration
/// provider, neither of which changes after construction.
pub struct PackagePlugin<S: ObjectStore> {
    poller: Poller<S>,
    provider: ConfigurationProvider,
}

impl<S: ObjectStore> PackagePlugin<S> {
    pub fn new(poller: Poller<S>) -> Self {
        Self {
            poller,
            provider: ConfigurationProvider::new(),
        }
    }

    /// Handle a request by name.
    ///
    /// Unknown names get a 400 reply; bodies that fail to decode get a 500
    /// reply carrying the decode error.
    pub async fn handle(&self, request_name: &str, body: &str) -> PluginResponse {
        debug!(request = request_name, body = body, "Incoming request");

        let response = match request_name.parse::<RequestKind>() {
            Ok(kind) => match self.dispatch(kind, body).await {
                Ok(response) => response,
                Err(e) => {
                    error!(request = request_name, error = %e, "Request failed");
                    PluginResponse::error(e.to_string())
                }
            },
            Err(e) => PluginResponse::bad_request(e.to_string()),
        };

        debug!(
            request = request_name,
            code = response.code,
            body = ?response.body,
            "Request handled"
        );
        response
    }

    /// Run the handler for `kind`.
    pub async fn dispatch(&self, kind: RequestKind, body: &str) -> Result<PluginResponse> {
        match kind {
            RequestKind::RepositoryConfiguration => {
                PluginResponse::json(&self.provider.repository_configuration())
            }
            RequestKind::PackageConfiguration => {
                PluginResponse::json(&self.provider.package_configuration())
            }
            RequestKind::ValidateRepositoryConfiguration => {
                let message: RepositoryMessage = decode(body)?;
                let errors = self
                    .provider
                    .validate_repository_configuration(&message.repository_configuration);
                PluginResponse::json(&errors)
            }
            RequestKind::ValidatePackageConfiguration => {
                let message: PackageMessage = decode(body)?;
                let errors = self
                    .provider
                    .validate_package_configuration(&message.package_configuration);
                PluginResponse::json(&errors)
            }
            RequestKind::CheckRepositoryConnection => {
                let message: RepositoryMessage = decode(body)?;
                let result = self
                    .poller
                    .check_bucket(&message.repository_configuration)
                    .await;
                PluginResponse::json(&result)
            }
            RequestKind::CheckPackageConnection => {
                let message: PackageMessage = decode(body)?;
                let result = self
                    .poller
                    .check_prefix(
                        &message.package_configuration,
                        &message.repository_configuration,
                    )
                    .await;
                PluginResponse::json(&result)
            }
            RequestKind::LatestRevision => {
                let message: PackageMessage = decode(body)?;
                let revision = self
                    .poller
                    .latest_revision(
                        &message.package_configuration,
                        &message.repository_configuration,
                    )
                    .await;
                PluginResponse::json(&revision)
            }
            RequestKind::LatestRevisionSince => {
                let message: RevisionSinceMessage = decode(body)?;
                let revision = self
                    .poller
                    .latest_revision_since(
                        &message.package_configuration,
                        &message.repository_configuration,
                        message.previous_revision.as_ref(),
                    )
                    .await;
                match revision {
                    Some(revision) => PluginResponse::json(&revision),
                    None => Ok(PluginResponse::success(None)),
                }
            }
        }
    }
}
