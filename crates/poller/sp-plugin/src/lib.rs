//! sp-plugin - package repository plugin protocol.
//!
//! Maps the orchestrator's named requests onto [`Poller`](sp_poller::Poller)
//! operations:
//!
//! - [`RequestKind`] - The closed set of request names
//! - [`PackagePlugin`] - Decodes a request body, dispatches it, encodes the reply
//! - [`ConfigurationProvider`] - Field schemas and validation
//! - [`messages`] - Request and response bodies

pub mod dispatch;
pub mod messages;
pub mod provider;

pub use dispatch::{PackagePlugin, PluginResponse, RequestKind, UnknownRequest};
pub use messages::{PluginIdentifier, ValidationError};
pub use provider::ConfigurationProvider;

/// Extension point this plugin implements.
pub const EXTENSION: &str = "package-repository";

/// Protocol versions this plugin speaks.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];
