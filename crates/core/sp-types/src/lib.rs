//! Core types for the S3 package poller.
//!
//! This crate provides the data model shared by the poller and the plugin
//! layer:
//! - [`ConfigValueSet`] - User-supplied repository and package settings
//! - [`ObjectDescriptor`] / [`ObjectMetadata`] - What the object store reports
//! - [`Revision`] - The resolved latest artifact state
//! - [`CheckResult`] - Outcome of a connection check

pub mod check;
pub mod config;
pub mod object;
pub mod revision;

pub use check::*;
pub use config::*;
pub use object::*;
pub use revision::*;
