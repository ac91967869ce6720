//! Core traits for the S3 package poller.
//!
//! This crate defines the seam between the poller and the storage backend:
//! - [`ObjectStore`] - Trait for object store adapters (S3, in-memory)

pub mod store;

pub use store::*;
