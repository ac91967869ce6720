//! S3 client and object store.
//!
//! This module provides the production [`ObjectStore`](sp_traits::ObjectStore):
//! - Client configuration with LocalStack support
//! - Bucket existence, paginated listing and user metadata via the AWS SDK

mod client;
mod store;

pub use client::{S3Config, create_s3_client};
pub use store::S3Store;
