//! sp-poller - latest-revision resolution for packages stored in S3.
//!
//! Given a bucket and a key prefix, the [`Poller`] finds the most recently
//! modified object under the prefix, turns it into a [`Revision`], and
//! decides whether that revision is newer than one seen before. It supports:
//!
//! - Bucket and prefix connection checks
//! - Latest-object selection across paginated listings
//! - Revision metadata from object user metadata (`version`, `sha`, `build`)
//! - Strict "newer than" comparison against a previous revision
//!
//! Failures never escape: checks report a failed [`CheckResult`], resolution
//! returns an unresolved revision, and comparison returns `None`.
//!
//! # Example
//!
//! ```ignore
//! use sp_poller::{Poller, S3Config, S3Store, create_s3_client};
//! use sp_types::{ConfigValueSet, S3_BUCKET, S3_PATH};
//!
//! let s3_config = S3Config::new().with_region("eu-west-1");
//! let client = create_s3_client(&s3_config).await?;
//! let poller = Poller::new(S3Store::new(client, s3_config.endpoint.clone()));
//!
//! let repository = ConfigValueSet::new().with_value(S3_BUCKET, "artifacts");
//! let package = ConfigValueSet::new().with_value(S3_PATH, "app/app-");
//!
//! let revision = poller.latest_revision(&package, &repository).await;
//! if let Some(ts) = revision.timestamp {
//!     eprintln!("Latest {} at {}", revision.identifier, ts);
//! }
//! ```

pub mod checker;
pub mod comparator;
pub mod memory;
pub mod pages;
pub mod poller;
pub mod resolver;
pub mod s3;

pub use memory::MemoryStore;
pub use pages::pages;
pub use poller::Poller;
pub use resolver::{ORIGINATOR, select_latest};
pub use s3::{S3Config, S3Store, create_s3_client};

pub use sp_types::{CheckResult, Revision};
