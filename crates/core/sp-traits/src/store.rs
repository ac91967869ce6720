//! Object store trait and listing types.

use async_trait::async_trait;
use sp_error::Result;
use sp_types::{ObjectDescriptor, ObjectMetadata};

/// Trait for object store backends.
///
/// This is the only capability the poller needs from storage. Implementations
/// include:
/// - In-memory store (for testing/development)
/// - AWS S3 (production)
///
/// # Listing Flow
///
/// 1. [`list`](ObjectStore::list) returns the first page under a prefix
/// 2. While the page carries a [`ContinuationToken`], pass it to
///    [`list_next`](ObjectStore::list_next) for the following page
///
/// Every method may fail with a [`StorageError`](sp_error::StorageError);
/// transport retries, if any, are the implementation's business.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Checks whether a bucket exists.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - The bucket exists and is reachable
    /// - `Ok(false)` - The store reports the bucket does not exist
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Lists the first page of objects whose key starts with `prefix`.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<ListingPage>;

    /// Lists the page following a previous one.
    async fn list_next(&self, token: &ContinuationToken) -> Result<ListingPage>;

    /// Fetches the user metadata of a single object.
    async fn metadata_of(&self, bucket: &str, key: &str) -> Result<ObjectMetadata>;

    /// Returns a URL at which the object can be fetched.
    fn url_of(&self, bucket: &str, key: &str) -> String;
}

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Objects in this page, in the order the store returned them
    pub objects: Vec<ObjectDescriptor>,

    /// Present when more pages remain
    pub next: Option<ContinuationToken>,
}

impl ListingPage {
    /// Whether the store signalled more pages.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Opaque position in a paginated listing.
///
/// Carries the bucket and prefix of the original request so that
/// [`ObjectStore::list_next`] needs nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken {
    bucket: String,
    prefix: String,
    token: String,
}

impl ContinuationToken {
    /// Create a token; only store implementations should need this.
    pub fn new(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            token: token.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The store-specific continuation value.
    pub fn token(&self) -> &str {
        &self.token
    }
}
