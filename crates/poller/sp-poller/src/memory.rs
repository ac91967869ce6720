//! In-memory object store.
//!
//! Useful for tests and local development: objects are listed in insertion
//! order, split into pages of a configurable size, and any operation can be
//! made to fail with a fixed message. Directory markers take up room in a
//! page but are never listed, as with [`S3Store`](crate::S3Store).

use async_trait::async_trait;
use sp_error::{Result, StorageError};
use sp_traits::{ContinuationToken, ListingPage, ObjectStore};
use sp_types::{ObjectDescriptor, ObjectMetadata};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::trace;

/// Default number of objects per page, matching S3's listing limit.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    BucketExists,
    List,
    ListNext,
    Metadata,
}

#[derive(Debug, Clone)]
struct StoredObject {
    descriptor: ObjectDescriptor,
    metadata: ObjectMetadata,
    marker: bool,
}

/// An [`ObjectStore`] backed by in-process collections.
#[derive(Debug)]
pub struct MemoryStore {
    buckets: BTreeMap<String, Vec<StoredObject>>,
    page_size: usize,
    failures: HashMap<StoreOperation, String>,
    metadata_requests: Mutex<Vec<String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            failures: HashMap::new(),
            metadata_requests: Mutex::new(Vec::new()),
        }
    }
}

impl MemoryStore {
    /// Create an empty store with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.buckets.entry(bucket.into()).or_default();
        self
    }

    /// Set the number of objects returned per page (at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add an object without user metadata, creating the bucket if needed.
    pub fn with_object(self, bucket: impl Into<String>, descriptor: ObjectDescriptor) -> Self {
        self.with_object_metadata(bucket, descriptor, ObjectMetadata::new())
    }

    /// Add an object with user metadata, creating the bucket if needed.
    pub fn with_object_metadata(
        mut self,
        bucket: impl Into<String>,
        descriptor: ObjectDescriptor,
        metadata: ObjectMetadata,
    ) -> Self {
        self.buckets
            .entry(bucket.into())
            .or_default()
            .push(StoredObject {
                descriptor,
                metadata,
                marker: false,
            });
        self
    }

    /// Add a directory marker, creating the bucket if needed.
    pub fn with_directory_marker(
        mut self,
        bucket: impl Into<String>,
        descriptor: ObjectDescriptor,
    ) -> Self {
        self.buckets
            .entry(bucket.into())
            .or_default()
            .push(StoredObject {
                descriptor,
                metadata: ObjectMetadata::new(),
                marker: true,
            });
        self
    }

    /// Make an operation fail with `message`.
    pub fn with_failure(mut self, operation: StoreOperation, message: impl Into<String>) -> Self {
        self.failures.insert(operation, message.into());
        self
    }

    /// Keys whose metadata has been requested, in request order.
    pub fn metadata_requests(&self) -> Vec<String> {
        self.metadata_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn injected(&self, operation: StoreOperation) -> Option<&str> {
        self.failures.get(&operation).map(String::as_str)
    }

    fn page(&self, bucket: &str, prefix: &str, offset: usize) -> Result<ListingPage> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::List(format!("NoSuchBucket: {bucket}")))?;

        let matching: Vec<&StoredObject> = objects
            .iter()
            .filter(|o| o.descriptor.key.starts_with(prefix))
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let page: Vec<ObjectDescriptor> = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .filter(|o| !o.marker)
            .map(|o| o.descriptor.clone())
            .collect();

        let next = (end < matching.len())
            .then(|| ContinuationToken::new(bucket, prefix, end.to_string()));

        trace!(bucket = %bucket, prefix = %prefix, offset, count = page.len(), "Listed page");

        Ok(ListingPage {
            objects: page,
            next,
        })
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        if let Some(message) = self.injected(StoreOperation::BucketExists) {
            return Err(StorageError::BucketLookup(message.to_string()).into());
        }
        Ok(self.buckets.contains_key(bucket))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<ListingPage> {
        if let Some(message) = self.injected(StoreOperation::List) {
            return Err(StorageError::List(message.to_string()).into());
        }
        self.page(bucket, prefix, 0)
    }

    async fn list_next(&self, token: &ContinuationToken) -> Result<ListingPage> {
        if let Some(message) = self.injected(StoreOperation::ListNext) {
            return Err(StorageError::List(message.to_string()).into());
        }
        let offset: usize = token.token().parse().map_err(|_| {
            StorageError::List(format!("invalid continuation token '{}'", token.token()))
        })?;
        self.page(token.bucket(), token.prefix(), offset)
    }

    async fn metadata_of(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        if let Ok(mut requests) = self.metadata_requests.lock() {
            requests.push(key.to_string());
        }
        if let Some(message) = self.injected(StoreOperation::Metadata) {
            return Err(StorageError::Metadata(message.to_string()).into());
        }

        self.buckets
            .get(bucket)
            .and_then(|objects| objects.iter().find(|o| o.descriptor.key == key))
            .map(|o| o.metadata.clone())
            .ok_or_else(|| StorageError::Metadata(format!("NoSuchKey: {key}")).into())
    }

    fn url_of(&self, bucket: &str, key: &str) -> String {
        format!("memory://{bucket}/{key}")
    }
}
