//! Latest revision resolution.
//!
//! The latest object under a prefix is the one with the greatest
//! last-modified time. The running maximum starts at the first object of the
//! first page and is replaced only by a strictly later object, so among
//! objects sharing the greatest timestamp the first one listed wins,
//! regardless of how the listing is split into pages.

use futures::{StreamExt, pin_mut};
use sp_error::{PollerError, Result};
use sp_traits::ObjectStore;
use sp_types::{
    ConfigValueSet, ObjectDescriptor, ObjectMetadata, Revision, S3_BUCKET, S3_PATH, timestamp,
};
use std::collections::BTreeMap;
use tracing::debug;

use crate::Poller;
use crate::pages::pages;
use crate::poller::log_failure;

/// Originator recorded on every resolved revision.
pub const ORIGINATOR: &str = "S3";

/// Revision data key holding the selected object's key.
pub const DATA_OBJECT_KEY: &str = "OBJECT_KEY";

/// Revision data key holding the selected object's URL.
pub const DATA_LOCATION: &str = "LOCATION";

/// Revision data key holding the artifact checksum.
pub const DATA_SHA: &str = "SHA";

/// Fold `candidates` into a running maximum by last-modified time.
///
/// `current` wins ties, as does the earlier of two equal candidates.
pub fn select_latest<I>(
    current: Option<ObjectDescriptor>,
    candidates: I,
) -> Option<ObjectDescriptor>
where
    I: IntoIterator<Item = ObjectDescriptor>,
{
    candidates
        .into_iter()
        .fold(current, |latest, candidate| match latest {
            Some(latest) if candidate.last_modified <= latest.last_modified => Some(latest),
            _ => Some(candidate),
        })
}

impl<S: ObjectStore> Poller<S> {
    /// Resolve the latest revision under the configured prefix.
    ///
    /// Returns an unresolved revision (no timestamp) when a required field is
    /// missing, the prefix is empty, or any store call fails. The cause is
    /// logged.
    pub async fn latest_revision(
        &self,
        package: &ConfigValueSet,
        repository: &ConfigValueSet,
    ) -> Revision {
        match self.resolve(package, repository).await {
            Ok(revision) => revision,
            Err(e) => {
                log_failure("latest-revision", &e);
                Revision::unresolved()
            }
        }
    }

    async fn resolve(
        &self,
        package: &ConfigValueSet,
        repository: &ConfigValueSet,
    ) -> Result<Revision> {
        let bucket = repository.value_of(S3_BUCKET)?;
        let prefix = package.value_of(S3_PATH)?;

        let latest = self.find_latest(bucket, prefix).await?;

        debug!(
            bucket = %bucket,
            key = %latest.key,
            last_modified = %latest.last_modified,
            "Selected latest object"
        );

        let metadata = self.store.metadata_of(bucket, &latest.key).await?;
        Ok(self.build_revision(bucket, prefix, &latest, &metadata))
    }

    async fn find_latest(&self, bucket: &str, prefix: &str) -> Result<ObjectDescriptor> {
        let empty = || PollerError::EmptyListing {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        };

        let stream = pages(&self.store, bucket, prefix);
        pin_mut!(stream);

        let mut latest: Option<ObjectDescriptor> = None;
        let mut page_count = 0usize;

        // Pages emptied by skipped entries may still be followed by objects
        while let Some(page) = stream.next().await {
            let page = page?;
            page_count += 1;
            latest = select_latest(latest, page.objects);
        }

        debug!(bucket = %bucket, prefix = %prefix, pages = page_count, "Listing exhausted");

        latest.ok_or_else(empty)
    }

    fn build_revision(
        &self,
        bucket: &str,
        prefix: &str,
        latest: &ObjectDescriptor,
        metadata: &ObjectMetadata,
    ) -> Revision {
        let url = self.store.url_of(bucket, &latest.key);

        let identifier = match metadata.version().filter(|v| !v.is_empty()) {
            Some(version) => version.to_string(),
            None => latest
                .key
                .strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .unwrap_or(latest.key.as_str())
                .to_string(),
        };

        let mut description = format!(
            "Object at {} with date {} located at {}",
            latest.key,
            timestamp::format(&latest.last_modified),
            url
        );
        if let Some(sha) = metadata.sha() {
            description.push_str(&format!(" for SHA {sha}"));
        }

        let mut data = BTreeMap::new();
        data.insert(DATA_OBJECT_KEY.to_string(), latest.key.clone());
        data.insert(DATA_LOCATION.to_string(), url);
        if let Some(sha) = metadata.sha() {
            data.insert(DATA_SHA.to_string(), sha.to_string());
        }

        Revision {
            identifier,
            timestamp: Some(latest.last_modified),
            originator: ORIGINATOR.to_string(),
            description,
            trace_link: metadata.build().map(str::to_string),
            data,
        }
    }
}
