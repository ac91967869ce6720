//! Connection checks for repository and package configuration.

use futures::{StreamExt, pin_mut};
use sp_error::Result;
use sp_traits::ObjectStore;
use sp_types::{CheckResult, ConfigValueSet, S3_BUCKET, S3_PATH};
use tracing::debug;

use crate::Poller;
use crate::pages::pages;
use crate::poller::log_failure;

/// Reported when the bucket exists.
pub const BUCKET_FOUND: &str = "Bucket found";

/// Reported when the store says the bucket does not exist.
pub const BUCKET_NOT_FOUND: &str = "Bucket not found";

/// Reported when the prefix yields at least one object.
pub const OBJECTS_FOUND: &str = "Objects found on path";

/// Reported when the prefix yields no objects.
pub const EMPTY_PATH: &str = "Could not find objects in path. Folder can't be empty.";

impl<S: ObjectStore> Poller<S> {
    /// Check that the configured bucket exists.
    ///
    /// Never fails: a missing bucket field or a store error is reported as a
    /// failed [`CheckResult`] whose message embeds the cause.
    pub async fn check_bucket(&self, repository: &ConfigValueSet) -> CheckResult {
        let outcome = match repository.value_of(S3_BUCKET) {
            Ok(bucket) => self
                .store
                .bucket_exists(bucket)
                .await
                .map(|exists| (bucket, exists)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((bucket, true)) => {
                debug!(bucket = %bucket, "Bucket found");
                CheckResult::success(BUCKET_FOUND)
            }
            Ok((bucket, false)) => {
                debug!(bucket = %bucket, "Bucket not found");
                CheckResult::failure(BUCKET_NOT_FOUND)
            }
            Err(e) => {
                log_failure("check-bucket", &e);
                CheckResult::failure(format!("Could not find bucket. [{e}]"))
            }
        }
    }

    /// Check that the configured prefix holds at least one object.
    ///
    /// Only the first page of the listing is requested, unless it came back
    /// empty with more pages to follow.
    pub async fn check_prefix(
        &self,
        package: &ConfigValueSet,
        repository: &ConfigValueSet,
    ) -> CheckResult {
        let bucket = repository.value_of(S3_BUCKET);
        let prefix = package.value_of(S3_PATH);

        let (bucket, prefix) = match (bucket, prefix) {
            (Ok(bucket), Ok(prefix)) => (bucket, prefix),
            (Err(e), _) | (_, Err(e)) => {
                log_failure("check-package", &e);
                return CheckResult::failure(format!("Could not find path. [{e}]"));
            }
        };

        match self.first_listed(bucket, prefix).await {
            Ok(Some(count)) => {
                debug!(bucket = %bucket, prefix = %prefix, count, "Objects found");
                CheckResult::success(OBJECTS_FOUND)
            }
            Ok(None) => {
                debug!(bucket = %bucket, prefix = %prefix, "No objects under prefix");
                CheckResult::failure(EMPTY_PATH)
            }
            Err(e) => {
                log_failure("check-package", &e);
                CheckResult::failure(format!(
                    "Could not find path '{prefix}' in bucket '{bucket}'. [{e}]"
                ))
            }
        }
    }

    /// Size of the first non-empty page, or `None` if the listing has no
    /// objects. Pages after it are never requested.
    async fn first_listed(&self, bucket: &str, prefix: &str) -> Result<Option<usize>> {
        let stream = pages(&self.store, bucket, prefix);
        pin_mut!(stream);

        while let Some(page) = stream.next().await {
            let page = page?;
            if !page.is_empty() {
                return Ok(Some(page.objects.len()));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, StoreOperation};
    use chrono::DateTime;
    use sp_types::{CheckStatus, ObjectDescriptor};
    use std::sync::{Arc, Mutex};

    fn repository(bucket: &str) -> ConfigValueSet {
        ConfigValueSet::new().with_value(S3_BUCKET, bucket)
    }

    fn package(path: &str) -> ConfigValueSet {
        ConfigValueSet::new().with_value(S3_PATH, path)
    }

    fn populated_store() -> MemoryStore {
        let ts = DateTime::from_timestamp_millis(10_000).unwrap();
        MemoryStore::new()
            .with_object("bucket", ObjectDescriptor::new("path/a.zip", ts))
            .with_object("bucket", ObjectDescriptor::new("path/b.zip", ts))
    }

    #[tokio::test]
    async fn test_check_bucket_exists() {
        let poller = Poller::new(MemoryStore::new().with_bucket("mybucket"));
        let result = poller.check_bucket(&repository("mybucket")).await;

        assert!(result.is_success());
        assert_eq!(result.messages, vec![BUCKET_FOUND]);
    }

    #[tokio::test]
    async fn test_check_bucket_not_found() {
        let poller = Poller::new(MemoryStore::new());
        let result = poller.check_bucket(&repository("faultybucket")).await;

        assert_eq!(result.status, CheckStatus::Failure);
        assert_eq!(result.messages, vec![BUCKET_NOT_FOUND]);
    }

    #[tokio::test]
    async fn test_check_bucket_store_error_embeds_message() {
        let store = MemoryStore::new().with_failure(StoreOperation::BucketExists, "message");
        let poller = Poller::new(store);
        let result = poller.check_bucket(&repository("faultybucket")).await;

        assert!(!result.is_success());
        assert!(result.messages[0].starts_with("Could not find bucket."));
        assert!(result.messages[0].contains("message"));
    }

    #[tokio::test]
    async fn test_check_bucket_missing_field() {
        let poller = Poller::new(MemoryStore::new().with_bucket("mybucket"));
        let result = poller.check_bucket(&ConfigValueSet::new()).await;

        assert!(!result.is_success());
        assert!(result.messages[0].contains(S3_BUCKET));
    }

    #[tokio::test]
    async fn test_check_prefix_objects_exist() {
        let poller = Poller::new(populated_store());
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert!(result.is_success());
        assert_eq!(result.messages, vec![OBJECTS_FOUND]);
    }

    #[tokio::test]
    async fn test_check_prefix_empty() {
        let poller = Poller::new(MemoryStore::new().with_bucket("bucket"));
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert!(!result.is_success());
        assert_eq!(result.messages, vec![EMPTY_PATH]);
    }

    #[tokio::test]
    async fn test_check_prefix_store_error_names_prefix_and_bucket() {
        let store = populated_store().with_failure(StoreOperation::List, "Some message");
        let poller = Poller::new(store);
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert!(!result.is_success());
        let message = &result.messages[0];
        assert!(message.contains("'path'"));
        assert!(message.contains("'bucket'"));
        assert!(message.contains("Some message"));
    }

    #[tokio::test]
    async fn test_check_prefix_reads_first_page_only() {
        let store = populated_store()
            .with_page_size(1)
            .with_failure(StoreOperation::ListNext, "should not be called");
        let poller = Poller::new(store);
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert!(result.is_success());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_check_transport_failures_log_at_error() {
        let (logs, _guard) = capture_logs();
        let store = populated_store()
            .with_failure(StoreOperation::BucketExists, "AccessDenied")
            .with_failure(StoreOperation::List, "AccessDenied");
        let poller = Poller::new(store);

        poller.check_bucket(&repository("bucket")).await;
        poller.check_prefix(&package("path"), &repository("bucket")).await;

        let text = logs.text();
        assert_eq!(text.lines().filter(|l| l.contains("ERROR")).count(), 2);
        assert!(text.contains("operation=\"check-bucket\""));
        assert!(text.contains("operation=\"check-package\""));
        assert!(!text.contains("WARN"));
    }

    #[tokio::test]
    async fn test_check_config_failures_log_at_warn() {
        let (logs, _guard) = capture_logs();
        let poller = Poller::new(populated_store());

        poller.check_bucket(&ConfigValueSet::new()).await;

        let text = logs.text();
        assert!(text.contains("WARN"));
        assert!(!text.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_check_prefix_skips_marker_only_page() {
        let ts = DateTime::from_timestamp_millis(10_000).unwrap();
        let store = MemoryStore::new()
            .with_page_size(1)
            .with_directory_marker("bucket", ObjectDescriptor::new("path/", ts))
            .with_object("bucket", ObjectDescriptor::new("path/a.zip", ts));
        let poller = Poller::new(store);
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert!(result.is_success());
        assert_eq!(result.messages, vec![OBJECTS_FOUND]);
    }

    #[tokio::test]
    async fn test_check_prefix_markers_only_is_empty() {
        let ts = DateTime::from_timestamp_millis(10_000).unwrap();
        let store = MemoryStore::new()
            .with_page_size(1)
            .with_directory_marker("bucket", ObjectDescriptor::new("path/", ts));
        let poller = Poller::new(store);
        let result = poller.check_prefix(&package("path"), &repository("bucket")).await;

        assert_eq!(result.messages, vec![EMPTY_PATH]);
    }

    #[tokio::test]
    async fn test_check_prefix_missing_path_field() {
        let poller = Poller::new(populated_store());
        let result = poller
            .check_prefix(&ConfigValueSet::new(), &repository("bucket"))
            .await;

        assert!(!result.is_success());
        assert!(result.messages[0].contains(S3_PATH));
    }
}
