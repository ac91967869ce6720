//! [`ObjectStore`] implementation over the AWS SDK.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use chrono::DateTime;
use sp_error::{Result, StorageError};
use sp_traits::{ContinuationToken, ListingPage, ObjectStore};
use sp_types::{ObjectDescriptor, ObjectMetadata};
use tracing::{debug, trace};

/// Region assumed when the client has none configured.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-backed object store.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    endpoint: Option<String>,
}

impl S3Store {
    /// Wrap a client. Pass the custom endpoint the client was built with, if
    /// any, so object URLs point at it.
    pub fn new(client: Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> Result<ListingPage> {
        let mut req = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .fetch_owner(true);

        if let Some(token) = continuation {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::List(DisplayErrorContext(&e).to_string()))?;

        let mut objects = Vec::with_capacity(resp.contents().len());
        for obj in resp.contents() {
            let Some(key) = obj.key().filter(|k| !k.is_empty()) else {
                continue;
            };

            // Skip directory markers
            if key.ends_with('/') {
                continue;
            }

            let Some(last_modified) = obj
                .last_modified()
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
            else {
                trace!(key = %key, "Skipping object without last modified time");
                continue;
            };

            let owner = obj
                .owner()
                .and_then(|o| o.display_name().or(o.id()))
                .map(str::to_string);

            objects.push(ObjectDescriptor {
                key: key.to_string(),
                last_modified,
                owner,
            });
        }

        let next = match (resp.is_truncated(), resp.next_continuation_token()) {
            (Some(true), Some(token)) => Some(ContinuationToken::new(bucket, prefix, token)),
            _ => None,
        };

        debug!(
            bucket = %bucket,
            prefix = %prefix,
            count = objects.len(),
            has_more = next.is_some(),
            "Listed page"
        );

        Ok(ListingPage { objects, next })
    }

    fn region(&self) -> String {
        self.client
            .config()
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    return Ok(false);
                }
                Err(StorageError::BucketLookup(DisplayErrorContext(&e).to_string()).into())
            }
        }
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<ListingPage> {
        self.list_page(bucket, prefix, None).await
    }

    async fn list_next(&self, token: &ContinuationToken) -> Result<ListingPage> {
        self.list_page(token.bucket(), token.prefix(), Some(token.token()))
            .await
    }

    async fn metadata_of(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        let resp = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Metadata(DisplayErrorContext(&e).to_string()))?;

        Ok(resp
            .metadata()
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn url_of(&self, bucket: &str, key: &str) -> String {
        object_url(self.endpoint.as_deref(), &self.region(), bucket, key)
    }
}

/// Build the URL of an object.
///
/// Path-style under a custom endpoint, virtual-hosted style on AWS.
fn object_url(endpoint: Option<&str>, region: &str, bucket: &str, key: &str) -> String {
    let key = encode_key(key);
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

/// Percent-encode an object key for use in a URL path, keeping `/`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
