//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;
use sp_poller::{Poller, S3Config, S3Store, create_s3_client};

/// LocalStack test context providing an S3 client for fixtures.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let client = create_s3_client(&s3_config(&endpoint, &region))
            .await
            .expect("Failed to create S3 client");

        Self {
            s3: client,
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// A poller backed by an [`S3Store`] pointing at LocalStack.
    pub async fn poller(&self) -> Poller<S3Store> {
        let config = s3_config(&self.endpoint, &self.region);
        let client = create_s3_client(&config)
            .await
            .expect("Failed to create S3 client");
        Poller::new(S3Store::new(client, config.endpoint.clone()))
    }

    /// Create an S3 bucket for testing, emptying it if it already exists.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if exists {
            for key in self.list_objects(name).await? {
                self.s3.delete_object().bucket(name).key(key).send().await?;
            }
        } else {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload an artifact with optional user metadata.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        metadata: &[(&str, &str)],
    ) -> Result<(), aws_sdk_s3::Error> {
        let mut request = self
            .s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(format!("artifact {key}").into_bytes().into());

        for (name, value) in metadata {
            request = request.metadata(*name, *value);
        }

        request.send().await?;
        Ok(())
    }

    /// List every key in a bucket.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, aws_sdk_s3::Error> {
        let result = self.s3.list_objects_v2().bucket(bucket).send().await?;
        Ok(result
            .contents()
            .iter()
            .filter_map(|o| o.key().map(String::from))
            .collect())
    }
}

fn s3_config(endpoint: &str, region: &str) -> S3Config {
    S3Config::new()
        .with_region(region)
        .with_endpoint(endpoint)
        .with_credentials("test", "test")
        .with_timeout(10)
}
