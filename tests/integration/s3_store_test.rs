//! S3 store and poller integration tests using LocalStack.
//!
//! S3 stores modification times with one-second precision, so uploads that
//! must be ordered are spaced out.

use crate::common::LocalStackTestContext;
use sp_traits::ObjectStore;
use sp_types::{ConfigValueSet, S3_BUCKET, S3_PATH};
use std::time::Duration;

fn repository(bucket: &str) -> ConfigValueSet {
    ConfigValueSet::new().with_value(S3_BUCKET, bucket)
}

fn package(prefix: &str) -> ConfigValueSet {
    ConfigValueSet::new().with_value(S3_PATH, prefix)
}

async fn tick() {
    tokio::time::sleep(Duration::from_millis(1100)).await;
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_bucket_exists() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    ctx.create_bucket("sp-exists-bucket").await.unwrap();
    let poller = ctx.poller().await;

    assert!(poller.store().bucket_exists("sp-exists-bucket").await.unwrap());
    assert!(!poller.store().bucket_exists("sp-missing-bucket").await.unwrap());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_check_bucket_and_prefix() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-check-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload(bucket, "app/app-1.0.zip", &[]).await.unwrap();
    let poller = ctx.poller().await;

    let result = poller.check_bucket(&repository(bucket)).await;
    assert!(result.is_success());
    assert_eq!(result.messages, vec!["Bucket found".to_string()]);

    let result = poller.check_bucket(&repository("sp-no-such-bucket")).await;
    assert!(!result.is_success());
    assert_eq!(result.messages, vec!["Bucket not found".to_string()]);

    let result = poller.check_prefix(&package("app/"), &repository(bucket)).await;
    assert!(result.is_success());

    let result = poller.check_prefix(&package("nothing/"), &repository(bucket)).await;
    assert!(!result.is_success());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_latest_revision_with_metadata() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-latest-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload(bucket, "app/app-1.0.zip", &[("version", "1.0")])
        .await
        .unwrap();
    tick().await;
    ctx.upload(
        bucket,
        "app/app-1.1.zip",
        &[("version", "1.1"), ("sha", "abc123"), ("build", "http://ci/builds/11")],
    )
    .await
    .unwrap();
    ctx.upload(bucket, "other/app-9.9.zip", &[]).await.unwrap();

    let poller = ctx.poller().await;
    let revision = poller
        .latest_revision(&package("app/"), &repository(bucket))
        .await;

    assert!(revision.is_resolved());
    assert_eq!(revision.identifier, "1.1");
    assert_eq!(revision.originator, "S3");
    assert_eq!(revision.trace_link.as_deref(), Some("http://ci/builds/11"));
    assert!(revision.description.contains("app/app-1.1.zip"));
    assert!(revision.description.ends_with(" for SHA abc123"));
    assert_eq!(
        revision.data.get("LOCATION").map(String::as_str),
        Some(format!("{}/{bucket}/app/app-1.1.zip", ctx.endpoint).as_str())
    );
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_latest_revision_without_metadata_uses_relative_key() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-relative-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload(bucket, "app/app-2.0.zip", &[]).await.unwrap();

    let poller = ctx.poller().await;
    let revision = poller
        .latest_revision(&package("app/"), &repository(bucket))
        .await;

    assert_eq!(revision.identifier, "app-2.0.zip");
    assert!(revision.trace_link.is_none());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_latest_revision_missing_bucket_is_unresolved() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let poller = ctx.poller().await;
    let revision = poller
        .latest_revision(&package("app/"), &repository("sp-no-such-bucket"))
        .await;

    assert!(!revision.is_resolved());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_latest_revision_since() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-since-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload(bucket, "app/app-1.0.zip", &[("version", "1.0")])
        .await
        .unwrap();

    let poller = ctx.poller().await;
    let first = poller
        .latest_revision(&package("app/"), &repository(bucket))
        .await;

    let unchanged = poller
        .latest_revision_since(&package("app/"), &repository(bucket), Some(&first))
        .await;
    assert!(unchanged.is_none());

    tick().await;
    ctx.upload(bucket, "app/app-1.1.zip", &[("version", "1.1")])
        .await
        .unwrap();

    let newer = poller
        .latest_revision_since(&package("app/"), &repository(bucket), Some(&first))
        .await
        .unwrap();
    assert_eq!(newer.identifier, "1.1");
}
