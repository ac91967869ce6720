//! End-to-end plugin request tests using LocalStack.

use crate::common::LocalStackTestContext;
use serde_json::{Value, json};
use sp_plugin::PackagePlugin;

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plugin_latest_revision_request() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-plugin-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload(bucket, "pkg/pkg-3.zip", &[("version", "3")])
        .await
        .unwrap();

    let plugin = PackagePlugin::new(ctx.poller().await);
    let body = json!({
        "repository-configuration": {"S3_BUCKET": {"value": bucket}},
        "package-configuration": {"S3_PATH": {"value": "pkg/"}}
    })
    .to_string();

    let response = plugin.handle("latest-revision", &body).await;
    assert!(response.is_success());

    let revision: Value = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
    assert_eq!(revision["revision"], "3");
    assert_eq!(revision["user"], "S3");
    assert_eq!(revision["data"]["OBJECT_KEY"], "pkg/pkg-3.zip");
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plugin_check_package_connection_empty_prefix() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sp-plugin-empty-bucket";
    ctx.create_bucket(bucket).await.unwrap();

    let plugin = PackagePlugin::new(ctx.poller().await);
    let body = json!({
        "repository-configuration": {"S3_BUCKET": {"value": bucket}},
        "package-configuration": {"S3_PATH": {"value": "missing/"}}
    })
    .to_string();

    let response = plugin.handle("check-package-connection", &body).await;
    let result: Value = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();

    assert_eq!(result["status"], "failure");
    assert_eq!(
        result["messages"][0],
        "Could not find objects in path. Folder can't be empty."
    );
}
