//! Request execution for the CLI.

use anyhow::{Context, Result};
use sp_plugin::{PackagePlugin, PluginIdentifier, PluginResponse};
use sp_poller::{Poller, S3Config, S3Store, create_s3_client};
use tokio::io::AsyncReadExt;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Level, info};
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel};

/// Build the logging dispatcher.
///
/// The dispatcher is attached to the request future rather than installed
/// globally, so the poller logs through whatever logger its host supplies.
pub fn build_logging(level: LogLevel) -> Dispatch {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}

/// Execute the requested operation and return the response code.
pub async fn execute(args: Cli, dispatch: Dispatch) -> Result<u16> {
    if args.identify {
        println!("{}", serde_json::to_string(&PluginIdentifier::default())?);
        return Ok(200);
    }

    let Some(request) = args.request.clone() else {
        anyhow::bail!("either --request or --identify is required");
    };

    let mut body = String::new();
    tokio::io::stdin()
        .read_to_string(&mut body)
        .await
        .context("failed to read request body from stdin")?;

    let response = handle(args, request, body)
        .with_subscriber(dispatch)
        .await?;

    if let Some(body) = &response.body {
        println!("{body}");
    }

    Ok(response.code)
}

async fn handle(args: Cli, request: String, body: String) -> Result<PluginResponse> {
    let s3_config = s3_config(&args);

    info!(
        request = %request,
        region = %args.region,
        endpoint = ?s3_config.endpoint,
        "Handling request"
    );

    let client = create_s3_client(&s3_config)
        .await
        .context("failed to create S3 client")?;
    let store = S3Store::new(client, s3_config.endpoint.clone());
    let plugin = PackagePlugin::new(Poller::new(store));

    Ok(plugin.handle(&request, &body).await)
}

fn s3_config(args: &Cli) -> S3Config {
    let mut s3_config = S3Config::new()
        .with_region(&args.region)
        .with_timeout(args.timeout_secs)
        .with_max_attempts(args.max_attempts);

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    s3_config
}

/// Map a response code to a process exit code.
pub fn exit_code(code: u16) -> i32 {
    match code {
        200 => 0,
        400 => 2,
        _ => 3,
    }
}
