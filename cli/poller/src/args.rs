//! CLI argument definitions for s3-package-poller.

use clap::{ArgGroup, Parser, ValueEnum};

/// S3 package poller for a continuous delivery orchestrator.
///
/// Reads the request body from stdin and writes the response body to
/// stdout. The exit code reflects the response: 0 for success, 2 for an
/// unknown request name, 3 for a request that could not be processed.
///
/// ## Examples
///
/// Latest revision under a prefix:
///   echo '{"repository-configuration":{"S3_BUCKET":{"value":"artifacts"}},
///          "package-configuration":{"S3_PATH":{"value":"app/"}}}' \
///       | s3-package-poller --request latest-revision
///
/// Against LocalStack:
///   s3-package-poller --request check-repository-connection \
///       --s3-endpoint http://localhost:4566 < body.json
#[derive(Parser, Debug)]
#[command(name = "s3-package-poller")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["request", "identify"])))]
pub struct Cli {
    /// Request name (e.g. "latest-revision")
    #[arg(short, long)]
    pub request: Option<String>,

    /// Print the extension identifier and supported versions, then exit
    #[arg(long)]
    pub identify: bool,

    // === S3 Configuration ===
    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "SP_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Per-operation timeout in seconds
    #[arg(long, default_value = "30", value_parser = parse_positive_u64)]
    pub timeout_secs: u64,

    /// Maximum attempts per S3 operation (must be >= 1)
    #[arg(long, default_value = "3", value_parser = parse_positive_u32)]
    pub max_attempts: u32,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}

fn parse_positive_u32(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
