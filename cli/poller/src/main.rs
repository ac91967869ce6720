//! s3-package-poller CLI
//!
//! Answers one package repository plugin request per invocation.

use clap::Parser;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only the response body
    let dispatch = run::build_logging(args.log_level);

    let code = run::execute(args, dispatch).await?;

    std::process::exit(run::exit_code(code));
}
