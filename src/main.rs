//
//  terraform-provider-bitbucket
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terraform_provider_bitbucket::cli::{Cli, Commands};
use terraform_provider_bitbucket::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the request loop
    init_logging(cli.global.log_level.as_deref());

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Initialize logging from `--log-level` / `TF_LOG_PROVIDER_BITBUCKET`
fn init_logging(level: Option<&str>) {
    let filter = level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(cmd) => cmd.run(&cli.global).await,
        Commands::Schema(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!(
                "{} version {}",
                terraform_provider_bitbucket::APP_NAME,
                terraform_provider_bitbucket::VERSION
            );
            Ok(())
        }
    }
}
