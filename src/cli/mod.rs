//
//  terraform-provider-bitbucket
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod schema;
mod serve;

pub use schema::SchemaCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand};

use crate::framework::ProviderServer;
use crate::provider::BitbucketProvider;

/// Bitbucket provider - Manage Bitbucket Cloud declaratively
#[derive(Parser, Debug)]
#[command(
    name = "terraform-provider-bitbucket",
    version,
    about = "Manage Bitbucket Cloud repositories, branch restrictions and group permissions",
    long_about = "terraform-provider-bitbucket performs the remote side of an infrastructure-as-code host.\n\n\
                  The host drives it over stdin/stdout with `serve`; `schema` prints what it manages.",
    propagate_version = true,
    after_help = "Use 'terraform-provider-bitbucket <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Log filter, e.g. `debug` or `terraform_provider_bitbucket=trace`. Logs go to stderr.
    #[arg(long, global = true, env = "TF_LOG_PROVIDER_BITBUCKET")]
    pub log_level: Option<String>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve provider requests as JSON lines on stdin/stdout
    Serve(ServeCommand),

    /// Print the provider, resource and data source schemas
    Schema(SchemaCommand),

    /// Print version information
    Version,
}

/// The provider server every command works against.
pub fn provider_server() -> ProviderServer {
    ProviderServer::new(BitbucketProvider::new(crate::VERSION))
}
