//
//  terraform-provider-bitbucket
//  cli/serve.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Serve command: the request loop the host talks to

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::BufReader;

use super::{provider_server, GlobalOptions};

/// Serve provider requests as JSON lines on stdin/stdout
#[derive(Args, Debug, Default)]
pub struct ServeCommand {}

impl ServeCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let mut server = provider_server();
        tracing::info!(version = %server.metadata().version, "Serving Bitbucket provider");

        server
            .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
            .context("Provider request loop failed")?;

        Ok(())
    }
}
