//
//  terraform-provider-bitbucket
//  cli/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Schema command

use anyhow::Result;
use clap::Args;

use super::{provider_server, GlobalOptions};

/// Print the provider, resource and data source schemas as JSON
#[derive(Args, Debug, Default)]
pub struct SchemaCommand {
    /// Indent the output
    #[arg(long)]
    pub pretty: bool,
}

impl SchemaCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let document = provider_server().schema_document();

        let output = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        println!("{}", output);

        Ok(())
    }
}
