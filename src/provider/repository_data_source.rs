//
//  terraform-provider-bitbucket
//  provider/repository_data_source.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The `bitbucket_repository` data source: looks up an existing repository
//! by slug.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::BitbucketClient;
use crate::framework::{Attribute, DataSource, Diagnostics, ProviderData, Schema, State};

use super::repository::{project_attribute, RepositoryModel};
use super::{client_from, require_client};

#[derive(Default)]
pub struct RepositoryDataSource {
    client: Option<Arc<BitbucketClient>>,
}

pub fn new_data_source() -> Box<dyn DataSource> {
    Box::new(RepositoryDataSource::default())
}

#[async_trait]
impl DataSource for RepositoryDataSource {
    fn type_name_suffix(&self) -> &'static str {
        "repository"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Fetches a Bitbucket Cloud repository.")
            .with_attribute("slug", Attribute::required_string())
            .with_attribute("is_private", Attribute::computed_bool())
            .with_attribute("scm", Attribute::computed_string())
            .with_attribute("project", project_attribute(true))
            .with_attribute("website", Attribute::optional_string())
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics> {
        self.client = client_from(data, "Data Source")?;
        Ok(())
    }

    async fn read(&self, config: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: RepositoryModel = config.get()?;
        let slug = model.slug.value_or_default();

        let repository = client.get_repository(&slug).await.map_err(|e| {
            Diagnostics::error(
                "Unable to Read Bitbucket Repository",
                format!("Could not read Bitbucket repository {}: {}", slug, e),
            )
        })?;

        tracing::debug!(slug = %slug, "Read Bitbucket repository data source");
        model.map_from(&repository);
        Ok(State::from_model(&model)?)
    }
}
