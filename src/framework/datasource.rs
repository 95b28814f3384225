//
//  terraform-provider-bitbucket
//  framework/datasource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Read-only data sources.

use async_trait::async_trait;

use super::diag::Diagnostics;
use super::provider::ProviderData;
use super::schema::Schema;
use super::state::State;

/// A data source type: reads remote data into state, never writes.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name suffix appended to the provider type name.
    fn type_name_suffix(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Receives the data produced by the provider's configure step.
    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics>;

    /// Reads the data source, given the practitioner's configuration.
    async fn read(&self, config: State) -> Result<State, Diagnostics>;
}

/// Constructs an unconfigured data source instance.
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;
