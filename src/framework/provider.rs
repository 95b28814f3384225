//
//  terraform-provider-bitbucket
//  framework/provider.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The provider entry point.
//!
//! A [`Provider`] describes itself (type name, version, configuration
//! schema), turns its configuration block into shared [`ProviderData`], and
//! lists the resource and data source types it offers. The provider data is
//! usually an API client; resources recover the concrete type with
//! [`downcast_provider_data`].

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::datasource::DataSourceFactory;
use super::diag::Diagnostics;
use super::resource::ResourceFactory;
use super::schema::Schema;
use super::state::State;

/// Data shared from the provider to every resource and data source.
pub type ProviderData = Arc<dyn Any + Send + Sync>;

/// Provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Prefix of every resource type name, e.g. `bitbucket`.
    pub type_name: String,
    pub version: String,
}

/// A provider implementation.
#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;

    /// Schema of the provider configuration block.
    fn schema(&self) -> Schema;

    /// Validates the configuration block and builds the shared data.
    async fn configure(&self, config: State) -> Result<ProviderData, Diagnostics>;

    fn resources(&self) -> Vec<ResourceFactory>;

    fn data_sources(&self) -> Vec<DataSourceFactory>;
}

/// Recovers the concrete provider data type.
///
/// `kind` names the caller in the diagnostic, e.g. `Resource` or
/// `Data Source`.
pub fn downcast_provider_data<T: Any + Send + Sync>(
    data: &ProviderData,
    kind: &str,
) -> Result<Arc<T>, Diagnostics> {
    Arc::clone(data).downcast::<T>().map_err(|_| {
        Diagnostics::error(
            format!("Unexpected {} Configure Type", kind),
            format!(
                "Expected {}, got a different provider data type. \
                 Please report this issue to the provider developers.",
                std::any::type_name::<T>()
            ),
        )
    })
}

/// Full type name of a resource or data source.
pub fn qualified_type_name(provider_type_name: &str, suffix: &str) -> String {
    format!("{}_{}", provider_type_name, suffix)
}
