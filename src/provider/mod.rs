//
//  terraform-provider-bitbucket
//  provider/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Provider
//!
//! The `bitbucket` provider: configuration, resources and data sources.
//!
//! ## Types
//!
//! | Type name | Kind | Module |
//! |-----------|------|--------|
//! | `bitbucket_repository` | resource | [`repository`] |
//! | `bitbucket_branch_restriction` | resource | [`branch_restriction`] |
//! | `bitbucket_group_permission` | resource | [`group_permission`] |
//! | `bitbucket_repository` | data source | [`repository_data_source`] |
//!
//! Configuring the provider builds one authenticated [`BitbucketClient`],
//! shared by every resource and data source through [`ProviderData`].

pub mod branch_restriction;
pub mod group_permission;
pub mod repository;
pub mod repository_data_source;

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::BitbucketClient;
use crate::config::ProviderConfig;
use crate::framework::{
    downcast_provider_data, Attribute, DataSourceFactory, Diagnostics, Provider, ProviderData,
    ProviderMetadata, ResourceFactory, Schema, State,
};

/// Provider type name; prefix of every resource type name.
pub const TYPE_NAME: &str = "bitbucket";

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The Bitbucket provider.
pub struct BitbucketProvider {
    version: String,
    env: EnvLookup,
}

impl BitbucketProvider {
    /// Creates a provider that reads fallbacks from the process environment.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            env: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Replaces the environment lookup used for configuration fallbacks.
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(env);
        self
    }
}

#[async_trait]
impl Provider for BitbucketProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Interact with Bitbucket Cloud.")
            .with_attribute(
                "host",
                Attribute::optional_string()
                    .with_description("URI for the Bitbucket API. May also be provided via BITBUCKET_HOST environment variable."),
            )
            .with_attribute(
                "workspace",
                Attribute::optional_string()
                    .with_description("Workspace for the Bitbucket API. May also be provided via BITBUCKET_WORKSPACE environment variable."),
            )
            .with_attribute(
                "token",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("Base64 encoded Basic credential for the Bitbucket API. May also be provided via BITBUCKET_TOKEN environment variable."),
            )
            .with_attribute(
                "username",
                Attribute::optional_string()
                    .with_description("Username paired with app_password when no token is set. May also be provided via BITBUCKET_USERNAME environment variable."),
            )
            .with_attribute(
                "app_password",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("App password paired with username. May also be provided via BITBUCKET_APP_PASSWORD environment variable."),
            )
    }

    async fn configure(&self, config: State) -> Result<ProviderData, Diagnostics> {
        tracing::info!("Configuring Bitbucket client");

        let config: ProviderConfig = config.get()?;
        let resolved = config.resolve_with(|key| (self.env)(key))?;

        tracing::debug!(
            bitbucket_host = %resolved.host,
            bitbucket_workspace = %resolved.workspace,
            bitbucket_credential = ?resolved.credential,
            "Creating Bitbucket client"
        );

        let client = resolved.build_client()?;

        tracing::info!(success = true, "Configured Bitbucket client");
        Ok(Arc::new(client))
    }

    fn resources(&self) -> Vec<ResourceFactory> {
        vec![
            repository::new_resource as ResourceFactory,
            group_permission::new_resource as ResourceFactory,
            branch_restriction::new_resource as ResourceFactory,
        ]
    }

    fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![repository_data_source::new_data_source as DataSourceFactory]
    }
}

/// Recovers the shared client from provider data, if configured.
pub(crate) fn client_from(
    data: Option<&ProviderData>,
    kind: &str,
) -> Result<Option<Arc<BitbucketClient>>, Diagnostics> {
    data.map(|data| downcast_provider_data::<BitbucketClient>(data, kind))
        .transpose()
}

/// Borrows the configured client or reports that configure never ran.
pub(crate) fn require_client(
    client: &Option<Arc<BitbucketClient>>,
) -> Result<&BitbucketClient, Diagnostics> {
    client.as_deref().ok_or_else(|| {
        Diagnostics::error(
            "Unconfigured Bitbucket Client",
            "Expected configured Bitbucket client. Please report this issue to the provider developers.",
        )
    })
}

/// Provider data holding a client for `workspace` on a mock server.
#[cfg(test)]
pub(crate) fn mock_provider_data(host: &str) -> ProviderData {
    let client = BitbucketClient::new(host, "acme")
        .unwrap()
        .with_auth(crate::auth::AuthCredential::token("dG9rZW4="));
    Arc::new(client)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::framework::ProviderServer;

    fn provider() -> BitbucketProvider {
        BitbucketProvider::new("test").with_env(|_| None)
    }

    #[test]
    fn test_metadata() {
        let metadata = provider().metadata();
        assert_eq!(metadata.type_name, "bitbucket");
        assert_eq!(metadata.version, "test");
    }

    #[test]
    fn test_schema_marks_secrets_sensitive() {
        let schema = provider().schema();
        assert!(schema.attribute("token").unwrap().sensitive);
        assert!(schema.attribute("app_password").unwrap().sensitive);
        assert!(!schema.attribute("workspace").unwrap().sensitive);
        assert!(schema.attribute("host").unwrap().optional);
    }

    #[tokio::test]
    async fn test_configure_builds_client() {
        let config = State::from_json(json!({
            "host": "https://bitbucket.example.com/2.0",
            "workspace": "acme",
            "token": "dG9rZW4="
        }))
        .unwrap();

        let data = provider().configure(config).await.unwrap();
        let client = downcast_provider_data::<BitbucketClient>(&data, "Resource").unwrap();
        assert_eq!(client.workspace(), "acme");
        assert_eq!(client.host(), "https://bitbucket.example.com/2.0");
    }

    #[tokio::test]
    async fn test_configure_uses_env_fallback() {
        let provider = BitbucketProvider::new("test").with_env(|key| match key {
            "BITBUCKET_WORKSPACE" => Some("from-env".to_string()),
            "BITBUCKET_TOKEN" => Some("t".to_string()),
            _ => None,
        });

        let data = provider.configure(State::empty()).await.unwrap();
        let client = downcast_provider_data::<BitbucketClient>(&data, "Resource").unwrap();
        assert_eq!(client.workspace(), "from-env");
    }

    #[tokio::test]
    async fn test_configure_reports_missing_values() {
        let diags = provider().configure(State::empty()).await.unwrap_err();
        assert_eq!(
            diags.error_summaries(),
            vec!["Missing Bitbucket API Workspace", "Missing Bitbucket API Token"]
        );
    }

    #[test]
    fn test_registered_type_names() {
        let server = ProviderServer::new(provider());
        let document = server.schema_document();

        assert!(document["resources"]["bitbucket_repository"].is_object());
        assert!(document["resources"]["bitbucket_branch_restriction"].is_object());
        assert!(document["resources"]["bitbucket_group_permission"].is_object());
        assert!(document["data_sources"]["bitbucket_repository"].is_object());
    }

    #[tokio::test]
    async fn test_server_drives_configure_and_read() {
        let mut mock = mockito::Server::new_async().await;
        let _gone = mock
            .mock("GET", "/repositories/acme/gone")
            .with_status(404)
            .with_body(r#"{"type":"error","error":{"message":"Repository acme/gone not found"}}"#)
            .create_async()
            .await;

        let mut server = ProviderServer::new(provider());
        let configure = format!(
            r#"{{"id":1,"method":"configure_provider","config":{{"host":"{}","workspace":"acme","token":"dG9rZW4="}}}}"#,
            mock.url()
        );
        let (response, _) = server.handle_line(&configure).await;
        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

        let (response, stop) = server
            .handle_line(
                r#"{"id":2,"method":"read_resource","type_name":"bitbucket_repository","current_state":{"slug":"gone"}}"#,
            )
            .await;
        assert!(!stop);
        assert!(response.diagnostics.is_empty());
        assert_eq!(response.result, Some(json!({"new_state": null})));
    }

    #[test]
    fn test_require_client_unconfigured() {
        let diags = require_client(&None).unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Unconfigured Bitbucket Client"]);
    }

    #[test]
    fn test_client_from_none_is_unconfigured() {
        assert!(client_from(None, "Resource").unwrap().is_none());
    }
}
