//
//  terraform-provider-bitbucket
//  framework/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Line-delimited JSON bridge between a host process and a [`Provider`].
//!
//! Each input line is one request object, each output line the matching
//! response. Requests carry an optional `id` that is echoed back verbatim.
//!
//! ```text
//! -> {"id": 1, "method": "configure_provider", "config": {"workspace": "acme"}}
//! <- {"id": 1, "result": {}, "diagnostics": []}
//! -> {"id": 2, "method": "read_resource", "type_name": "bitbucket_repository", "current_state": {"slug": "widget"}}
//! <- {"id": 2, "result": {"new_state": null}, "diagnostics": []}
//! ```
//!
//! A malformed line or an unknown type name yields an error diagnostic; the
//! loop keeps going. `stop` or end of input ends it.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::datasource::DataSource;
use super::diag::Diagnostics;
use super::provider::{qualified_type_name, Provider, ProviderMetadata};
use super::resource::Resource;
use super::state::State;

/// A request from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Request {
    GetMetadata,
    GetSchema,
    ConfigureProvider {
        #[serde(default)]
        config: JsonValue,
    },
    ReadDataSource {
        type_name: String,
        #[serde(default)]
        config: JsonValue,
    },
    CreateResource {
        type_name: String,
        planned_state: JsonValue,
    },
    ReadResource {
        type_name: String,
        current_state: JsonValue,
    },
    UpdateResource {
        type_name: String,
        prior_state: JsonValue,
        planned_state: JsonValue,
    },
    DeleteResource {
        type_name: String,
        prior_state: JsonValue,
    },
    ImportResourceState {
        type_name: String,
        import_id: String,
    },
    Stop,
}

impl Request {
    /// The wire name of the method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetMetadata => "get_metadata",
            Self::GetSchema => "get_schema",
            Self::ConfigureProvider { .. } => "configure_provider",
            Self::ReadDataSource { .. } => "read_data_source",
            Self::CreateResource { .. } => "create_resource",
            Self::ReadResource { .. } => "read_resource",
            Self::UpdateResource { .. } => "update_resource",
            Self::DeleteResource { .. } => "delete_resource",
            Self::ImportResourceState { .. } => "import_resource_state",
            Self::Stop => "stop",
        }
    }
}

/// A response to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Echo of the request `id` (`null` when absent).
    pub id: JsonValue,
    /// Method specific payload; omitted when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    pub diagnostics: Diagnostics,
}

/// Dispatches host requests to a provider and its resources.
pub struct ProviderServer {
    provider: Box<dyn Provider>,
    metadata: ProviderMetadata,
    resources: BTreeMap<String, Box<dyn Resource>>,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl ProviderServer {
    /// Instantiates every resource and data source of `provider`, unconfigured.
    pub fn new<P: Provider + 'static>(provider: P) -> Self {
        let metadata = provider.metadata();

        let resources = provider
            .resources()
            .into_iter()
            .map(|factory| {
                let resource = factory();
                let name = qualified_type_name(&metadata.type_name, resource.type_name_suffix());
                (name, resource)
            })
            .collect();

        let data_sources = provider
            .data_sources()
            .into_iter()
            .map(|factory| {
                let data_source = factory();
                let name = qualified_type_name(&metadata.type_name, data_source.type_name_suffix());
                (name, data_source)
            })
            .collect();

        Self {
            provider: Box::new(provider),
            metadata,
            resources,
            data_sources,
        }
    }

    pub fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    /// Full schema document: provider, resources and data sources.
    pub fn schema_document(&self) -> JsonValue {
        let resources: BTreeMap<&str, _> = self
            .resources
            .iter()
            .map(|(name, resource)| (name.as_str(), resource.schema()))
            .collect();
        let data_sources: BTreeMap<&str, _> = self
            .data_sources
            .iter()
            .map(|(name, data_source)| (name.as_str(), data_source.schema()))
            .collect();

        json!({
            "provider": self.provider.schema(),
            "resources": resources,
            "data_sources": data_sources,
        })
    }

    /// Handles one request.
    pub async fn handle(&mut self, request: Request) -> Result<JsonValue, Diagnostics> {
        tracing::debug!(method = request.method(), "Handling provider request");

        match request {
            Request::GetMetadata => Ok(json!({
                "type_name": self.metadata.type_name,
                "version": self.metadata.version,
                "resources": self.resources.keys().collect::<Vec<_>>(),
                "data_sources": self.data_sources.keys().collect::<Vec<_>>(),
            })),
            Request::GetSchema => Ok(self.schema_document()),
            Request::ConfigureProvider { config } => {
                let config = config_state(config)?;
                let data = self.provider.configure(config).await?;

                let mut diagnostics = Diagnostics::new();
                for resource in self.resources.values_mut() {
                    if let Err(diags) = resource.configure(Some(&data)) {
                        diagnostics.append(diags);
                    }
                }
                for data_source in self.data_sources.values_mut() {
                    if let Err(diags) = data_source.configure(Some(&data)) {
                        diagnostics.append(diags);
                    }
                }

                if diagnostics.has_error() {
                    Err(diagnostics)
                } else {
                    Ok(json!({}))
                }
            }
            Request::ReadDataSource { type_name, config } => {
                let data_source = self.data_source(&type_name)?;
                let state = data_source.read(config_state(config)?).await?;
                Ok(json!({ "state": state.to_json() }))
            }
            Request::CreateResource {
                type_name,
                planned_state,
            } => {
                let resource = self.resource(&type_name)?;
                let state = resource.create(State::from_json(planned_state)?).await?;
                Ok(json!({ "new_state": state.to_json() }))
            }
            Request::ReadResource {
                type_name,
                current_state,
            } => {
                let resource = self.resource(&type_name)?;
                let state = resource.read(State::from_json(current_state)?).await?;
                Ok(json!({ "new_state": state.to_json() }))
            }
            Request::UpdateResource {
                type_name,
                prior_state,
                planned_state,
            } => {
                let resource = self.resource(&type_name)?;
                let state = resource
                    .update(State::from_json(prior_state)?, State::from_json(planned_state)?)
                    .await?;
                Ok(json!({ "new_state": state.to_json() }))
            }
            Request::DeleteResource {
                type_name,
                prior_state,
            } => {
                let resource = self.resource(&type_name)?;
                resource.delete(State::from_json(prior_state)?).await?;
                Ok(json!({}))
            }
            Request::ImportResourceState {
                type_name,
                import_id,
            } => {
                let resource = self.resource(&type_name)?;
                let state = resource.import_state(&import_id).await?;
                Ok(json!({ "imported_state": state.to_json() }))
            }
            Request::Stop => Ok(json!({})),
        }
    }

    /// Parses and handles one input line. The flag is `true` for `stop`.
    pub async fn handle_line(&mut self, line: &str) -> (Response, bool) {
        let (id, request) = match parse_line(line) {
            Ok(parsed) => parsed,
            Err((id, diagnostics)) => {
                return (
                    Response {
                        id,
                        result: None,
                        diagnostics,
                    },
                    false,
                )
            }
        };

        let stop = matches!(request, Request::Stop);
        let response = match self.handle(request).await {
            Ok(result) => Response {
                id,
                result: Some(result),
                diagnostics: Diagnostics::new(),
            },
            Err(diagnostics) => Response {
                id,
                result: None,
                diagnostics,
            },
        };

        (response, stop)
    }

    /// Runs the request loop until `stop` or end of input.
    ///
    /// Lines are read as raw bytes; a line that is not UTF-8 gets a
    /// `Malformed Request` response like any other unparseable line.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let (response, stop) = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim_end_matches(['\n', '\r'])).await,
                Err(e) => (
                    Response {
                        id: JsonValue::Null,
                        result: None,
                        diagnostics: Diagnostics::error("Malformed Request", e.to_string()),
                    },
                    false,
                ),
            };

            let mut encoded = serde_json::to_vec(&response)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;

            if stop {
                tracing::info!("Stop requested, shutting down");
                break;
            }
        }

        Ok(())
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, Diagnostics> {
        self.resources
            .get(type_name)
            .map(|resource| resource.as_ref())
            .ok_or_else(|| {
                Diagnostics::error(
                    "Unknown Resource Type",
                    format!("The provider does not offer a resource named {:?}.", type_name),
                )
            })
    }

    fn data_source(&self, type_name: &str) -> Result<&dyn DataSource, Diagnostics> {
        self.data_sources
            .get(type_name)
            .map(|data_source| data_source.as_ref())
            .ok_or_else(|| {
                Diagnostics::error(
                    "Unknown Data Source Type",
                    format!("The provider does not offer a data source named {:?}.", type_name),
                )
            })
    }
}

/// Configuration blocks are never absent; `null` means "nothing set".
fn config_state(config: JsonValue) -> Result<State, Diagnostics> {
    match config {
        JsonValue::Null => Ok(State::empty()),
        other => Ok(State::from_json(other)?),
    }
}

fn parse_line(line: &str) -> Result<(JsonValue, Request), (JsonValue, Diagnostics)> {
    let mut value: JsonValue = serde_json::from_str(line)
        .map_err(|e| (JsonValue::Null, malformed(e)))?;

    let id = value
        .as_object_mut()
        .and_then(|object| object.remove("id"))
        .unwrap_or(JsonValue::Null);

    match serde_json::from_value(value) {
        Ok(request) => Ok((id, request)),
        Err(e) => Err((id, malformed(e))),
    }
}

fn malformed(err: serde_json::Error) -> Diagnostics {
    Diagnostics::error("Malformed Request", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{
        downcast_provider_data, import_state_passthrough_id, Attribute, DataSourceFactory,
        ProviderData, ResourceFactory, Schema,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoProvider;

    struct EchoResource {
        prefix: Option<Arc<String>>,
    }

    #[async_trait]
    impl Resource for EchoResource {
        fn type_name_suffix(&self) -> &'static str {
            "echo"
        }

        fn schema(&self) -> Schema {
            Schema::v0().with_attribute("name", Attribute::required_string())
        }

        fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics> {
            if let Some(data) = data {
                self.prefix = Some(downcast_provider_data::<String>(data, "Resource")?);
            }
            Ok(())
        }

        async fn create(&self, plan: State) -> Result<State, Diagnostics> {
            let prefix = self
                .prefix
                .as_ref()
                .ok_or_else(|| Diagnostics::error("Unconfigured", "configure first"))?;
            let mut state = plan;
            state.set_attribute("prefix", prefix.as_str())?;
            Ok(state)
        }

        async fn read(&self, _state: State) -> Result<State, Diagnostics> {
            Ok(State::removed())
        }

        async fn update(&self, _prior: State, plan: State) -> Result<State, Diagnostics> {
            Ok(plan)
        }

        async fn delete(&self, _state: State) -> Result<(), Diagnostics> {
            Ok(())
        }

        async fn import_state(&self, id: &str) -> Result<State, Diagnostics> {
            import_state_passthrough_id("name", id)
        }
    }

    fn echo_factory() -> Box<dyn Resource> {
        Box::new(EchoResource { prefix: None })
    }

    #[async_trait]
    impl Provider for EchoProvider {
        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                type_name: "test".to_string(),
                version: "0.0.1".to_string(),
            }
        }

        fn schema(&self) -> Schema {
            Schema::v0().with_attribute("prefix", Attribute::optional_string())
        }

        async fn configure(&self, config: State) -> Result<ProviderData, Diagnostics> {
            let prefix = config
                .attribute("prefix")
                .and_then(JsonValue::as_str)
                .unwrap_or("none")
                .to_string();
            Ok(Arc::new(prefix))
        }

        fn resources(&self) -> Vec<ResourceFactory> {
            vec![echo_factory as ResourceFactory]
        }

        fn data_sources(&self) -> Vec<DataSourceFactory> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_metadata_lists_qualified_names() {
        let mut server = ProviderServer::new(EchoProvider);
        let result = server.handle(Request::GetMetadata).await.unwrap();
        assert_eq!(result["resources"], json!(["test_echo"]));
        assert_eq!(result["type_name"], json!("test"));
    }

    #[tokio::test]
    async fn test_create_before_configure_fails() {
        let mut server = ProviderServer::new(EchoProvider);
        let err = server
            .handle(Request::CreateResource {
                type_name: "test_echo".to_string(),
                planned_state: json!({"name": "a"}),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_summaries(), vec!["Unconfigured"]);
    }

    #[tokio::test]
    async fn test_configure_then_create() {
        let mut server = ProviderServer::new(EchoProvider);
        server
            .handle(Request::ConfigureProvider {
                config: json!({"prefix": "p"}),
            })
            .await
            .unwrap();

        let result = server
            .handle(Request::CreateResource {
                type_name: "test_echo".to_string(),
                planned_state: json!({"name": "a"}),
            })
            .await
            .unwrap();
        assert_eq!(result["new_state"], json!({"name": "a", "prefix": "p"}));
    }

    #[tokio::test]
    async fn test_unknown_type_name() {
        let mut server = ProviderServer::new(EchoProvider);
        let err = server
            .handle(Request::ReadDataSource {
                type_name: "test_missing".to_string(),
                config: JsonValue::Null,
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_summaries(), vec!["Unknown Data Source Type"]);
    }

    #[tokio::test]
    async fn test_serve_round_trip() {
        let mut server = ProviderServer::new(EchoProvider);
        let input = concat!(
            "{\"id\": 1, \"method\": \"import_resource_state\", \"type_name\": \"test_echo\", \"import_id\": \"x\"}\n",
            "not json\n",
            "\n",
            "{\"id\": 3, \"method\": \"read_resource\", \"type_name\": \"test_echo\", \"current_state\": {\"name\": \"a\"}}\n",
            "{\"id\": 4, \"method\": \"stop\"}\n",
            "{\"id\": 5, \"method\": \"get_metadata\"}\n",
        );
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<JsonValue> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1]["diagnostics"][0]["summary"], json!("Malformed Request"));
        assert_eq!(lines[2]["id"], json!(3));
        assert_eq!(lines[2]["result"]["new_state"], json!(null));
        assert_eq!(lines[3]["id"], json!(4));
    }

    #[tokio::test]
    async fn test_serve_continues_after_invalid_utf8() {
        let mut server = ProviderServer::new(EchoProvider);
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"id\": 1, \"method\": \"get_metadata\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"id\": 3, \"method\": \"get_metadata\"}");
        let mut output = Vec::new();

        server.serve(input.as_slice(), &mut output).await.unwrap();

        let lines: Vec<JsonValue> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], json!(1));
        assert_eq!(lines[1]["id"], json!(null));
        assert_eq!(lines[1]["diagnostics"][0]["summary"], json!("Malformed Request"));
        assert_eq!(lines[2]["id"], json!(3));
        assert_eq!(lines[2]["result"]["type_name"], json!("test"));
    }
}
