//
//  terraform-provider-bitbucket
//  provider/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The `bitbucket_repository` resource.
//!
//! ```hcl
//! resource "bitbucket_repository" "widget" {
//!   slug       = "widget"
//!   scm        = "git"
//!   is_private = true
//!   project = {
//!     key = "CORE"
//!   }
//! }
//! ```
//!
//! Importing takes the repository slug as the identifier.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::cloud::{Project, Repository};
use crate::api::BitbucketClient;
use crate::framework::{
    import_state_passthrough_id, Attribute, Diagnostics, PlanModifier, ProviderData, Resource,
    Schema, State, Value,
};

use super::{client_from, require_client};

/// Terraform side of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryModel {
    pub slug: Value<String>,
    pub is_private: Value<bool>,
    pub scm: Value<String>,
    pub project: Value<ProjectModel>,
    pub website: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectModel {
    pub key: Value<String>,
}

impl RepositoryModel {
    /// Builds the request body. The slug travels in the URL, not the body.
    pub fn map_to(&self) -> Repository {
        Repository {
            slug: String::new(),
            is_private: self.is_private.value_or_default(),
            scm: self.scm.value_or_default(),
            project: Project {
                key: self
                    .project
                    .as_known()
                    .map(|project| project.key.value_or_default())
                    .unwrap_or_default(),
            },
            website: self.website.as_known().cloned(),
        }
    }

    /// Copies an API response into the model.
    pub fn map_from(&mut self, repository: &Repository) {
        self.slug = Value::known(repository.slug.clone());
        self.is_private = Value::known(repository.is_private);
        self.scm = Value::known(repository.scm.clone());
        self.project = Value::known(ProjectModel {
            key: Value::known(repository.project.key.clone()),
        });
        self.website = Value::from_option(repository.website.clone());
    }
}

/// Schema of the `project` nested object; shared with the data source.
pub(crate) fn project_attribute(computed: bool) -> Attribute {
    if computed {
        Attribute::single_nested([("key", Attribute::computed_string())]).computed()
    } else {
        Attribute::single_nested([("key", Attribute::required_string())]).required()
    }
}

#[derive(Default)]
pub struct RepositoryResource {
    client: Option<Arc<BitbucketClient>>,
}

pub fn new_resource() -> Box<dyn Resource> {
    Box::new(RepositoryResource::default())
}

#[async_trait]
impl Resource for RepositoryResource {
    fn type_name_suffix(&self) -> &'static str {
        "repository"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages a Bitbucket Cloud repository.")
            .with_attribute(
                "slug",
                Attribute::required_string()
                    .with_plan_modifier(PlanModifier::RequiresReplace)
                    .with_description("Repository slug; the repository is addressed by it."),
            )
            .with_attribute("scm", Attribute::required_string())
            .with_attribute("is_private", Attribute::required_bool())
            .with_attribute("project", project_attribute(false))
            .with_attribute("website", Attribute::optional_string())
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics> {
        self.client = client_from(data, "Resource")?;
        Ok(())
    }

    async fn create(&self, plan: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: RepositoryModel = plan.get()?;
        let slug = model.slug.value_or_default();

        let created = client
            .create_repository(&slug, &model.map_to())
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error creating repository",
                    format!("Could not create repository, unexpected error: {}", e),
                )
            })?;

        tracing::info!(slug = %created.slug, "Created Bitbucket repository");
        model.map_from(&created);
        Ok(State::from_model(&model)?)
    }

    async fn read(&self, state: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: RepositoryModel = state.get()?;
        let slug = model.slug.value_or_default();

        match client.get_repository(&slug).await {
            Ok(repository) => {
                model.map_from(&repository);
                Ok(State::from_model(&model)?)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(slug = %slug, "Bitbucket repository not found, removing from state");
                Ok(State::removed())
            }
            Err(e) => Err(Diagnostics::error(
                "Error Reading Bitbucket Repository",
                format!("Could not read Bitbucket repository {}: {}", slug, e),
            )),
        }
    }

    async fn update(&self, _prior: State, plan: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: RepositoryModel = plan.get()?;
        let slug = model.slug.value_or_default();

        let updated = client
            .update_repository(&slug, &model.map_to())
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error Updating Bitbucket Repository",
                    format!("Could not update repository, unexpected error: {}", e),
                )
            })?;

        tracing::info!(slug = %slug, "Updated Bitbucket repository");
        model.map_from(&updated);
        Ok(State::from_model(&model)?)
    }

    async fn delete(&self, state: State) -> Result<(), Diagnostics> {
        let client = require_client(&self.client)?;
        let model: RepositoryModel = state.get()?;
        let slug = model.slug.value_or_default();

        client.delete_repository(&slug).await.map_err(|e| {
            Diagnostics::error(
                "Error Deleting Bitbucket Repository",
                format!("Could not delete repository, unexpected error: {}", e),
            )
        })?;

        tracing::info!(slug = %slug, "Deleted Bitbucket repository");
        Ok(())
    }

    async fn import_state(&self, id: &str) -> Result<State, Diagnostics> {
        import_state_passthrough_id("slug", id)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::provider::mock_provider_data;

    const WIDGET: &str = r#"{"slug":"widget","is_private":true,"scm":"git","project":{"key":"CORE"},"website":null}"#;

    async fn configured(server: &mockito::ServerGuard) -> RepositoryResource {
        let mut resource = RepositoryResource::default();
        resource
            .configure(Some(&mock_provider_data(&server.url())))
            .unwrap();
        resource
    }

    fn planned() -> State {
        State::from_json(json!({
            "slug": "widget",
            "scm": "git",
            "is_private": true,
            "project": {"key": "CORE"},
            "website": null
        }))
        .unwrap()
    }

    #[test]
    fn test_map_to_omits_slug_and_null_website() {
        let model: RepositoryModel = planned().get().unwrap();
        let body = serde_json::to_value(model.map_to()).unwrap();

        assert_eq!(
            body,
            json!({"is_private": true, "scm": "git", "project": {"key": "CORE"}, "website": null})
        );
    }

    #[test]
    fn test_map_from_sets_every_attribute() {
        let mut model = RepositoryModel::default();
        model.map_from(&Repository {
            slug: "widget".to_string(),
            is_private: false,
            scm: "git".to_string(),
            project: Project {
                key: "CORE".to_string(),
            },
            website: Some("https://widget.dev".to_string()),
        });

        assert_eq!(model.slug, Value::known("widget".to_string()));
        assert_eq!(model.is_private, Value::known(false));
        assert_eq!(model.website, Value::known("https://widget.dev".to_string()));
        assert_eq!(
            model.project.as_known().map(|p| p.key.clone()),
            Some(Value::known("CORE".to_string()))
        );
    }

    #[test]
    fn test_schema_shape() {
        let schema = RepositoryResource::default().schema();
        assert!(schema.attribute("slug").unwrap().required);
        assert!(schema.attribute("project").unwrap().required);
        assert!(schema.attribute("website").unwrap().optional);
        assert_eq!(schema.requires_replace(), vec!["slug"]);
    }

    #[tokio::test]
    async fn test_create_posts_and_returns_state() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repositories/acme/widget")
            .match_header("authorization", "Basic dG9rZW4=")
            .match_body(Matcher::Json(json!({
                "is_private": true,
                "scm": "git",
                "project": {"key": "CORE"},
                "website": null
            })))
            .with_status(200)
            .with_body(WIDGET)
            .create_async()
            .await;

        let state = configured(&server).await.create(planned()).await.unwrap();
        mock.assert_async().await;
        assert_eq!(
            state.to_json(),
            json!({
                "slug": "widget",
                "scm": "git",
                "is_private": true,
                "project": {"key": "CORE"},
                "website": null
            })
        );
    }

    #[tokio::test]
    async fn test_create_error_carries_api_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/repositories/acme/widget")
            .with_status(400)
            .with_body(r#"{"type":"error","error":{"message":"Repository with this Slug and Owner already exists."}}"#)
            .create_async()
            .await;

        let diags = configured(&server).await.create(planned()).await.unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Error creating repository"]);
        let detail = &diags.iter().next().unwrap().detail;
        assert!(detail.contains("status: 400"));
        assert!(detail.contains("already exists"));
    }

    #[tokio::test]
    async fn test_read_refreshes_state() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repositories/acme/widget")
            .with_status(200)
            .with_body(r#"{"slug":"widget","is_private":false,"scm":"git","project":{"key":"OPS"},"website":"https://w.dev"}"#)
            .create_async()
            .await;

        let state = configured(&server).await.read(planned()).await.unwrap();
        assert_eq!(state.attribute("is_private"), Some(&json!(false)));
        assert_eq!(state.attribute("project"), Some(&json!({"key": "OPS"})));
        assert_eq!(state.attribute("website"), Some(&json!("https://w.dev")));
    }

    #[tokio::test]
    async fn test_read_not_found_removes_state() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repositories/acme/widget")
            .with_status(404)
            .with_body(r#"{"type":"error","error":{"message":"Repository acme/widget not found"}}"#)
            .create_async()
            .await;

        let state = configured(&server).await.read(planned()).await.unwrap();
        assert!(state.is_removed());
    }

    #[tokio::test]
    async fn test_read_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repositories/acme/widget")
            .with_status(500)
            .create_async()
            .await;

        let diags = configured(&server).await.read(planned()).await.unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Error Reading Bitbucket Repository"]);
        assert!(diags
            .iter()
            .next()
            .unwrap()
            .detail
            .starts_with("Could not read Bitbucket repository widget: "));
    }

    #[tokio::test]
    async fn test_update_puts_plan() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repositories/acme/widget")
            .match_body(Matcher::PartialJson(json!({"website": "https://new.dev"})))
            .with_status(200)
            .with_body(r#"{"slug":"widget","is_private":true,"scm":"git","project":{"key":"CORE"},"website":"https://new.dev"}"#)
            .create_async()
            .await;

        let mut plan = planned();
        plan.set_attribute("website", "https://new.dev").unwrap();

        let state = configured(&server)
            .await
            .update(planned(), plan)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(state.attribute("website"), Some(&json!("https://new.dev")));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/repositories/acme/widget")
            .with_status(204)
            .create_async()
            .await;

        configured(&server).await.delete(planned()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/repositories/acme/widget")
            .with_status(403)
            .with_body(r#"{"error":{"message":"Forbidden"}}"#)
            .create_async()
            .await;

        let diags = configured(&server).await.delete(planned()).await.unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Error Deleting Bitbucket Repository"]);
    }

    #[tokio::test]
    async fn test_import_passes_slug_through() {
        let state = RepositoryResource::default()
            .import_state("widget")
            .await
            .unwrap();
        assert_eq!(state.to_json(), json!({"slug": "widget"}));
    }

    #[tokio::test]
    async fn test_unconfigured_client() {
        let diags = RepositoryResource::default()
            .read(planned())
            .await
            .unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Unconfigured Bitbucket Client"]);
    }
}
