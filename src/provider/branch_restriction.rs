//
//  terraform-provider-bitbucket
//  provider/branch_restriction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The `bitbucket_branch_restriction` resource.
//!
//! A branch restriction is owned by a repository and identified by a numeric
//! ID the API assigns on creation, so every call after `create` needs both
//! `repository_slug` and `id`. Imports use the identifier
//! `<repository_slug>,<id>`.
//!
//! ```hcl
//! resource "bitbucket_branch_restriction" "no_force_push" {
//!   repository_slug   = "widget"
//!   kind              = "force"
//!   branch_match_kind = "glob"
//!   pattern           = "main"
//!   groups = [
//!     { slug = "maintainers" },
//!   ]
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::cloud::{BranchRestriction, Group, User};
use crate::api::BitbucketClient;
use crate::framework::{
    Attribute, Diagnostics, PlanModifier, ProviderData, Resource, Schema, State, Value,
};

use super::{client_from, require_client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchRestrictionModel {
    pub id: Value<i64>,
    pub repository_slug: Value<String>,
    pub kind: Value<String>,
    pub branch_match_kind: Value<String>,
    pub pattern: Value<String>,
    pub users: Value<Vec<UserModel>>,
    pub groups: Value<Vec<GroupModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserModel {
    pub uuid: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupModel {
    pub slug: Value<String>,
}

impl BranchRestrictionModel {
    /// Builds the request body. The ID is never sent; it lives in the URL.
    pub fn map_to(&self) -> BranchRestriction {
        BranchRestriction {
            id: None,
            kind: self.kind.value_or_default(),
            branch_match_kind: self.branch_match_kind.value_or_default(),
            pattern: self.pattern.value_or_default(),
            users: self
                .users
                .as_known()
                .map(|users| {
                    users
                        .iter()
                        .map(|user| User {
                            uuid: user.uuid.value_or_default(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            groups: self
                .groups
                .as_known()
                .map(|groups| {
                    groups
                        .iter()
                        .map(|group| Group {
                            slug: group.slug.value_or_default(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Copies an API response into the model. `repository_slug` is kept
    /// from the model since the API does not echo it.
    pub fn map_from(&mut self, restriction: &BranchRestriction) {
        self.id = Value::from_option(restriction.id);
        self.kind = Value::known(restriction.kind.clone());
        self.branch_match_kind = Value::known(restriction.branch_match_kind.clone());
        self.pattern = Value::known(restriction.pattern.clone());
        self.users = Value::known(
            restriction
                .users
                .iter()
                .map(|user| UserModel {
                    uuid: Value::known(user.uuid.clone()),
                })
                .collect(),
        );
        self.groups = Value::known(
            restriction
                .groups
                .iter()
                .map(|group| GroupModel {
                    slug: Value::known(group.slug.clone()),
                })
                .collect(),
        );
    }
}

/// Splits `<repository_slug>,<id>` into its parts.
pub fn parse_import_id(id: &str) -> Result<(String, i64), Diagnostics> {
    let parts: Vec<&str> = id.split(',').collect();
    let (repository_slug, restriction_id) = match parts.as_slice() {
        [slug, restriction] if !slug.is_empty() && !restriction.is_empty() => (*slug, *restriction),
        _ => {
            return Err(Diagnostics::error(
                "Unexpected Import Identifier",
                format!(
                    "Expected import identifier with format: repository_slug,id. Got: {:?}",
                    id
                ),
            ))
        }
    };

    let restriction_id = restriction_id.parse::<i64>().map_err(|e| {
        Diagnostics::error(
            "Error converting ID",
            format!("Could not convert ID {:?} to an integer: {}", restriction_id, e),
        )
    })?;

    Ok((repository_slug.to_string(), restriction_id))
}

#[derive(Default)]
pub struct BranchRestrictionResource {
    client: Option<Arc<BitbucketClient>>,
}

pub fn new_resource() -> Box<dyn Resource> {
    Box::new(BranchRestrictionResource::default())
}

/// The restriction ID, taken from the plan or else from prior state.
fn restriction_id(model: &BranchRestrictionModel, fallback: &Value<i64>) -> Result<i64, Diagnostics> {
    model
        .id
        .as_known()
        .or_else(|| fallback.as_known())
        .copied()
        .ok_or_else(|| {
            Diagnostics::error(
                "Missing Branch Restriction ID",
                "The branch restriction ID is not known. Import the resource or recreate it.",
            )
        })
}

#[async_trait]
impl Resource for BranchRestrictionResource {
    fn type_name_suffix(&self) -> &'static str {
        "branch_restriction"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages a branch restriction on a Bitbucket Cloud repository.")
            .with_attribute(
                "id",
                Attribute::computed_int64().with_plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .with_attribute(
                "repository_slug",
                Attribute::required_string().with_plan_modifier(PlanModifier::RequiresReplace),
            )
            .with_attribute(
                "kind",
                Attribute::required_string()
                    .with_description("Rule kind, e.g. push, force, delete or require_approvals_to_merge."),
            )
            .with_attribute(
                "branch_match_kind",
                Attribute::required_string().with_description("Either glob or branching_model."),
            )
            .with_attribute("pattern", Attribute::required_string())
            .with_attribute(
                "users",
                Attribute::list_nested([("uuid", Attribute::required_string())])
                    .optional()
                    .with_plan_modifier(PlanModifier::RequiresReplace),
            )
            .with_attribute(
                "groups",
                Attribute::list_nested([("slug", Attribute::required_string())])
                    .optional()
                    .with_plan_modifier(PlanModifier::RequiresReplace),
            )
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics> {
        self.client = client_from(data, "Resource")?;
        Ok(())
    }

    async fn create(&self, plan: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: BranchRestrictionModel = plan.get()?;
        let repository_slug = model.repository_slug.value_or_default();

        let created = client
            .create_branch_restriction(&repository_slug, &model.map_to())
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error creating branch restriction",
                    format!("Could not create branch restriction, unexpected error: {}", e),
                )
            })?;

        tracing::info!(
            repository_slug = %repository_slug,
            id = ?created.id,
            "Created Bitbucket branch restriction"
        );
        model.map_from(&created);
        Ok(State::from_model(&model)?)
    }

    async fn read(&self, state: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: BranchRestrictionModel = state.get()?;
        let repository_slug = model.repository_slug.value_or_default();
        let id = restriction_id(&model, &Value::Null)?;

        match client.get_branch_restriction(&repository_slug, id).await {
            Ok(restriction) => {
                model.map_from(&restriction);
                Ok(State::from_model(&model)?)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    repository_slug = %repository_slug,
                    id,
                    "Bitbucket branch restriction not found, removing from state"
                );
                Ok(State::removed())
            }
            Err(e) => Err(Diagnostics::error(
                "Error Reading Bitbucket Branch Restriction",
                format!(
                    "Could not read Bitbucket branch restriction {}: {}",
                    id, e
                ),
            )),
        }
    }

    async fn update(&self, prior: State, plan: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let prior: BranchRestrictionModel = prior.get()?;
        let mut model: BranchRestrictionModel = plan.get()?;
        let repository_slug = model.repository_slug.value_or_default();
        let id = restriction_id(&model, &prior.id)?;

        let updated = client
            .update_branch_restriction(&repository_slug, id, &model.map_to())
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error Updating Bitbucket Branch Restriction",
                    format!("Could not update branch restriction, unexpected error: {}", e),
                )
            })?;

        tracing::info!(repository_slug = %repository_slug, id, "Updated Bitbucket branch restriction");
        model.map_from(&updated);
        if model.id.is_null() {
            model.id = Value::known(id);
        }
        Ok(State::from_model(&model)?)
    }

    async fn delete(&self, state: State) -> Result<(), Diagnostics> {
        let client = require_client(&self.client)?;
        let model: BranchRestrictionModel = state.get()?;
        let repository_slug = model.repository_slug.value_or_default();
        let id = restriction_id(&model, &Value::Null)?;

        client
            .delete_branch_restriction(&repository_slug, id)
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error Deleting Bitbucket Branch Restriction",
                    format!("Could not delete branch restriction, unexpected error: {}", e),
                )
            })?;

        tracing::info!(repository_slug = %repository_slug, id, "Deleted Bitbucket branch restriction");
        Ok(())
    }

    async fn import_state(&self, id: &str) -> Result<State, Diagnostics> {
        let (repository_slug, restriction_id) = parse_import_id(id)?;

        let mut state = State::empty();
        state.set_attribute("repository_slug", repository_slug)?;
        state.set_attribute("id", restriction_id)?;
        Ok(state)
    }
}
