//
//  terraform-provider-bitbucket
//  provider/group_permission.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The `bitbucket_group_permission` resource: an explicit permission granted
//! to a workspace group on one repository.
//!
//! Granting and changing a permission are the same PUT request. Imports use
//! the identifier `<repository_slug>,<group_slug>`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::cloud::GroupPermission;
use crate::api::BitbucketClient;
use crate::framework::{
    Attribute, Diagnostics, PlanModifier, ProviderData, Resource, Schema, State, Value,
};

use super::{client_from, require_client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPermissionModel {
    pub repository_slug: Value<String>,
    pub group_slug: Value<String>,
    pub permission: Value<String>,
}

impl GroupPermissionModel {
    pub fn map_to(&self) -> GroupPermission {
        GroupPermission {
            permission: self.permission.value_or_default(),
        }
    }

    /// Only the permission comes back from the API; both slugs are kept.
    pub fn map_from(&mut self, permission: &GroupPermission) {
        self.permission = Value::known(permission.permission.clone());
    }

    fn slugs(&self) -> (String, String) {
        (
            self.repository_slug.value_or_default(),
            self.group_slug.value_or_default(),
        )
    }
}

/// Splits `<repository_slug>,<group_slug>` into its parts.
pub fn parse_import_id(id: &str) -> Result<(String, String), Diagnostics> {
    match id.split(',').collect::<Vec<_>>().as_slice() {
        [repository, group] if !repository.is_empty() && !group.is_empty() => {
            Ok((repository.to_string(), group.to_string()))
        }
        _ => Err(Diagnostics::error(
            "Unexpected Import Identifier",
            format!(
                "Expected import identifier with format: repository_slug,group_slug. Got: {:?}",
                id
            ),
        )),
    }
}

#[derive(Default)]
pub struct GroupPermissionResource {
    client: Option<Arc<BitbucketClient>>,
}

pub fn new_resource() -> Box<dyn Resource> {
    Box::new(GroupPermissionResource::default())
}

#[derive(Debug, Clone, Copy)]
enum Write {
    Create,
    Update,
}

impl GroupPermissionResource {
    async fn write(&self, plan: State, write: Write) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: GroupPermissionModel = plan.get()?;
        let (repository_slug, group_slug) = model.slugs();
        let body = model.map_to();

        let result = match write {
            Write::Create => {
                client
                    .create_group_permission(&repository_slug, &group_slug, &body)
                    .await
            }
            Write::Update => {
                client
                    .update_group_permission(&repository_slug, &group_slug, &body)
                    .await
            }
        };
        let saved = result.map_err(|e| match write {
            Write::Create => Diagnostics::error(
                "Error creating group permission",
                format!("Could not create group permission, unexpected error: {}", e),
            ),
            Write::Update => Diagnostics::error(
                "Error Updating Bitbucket Group Permission",
                format!("Could not update group permission, unexpected error: {}", e),
            ),
        })?;

        tracing::info!(
            repository_slug = %repository_slug,
            group_slug = %group_slug,
            permission = %saved.permission,
            "Saved Bitbucket group permission"
        );
        model.map_from(&saved);
        Ok(State::from_model(&model)?)
    }
}

#[async_trait]
impl Resource for GroupPermissionResource {
    fn type_name_suffix(&self) -> &'static str {
        "group_permission"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Grants a workspace group an explicit permission on a repository.")
            .with_attribute(
                "repository_slug",
                Attribute::required_string().with_plan_modifier(PlanModifier::RequiresReplace),
            )
            .with_attribute(
                "group_slug",
                Attribute::required_string().with_plan_modifier(PlanModifier::RequiresReplace),
            )
            .with_attribute(
                "permission",
                Attribute::required_string().with_description("One of read, write or admin."),
            )
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics> {
        self.client = client_from(data, "Resource")?;
        Ok(())
    }

    async fn create(&self, plan: State) -> Result<State, Diagnostics> {
        self.write(plan, Write::Create).await
    }

    async fn read(&self, state: State) -> Result<State, Diagnostics> {
        let client = require_client(&self.client)?;
        let mut model: GroupPermissionModel = state.get()?;
        let (repository_slug, group_slug) = model.slugs();

        match client.get_group_permission(&repository_slug, &group_slug).await {
            Ok(permission) => {
                model.map_from(&permission);
                Ok(State::from_model(&model)?)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    repository_slug = %repository_slug,
                    group_slug = %group_slug,
                    "Bitbucket group permission not found, removing from state"
                );
                Ok(State::removed())
            }
            Err(e) => Err(Diagnostics::error(
                "Error Reading Bitbucket Group Permission",
                format!(
                    "Could not read Bitbucket group permission {} on {}: {}",
                    group_slug, repository_slug, e
                ),
            )),
        }
    }

    async fn update(&self, _prior: State, plan: State) -> Result<State, Diagnostics> {
        self.write(plan, Write::Update).await
    }

    async fn delete(&self, state: State) -> Result<(), Diagnostics> {
        let client = require_client(&self.client)?;
        let model: GroupPermissionModel = state.get()?;
        let (repository_slug, group_slug) = model.slugs();

        client
            .delete_group_permission(&repository_slug, &group_slug)
            .await
            .map_err(|e| {
                Diagnostics::error(
                    "Error Deleting Bitbucket Group Permission",
                    format!("Could not delete group permission, unexpected error: {}", e),
                )
            })?;

        tracing::info!(
            repository_slug = %repository_slug,
            group_slug = %group_slug,
            "Deleted Bitbucket group permission"
        );
        Ok(())
    }

    async fn import_state(&self, id: &str) -> Result<State, Diagnostics> {
        let (repository_slug, group_slug) = parse_import_id(id)?;

        let mut state = State::empty();
        state.set_attribute("repository_slug", repository_slug)?;
        state.set_attribute("group_slug", group_slug)?;
        Ok(state)
    }
}
