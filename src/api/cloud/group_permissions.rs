//
//  terraform-provider-bitbucket
//  api/cloud/group_permissions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Repository group permission API types and endpoints.
//!
//! Explicit group permissions live under
//! `/repositories/{workspace}/{repo_slug}/permissions-config/groups/{group_slug}`.
//! The API has no separate create call: a PUT both grants and changes a
//! permission.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResult, PaginatedResponse};

/// The permission a group holds on a repository.
///
/// Typical values are `read`, `write` and `admin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPermission {
    /// Permission level.
    #[serde(default)]
    pub permission: String,
}

impl BitbucketClient {
    fn group_permission_url(&self, repository_slug: &str, group_slug: Option<&str>) -> ApiResult<url::Url> {
        match group_slug {
            Some(group) => self.repository_endpoint(&[repository_slug, "permissions-config", "groups", group]),
            None => self.repository_endpoint(&[repository_slug, "permissions-config", "groups"]),
        }
    }

    /// Lists one page of explicit group permissions on a repository.
    pub async fn list_group_permissions(
        &self,
        repository_slug: &str,
    ) -> ApiResult<PaginatedResponse<GroupPermission>> {
        let url = self.group_permission_url(repository_slug, None)?;
        self.get(url).await
    }

    /// Fetches the permission of one group.
    pub async fn get_group_permission(
        &self,
        repository_slug: &str,
        group_slug: &str,
    ) -> ApiResult<GroupPermission> {
        let url = self.group_permission_url(repository_slug, Some(group_slug))?;
        self.get(url).await
    }

    /// Grants a permission to a group.
    ///
    /// Same request as [`update_group_permission`](Self::update_group_permission).
    pub async fn create_group_permission(
        &self,
        repository_slug: &str,
        group_slug: &str,
        permission: &GroupPermission,
    ) -> ApiResult<GroupPermission> {
        self.update_group_permission(repository_slug, group_slug, permission)
            .await
    }

    /// Changes the permission of a group.
    pub async fn update_group_permission(
        &self,
        repository_slug: &str,
        group_slug: &str,
        permission: &GroupPermission,
    ) -> ApiResult<GroupPermission> {
        let url = self.group_permission_url(repository_slug, Some(group_slug))?;
        self.put(url, permission).await
    }

    /// Revokes the explicit permission of a group.
    pub async fn delete_group_permission(&self, repository_slug: &str, group_slug: &str) -> ApiResult<()> {
        let url = self.group_permission_url(repository_slug, Some(group_slug))?;
        self.delete(url).await
    }
}
