//
//  terraform-provider-bitbucket
//  api/cloud/branch_restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Branch restriction API types and endpoints.
//!
//! A branch restriction applies one rule (`kind`, e.g. `push` or
//! `require_approvals_to_merge`) to the branches selected either by a glob
//! `pattern` or by branching model type (`branch_match_kind`). Push style
//! rules can exempt specific users and groups.
//!
//! Endpoints live under `/repositories/{workspace}/{repo_slug}/branch-restrictions`
//! and individual rules are addressed by their numeric `id`.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResult, PaginatedResponse};

const BRANCH_RESTRICTIONS: &str = "branch-restrictions";

/// A branch restriction rule.
///
/// # Fields
///
/// * `id` - Numeric identifier assigned by the API; not sent when `None`
/// * `kind` - Rule kind, e.g. `push`, `force`, `delete`
/// * `branch_match_kind` - `glob` or `branching_model`
/// * `pattern` - Glob selecting the branches
/// * `users` - Users exempted by the rule
/// * `groups` - Groups exempted by the rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRestriction {
    /// Identifier assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Rule kind.
    #[serde(default)]
    pub kind: String,

    /// How branches are matched (`glob` or `branching_model`).
    #[serde(default)]
    pub branch_match_kind: String,

    /// Glob pattern selecting the branches.
    #[serde(default)]
    pub pattern: String,

    /// Exempted users.
    #[serde(default)]
    pub users: Vec<User>,

    /// Exempted groups.
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A user reference, identified by UUID (with curly braces).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User UUID, e.g. `{a1b2c3...}`.
    #[serde(default)]
    pub uuid: String,
}

/// A group reference, identified by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group slug.
    #[serde(default)]
    pub slug: String,
}

impl BitbucketClient {
    /// Lists one page of branch restrictions on a repository.
    pub async fn list_branch_restrictions(
        &self,
        repository_slug: &str,
    ) -> ApiResult<PaginatedResponse<BranchRestriction>> {
        let url = self.repository_endpoint(&[repository_slug, BRANCH_RESTRICTIONS])?;
        self.get(url).await
    }

    /// Lists every branch restriction on a repository, following `next` links.
    pub async fn list_all_branch_restrictions(
        &self,
        repository_slug: &str,
    ) -> ApiResult<Vec<BranchRestriction>> {
        let first = self.list_branch_restrictions(repository_slug).await?;
        self.collect_pages(first).await
    }

    /// Fetches a single branch restriction.
    pub async fn get_branch_restriction(
        &self,
        repository_slug: &str,
        id: i64,
    ) -> ApiResult<BranchRestriction> {
        let id = id.to_string();
        let url = self.repository_endpoint(&[repository_slug, BRANCH_RESTRICTIONS, &id])?;
        self.get(url).await
    }

    /// Creates a branch restriction. The API assigns the `id`.
    pub async fn create_branch_restriction(
        &self,
        repository_slug: &str,
        restriction: &BranchRestriction,
    ) -> ApiResult<BranchRestriction> {
        let url = self.repository_endpoint(&[repository_slug, BRANCH_RESTRICTIONS])?;
        self.post(url, restriction).await
    }

    /// Replaces the branch restriction `id`.
    pub async fn update_branch_restriction(
        &self,
        repository_slug: &str,
        id: i64,
        restriction: &BranchRestriction,
    ) -> ApiResult<BranchRestriction> {
        let id = id.to_string();
        let url = self.repository_endpoint(&[repository_slug, BRANCH_RESTRICTIONS, &id])?;
        self.put(url, restriction).await
    }

    /// Deletes the branch restriction `id`.
    pub async fn delete_branch_restriction(&self, repository_slug: &str, id: i64) -> ApiResult<()> {
        let id = id.to_string();
        let url = self.repository_endpoint(&[repository_slug, BRANCH_RESTRICTIONS, &id])?;
        self.delete(url).await
    }
}
