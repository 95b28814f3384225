//
//  terraform-provider-bitbucket
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Cloud repository API types and endpoints.
//!
//! Repositories belong to a workspace and are addressed by slug:
//! `/repositories/{workspace}/{repo_slug}`. Creation is a POST to the same URL
//! the repository will live at; updates are a PUT.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_bitbucket::api::cloud::{Project, Repository};
//!
//! let request = Repository {
//!     slug: String::new(),
//!     is_private: true,
//!     scm: "git".to_string(),
//!     project: Project { key: "BACKEND".to_string() },
//!     website: None,
//! };
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert!(body.get("slug").is_none());
//! assert!(body["website"].is_null());
//! ```
//!
//! # Notes
//!
//! - Repository slugs are URL-safe versions of repository names
//! - `slug` is assigned by the API and therefore never sent

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResult, PaginatedResponse};

/// A Bitbucket Cloud repository, reduced to the fields the provider manages.
///
/// # Fields
///
/// * `slug` - URL-safe identifier; response only
/// * `is_private` - Whether the repository is private
/// * `scm` - Source control type, `git` on current Bitbucket Cloud
/// * `project` - Project the repository is organized under
/// * `website` - Optional website URL; sent as `null` when unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// URL-safe identifier derived from the repository name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// Source control type (`git`).
    #[serde(default)]
    pub scm: String,

    /// Project the repository belongs to.
    #[serde(default)]
    pub project: Project,

    /// Optional website URL.
    #[serde(default)]
    pub website: Option<String>,
}

/// Project reference embedded in a repository.
///
/// Only the key is needed to assign a repository to a project; the API
/// returns more fields, which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Short alphanumeric key of the project (typically uppercase).
    #[serde(default)]
    pub key: String,
}

impl BitbucketClient {
    /// Lists one page of repositories in the workspace.
    ///
    /// `GET /repositories/{workspace}`
    pub async fn list_repositories(&self) -> ApiResult<PaginatedResponse<Repository>> {
        let url = self.repository_endpoint(&[])?;
        self.get(url).await
    }

    /// Lists every repository in the workspace, following `next` links.
    pub async fn list_all_repositories(&self) -> ApiResult<Vec<Repository>> {
        let first = self.list_repositories().await?;
        self.collect_pages(first).await
    }

    /// Fetches a single repository.
    ///
    /// `GET /repositories/{workspace}/{slug}`
    ///
    /// # Errors
    ///
    /// A missing repository yields [`ApiError::NotFound`](crate::api::common::ApiError::NotFound).
    pub async fn get_repository(&self, slug: &str) -> ApiResult<Repository> {
        let url = self.repository_endpoint(&[slug])?;
        self.get(url).await
    }

    /// Creates a repository at `slug`.
    ///
    /// `POST /repositories/{workspace}/{slug}`
    pub async fn create_repository(&self, slug: &str, repository: &Repository) -> ApiResult<Repository> {
        let url = self.repository_endpoint(&[slug])?;
        self.post(url, repository).await
    }

    /// Updates the repository at `slug`.
    ///
    /// `PUT /repositories/{workspace}/{slug}`
    pub async fn update_repository(&self, slug: &str, repository: &Repository) -> ApiResult<Repository> {
        let url = self.repository_endpoint(&[slug])?;
        self.put(url, repository).await
    }

    /// Deletes the repository at `slug`.
    ///
    /// `DELETE /repositories/{workspace}/{slug}`
    pub async fn delete_repository(&self, slug: &str) -> ApiResult<()> {
        let url = self.repository_endpoint(&[slug])?;
        self.delete(url).await
    }
}
