//
//  terraform-provider-bitbucket
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 endpoints used by the provider.
//!
//! Each submodule holds the wire types for one resource together with the
//! [`BitbucketClient`] methods that read and write it.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repository CRUD
//! - [`branch_restrictions`] - Branch restriction CRUD
//! - [`group_permissions`] - Repository group permission CRUD
//!
//! # Notes
//!
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Pagination uses `next` links; see [`PaginatedResponse`]

pub mod branch_restrictions;
pub mod group_permissions;
pub mod repositories;

pub use branch_restrictions::*;
pub use group_permissions::*;
pub use repositories::*;

use serde::de::DeserializeOwned;
use url::Url;

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiError, ApiResult, PaginatedResponse};

impl BitbucketClient {
    /// Drains a paginated listing by following `next` links.
    ///
    /// Links must stay on the API host's origin so credentials are never
    /// sent elsewhere.
    pub(crate) async fn collect_pages<T: DeserializeOwned>(
        &self,
        first: PaginatedResponse<T>,
    ) -> ApiResult<Vec<T>> {
        let mut items = first.values;
        let mut next = first.next;

        while let Some(link) = next {
            let url = Url::parse(&link)
                .map_err(|e| ApiError::InvalidNextLink(format!("{}: {}", link, e)))?;
            if !self.is_same_origin(&url) {
                return Err(ApiError::InvalidNextLink(format!(
                    "{} is not on {}",
                    link,
                    self.host()
                )));
            }
            let page: PaginatedResponse<T> = self.get(url).await?;
            items.extend(page.values);
            next = page.next;
        }

        Ok(items)
    }
}
