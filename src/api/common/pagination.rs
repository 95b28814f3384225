//
//  terraform-provider-bitbucket
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination wrapper for Bitbucket Cloud list endpoints.
//!
//! Bitbucket Cloud pages list responses and links each page to the next one
//! through an absolute `next` URL. The list operations on
//! [`BitbucketClient`](crate::api::BitbucketClient) return a single page; the
//! `*_all` variants follow `next` until it is absent.

use serde::{Deserialize, Serialize};

/// One page of results from a Bitbucket Cloud list endpoint.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `values` array
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total number of items across all pages |
/// | `next` | `Option<String>` | URL of the next page |
/// | `previous` | `Option<String>` | URL of the previous page |
///
/// # Example
///
/// ```rust
/// use terraform_provider_bitbucket::api::common::PaginatedResponse;
/// use terraform_provider_bitbucket::api::cloud::GroupPermission;
///
/// let json = r#"{
///     "values": [{"permission": "write"}],
///     "pagelen": 10,
///     "next": "https://api.bitbucket.org/2.0/repositories/ws/repo/permissions-config/groups?page=2"
/// }"#;
///
/// let page: PaginatedResponse<GroupPermission> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.values.len(), 1);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page. May be empty.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when the API computes it.
    #[serde(default)]
    pub size: Option<u32>,

    /// Absolute URL of the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// Absolute URL of the previous page, `None` on the first page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}
