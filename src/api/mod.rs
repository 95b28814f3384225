//
//  terraform-provider-bitbucket
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP access to the Bitbucket Cloud REST API v2.0.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`cloud`]: Wire types and endpoint methods per resource
//! - [`common`]: Shared types (errors, error envelope, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use terraform_provider_bitbucket::api::BitbucketClient;
//! use terraform_provider_bitbucket::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), terraform_provider_bitbucket::api::ApiError> {
//! let client = BitbucketClient::cloud("acme")?
//!     .with_auth(AuthCredential::token("dXNlcjpwYXNz"));
//!
//! let repo = client.get_repository("widget").await?;
//! println!("{} is private: {}", repo.slug, repo.is_private);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - `NotFound`: 404 Not Found; resources drop their state on it
//! - `Status`: any other non-2xx response
//! - `Network` / `Decode`: transport and payload failures

/// Core HTTP client wrapper.
///
/// Provides the [`BitbucketClient`] struct which handles URL building,
/// authentication header injection, request/response serialization and the
/// status code to error mapping.
pub mod client;

/// Bitbucket Cloud API v2.0 resources.
///
/// - [`cloud::repositories`]: Repository CRUD operations
/// - [`cloud::branch_restrictions`]: Branch restriction CRUD operations
/// - [`cloud::group_permissions`]: Group permission CRUD operations
pub mod cloud;

/// Types shared by every endpoint.
pub mod common;

pub use client::BitbucketClient;
pub use common::{ApiError, ApiResult};
