//
//  terraform-provider-bitbucket
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Provider Library
//!
//! Declarative management of Bitbucket Cloud resources through an
//! infrastructure-as-code host.
//!
//! ## Overview
//!
//! The host plans changes and stores state; this crate performs the remote
//! side. Each managed object maps to a Bitbucket Cloud REST v2.0 endpoint
//! family, and all of them share one error rule: a 404 means the object is
//! gone, anything else non-2xx is an error carrying the API's message.
//!
//! ## Features
//!
//! - **Repositories**: create, read, update, delete and import by slug
//! - **Branch Restrictions**: rules on branch patterns, imported as `repository_slug,id`
//! - **Group Permissions**: per-repository group access, imported as `repository_slug,group_slug`
//! - **Repository Data Source**: look up an existing repository
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and wire types for Bitbucket Cloud
//! - [`auth`]: Basic credentials (pre-encoded token or app password)
//! - [`config`]: Provider configuration and environment fallbacks
//! - [`framework`]: Values, schemas, diagnostics and the lifecycle traits
//! - [`provider`]: The `bitbucket` provider and its resources
//! - [`cli`]: Command-line entry point, including the `serve` bridge
//!
//! ## Example Usage
//!
//! ```rust
//! use terraform_provider_bitbucket::framework::ProviderServer;
//! use terraform_provider_bitbucket::provider::BitbucketProvider;
//!
//! let server = ProviderServer::new(BitbucketProvider::new(terraform_provider_bitbucket::VERSION));
//! let schema = server.schema_document();
//! assert!(schema["resources"]["bitbucket_repository"].is_object());
//! ```

/// HTTP client and API types for Bitbucket Cloud.
///
/// Handles request building, authentication headers, pagination and the
/// shared status code classification.
pub mod api;

/// Credential handling.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Provider configuration block resolution.
pub mod config;

/// Provider framework: host-facing types and traits.
pub mod framework;

/// The Bitbucket provider, its resources and data sources.
pub mod provider;

pub use api::BitbucketClient;
pub use provider::BitbucketProvider;

/// Application name, used in the User-Agent header.
pub const APP_NAME: &str = "terraform-provider-bitbucket";

/// Application version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use terraform_provider_bitbucket::VERSION;
///
/// println!("terraform-provider-bitbucket {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the binary.
///
/// - `0`: Success
/// - `1`: General error, details on stderr
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;
}
