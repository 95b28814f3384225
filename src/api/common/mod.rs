//
//  terraform-provider-bitbucket
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for Bitbucket Cloud
//!
//! This module provides the types shared by every endpoint wrapper: the error
//! type returned by the client, the Cloud error envelope, and the pagination
//! wrapper (re-exported from [`pagination`]).
//!
//! # Error Classification
//!
//! Every non-2xx response is funnelled through a single rule:
//!
//! | Status | Variant |
//! |--------|---------|
//! | 404 | [`ApiError::NotFound`] |
//! | any other non-2xx | [`ApiError::Status`] |
//!
//! Resource adapters rely on [`ApiError::is_not_found`] to drop orphaned
//! state instead of surfacing an error.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_bitbucket::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(e) if e.is_not_found() => "gone",
//!         Err(_) => "failed",
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used by every client operation.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `NotFound` | The API answered 404 |
/// | `Status` | Any other non-2xx answer |
/// | `Network` | Transport failure (connect, timeout, TLS) |
/// | `Decode` | A 2xx body that is not the expected JSON |
/// | `InvalidHost` | The configured host cannot be used as a base URL |
/// | `InvalidNextLink` | A `next` link is malformed or leaves the API host |
///
/// The `message` carried by `NotFound` and `Status` is already formatted for
/// display, e.g. `the Bitbucket API returned, status: 403 message: Forbidden`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// HTTP status code, always 404.
        status: u16,
        /// Display message including the API's own error text.
        message: String,
    },

    /// The API rejected the request with a non-2xx status other than 404.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Display message including the API's own error text.
        message: String,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured host is not a usable base URL.
    #[error("Invalid Bitbucket API host: {0}")]
    InvalidHost(String),

    /// A pagination `next` link is malformed or points at another origin.
    #[error("Invalid pagination link: {0}")]
    InvalidNextLink(String),
}

impl ApiError {
    /// Returns `true` when the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code for status-derived errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error envelope returned by Bitbucket Cloud on failure.
///
/// ```json
/// {"type": "error", "error": {"message": "Repository not found"}}
/// ```
///
/// Both levels default so that `{}` still decodes, with an empty message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The nested error details.
    #[serde(default)]
    pub error: ErrorDetails,
}

/// The `error` object of an [`ErrorEnvelope`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}
