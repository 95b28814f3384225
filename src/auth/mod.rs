//
//  terraform-provider-bitbucket
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials used by the provider to talk to Bitbucket Cloud. Both supported
//! forms end up as an HTTP Basic `Authorization` header:
//!
//! - **Token**: an already encoded Basic credential, i.e.
//!   `base64("username:app_password")`, sent verbatim. This is what the
//!   `token` provider attribute and `BITBUCKET_TOKEN` carry.
//! - **App Password**: a username and app password pair that is encoded on
//!   the fly.
//!
//! ## Example
//!
//! ```rust
//! use terraform_provider_bitbucket::auth::AuthCredential;
//!
//! let encoded = AuthCredential::app_password("jane", "secret");
//! let verbatim = AuthCredential::token(AuthCredential::encode_basic("jane", "secret"));
//!
//! assert_eq!(encoded.authorization_header(), verbatim.authorization_header());
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Authentication credentials accepted by the Bitbucket client.
///
/// # Variants
///
/// - `Token`: pre-encoded Basic credential, sent as `Basic <token>`.
/// - `AppPassword`: username and app password, encoded with base64.
///
/// # Notes
///
/// - `Debug` output never contains the secret parts.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Pre-encoded Basic credential.
    Token {
        /// `base64("username:app_password")`.
        token: String,
    },
    /// Username and app password pair.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
}

impl AuthCredential {
    /// Creates a credential from a pre-encoded Basic token.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Creates a credential from a username and app password.
    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encodes a username and password the way HTTP Basic auth expects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terraform_provider_bitbucket::auth::AuthCredential;
    ///
    /// assert_eq!(AuthCredential::encode_basic("user", "pass"), "dXNlcjpwYXNz");
    /// ```
    pub fn encode_basic(username: &str, password: &str) -> String {
        STANDARD.encode(format!("{}:{}", username, password))
    }

    /// Returns the full value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Token { token } => format!("Basic {}", token),
            Self::AppPassword { username, password } => {
                format!("Basic {}", Self::encode_basic(username, password))
            }
        }
    }

    /// Applies the credential to an HTTP request.
    ///
    /// # Parameters
    ///
    /// - `request`: The [`RequestBuilder`] to add the header to.
    ///
    /// # Returns
    ///
    /// The same builder with the `Authorization` header set.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.authorization_header())
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_sent_verbatim() {
        let credential = AuthCredential::token("abc123");
        assert_eq!(credential.authorization_header(), "Basic abc123");
    }

    #[test]
    fn test_app_password_is_encoded() {
        let credential = AuthCredential::app_password("user", "pass");
        assert_eq!(credential.authorization_header(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let token = format!("{:?}", AuthCredential::token("very-secret"));
        assert!(!token.contains("very-secret"));

        let app = format!("{:?}", AuthCredential::app_password("jane", "hunter2"));
        assert!(app.contains("jane"));
        assert!(!app.contains("hunter2"));
    }
}
