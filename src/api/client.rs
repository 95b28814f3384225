//
//  terraform-provider-bitbucket
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Bitbucket Cloud
//!
//! This module provides the HTTP client every resource adapter goes through.
//! Each call follows the same shape: build the URL from fixed path segments,
//! attach credentials, serialize the body, send, classify the status, and
//! decode the JSON response.
//!
//! ## Features
//!
//! - Configurable API host (defaults to `https://api.bitbucket.org/2.0`)
//! - Workspace-scoped repository URLs with percent-encoded segments
//! - Authentication header injection
//! - Single status-to-error rule shared by every endpoint
//! - 10 second request timeout and a custom User-Agent header

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::common::{ApiError, ApiResult, ErrorEnvelope};
use crate::auth::AuthCredential;

/// Base URL of the public Bitbucket Cloud API.
pub const DEFAULT_HOST: &str = "https://api.bitbucket.org/2.0";

/// Per-request timeout applied to the underlying HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns a non-2xx response into an [`ApiError`].
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// When the body decodes, the message reads
/// `the Bitbucket API returned, status: <code> message: <message>`; otherwise
/// it stops after the status code. A 404 always becomes
/// [`ApiError::NotFound`], everything else [`ApiError::Status`].
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use terraform_provider_bitbucket::api::client::format_api_error;
///
/// let err = format_api_error(StatusCode::NOT_FOUND, r#"{"error":{"message":"No such repo"}}"#);
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "the Bitbucket API returned, status: 404 message: No such repo");
/// ```
pub fn format_api_error(status: StatusCode, body: &str) -> ApiError {
    let code = status.as_u16();
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!(
            "the Bitbucket API returned, status: {} message: {}",
            code, envelope.error.message
        ),
        Err(_) => format!("the Bitbucket API returned, status: {}", code),
    };

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound {
            status: code,
            message,
        }
    } else {
        ApiError::Status {
            status: code,
            message,
        }
    }
}

/// The HTTP client for the Bitbucket Cloud REST API.
///
/// A client is bound to one API host and one workspace; every repository
/// scoped URL is built as `<host>/repositories/<workspace>/...`.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use terraform_provider_bitbucket::api::BitbucketClient;
/// use terraform_provider_bitbucket::auth::AuthCredential;
///
/// let client = BitbucketClient::cloud("my-workspace")?
///     .with_auth(AuthCredential::app_password("jane", "app-password"));
/// assert_eq!(client.workspace(), "my-workspace");
/// # Ok::<(), terraform_provider_bitbucket::api::common::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    /// The underlying HTTP client
    http: Client,
    /// API base URL, e.g. `https://api.bitbucket.org/2.0`
    host: Url,
    /// Workspace slug every repository URL is scoped to
    workspace: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl BitbucketClient {
    /// Creates a client for an arbitrary API host.
    ///
    /// # Parameters
    ///
    /// * `host` - Base URL of the API, including any version prefix
    /// * `workspace` - Workspace slug
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHost`] if `host` is not an absolute
    /// http(s) URL, or [`ApiError::Network`] if the HTTP client cannot be
    /// built.
    pub fn new(host: &str, workspace: impl Into<String>) -> ApiResult<Self> {
        let host = Url::parse(host).map_err(|e| ApiError::InvalidHost(format!("{}: {}", host, e)))?;
        if host.cannot_be_a_base() || !matches!(host.scheme(), "http" | "https") {
            return Err(ApiError::InvalidHost(host.to_string()));
        }

        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            host,
            workspace: workspace.into(),
            auth: None,
        })
    }

    /// Creates a client for the public Bitbucket Cloud API.
    pub fn cloud(workspace: impl Into<String>) -> ApiResult<Self> {
        Self::new(DEFAULT_HOST, workspace)
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// The API base URL.
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Whether `url` shares scheme, host and port with the API base URL.
    pub(crate) fn is_same_origin(&self, url: &Url) -> bool {
        url.origin() == self.host.origin()
    }

    /// The workspace slug requests are scoped to.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Builds a URL by appending path segments to the host.
    ///
    /// Each segment is percent-encoded, so slugs containing reserved
    /// characters cannot escape their position in the path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terraform_provider_bitbucket::api::BitbucketClient;
    ///
    /// let client = BitbucketClient::cloud("ws")?;
    /// let url = client.endpoint(&["repositories", "ws", "my repo"])?;
    /// assert_eq!(url.as_str(), "https://api.bitbucket.org/2.0/repositories/ws/my%20repo");
    /// # Ok::<(), terraform_provider_bitbucket::api::common::ApiError>(())
    /// ```
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidHost(self.host.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds `<host>/repositories/<workspace>/<segments...>`.
    pub fn repository_endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut all = Vec::with_capacity(segments.len() + 2);
        all.push("repositories");
        all.push(self.workspace.as_str());
        all.extend_from_slice(segments);
        self.endpoint(&all)
    }

    /// Makes an HTTP GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The response status is not successful (2xx)
    /// - The response body cannot be deserialized to type `T`
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        decode(response).await
    }

    /// Makes an HTTP POST request with a JSON body and decodes the response.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, url: Url, body: &B) -> ApiResult<T> {
        let response = self.send(Method::POST, url, Some(body)).await?;
        decode(response).await
    }

    /// Makes an HTTP PUT request with a JSON body and decodes the response.
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, url: Url, body: &B) -> ApiResult<T> {
        let response = self.send(Method::PUT, url, Some(body)).await?;
        decode(response).await
    }

    /// Makes an HTTP DELETE request. The response body is ignored.
    pub async fn delete(&self, url: Url) -> ApiResult<()> {
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    /// Sends a request and applies the shared status classification.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        tracing::debug!(method = %method, url = %url, "Sending Bitbucket API request");

        let mut request: RequestBuilder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(method = %method, url = %url, status = status.as_u16(), "Bitbucket API request failed");
            return Err(format_api_error(status, &text));
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
