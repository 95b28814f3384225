//
//  terraform-provider-bitbucket
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Provider Configuration
//!
//! Resolves the `provider "bitbucket"` block into the settings needed to build
//! a [`BitbucketClient`].
//!
//! ## Precedence
//!
//! Every attribute has an environment variable fallback. A non-null value in
//! the configuration block always wins over the environment, even when it is
//! an empty string.
//!
//! | Attribute | Environment Variable |
//! |-----------|----------------------|
//! | `host` | `BITBUCKET_HOST` |
//! | `workspace` | `BITBUCKET_WORKSPACE` |
//! | `token` | `BITBUCKET_TOKEN` |
//! | `username` | `BITBUCKET_USERNAME` |
//! | `app_password` | `BITBUCKET_APP_PASSWORD` |
//!
//! ## Credentials
//!
//! Either `token` (a pre-encoded Basic credential) or the
//! `username` / `app_password` pair must resolve to non-empty values. The
//! token is used when both are present.
//!
//! An empty `host` falls back to Bitbucket Cloud.

use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_HOST;
use crate::api::BitbucketClient;
use crate::auth::AuthCredential;
use crate::framework::{Diagnostics, Value};

pub const ENV_HOST: &str = "BITBUCKET_HOST";
pub const ENV_WORKSPACE: &str = "BITBUCKET_WORKSPACE";
pub const ENV_TOKEN: &str = "BITBUCKET_TOKEN";
pub const ENV_USERNAME: &str = "BITBUCKET_USERNAME";
pub const ENV_APP_PASSWORD: &str = "BITBUCKET_APP_PASSWORD";

/// The provider configuration block as received from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub host: Value<String>,
    pub workspace: Value<String>,
    pub token: Value<String>,
    pub username: Value<String>,
    pub app_password: Value<String>,
}

/// Settings after environment fallback and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub workspace: String,
    pub credential: AuthCredential,
}

impl ProviderConfig {
    /// Resolves against the process environment.
    pub fn resolve(&self) -> Result<ResolvedConfig, Diagnostics> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves against an arbitrary environment lookup.
    ///
    /// All problems are collected before returning so the practitioner sees
    /// every missing attribute in one run.
    pub fn resolve_with<F>(&self, env: F) -> Result<ResolvedConfig, Diagnostics>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut diags = Diagnostics::new();

        if self.host.is_unknown() {
            diags.add_attribute_error(
                "host",
                "Unknown Bitbucket API Host",
                "The provider cannot create the Bitbucket API client as there is an unknown configuration value for the Bitbucket API host. \
                 Either target apply the source of the value first, set the value statically in the configuration, or use the BITBUCKET_HOST environment variable.",
            );
        }
        if self.workspace.is_unknown() {
            diags.add_attribute_error(
                "workspace",
                "Unknown Bitbucket API Workspace",
                "The provider cannot create the Bitbucket API client as there is an unknown configuration value for the Bitbucket API workspace. \
                 Either target apply the source of the value first, set the value statically in the configuration, or use the BITBUCKET_WORKSPACE environment variable.",
            );
        }
        if self.token.is_unknown() {
            diags.add_attribute_error(
                "token",
                "Unknown Bitbucket API Token",
                "The provider cannot create the Bitbucket API client as there is an unknown configuration value for the Bitbucket API token. \
                 Either target apply the source of the value first, set the value statically in the configuration, or use the BITBUCKET_TOKEN environment variable.",
            );
        }
        if self.username.is_unknown() {
            diags.add_attribute_error(
                "username",
                "Unknown Bitbucket API Username",
                "The provider cannot create the Bitbucket API client as there is an unknown configuration value for the Bitbucket API username. \
                 Either target apply the source of the value first, set the value statically in the configuration, or use the BITBUCKET_USERNAME environment variable.",
            );
        }
        if self.app_password.is_unknown() {
            diags.add_attribute_error(
                "app_password",
                "Unknown Bitbucket API App Password",
                "The provider cannot create the Bitbucket API client as there is an unknown configuration value for the Bitbucket API app password. \
                 Either target apply the source of the value first, set the value statically in the configuration, or use the BITBUCKET_APP_PASSWORD environment variable.",
            );
        }
        if diags.has_error() {
            return Err(diags);
        }

        let host = pick(&self.host, &env, ENV_HOST);
        let workspace = pick(&self.workspace, &env, ENV_WORKSPACE);
        let token = pick(&self.token, &env, ENV_TOKEN);
        let username = pick(&self.username, &env, ENV_USERNAME);
        let app_password = pick(&self.app_password, &env, ENV_APP_PASSWORD);

        if workspace.is_empty() {
            diags.add_attribute_error(
                "workspace",
                "Missing Bitbucket API Workspace",
                "The provider cannot create the Bitbucket API client as there is a missing or empty value for the Bitbucket API workspace. \
                 Set the workspace value in the configuration or use the BITBUCKET_WORKSPACE environment variable. \
                 If either is already set, ensure the value is not empty.",
            );
        }

        let credential = if !token.is_empty() {
            Some(AuthCredential::token(token))
        } else if !username.is_empty() && !app_password.is_empty() {
            Some(AuthCredential::app_password(username, app_password))
        } else {
            diags.add_attribute_error(
                "token",
                "Missing Bitbucket API Token",
                "The provider cannot create the Bitbucket API client as there is a missing or empty value for the Bitbucket API token. \
                 Set the token value in the configuration or use the BITBUCKET_TOKEN environment variable. \
                 If either is already set, ensure the value is not empty.",
            );
            None
        };

        match credential {
            Some(credential) if !diags.has_error() => Ok(ResolvedConfig {
                host: if host.is_empty() {
                    DEFAULT_HOST.to_string()
                } else {
                    host
                },
                workspace,
                credential,
            }),
            _ => Err(diags),
        }
    }
}

impl ResolvedConfig {
    /// Builds the authenticated API client.
    pub fn build_client(&self) -> Result<BitbucketClient, Diagnostics> {
        BitbucketClient::new(&self.host, self.workspace.clone())
            .map(|client| client.with_auth(self.credential.clone()))
            .map_err(|e| {
                Diagnostics::error(
                    "Unable to Create Bitbucket API Client",
                    format!(
                        "An unexpected error occurred when creating the Bitbucket API client. \
                         If the error is not clear, please contact the provider developers.\n\n\
                         Bitbucket Client Error: {}",
                        e
                    ),
                )
            })
    }
}

/// A non-null configured value wins; otherwise the environment, else empty.
fn pick<F>(value: &Value<String>, env: &F, key: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match value.as_known() {
        Some(configured) => configured.clone(),
        None => env(key).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_from_config() {
        let config = ProviderConfig {
            host: Value::known("https://bitbucket.example.com/2.0".to_string()),
            workspace: Value::known("acme".to_string()),
            token: Value::known("dXNlcjpwYXNz".to_string()),
            ..Default::default()
        };

        let resolved = config.resolve_with(env_of(&[])).unwrap();
        assert_eq!(resolved.host, "https://bitbucket.example.com/2.0");
        assert_eq!(resolved.workspace, "acme");
        assert_eq!(resolved.credential, AuthCredential::token("dXNlcjpwYXNz"));
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let config = ProviderConfig::default();
        let env = env_of(&[
            (ENV_HOST, "https://env.example.com"),
            (ENV_WORKSPACE, "env-ws"),
            (ENV_TOKEN, "env-token"),
        ]);

        let resolved = config.resolve_with(env).unwrap();
        assert_eq!(resolved.host, "https://env.example.com");
        assert_eq!(resolved.workspace, "env-ws");
        assert_eq!(resolved.credential, AuthCredential::token("env-token"));
    }

    #[test]
    fn test_config_overrides_env() {
        let config = ProviderConfig {
            workspace: Value::known("config-ws".to_string()),
            ..Default::default()
        };
        let env = env_of(&[(ENV_WORKSPACE, "env-ws"), (ENV_TOKEN, "t")]);

        let resolved = config.resolve_with(env).unwrap();
        assert_eq!(resolved.workspace, "config-ws");
    }

    #[test]
    fn test_empty_config_value_still_overrides_env() {
        let config = ProviderConfig {
            workspace: Value::known(String::new()),
            ..Default::default()
        };
        let env = env_of(&[(ENV_WORKSPACE, "env-ws"), (ENV_TOKEN, "t")]);

        let diags = config.resolve_with(env).unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Missing Bitbucket API Workspace"]);
    }

    #[test]
    fn test_empty_host_defaults_to_cloud() {
        let config = ProviderConfig::default();
        let env = env_of(&[(ENV_WORKSPACE, "ws"), (ENV_TOKEN, "t")]);

        let resolved = config.resolve_with(env).unwrap();
        assert_eq!(resolved.host, DEFAULT_HOST);
    }

    #[test]
    fn test_missing_values_reported_together() {
        let diags = ProviderConfig::default()
            .resolve_with(env_of(&[]))
            .unwrap_err();

        assert_eq!(
            diags.error_summaries(),
            vec!["Missing Bitbucket API Workspace", "Missing Bitbucket API Token"]
        );
    }

    #[test]
    fn test_unknown_values_rejected() {
        let config = ProviderConfig {
            host: Value::Unknown,
            token: Value::Unknown,
            ..Default::default()
        };
        let env = env_of(&[(ENV_WORKSPACE, "ws"), (ENV_TOKEN, "t")]);

        let diags = config.resolve_with(env).unwrap_err();
        assert_eq!(
            diags.error_summaries(),
            vec!["Unknown Bitbucket API Host", "Unknown Bitbucket API Token"]
        );
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("host"));
    }

    #[test]
    fn test_app_password_credential() {
        let config = ProviderConfig {
            workspace: Value::known("ws".to_string()),
            username: Value::known("alice".to_string()),
            app_password: Value::known("secret".to_string()),
            ..Default::default()
        };

        let resolved = config.resolve_with(env_of(&[])).unwrap();
        assert_eq!(
            resolved.credential,
            AuthCredential::app_password("alice", "secret")
        );
    }

    #[test]
    fn test_username_without_password_is_missing_token() {
        let config = ProviderConfig {
            workspace: Value::known("ws".to_string()),
            username: Value::known("alice".to_string()),
            ..Default::default()
        };

        let diags = config.resolve_with(env_of(&[])).unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Missing Bitbucket API Token"]);
    }

    #[test]
    fn test_build_client_rejects_bad_host() {
        let resolved = ResolvedConfig {
            host: "not a url".to_string(),
            workspace: "ws".to_string(),
            credential: AuthCredential::token("t"),
        };

        let diags = resolved.build_client().unwrap_err();
        assert_eq!(diags.error_summaries(), vec!["Unable to Create Bitbucket API Client"]);
    }

    #[test]
    fn test_build_client_uses_workspace() {
        let resolved = ResolvedConfig {
            host: DEFAULT_HOST.to_string(),
            workspace: "acme".to_string(),
            credential: AuthCredential::token("t"),
        };

        let client = resolved.build_client().unwrap();
        assert_eq!(client.workspace(), "acme");
    }
}
