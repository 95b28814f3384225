//
//  terraform-provider-bitbucket
//  framework/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Provider Framework
//!
//! The host-facing side of the provider: how attribute data, schemas and
//! diagnostics look, and the traits a provider implements.
//!
//! ## Module Structure
//!
//! - [`value`]: [`Value`], the null / unknown / known attribute value
//! - [`schema`]: [`Schema`] and [`Attribute`] declarations
//! - [`diag`]: [`Diagnostics`] reported back to the host
//! - [`state`]: [`State`], the per-resource attribute object
//! - [`provider`], [`resource`], [`datasource`]: the lifecycle traits
//! - [`server`]: the line-delimited JSON bridge that drives a provider
//!
//! The host stays in charge of plan diffing, schema validation and state
//! persistence; nothing here reimplements them.

pub mod datasource;
pub mod diag;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod server;
pub mod state;
pub mod value;

pub use datasource::{DataSource, DataSourceFactory};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use provider::{downcast_provider_data, qualified_type_name, Provider, ProviderData, ProviderMetadata};
pub use resource::{import_state_passthrough_id, Resource, ResourceFactory};
pub use schema::{Attribute, AttributeType, PlanModifier, Schema};
pub use server::{ProviderServer, Request, Response};
pub use state::{State, StateError};
pub use value::{Value, UNKNOWN_VALUE};
