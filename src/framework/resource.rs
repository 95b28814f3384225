//
//  terraform-provider-bitbucket
//  framework/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Managed resource lifecycle.
//!
//! A [`Resource`] turns host lifecycle calls into remote API calls. The host
//! decides which call to make after diffing plan against state; the resource
//! only performs it and reports the resulting state.
//!
//! | Call | Input | Output |
//! |------|-------|--------|
//! | `create` | planned state | new state |
//! | `read` | current state | refreshed state, or removed |
//! | `update` | prior and planned state | new state |
//! | `delete` | current state | nothing |
//! | `import_state` | practitioner supplied ID | partial state, completed by a `read` |

use async_trait::async_trait;

use super::diag::Diagnostics;
use super::provider::ProviderData;
use super::schema::Schema;
use super::state::State;

/// A managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name suffix appended to the provider type name, e.g. `repository`
    /// for `bitbucket_repository`.
    fn type_name_suffix(&self) -> &'static str;

    /// The resource schema.
    fn schema(&self) -> Schema;

    /// Receives the data produced by the provider's configure step.
    ///
    /// Called with `None` before the provider has been configured.
    fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), Diagnostics>;

    async fn create(&self, plan: State) -> Result<State, Diagnostics>;

    /// Refreshes state from the remote API. A resource that no longer
    /// exists returns [`State::removed`] rather than an error.
    async fn read(&self, state: State) -> Result<State, Diagnostics>;

    async fn update(&self, prior: State, plan: State) -> Result<State, Diagnostics>;

    async fn delete(&self, state: State) -> Result<(), Diagnostics>;

    /// Turns an import identifier into enough state for `read` to finish.
    async fn import_state(&self, id: &str) -> Result<State, Diagnostics> {
        Err(Diagnostics::error(
            "Resource Import Not Implemented",
            format!(
                "This resource does not support import. Got identifier: {:?}",
                id
            ),
        ))
    }
}

/// Constructs an unconfigured resource instance.
pub type ResourceFactory = fn() -> Box<dyn Resource>;

/// Imports by copying the identifier verbatim into one root attribute.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use terraform_provider_bitbucket::framework::import_state_passthrough_id;
///
/// let state = import_state_passthrough_id("slug", "widget").unwrap();
/// assert_eq!(state.to_json(), json!({"slug": "widget"}));
/// ```
pub fn import_state_passthrough_id(attribute: &str, id: &str) -> Result<State, Diagnostics> {
    let mut state = State::empty();
    state.set_attribute(attribute, id)?;
    Ok(state)
}
