//
//  terraform-provider-bitbucket
//  framework/state.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Plan, state and configuration containers.
//!
//! The host passes attribute data around as one JSON object per resource.
//! [`State`] wraps that object and converts it to and from the typed models
//! each resource declares. A state can also be *removed*: the resource no
//! longer exists remotely and the host should forget it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::diag::{Diagnostic, Diagnostics};

/// Errors converting between [`State`] and typed models.
#[derive(Error, Debug)]
pub enum StateError {
    /// The object does not match the model.
    #[error("{0}")]
    Conversion(#[from] serde_json::Error),

    /// A model serialized to something other than a JSON object.
    #[error("state must be an object, got {0}")]
    NotAnObject(&'static str),

    /// The resource was removed from state.
    #[error("resource has been removed from state")]
    Removed,
}

impl From<StateError> for Diagnostic {
    fn from(err: StateError) -> Self {
        Diagnostic::error(
            "Value Conversion Error",
            format!(
                "An unexpected error was encountered converting attribute data. \
                 Please report this to the provider developers.\n\nError: {}",
                err
            ),
        )
    }
}

impl From<StateError> for Diagnostics {
    fn from(err: StateError) -> Self {
        Diagnostic::from(err).into()
    }
}

/// A JSON object of attribute values, or nothing when removed.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use terraform_provider_bitbucket::framework::State;
///
/// let mut state = State::empty();
/// state.set_attribute("slug", "widget").unwrap();
/// assert_eq!(state.to_json(), json!({"slug": "widget"}));
///
/// state.remove_resource();
/// assert!(state.is_removed());
/// assert_eq!(state.to_json(), json!(null));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    raw: Option<Map<String, JsonValue>>,
}

impl Default for State {
    fn default() -> Self {
        Self::empty()
    }
}

impl State {
    /// An existing state with no attributes set.
    pub fn empty() -> Self {
        Self {
            raw: Some(Map::new()),
        }
    }

    /// A state marking the resource as gone.
    pub fn removed() -> Self {
        Self { raw: None }
    }

    /// Wraps raw JSON from the host.
    ///
    /// `null` stands for an absent resource.
    pub fn from_json(raw: JsonValue) -> Result<Self, StateError> {
        match raw {
            JsonValue::Null => Ok(Self::removed()),
            JsonValue::Object(map) => Ok(Self { raw: Some(map) }),
            other => Err(StateError::NotAnObject(json_kind(&other))),
        }
    }

    /// Builds a state from a typed model.
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self, StateError> {
        let mut state = Self::empty();
        state.set(model)?;
        Ok(state)
    }

    /// Decodes the whole object into a typed model.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, StateError> {
        let raw = self.raw.as_ref().ok_or(StateError::Removed)?;
        Ok(serde_json::from_value(JsonValue::Object(raw.clone()))?)
    }

    /// Replaces the whole object with the encoding of `model`.
    pub fn set<T: Serialize>(&mut self, model: &T) -> Result<(), StateError> {
        match serde_json::to_value(model)? {
            JsonValue::Object(map) => {
                self.raw = Some(map);
                Ok(())
            }
            other => Err(StateError::NotAnObject(json_kind(&other))),
        }
    }

    /// Sets a single root attribute, keeping the others.
    pub fn set_attribute<V: Serialize>(&mut self, name: &str, value: V) -> Result<(), StateError> {
        let value = serde_json::to_value(value)?;
        self.raw
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), value);
        Ok(())
    }

    /// Reads a single root attribute, `None` when absent.
    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.raw.as_ref().and_then(|raw| raw.get(name))
    }

    /// Marks the resource as gone so the host drops it.
    pub fn remove_resource(&mut self) {
        self.raw = None;
    }

    pub fn is_removed(&self) -> bool {
        self.raw.is_none()
    }

    /// The JSON form handed back to the host (`null` when removed).
    pub fn to_json(&self) -> JsonValue {
        match &self.raw {
            Some(map) => JsonValue::Object(map.clone()),
            None => JsonValue::Null,
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Value;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Model {
        slug: Value<String>,
        id: Value<i64>,
    }

    #[test]
    fn test_round_trip_model() {
        let state = State::from_json(json!({"slug": "widget", "id": 4})).unwrap();
        let model: Model = state.get().unwrap();
        assert_eq!(model.id, Value::Known(4));

        let rebuilt = State::from_model(&model).unwrap();
        assert_eq!(rebuilt, state);
    }

    #[test]
    fn test_null_json_is_removed() {
        let state = State::from_json(JsonValue::Null).unwrap();
        assert!(state.is_removed());
        assert!(matches!(state.get::<Model>(), Err(StateError::Removed)));
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            State::from_json(json!([1, 2])),
            Err(StateError::NotAnObject("array"))
        ));
    }

    #[test]
    fn test_set_attribute_keeps_others() {
        let mut state = State::from_json(json!({"slug": "widget"})).unwrap();
        state.set_attribute("id", 9).unwrap();
        assert_eq!(state.to_json(), json!({"slug": "widget", "id": 9}));
        assert_eq!(state.attribute("id"), Some(&json!(9)));
    }

    #[test]
    fn test_conversion_error_becomes_diagnostic() {
        let state = State::from_json(json!({"id": "not a number"})).unwrap();
        let err = state.get::<Model>().unwrap_err();
        let diags: Diagnostics = err.into();
        assert_eq!(diags.error_summaries(), vec!["Value Conversion Error"]);
    }
}
