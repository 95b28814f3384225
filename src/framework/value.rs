//
//  terraform-provider-bitbucket
//  framework/value.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Nullable, possibly-unknown attribute values.
//!
//! Every attribute the host hands to the provider is in one of three states:
//! absent (`null`), not yet known because it depends on something that has not
//! been applied, or known. [`Value`] models that directly.
//!
//! # JSON Encoding
//!
//! | Variant | JSON |
//! |---------|------|
//! | `Null` | `null` |
//! | `Unknown` | `"74D93920-ED26-11E3-AC10-0800200C9A66"` |
//! | `Known(v)` | the JSON encoding of `v` |
//!
//! The unknown sentinel is the same string Terraform uses for unknown
//! variable values in its JSON representations.

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel string standing for an unknown value.
pub const UNKNOWN_VALUE: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// An attribute value as seen by the provider.
///
/// # Example
///
/// ```rust
/// use terraform_provider_bitbucket::framework::Value;
///
/// let slug: Value<String> = serde_json::from_str(r#""widget""#).unwrap();
/// assert_eq!(slug.value_or_default(), "widget");
///
/// let website: Value<String> = serde_json::from_str("null").unwrap();
/// assert!(website.is_null());
/// assert_eq!(website.into_option(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    /// The attribute is not set.
    Null,
    /// The attribute will only be known after apply.
    Unknown,
    /// The attribute has a concrete value.
    Known(T),
}

impl<T> Value<T> {
    /// Wraps a concrete value.
    pub fn known(value: T) -> Self {
        Self::Known(value)
    }

    /// `Some` becomes `Known`, `None` becomes `Null`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Known(v),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Borrows the concrete value, if any.
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into an `Option`; both `Null` and `Unknown` map to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone + Default> Value<T> {
    /// The concrete value, or `T::default()` when null or unknown.
    pub fn value_or_default(&self) -> T {
        self.as_known().cloned().unwrap_or_default()
    }
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T: fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("<null>"),
            Self::Unknown => f.write_str("<unknown>"),
            Self::Known(v) => v.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Unknown => serializer.serialize_str(UNKNOWN_VALUE),
            Self::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::String(s) if s == UNKNOWN_VALUE => Ok(Self::Unknown),
            other => T::deserialize(other).map(Self::Known).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Model {
        name: Value<String>,
        count: Value<i64>,
        flag: Value<bool>,
    }

    #[test]
    fn test_missing_fields_are_null() {
        let model: Model = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(model.name, Value::Known("x".to_string()));
        assert!(model.count.is_null());
        assert!(model.flag.is_null());
    }

    #[test]
    fn test_unknown_sentinel() {
        let model: Model = serde_json::from_value(json!({"count": UNKNOWN_VALUE})).unwrap();
        assert!(model.count.is_unknown());
        assert_eq!(model.count.value_or_default(), 0);

        let encoded = serde_json::to_value(&model).unwrap();
        assert_eq!(encoded["count"], json!(UNKNOWN_VALUE));
        assert_eq!(encoded["name"], json!(null));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result: Result<Model, _> = serde_json::from_value(json!({"flag": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Known(42).to_string(), "42");
        assert_eq!(Value::<i64>::Null.to_string(), "<null>");
        assert_eq!(Value::<i64>::Unknown.to_string(), "<unknown>");
    }
}
