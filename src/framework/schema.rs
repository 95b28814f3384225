//
//  terraform-provider-bitbucket
//  framework/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Schema types for providers, resources and data sources.
//!
//! A schema names every attribute, its type, and how the host should treat
//! it: whether the practitioner must set it (`required`), may set it
//! (`optional`), or the provider fills it in (`computed`). Plan modifiers
//! tell the host how to diff an attribute; the host evaluates them, the
//! provider only declares them.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_bitbucket::framework::schema::{Attribute, PlanModifier, Schema};
//!
//! let schema = Schema::v0()
//!     .with_attribute("repository_slug", Attribute::required_string()
//!         .with_plan_modifier(PlanModifier::RequiresReplace))
//!     .with_attribute("permission", Attribute::required_string());
//!
//! assert_eq!(schema.requires_replace(), vec!["repository_slug"]);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

/// The type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    /// A single object with its own attributes.
    SingleNested {
        attributes: BTreeMap<String, Attribute>,
    },
    /// A list of objects sharing one set of attributes.
    ListNested {
        attributes: BTreeMap<String, Attribute>,
    },
}

/// How the host should plan changes to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// A change to this attribute destroys and recreates the resource.
    RequiresReplace,
    /// Keep the prior state value instead of showing "known after apply".
    UseStateForUnknown,
}

/// A single attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    fn of(attribute_type: AttributeType) -> Self {
        Self {
            attribute_type,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            plan_modifiers: Vec::new(),
            description: None,
        }
    }

    pub fn required_string() -> Self {
        Self::of(AttributeType::String).required()
    }

    pub fn optional_string() -> Self {
        Self::of(AttributeType::String).optional()
    }

    pub fn computed_string() -> Self {
        Self::of(AttributeType::String).computed()
    }

    pub fn required_bool() -> Self {
        Self::of(AttributeType::Bool).required()
    }

    pub fn computed_bool() -> Self {
        Self::of(AttributeType::Bool).computed()
    }

    pub fn computed_int64() -> Self {
        Self::of(AttributeType::Int64).computed()
    }

    /// A nested object; chain `.required()`, `.optional()` or `.computed()`.
    pub fn single_nested(attributes: impl IntoIterator<Item = (&'static str, Attribute)>) -> Self {
        Self::of(AttributeType::SingleNested {
            attributes: collect(attributes),
        })
    }

    /// A list of nested objects; chain `.required()`, `.optional()` or `.computed()`.
    pub fn list_nested(attributes: impl IntoIterator<Item = (&'static str, Attribute)>) -> Self {
        Self::of(AttributeType::ListNested {
            attributes: collect(attributes),
        })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_plan_modifier(&self, modifier: PlanModifier) -> bool {
        self.plan_modifiers.contains(&modifier)
    }
}

fn collect(attributes: impl IntoIterator<Item = (&'static str, Attribute)>) -> BTreeMap<String, Attribute> {
    attributes
        .into_iter()
        .map(|(name, attribute)| (name.to_string(), attribute))
        .collect()
}

/// The schema of a provider, resource or data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Schema version; bumped when stored state needs upgrading.
    pub version: i64,
    /// Root attributes keyed by name.
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    /// An empty schema at version 0.
    pub fn v0() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of the root attributes whose change forces replacement.
    pub fn requires_replace(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.has_plan_modifier(PlanModifier::RequiresReplace))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_flags() {
        let token = Attribute::optional_string().sensitive();
        assert!(token.optional);
        assert!(token.sensitive);
        assert!(!token.required);
    }

    #[test]
    fn test_serialized_attribute_skips_false_flags() {
        let attribute = Attribute::computed_int64().with_plan_modifier(PlanModifier::UseStateForUnknown);
        let json = serde_json::to_value(&attribute).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "int64",
                "computed": true,
                "plan_modifiers": ["use_state_for_unknown"]
            })
        );
    }

    #[test]
    fn test_nested_attributes_serialize() {
        let schema = Schema::v0().with_attribute(
            "project",
            Attribute::single_nested([("key", Attribute::required_string())]).required(),
        );
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json["attributes"]["project"]["type"]["single_nested"]["attributes"]["key"]["type"],
            json!("string")
        );
    }
}
