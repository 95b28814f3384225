//
//  terraform-provider-bitbucket
//  framework/diag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Diagnostics reported back to the host.
//!
//! Provider operations never fail with a bare error: they return an ordered
//! list of [`Diagnostic`]s, each with a short summary, a longer detail, and
//! optionally the root attribute it concerns. An operation failed when the
//! list holds at least one error.

use std::fmt;

use serde::Serialize;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Always `error`; the host reads it from the wire form.
    pub severity: Severity,
    /// One line summary, e.g. `Error Reading Bitbucket Repository`.
    pub summary: String,
    /// Detailed explanation.
    pub detail: String,
    /// Root attribute the diagnostic is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Attaches the diagnostic to a root attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{} ({}): {}", self.summary, attribute, self.detail),
            None => write!(f, "{}: {}", self.summary, self.detail),
        }
    }
}

/// An ordered collection of diagnostics.
///
/// # Example
///
/// ```rust
/// use terraform_provider_bitbucket::framework::Diagnostics;
///
/// let mut diags = Diagnostics::new();
/// diags.add_attribute_error("workspace", "Missing Bitbucket API Workspace", "Set it.");
/// assert!(diags.has_error());
/// assert_eq!(diags.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding one error.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self(vec![Diagnostic::error(summary, detail)])
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Diagnostic::error(summary, detail).with_attribute(attribute));
    }

    /// Moves every diagnostic of `other` to the end of this collection.
    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_error(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Summaries of all error diagnostics, in order.
    pub fn error_summaries(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.summary.as_str())
            .collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_error() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_error());

        diags.add_error("Broken", "something broke");
        assert!(diags.has_error());
        assert_eq!(diags.error_summaries(), vec!["Broken"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = Diagnostics::error("one", "1");
        first.append(Diagnostics::error("two", "2"));
        let summaries: Vec<_> = first.iter().map(|d| d.summary.clone()).collect();
        assert_eq!(summaries, vec!["one", "two"]);
    }

    #[test]
    fn test_serialized_shape() {
        let diags: Diagnostics = Diagnostic::error("Missing", "Set it").with_attribute("token").into();
        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "severity": "error",
                "summary": "Missing",
                "detail": "Set it",
                "attribute": "token"
            }])
        );
    }
}
