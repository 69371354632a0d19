//! Violations produced by the rule engine

use crate::report::{self, ReportNode, ReportStyle};
use crate::target::Target;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One failed field, possibly with nested failures below it
///
/// Leaf violations carry `constraints` (constraint name → message). Structural
/// violations for nested records and containers carry `children` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Record or container owning the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Field name, or index/key inside a container
    pub property: String,
    /// Snapshot of the failing value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Failed constraints and their messages, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<IndexMap<String, String>>,
    /// Rule-author context payloads keyed by constraint name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<IndexMap<String, Value>>,
    /// Nested failures, in field or container order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ValidationError>,
}

impl ValidationError {
    /// Empty violation for `property`
    #[must_use]
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            target: None,
            property: property.into(),
            value: None,
            constraints: None,
            contexts: None,
            children: Vec::new(),
        }
    }

    /// With target
    #[must_use]
    pub fn with_target(mut self, target: Option<Target>) -> Self {
        self.target = target;
        self
    }

    /// With value snapshot
    #[must_use]
    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    /// Record a failed constraint
    pub fn add_constraint(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.constraints
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), message.into());
    }

    /// Record a context payload for a failed constraint
    pub fn add_context(&mut self, name: impl Into<String>, context: Value) {
        self.contexts
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), context);
    }

    /// Whether anything failed at or below this node
    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.constraints.is_some() || !self.children.is_empty()
    }

    /// Whether this is a leaf (no nested failures)
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Render the human-readable report with a given style
    #[must_use]
    pub fn report(&self, style: ReportStyle) -> String {
        report::render(self, style)
    }
}

impl ReportNode for ValidationError {
    fn target_name(&self) -> Option<&str> {
        self.target.as_ref().map(Target::type_name)
    }

    fn property(&self) -> &str {
        &self.property
    }

    fn constraints(&self) -> Option<&IndexMap<String, String>> {
        self.constraints.as_ref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::render(self, ReportStyle::default()))
    }
}
