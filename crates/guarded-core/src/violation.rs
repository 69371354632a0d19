//! Violation tree relay
//!
//! Copies the rule engine's violation trees into the gate's own node type.
//! The copy keeps every node, in order, at every depth.

use guarded_rules::report::{self, ReportNode, ReportStyle};
use guarded_rules::{Target, ValidationError};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One failed field path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationNode {
    /// Record (or container) owning the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Field name, or index/key inside a container
    pub property: String,
    /// Value that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Constraint name → message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<IndexMap<String, String>>,
    /// Constraint name → rule-author context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<IndexMap<String, Value>>,
    /// Nested failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViolationNode>,
}

impl ViolationNode {
    /// Whether this node carries constraints and no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of the failed constraints on this node
    #[must_use]
    pub fn constraint_names(&self) -> Vec<&str> {
        self.constraints
            .as_ref()
            .map(|c| c.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Report with an explicit style
    #[must_use]
    pub fn report(&self, style: ReportStyle) -> String {
        report::render(self, style)
    }
}

impl From<ValidationError> for ViolationNode {
    fn from(error: ValidationError) -> Self {
        Self {
            target: error.target,
            property: error.property,
            value: error.value,
            constraints: error.constraints,
            contexts: error.contexts,
            children: relay(error.children),
        }
    }
}

/// Convert engine output into violation nodes, order preserved
#[must_use]
pub fn relay(errors: Vec<ValidationError>) -> Vec<ViolationNode> {
    errors.into_iter().map(ViolationNode::from).collect()
}

impl ReportNode for ViolationNode {
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

impl fmt::Display for ViolationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::render(self, ReportStyle::plain()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn leaf(property: &str) -> ValidationError {
        let mut error = ValidationError::new(property).with_value(Some(json!("x")));
        error.add_constraint("isUrl", format!("{property} must be a URL address"));
        error.add_context("isUrl", json!({ "hint": "scheme" }));
        error
    }

    #[test]
    fn relay_preserves_order_and_depth() {
        let mut items = ValidationError::new("items");
        let mut first = ValidationError::new("0");
        first.children = vec![leaf("url"), leaf("name")];
        let mut second = ValidationError::new("1");
        second.children = vec![leaf("url")];
        items.children = vec![first, second];

        let engine_output = vec![leaf("title"), items];
        let nodes = relay(engine_output.clone());

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].property, "title");
        assert_eq!(nodes[1].children[0].property, "0");
        let names: Vec<_> = nodes[1].children[0]
            .children
            .iter()
            .map(|n| n.property.as_str())
            .collect();
        assert_eq!(names, vec!["url", "name"]);
        assert_eq!(nodes[1].children[1].children[0].property, "url");

        for (node, error) in nodes.iter().zip(&engine_output) {
            assert_eq!(node.to_string(), error.to_string());
        }
    }

    #[test]
    fn relay_keeps_leaf_fields() {
        let node = ViolationNode::from(leaf("website"));

        assert!(node.is_leaf());
        assert_eq!(node.value, Some(json!("x")));
        assert_eq!(node.constraint_names(), vec!["isUrl"]);
        assert_eq!(node.contexts.unwrap()["isUrl"], json!({ "hint": "scheme" }));
    }
}
