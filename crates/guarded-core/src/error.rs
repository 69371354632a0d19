//! Gate error type

use crate::violation::ViolationNode;

/// Fixed message of every [`GuardedConstructionError`]
pub const VALIDATION_FAILED: &str = "Validation failed";

/// A constructed record failed its rules
///
/// Holds every top-level failing field, in the rule engine's order. The list
/// is never empty.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Validation failed")]
pub struct GuardedConstructionError {
    errors: Vec<ViolationNode>,
}

impl GuardedConstructionError {
    /// Build from a violation list; `None` when the list is empty
    #[must_use]
    pub fn from_violations(errors: Vec<ViolationNode>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self { errors })
    }

    /// Always `"Validation failed"`
    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        VALIDATION_FAILED
    }

    /// Top-level violations, one per failing field
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[ViolationNode] {
        &self.errors
    }

    /// Take the violations
    #[must_use]
    pub fn into_errors(self) -> Vec<ViolationNode> {
        self.errors
    }

    /// The violation for a top-level field
    #[must_use]
    pub fn field(&self, property: &str) -> Option<&ViolationNode> {
        self.errors.iter().find(|node| node.property == property)
    }

    /// Every per-node report, concatenated
    #[must_use]
    pub fn report(&self) -> String {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
