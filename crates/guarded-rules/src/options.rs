//! Validator options
//!
//! Options are plain serde data so they can be loaded from the same JSON/TOML
//! configuration as the rest of an application.

use serde::{Deserialize, Serialize};

/// Options controlling a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Skip every constraint except `is_defined` on fields whose value is missing
    pub skip_missing_properties: bool,
    /// Stop evaluating a field after its first failing constraint
    pub stop_at_first_error: bool,
    /// Replace built-in messages with an empty string
    pub dismiss_default_messages: bool,
    /// Which snapshots to attach to produced violations
    pub validation_error: SnapshotOptions,
}

impl ValidatorOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With missing-property skipping
    #[inline]
    #[must_use]
    pub fn with_skip_missing_properties(mut self, skip: bool) -> Self {
        self.skip_missing_properties = skip;
        self
    }

    /// With stop-at-first-error per field
    #[inline]
    #[must_use]
    pub fn with_stop_at_first_error(mut self, stop: bool) -> Self {
        self.stop_at_first_error = stop;
        self
    }

    /// With default messages dismissed
    #[inline]
    #[must_use]
    pub fn with_dismiss_default_messages(mut self, dismiss: bool) -> Self {
        self.dismiss_default_messages = dismiss;
        self
    }

    /// With target snapshots on or off
    #[inline]
    #[must_use]
    pub fn with_target_snapshot(mut self, enabled: bool) -> Self {
        self.validation_error.target = enabled;
        self
    }

    /// With value snapshots on or off
    #[inline]
    #[must_use]
    pub fn with_value_snapshot(mut self, enabled: bool) -> Self {
        self.validation_error.value = enabled;
        self
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            skip_missing_properties: false,
            stop_at_first_error: false,
            dismiss_default_messages: false,
            validation_error: SnapshotOptions::default(),
        }
    }
}

/// Snapshot capture settings for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    /// Attach the owning record as `target`
    pub target: bool,
    /// Attach the failing value as `value`
    pub value: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            target: true,
            value: true,
        }
    }
}
