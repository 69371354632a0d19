//! Guarded Rules: declarative field rules for record types
//!
//! Records implement [`Validate`] and describe their fields with a
//! [`Schema`]. A [`Validator`] evaluates the schema either without suspending
//! ([`Validator::validate_sync`]) or awaiting [`Pending`] field values and
//! pending-verdict rules ([`Validator::validate`]). Failures come back as an
//! ordered list of [`ValidationError`] trees.
//!
//! # Modules
//!
//! - [`schema`]: the [`Validate`] trait and schema builder
//! - [`field`]: per-field rule lists
//! - [`nested`]: recursion into records and containers
//! - [`pending`]: values that resolve later
//! - [`report`]: human-readable violation reports
//! - [`options`]: validator configuration

#![warn(missing_docs)]

pub mod constraint;
pub mod error;
pub mod field;
mod message;
pub mod nested;
pub mod options;
pub mod pending;
pub mod report;
pub mod schema;
pub mod target;
pub mod validator;

pub use constraint::RuleArgs;
pub use error::ValidationError;
pub use field::FieldRules;
pub use nested::Nested;
pub use options::{SnapshotOptions, ValidatorOptions};
pub use pending::{Awaitable, Pending};
pub use report::{render, ReportNode, ReportStyle};
pub use schema::{Schema, Validate};
pub use target::{short_type_name, snapshot, Target};
pub use validator::{validate, validate_sync, Validator};

/// Prelude for record definitions
pub mod prelude {
    pub use crate::{
        Awaitable, FieldRules, Nested, Pending, RuleArgs, Schema, Validate, ValidationError,
        Validator, ValidatorOptions,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
