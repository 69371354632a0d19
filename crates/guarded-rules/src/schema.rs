//! Record schemas
//!
//! A record opts into validation by implementing [`Validate`] and returning
//! its [`Schema`]: the ordered list of its fields and the rules on each.
//!
//! ```
//! use guarded_rules::{Schema, Validate};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Profile {
//!     name: String,
//!     website: Option<String>,
//! }
//!
//! impl Validate for Profile {
//!     fn schema() -> Schema<Self> {
//!         Schema::<Self>::new()
//!             .field("name", |p| &p.name, |r| r.min_length(5))
//!             .field("website", |p| &p.website, |r| r.optional().is_url())
//!     }
//! }
//! ```

use crate::error::ValidationError;
use crate::field::{AwaitedField, FieldCheck, FieldRules, InheritedField, PlainField};
use crate::options::ValidatorOptions;
use crate::pending::Awaitable;
use crate::target::{short_type_name, Target};
use futures::future::join_all;
use serde::Serialize;
use std::any::TypeId;
use std::fmt;

/// A record type with declared field rules
pub trait Validate: Serialize + Send + Sync + Sized + 'static {
    /// Field rules, in evaluation order
    fn schema() -> Schema<Self>;

    /// Name reported as the violation target
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }

    /// Identity used by [`Target::is`]
    fn type_key() -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Ordered field checks for record `T`
pub struct Schema<T> {
    checks: Vec<Box<dyn FieldCheck<T>>>,
}

impl<T: Validate> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.checks.len())
            .finish()
    }
}

impl<T: Validate> Schema<T> {
    /// Empty schema
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Declare a plain field
    #[must_use]
    pub fn field<F>(
        mut self,
        name: &'static str,
        getter: fn(&T) -> &F,
        rules: impl FnOnce(FieldRules<T, F>) -> FieldRules<T, F>,
    ) -> Self
    where
        F: Serialize + Send + Sync + 'static,
    {
        let rules = rules(FieldRules::new(name, T::type_name()));
        self.checks.push(Box::new(PlainField { getter, rules }));
        self
    }

    /// Declare a field whose value must be awaited before the rules apply
    #[must_use]
    pub fn awaited<A>(
        mut self,
        name: &'static str,
        getter: fn(&T) -> &A,
        rules: impl FnOnce(FieldRules<T, A::Output>) -> FieldRules<T, A::Output>,
    ) -> Self
    where
        A: Awaitable + 'static,
        A::Output: 'static,
    {
        let rules = rules(FieldRules::new(name, T::type_name()));
        self.checks.push(Box::new(AwaitedField { getter, rules }));
        self
    }

    /// Splice in the fields of a base record
    ///
    /// Base fields keep their own rules and are reported with `T` as target,
    /// at the position of this call.
    #[must_use]
    pub fn inherit<B: Validate>(mut self, getter: fn(&T) -> &B) -> Self {
        for inner in B::schema().checks {
            self.checks.push(Box::new(InheritedField { getter, inner }));
        }
        self
    }

    /// Number of field checks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no field has rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluate without suspending; awaited fields that are still pending and
    /// pending-verdict rules are skipped
    pub fn evaluate(&self, object: &T, options: &ValidatorOptions) -> Vec<ValidationError> {
        let target = Target::capture(object, T::type_name(), T::type_key(), options);
        self.checks
            .iter()
            .filter_map(|check| check.check(object, target.as_ref(), options))
            .collect()
    }

    /// Evaluate, awaiting pending values and pending-verdict rules
    ///
    /// Fields are awaited concurrently; the result keeps declaration order.
    pub async fn evaluate_async(
        &self,
        object: &T,
        options: &ValidatorOptions,
    ) -> Vec<ValidationError> {
        let target = Target::capture(object, T::type_name(), T::type_key(), options);
        let pending = self
            .checks
            .iter()
            .map(|check| check.check_async(object, target.as_ref(), options));
        join_all(pending).await.into_iter().flatten().collect()
    }
}
