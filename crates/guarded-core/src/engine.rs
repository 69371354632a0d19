//! Rule engine seam
//!
//! The gate never evaluates rules itself. It asks a [`RuleEngine`] for the
//! violations of an instance, with or without suspending.

use async_trait::async_trait;
use guarded_rules::{Validate, ValidationError, Validator};
use std::sync::Arc;

/// Evaluates the declared rules of a record
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// Violations found without suspending
    fn evaluate_sync<T: Validate>(&self, instance: &T) -> Vec<ValidationError>;

    /// Violations found after awaiting pending field values
    async fn evaluate_async<T: Validate>(&self, instance: &T) -> Vec<ValidationError>;
}

#[async_trait]
impl RuleEngine for Validator {
    fn evaluate_sync<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        self.validate_sync(instance)
    }

    async fn evaluate_async<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        self.validate(instance).await
    }
}

#[async_trait]
impl<E: RuleEngine + ?Sized> RuleEngine for &E {
    fn evaluate_sync<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        (**self).evaluate_sync(instance)
    }

    async fn evaluate_async<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        (**self).evaluate_async(instance).await
    }
}

#[async_trait]
impl<E: RuleEngine + ?Sized> RuleEngine for Arc<E> {
    fn evaluate_sync<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        (**self).evaluate_sync(instance)
    }

    async fn evaluate_async<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        (**self).evaluate_async(instance).await
    }
}
