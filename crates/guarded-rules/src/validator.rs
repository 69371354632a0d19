//! Validation entry points

use crate::error::ValidationError;
use crate::options::ValidatorOptions;
use crate::schema::Validate;
use tracing::trace;

/// Evaluates record schemas with a fixed set of options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    /// Validator with the given options
    #[inline]
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate without suspending
    ///
    /// Awaited fields that are still pending and pending-verdict rules are
    /// skipped.
    pub fn validate_sync<T: Validate>(&self, object: &T) -> Vec<ValidationError> {
        let errors = T::schema().evaluate(object, &self.options);
        trace!(record = T::type_name(), violations = errors.len(), "validated");
        errors
    }

    /// Validate, awaiting pending field values and pending-verdict rules
    pub async fn validate<T: Validate>(&self, object: &T) -> Vec<ValidationError> {
        let errors = T::schema().evaluate_async(object, &self.options).await;
        trace!(record = T::type_name(), violations = errors.len(), "validated after awaiting");
        errors
    }
}

/// Validate with default options, without suspending
pub fn validate_sync<T: Validate>(object: &T) -> Vec<ValidationError> {
    Validator::default().validate_sync(object)
}

/// Validate with default options, awaiting pending values
pub async fn validate<T: Validate>(object: &T) -> Vec<ValidationError> {
    Validator::default().validate(object).await
}
