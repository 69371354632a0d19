//! Validation dispatch gate
//!
//! One gate serves both entry points. The synchronous path defers whenever a
//! constructor argument is pending and otherwise validates without
//! suspending. The asynchronous path always validates, letting the rule
//! engine await pending field values first.

use crate::construct::Construct;
use crate::detect::has_pending_argument;
use crate::engine::RuleEngine;
use crate::error::GuardedConstructionError;
use crate::violation::relay;
use guarded_rules::{Validate, ValidationError, Validator, ValidatorOptions};
use std::fmt;
use tracing::{debug, instrument};

/// Non-failing result of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The rule engine found no violations
    Pass,
    /// Validation was skipped because an argument was pending
    Deferred,
}

impl Outcome {
    /// Lowercase label used in logs
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Deferred => "deferred",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructed instance the gate let through
#[derive(Debug, Clone, PartialEq)]
pub struct Admission<T> {
    /// The instance, unchanged by the gate
    pub instance: T,
    /// How it got through
    pub outcome: Outcome,
}

impl<T> Admission<T> {
    /// Whether validation was skipped
    #[inline]
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.outcome == Outcome::Deferred
    }

    /// The admitted instance
    #[inline]
    pub fn into_instance(self) -> T {
        self.instance
    }
}

/// Dispatches freshly constructed instances to a rule engine
#[derive(Debug, Clone, Default)]
pub struct Gate<E = Validator> {
    engine: E,
}

impl Gate<Validator> {
    /// Gate over the built-in validator with the given options
    #[inline]
    #[must_use]
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self::new(Validator::new(options))
    }
}

impl<E: RuleEngine> Gate<E> {
    /// Gate over a rule engine
    #[inline]
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The rule engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Synchronous dispatch for an instance built from arguments whose
    /// pending-ness is `pending_input`
    ///
    /// Never suspends. With pending input the rule engine is not invoked at
    /// all and the outcome is [`Outcome::Deferred`].
    #[instrument(level = "debug", skip_all, fields(record = T::type_name()))]
    pub fn check_sync<T: Validate>(
        &self,
        instance: &T,
        pending_input: bool,
    ) -> Result<Outcome, GuardedConstructionError> {
        if pending_input {
            debug!(outcome = %Outcome::Deferred, "pending argument, validation skipped");
            return Ok(Outcome::Deferred);
        }
        conclude(self.engine.evaluate_sync(instance))
    }

    /// Asynchronous dispatch: awaits the rule engine's full evaluation
    #[instrument(level = "debug", skip_all, fields(record = T::type_name()))]
    pub async fn check_async<T: Validate>(
        &self,
        instance: &T,
    ) -> Result<Outcome, GuardedConstructionError> {
        conclude(self.engine.evaluate_async(instance).await)
    }

    /// Construct `T` from `args` and dispatch synchronously
    pub fn admit_sync<T>(&self, args: T::Args) -> Result<Admission<T>, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        let pending_input = has_pending_argument(&args);
        let instance = T::construct(args);
        let outcome = self.check_sync(&instance, pending_input)?;
        Ok(Admission { instance, outcome })
    }

    /// Construct `T` from `args` and dispatch asynchronously
    pub async fn admit<T>(&self, args: T::Args) -> Result<Admission<T>, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        let instance = T::construct(args);
        let outcome = self.check_async(&instance).await?;
        Ok(Admission { instance, outcome })
    }
}

fn conclude(errors: Vec<ValidationError>) -> Result<Outcome, GuardedConstructionError> {
    match GuardedConstructionError::from_violations(relay(errors)) {
        Some(error) => {
            debug!(outcome = "failed", violations = error.errors().len(), "validation failed");
            Err(error)
        }
        None => {
            debug!(outcome = %Outcome::Pass, "validation passed");
            Ok(Outcome::Pass)
        }
    }
}
