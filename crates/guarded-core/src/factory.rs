//! Explicit factory
//!
//! Validates on construction at chosen call sites, for record types that are
//! not wrapped in [`Guarded`](crate::Guarded).

use crate::construct::Construct;
use crate::engine::RuleEngine;
use crate::error::GuardedConstructionError;
use crate::gate::{Admission, Gate};
use guarded_rules::{Validate, Validator, ValidatorOptions};

/// Factory operations with the default rule engine
///
/// ```
/// # use guarded_core::{Construct, Guard};
/// # use guarded_rules::{Schema, Validate};
/// # use serde::Serialize;
/// # #[derive(Debug, Serialize)]
/// # struct Profile { name: String }
/// # impl Validate for Profile {
/// #     fn schema() -> Schema<Self> {
/// #         Schema::<Self>::new().field("name", |p| &p.name, |r| r.min_length(5))
/// #     }
/// # }
/// # impl Construct for Profile {
/// #     type Args = (String,);
/// #     fn construct((name,): Self::Args) -> Self { Self { name } }
/// # }
/// let error = Guard::create_sync::<Profile>(("my".into(),)).unwrap_err();
/// assert_eq!(error.message(), "Validation failed");
/// assert_eq!(error.errors()[0].property, "name");
/// ```
#[derive(Debug)]
pub enum Guard {}

impl Guard {
    /// Construct `T`, then dispatch synchronously
    ///
    /// Defers (returns the instance unvalidated) when any argument is pending.
    pub fn create_sync<T>(args: T::Args) -> Result<T, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        GuardFactory::<Validator>::default().create_sync(args)
    }

    /// Construct `T`, then dispatch asynchronously
    pub async fn create<T>(args: T::Args) -> Result<T, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        GuardFactory::<Validator>::default().create(args).await
    }

    /// Factory over a custom rule engine
    #[inline]
    #[must_use]
    pub fn with_engine<E: RuleEngine>(engine: E) -> GuardFactory<E> {
        GuardFactory {
            gate: Gate::new(engine),
        }
    }

    /// Factory over the built-in validator with custom options
    #[inline]
    #[must_use]
    pub fn with_options(options: ValidatorOptions) -> GuardFactory {
        GuardFactory {
            gate: Gate::with_options(options),
        }
    }
}

/// Factory bound to a rule engine
#[derive(Debug, Clone, Default)]
pub struct GuardFactory<E = Validator> {
    gate: Gate<E>,
}

impl<E: RuleEngine> GuardFactory<E> {
    /// The gate this factory dispatches through
    #[inline]
    #[must_use]
    pub fn gate(&self) -> &Gate<E> {
        &self.gate
    }

    /// Construct `T`, then dispatch synchronously
    pub fn create_sync<T>(&self, args: T::Args) -> Result<T, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        self.gate.admit_sync::<T>(args).map(Admission::into_instance)
    }

    /// Construct `T`, then dispatch asynchronously
    pub async fn create<T>(&self, args: T::Args) -> Result<T, GuardedConstructionError>
    where
        T: Construct + Validate,
    {
        self.gate.admit::<T>(args).await.map(Admission::into_instance)
    }
}
