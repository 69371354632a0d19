//! Construction wrapper
//!
//! [`Guarded<T>`] is `T` with validation bolted onto construction: building
//! one runs the synchronous gate, and a failing record never comes into
//! existence. It dereferences to `T`, serializes as `T` and reports `T`'s
//! name and identity, so code inspecting it sees the wrapped record.
//!
//! Two equivalent forms:
//!
//! ```
//! # use guarded_core::{guarded, Construct, Guarded};
//! # use guarded_rules::{Schema, Validate};
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct Profile { name: String }
//! # impl Validate for Profile {
//! #     fn schema() -> Schema<Self> {
//! #         Schema::<Self>::new().field("name", |p| &p.name, |r| r.min_length(5))
//! #     }
//! # }
//! # impl Construct for Profile {
//! #     type Args = (String,);
//! #     fn construct((name,): Self::Args) -> Self { Self { name } }
//! # }
//! let direct = Guarded::<Profile>::new(("Ada Lovelace".into(),)).unwrap();
//! let produced = guarded::<Profile>().construct(("Ada Lovelace".into(),)).unwrap();
//! assert_eq!(direct.name, produced.name);
//!
//! assert!(Guarded::<Profile>::new(("Ada".into(),)).is_err());
//! ```

use crate::construct::Construct;
use crate::engine::RuleEngine;
use crate::error::GuardedConstructionError;
use crate::gate::{Admission, Gate, Outcome};
use guarded_rules::{Schema, Validate, Validator, ValidatorOptions};
use serde::Serialize;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// A record that passed (or was deferred by) the synchronous gate
#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct Guarded<T> {
    inner: T,
    #[serde(skip)]
    outcome: Outcome,
}

impl<T: Construct + Validate> Guarded<T> {
    /// Construct and validate with default options
    pub fn new(args: T::Args) -> Result<Self, GuardedConstructionError> {
        guarded::<T>().construct(args)
    }
}

impl<T> Guarded<T> {
    /// How construction got through the gate
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether validation was skipped for a pending argument
    #[inline]
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.outcome == Outcome::Deferred
    }

    /// The wrapped record
    #[inline]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Guarded<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Guarded<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Guarded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Guarded<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// A guarded record validates exactly like the record it wraps
impl<T: Validate> Validate for Guarded<T> {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().inherit(|guarded| &guarded.inner)
    }

    fn type_name() -> &'static str {
        T::type_name()
    }

    fn type_key() -> TypeId {
        T::type_key()
    }
}

/// Configurable producer of [`Guarded<T>`] values
pub struct GuardedProducer<T, E = Validator> {
    gate: Gate<E>,
    _record: PhantomData<fn() -> T>,
}

/// Start a producer for `Guarded<T>` with the default engine
#[must_use]
pub fn guarded<T: Construct + Validate>() -> GuardedProducer<T> {
    GuardedProducer {
        gate: Gate::default(),
        _record: PhantomData,
    }
}

impl<T, E> GuardedProducer<T, E> {
    /// Use the built-in validator with these options
    #[must_use]
    pub fn options(self, options: ValidatorOptions) -> GuardedProducer<T, Validator> {
        GuardedProducer {
            gate: Gate::with_options(options),
            _record: PhantomData,
        }
    }

    /// Use a different rule engine
    #[must_use]
    pub fn engine<R: RuleEngine>(self, engine: R) -> GuardedProducer<T, R> {
        GuardedProducer {
            gate: Gate::new(engine),
            _record: PhantomData,
        }
    }
}

impl<T, E> GuardedProducer<T, E>
where
    T: Construct + Validate,
    E: RuleEngine,
{
    /// Construct `T` and run the synchronous gate
    pub fn construct(&self, args: T::Args) -> Result<Guarded<T>, GuardedConstructionError> {
        let Admission { instance, outcome } = self.gate.admit_sync::<T>(args)?;
        Ok(Guarded {
            inner: instance,
            outcome,
        })
    }
}

impl<T, E: Clone> Clone for GuardedProducer<T, E> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            _record: PhantomData,
        }
    }
}

impl<T, E: fmt::Debug> fmt::Debug for GuardedProducer<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedProducer")
            .field("record", &std::any::type_name::<T>())
            .field("gate", &self.gate)
            .finish()
    }
}
