//! Guarded Core: validate records before the caller receives them
//!
//! A freshly constructed record goes through a dispatch [`Gate`] that either
//! passes it, defers it (some constructor argument is still [`Pending`]) or
//! fails construction with a [`GuardedConstructionError`] listing every
//! failing field.
//!
//! Two entry points share the gate:
//!
//! - [`Guarded<T>`]: construction of the wrapper type always runs the
//!   synchronous gate
//! - [`Guard::create_sync`] / [`Guard::create`]: validate an unwrapped type at
//!   chosen call sites, synchronously or after awaiting pending values
//!
//! Rules themselves are declared and evaluated by `guarded_rules`; the gate
//! reaches it through the [`RuleEngine`] trait.
//!
//! [`Pending`]: guarded_rules::Pending

#![warn(missing_docs)]

pub mod construct;
pub mod detect;
pub mod engine;
pub mod error;
pub mod factory;
pub mod gate;
pub mod violation;
pub mod wrapper;

pub use construct::Construct;
pub use detect::{has_pending_argument, Argument, Arguments};
pub use engine::RuleEngine;
pub use error::{GuardedConstructionError, VALIDATION_FAILED};
pub use factory::{Guard, GuardFactory};
pub use gate::{Admission, Gate, Outcome};
pub use violation::{relay, ViolationNode};
pub use wrapper::{guarded, Guarded, GuardedProducer};

/// Prelude for defining and constructing guarded records
pub mod prelude {
    pub use crate::{
        guarded, plain_argument, Argument, Arguments, Construct, Guard, Guarded,
        GuardedConstructionError, Outcome, ViolationNode,
    };
    pub use guarded_rules::prelude::*;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
