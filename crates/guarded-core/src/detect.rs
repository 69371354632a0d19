//! Async-argument detection
//!
//! Decides whether a construction call received any pending input. The scan
//! covers the raw argument list only: an argument counts even if the
//! constructor never stores it, and the built record's fields are never
//! inspected.

use guarded_rules::Pending;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

/// A single constructor argument
pub trait Argument {
    /// Whether this argument is a value that has not resolved yet
    fn is_pending(&self) -> bool {
        false
    }
}

/// Mark types as plain (never pending) constructor arguments
///
/// ```
/// use guarded_core::plain_argument;
///
/// struct Address {
///     city: String,
/// }
///
/// plain_argument!(Address);
/// ```
#[macro_export]
macro_rules! plain_argument {
    ($($ty:ty),* $(,)?) => {
        $(impl $crate::Argument for $ty {})*
    };
}

plain_argument!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
    Value,
);

impl<T> Argument for Pending<T> {
    fn is_pending(&self) -> bool {
        true
    }
}

impl<A: Argument> Argument for Option<A> {
    fn is_pending(&self) -> bool {
        self.as_ref().is_some_and(Argument::is_pending)
    }
}

impl<A: Argument + ?Sized> Argument for &A {
    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}

impl<A: Argument + ?Sized> Argument for Box<A> {
    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}

impl<A: Argument + ?Sized> Argument for Arc<A> {
    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}

impl<A: Argument + ?Sized> Argument for Rc<A> {
    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}

// Collections are ordinary values even when they hold pending elements.
impl<A> Argument for Vec<A> {}
impl<A> Argument for [A] {}
impl<A, const N: usize> Argument for [A; N] {}
impl<A, S> Argument for HashSet<A, S> {}
impl<A> Argument for BTreeSet<A> {}
impl<A, S> Argument for IndexSet<A, S> {}
impl<K, V, S> Argument for HashMap<K, V, S> {}
impl<K, V> Argument for BTreeMap<K, V> {}
impl<K, V, S> Argument for IndexMap<K, V, S> {}

/// A whole constructor argument list
pub trait Arguments {
    /// Whether any argument in the list is pending
    fn any_pending(&self) -> bool;
}

impl Arguments for () {
    fn any_pending(&self) -> bool {
        false
    }
}

macro_rules! tuple_arguments {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Argument),+> Arguments for ($($name,)+) {
            fn any_pending(&self) -> bool {
                $(self.$idx.is_pending())||+
            }
        }
    };
}

tuple_arguments!(A 0);
tuple_arguments!(A 0, B 1);
tuple_arguments!(A 0, B 1, C 2);
tuple_arguments!(A 0, B 1, C 2, D 3);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// A spread argument list of one element type
impl<A: Argument> Arguments for Vec<A> {
    fn any_pending(&self) -> bool {
        self.iter().any(Argument::is_pending)
    }
}

/// True iff any argument, at any position, is pending
#[inline]
#[must_use]
pub fn has_pending_argument<L: Arguments + ?Sized>(args: &L) -> bool {
    args.any_pending()
}
