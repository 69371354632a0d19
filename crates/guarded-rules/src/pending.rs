//! Pending values
//!
//! A [`Pending`] is a field value (or constructor argument) that is not
//! available yet. Synchronous validation cannot look inside one without
//! blocking, so it skips awaited fields; asynchronous validation resolves
//! them first and validates the resolved value.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Serialize, Serializer};
use std::fmt;
use std::future::Future;

/// A shareable value that resolves once
///
/// Clones observe the same resolution. `T: Clone` because every awaiter gets
/// its own copy of the resolved value.
pub struct Pending<T> {
    inner: Shared<BoxFuture<'static, T>>,
}

impl<T> Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a future
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// A pending value whose future completes immediately when first awaited
    pub fn ready(value: T) -> Self {
        Self::new(futures::future::ready(value))
    }

    /// Await the value
    pub async fn resolve(&self) -> T {
        self.inner.clone().await
    }

    /// The value, if some awaiter has already resolved it
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }

    /// Whether the value has been resolved
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }
}

impl<T: Clone> Clone for Pending<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Pending<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => f.debug_tuple("Pending").field(value).finish(),
            None => f.write_str("Pending(<unresolved>)"),
        }
    }
}

/// Serializes as the resolved value, or `null` while unresolved
impl<T> Serialize for Pending<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.peek() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// A field value that may need awaiting before it can be validated
pub trait Awaitable: Send + Sync {
    /// Value the rules are evaluated against
    type Output: Serialize + Send + Sync;

    /// The value, if no suspension is needed to obtain it
    fn settled(&self) -> Option<Self::Output>;

    /// Resolve the value
    fn settle(&self) -> BoxFuture<'_, Self::Output>;
}

impl<T> Awaitable for Pending<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    type Output = T;

    fn settled(&self) -> Option<T> {
        None
    }

    fn settle(&self) -> BoxFuture<'_, T> {
        self.resolve().boxed()
    }
}

impl<A: Awaitable> Awaitable for Option<A> {
    type Output = Option<A::Output>;

    fn settled(&self) -> Option<Self::Output> {
        match self {
            None => Some(None),
            Some(inner) => inner.settled().map(Some),
        }
    }

    fn settle(&self) -> BoxFuture<'_, Self::Output> {
        async move {
            match self {
                None => None,
                Some(inner) => Some(inner.settle().await),
            }
        }
        .boxed()
    }
}
