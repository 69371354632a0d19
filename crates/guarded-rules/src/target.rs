//! Violation targets and value snapshots

use crate::options::ValidatorOptions;
use serde::Serialize;
use serde_json::Value;
use std::any::TypeId;
use std::sync::Arc;

/// The record (or container) that owns a failing field
///
/// Clones share one snapshot, so every violation of a record or container
/// points at the same captured value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    type_name: &'static str,
    #[serde(skip)]
    type_key: TypeId,
    snapshot: Arc<Value>,
}

impl Target {
    /// Create a target from its parts
    #[inline]
    #[must_use]
    pub fn new(type_name: &'static str, type_key: TypeId, snapshot: Value) -> Self {
        Self {
            type_name,
            type_key,
            snapshot: Arc::new(snapshot),
        }
    }

    /// Capture a target for `owner`, or `None` when target snapshots are disabled
    pub fn capture<T: Serialize + ?Sized>(
        owner: &T,
        type_name: &'static str,
        type_key: TypeId,
        options: &ValidatorOptions,
    ) -> Option<Self> {
        options
            .validation_error
            .target
            .then(|| Self::new(type_name, type_key, snapshot(owner)))
    }

    /// Short type name of the owner
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type identity of the owner
    #[inline]
    #[must_use]
    pub fn type_key(&self) -> TypeId {
        self.type_key
    }

    /// Whether the owner is an instance of `X`
    #[inline]
    #[must_use]
    pub fn is<X: 'static>(&self) -> bool {
        self.type_key == TypeId::of::<X>()
    }

    /// JSON snapshot of the owner at validation time
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }
}

/// Serialize a value into a JSON snapshot.
///
/// Values that cannot be represented (non-string map keys, failing custom
/// serializers) become `null`.
pub fn snapshot<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "value snapshot failed, recording null");
            Value::Null
        }
    }
}

/// Rust type name without its module path.
///
/// `my_app::model::Profile` becomes `Profile`; generic arguments are kept
/// as written (`Wrapper<my_app::Inner>` keeps its inner path).
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    match full[..head_end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
