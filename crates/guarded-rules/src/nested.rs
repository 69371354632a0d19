//! Recursion into nested records and containers
//!
//! A field marked `nested()` contributes its value's own violations as
//! `children`. Containers report one node per failing element, keyed by
//! position (sequences, sets) or by map key, in iteration order.

use crate::error::ValidationError;
use crate::options::ValidatorOptions;
use crate::schema::Validate;
use crate::target::{snapshot, Target};
use futures::future::{join_all, BoxFuture, FutureExt};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// A value whose own rules are validated as children of a field
pub trait Nested: Serialize + Send + Sync + 'static {
    /// Violations of this value, without suspending
    fn nested_errors(&self, options: &ValidatorOptions) -> Vec<ValidationError>;

    /// Violations of this value, awaiting pending fields
    fn nested_errors_async<'a>(
        &'a self,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Vec<ValidationError>>;
}

impl<V: Validate> Nested for V {
    fn nested_errors(&self, options: &ValidatorOptions) -> Vec<ValidationError> {
        V::schema().evaluate(self, options)
    }

    fn nested_errors_async<'a>(
        &'a self,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Vec<ValidationError>> {
        async move { V::schema().evaluate_async(self, options).await }.boxed()
    }
}

impl<N: Nested> Nested for Option<N> {
    fn nested_errors(&self, options: &ValidatorOptions) -> Vec<ValidationError> {
        self.as_ref()
            .map(|inner| inner.nested_errors(options))
            .unwrap_or_default()
    }

    fn nested_errors_async<'a>(
        &'a self,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Vec<ValidationError>> {
        match self {
            Some(inner) => inner.nested_errors_async(options),
            None => futures::future::ready(Vec::new()).boxed(),
        }
    }
}

/// `Vec`, `IndexSet`, `BTreeMap`: the container's name without module path or
/// generic arguments
fn container_name<C: ?Sized>() -> &'static str {
    let full = type_name::<C>();
    let head = &full[..full.find('<').unwrap_or(full.len())];
    head.rsplit("::").next().unwrap_or(head)
}

/// Target shared by every element node of one container
fn container_target<C>(container: &C, options: &ValidatorOptions) -> Option<Target>
where
    C: Serialize + 'static,
{
    Target::capture(container, container_name::<C>(), TypeId::of::<C>(), options)
}

fn element_node<N: Serialize>(
    target: Option<&Target>,
    key: String,
    element: &N,
    children: Vec<ValidationError>,
    options: &ValidatorOptions,
) -> ValidationError {
    let value = options.validation_error.value.then(|| snapshot(element));
    let mut node = ValidationError::new(key).with_target(target.cloned()).with_value(value);
    node.children = children;
    node
}

fn collect_elements<'e, C, N>(
    container: &C,
    entries: impl Iterator<Item = (String, &'e N)>,
    options: &ValidatorOptions,
) -> Vec<ValidationError>
where
    C: Serialize + 'static,
    N: Nested,
{
    let failing: Vec<_> = entries
        .filter_map(|(key, element)| {
            let children = element.nested_errors(options);
            (!children.is_empty()).then_some((key, element, children))
        })
        .collect();
    if failing.is_empty() {
        return Vec::new();
    }

    let target = container_target(container, options);
    failing
        .into_iter()
        .map(|(key, element, children)| element_node(target.as_ref(), key, element, children, options))
        .collect()
}

async fn collect_elements_async<'e, C, N>(
    container: &'e C,
    entries: Vec<(String, &'e N)>,
    options: &'e ValidatorOptions,
) -> Vec<ValidationError>
where
    C: Serialize + Sync + 'static,
    N: Nested,
{
    let children = join_all(
        entries
            .iter()
            .map(|(_, element)| element.nested_errors_async(options)),
    )
    .await;
    if children.iter().all(Vec::is_empty) {
        return Vec::new();
    }

    let target = container_target(container, options);
    entries
        .into_iter()
        .zip(children)
        .filter(|(_, children)| !children.is_empty())
        .map(|((key, element), children)| {
            element_node(target.as_ref(), key, element, children, options)
        })
        .collect()
}

macro_rules! positional_nested {
    ($($container:ident),* $(,)?) => {$(
        impl<N: Nested> Nested for $container<N> {
            fn nested_errors(&self, options: &ValidatorOptions) -> Vec<ValidationError> {
                let entries = self.iter().enumerate().map(|(i, e)| (i.to_string(), e));
                collect_elements(self, entries, options)
            }

            fn nested_errors_async<'a>(
                &'a self,
                options: &'a ValidatorOptions,
            ) -> BoxFuture<'a, Vec<ValidationError>> {
                let entries = self.iter().enumerate().map(|(i, e)| (i.to_string(), e)).collect();
                collect_elements_async(self, entries, options).boxed()
            }
        }
    )*};
}

macro_rules! keyed_nested {
    ($($container:ident),* $(,)?) => {$(
        impl<K, N> Nested for $container<K, N>
        where
            K: Display + Serialize + Send + Sync + 'static,
            N: Nested,
        {
            fn nested_errors(&self, options: &ValidatorOptions) -> Vec<ValidationError> {
                let entries = self.iter().map(|(k, e)| (k.to_string(), e));
                collect_elements(self, entries, options)
            }

            fn nested_errors_async<'a>(
                &'a self,
                options: &'a ValidatorOptions,
            ) -> BoxFuture<'a, Vec<ValidationError>> {
                let entries = self.iter().map(|(k, e)| (k.to_string(), e)).collect();
                collect_elements_async(self, entries, options).boxed()
            }
        }
    )*};
}

positional_nested!(Vec, IndexSet, BTreeSet);
keyed_nested!(IndexMap, BTreeMap);
