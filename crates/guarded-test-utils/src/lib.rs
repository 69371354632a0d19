//! Testing utilities for the guarded workspace
//!
//! Shared record fixtures, a rule engine that counts its calls, and a
//! tracing subscriber for test output.

#![allow(missing_docs)]

use async_trait::async_trait;
use guarded_core::{plain_argument, Construct, RuleEngine};
use guarded_rules::{Pending, Schema, Validate, ValidationError, Validator};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

/// `name` must be at least five characters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
}

impl Validate for Profile {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().field("name", |p| &p.name, |r| r.min_length(5))
    }
}

impl Construct for Profile {
    type Args = (String,);

    fn construct((name,): Self::Args) -> Self {
        Self { name }
    }
}

/// `Profile` whose name arrives later
#[derive(Debug, Clone, Serialize)]
pub struct LateProfile {
    pub name: Pending<String>,
}

impl Validate for LateProfile {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().awaited("name", |p| &p.name, |r| r.min_length(5))
    }
}

impl Construct for LateProfile {
    type Args = (Pending<String>,);

    fn construct((name,): Self::Args) -> Self {
        Self { name }
    }
}

/// A record whose second constructor argument is never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
}

impl Validate for Badge {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new().field("label", |b| &b.label, |r| r.is_not_empty().max_length(12))
    }
}

impl Construct for Badge {
    type Args = (String, Option<Pending<String>>);

    fn construct((label, _ignored): Self::Args) -> Self {
        Self { label }
    }
}

/// Several independent fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub email: String,
    pub website: Option<String>,
    pub age: i64,
    pub handle: String,
}

impl Validate for Contact {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("email", |c| &c.email, |r| r.is_email())
            .field("website", |c| &c.website, |r| r.optional().is_url())
            .field("age", |c| &c.age, |r| r.is_int().min(0.0).max(150.0))
            .field("handle", |c| &c.handle, |r| {
                r.matches(Regex::new("^[a-z][a-z0-9_]*$").unwrap())
                    .context(json!({ "hint": "lowercase letters, digits and _" }))
            })
    }
}

impl Construct for Contact {
    type Args = (String, Option<String>, i64, String);

    fn construct((email, website, age, handle): Self::Args) -> Self {
        Self {
            email,
            website,
            age,
            handle,
        }
    }
}

pub fn valid_contact_args() -> <Contact as Construct>::Args {
    ("ada@example.org".into(), Some("https://example.org".into()), 36, "ada_l".into())
}

/// Element type for container fixtures
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag {
    pub name: String,
    pub url: String,
}

impl Tag {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    pub fn valid(name: &str) -> Self {
        Self::new(name, "https://tags.example.org")
    }
}

impl Validate for Tag {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("name", |t| &t.name, |r| r.min_length(3))
            .field("url", |t| &t.url, |r| r.is_url())
    }
}

plain_argument!(Tag);

/// Nested records in a keyed map
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub title: String,
    pub tags: IndexMap<String, Tag>,
}

impl Validate for Catalog {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new()
            .field("title", |c| &c.title, |r| r.is_not_empty())
            .field("tags", |c| &c.tags, |r| r.nested())
    }
}

impl Construct for Catalog {
    type Args = (String, IndexMap<String, Tag>);

    fn construct((title, tags): Self::Args) -> Self {
        Self { title, tags }
    }
}

/// Rule engine that forwards to a [`Validator`] and counts calls
#[derive(Debug, Default)]
pub struct RecordingEngine {
    inner: Validator,
    sync_calls: AtomicUsize,
    async_calls: AtomicUsize,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    pub fn async_calls(&self) -> usize {
        self.async_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.sync_calls() + self.async_calls()
    }
}

#[async_trait]
impl RuleEngine for RecordingEngine {
    fn evaluate_sync<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.validate_sync(instance)
    }

    async fn evaluate_async<T: Validate>(&self, instance: &T) -> Vec<ValidationError> {
        self.async_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.validate(instance).await
    }
}

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("guarded_core=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
