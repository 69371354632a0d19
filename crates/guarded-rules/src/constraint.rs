//! Constraints and built-in checks
//!
//! Constraints inspect the JSON snapshot of a field, so the same built-in
//! works on `String`, `Option<String>` or an untyped `serde_json::Value`
//! payload. Custom rules additionally see the typed record they belong to.

use crate::message::{interpolate, TemplateArgs};
use chrono::DateTime;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?|ftp)://([^\s/$.?#][^\s/]*\.[^\s/]+|localhost)(:\d+)?(/[^\s]*)?$")
        .expect("url pattern")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Everything a check gets to look at
#[derive(Debug)]
pub struct RuleArgs<'a, T> {
    /// The record being validated
    pub object: &'a T,
    /// Field name
    pub property: &'a str,
    /// JSON snapshot of the field value
    pub value: &'a Value,
    /// Arguments declared with the constraint
    pub constraints: &'a [Value],
    /// Short type name of the record
    pub target_name: &'a str,
}

impl<T> RuleArgs<'_, T> {
    /// First declared argument as a string, the usual "related property" slot
    #[must_use]
    pub fn related_property(&self) -> Option<&str> {
        self.constraints.first().and_then(Value::as_str)
    }

    fn template(&self) -> TemplateArgs<'_> {
        TemplateArgs {
            property: self.property,
            value: self.value,
            target: self.target_name,
            constraints: self.constraints,
        }
    }
}

pub(crate) type SyncCheck<T> = Box<dyn Fn(&RuleArgs<'_, T>) -> bool + Send + Sync>;
pub(crate) type AsyncCheck<T> =
    Box<dyn Fn(&RuleArgs<'_, T>) -> BoxFuture<'static, bool> + Send + Sync>;
pub(crate) type MessageFn<T> = Box<dyn Fn(&RuleArgs<'_, T>) -> String + Send + Sync>;

pub(crate) enum Check<T> {
    Sync(SyncCheck<T>),
    Async(AsyncCheck<T>),
}

/// Message source for a constraint
pub(crate) enum Message<T> {
    Template(String),
    Dynamic(MessageFn<T>),
}

impl<T> Message<T> {
    fn render(&self, args: &RuleArgs<'_, T>) -> String {
        match self {
            Self::Template(template) => interpolate(template, &args.template()),
            Self::Dynamic(build) => build(args),
        }
    }
}

/// One declared constraint on a field
pub(crate) struct Constraint<T> {
    pub(crate) name: String,
    pub(crate) check: Check<T>,
    pub(crate) args: Vec<Value>,
    pub(crate) message: Option<Message<T>>,
    pub(crate) default_message: Message<T>,
    pub(crate) context: Option<Value>,
    /// Evaluated even for missing values under `skip_missing_properties`
    pub(crate) always: bool,
}

impl<T> Constraint<T> {
    pub(crate) fn sync(
        name: impl Into<String>,
        args: Vec<Value>,
        default_message: Message<T>,
        check: SyncCheck<T>,
    ) -> Self {
        Self {
            name: name.into(),
            check: Check::Sync(check),
            args,
            message: None,
            default_message,
            context: None,
            always: false,
        }
    }

    pub(crate) fn deferred(
        name: impl Into<String>,
        args: Vec<Value>,
        default_message: Message<T>,
        check: AsyncCheck<T>,
    ) -> Self {
        Self {
            name: name.into(),
            check: Check::Async(check),
            args,
            message: None,
            default_message,
            context: None,
            always: false,
        }
    }

    pub(crate) fn is_async(&self) -> bool {
        matches!(self.check, Check::Async(_))
    }

    /// Resolve the failure message for this constraint
    pub(crate) fn message_for(&self, args: &RuleArgs<'_, T>, dismiss_defaults: bool) -> String {
        match &self.message {
            Some(message) => message.render(args),
            None if dismiss_defaults => String::new(),
            None => self.default_message.render(args),
        }
    }
}

impl<T: 'static> Constraint<T> {
    /// Built-in check over the value snapshot only
    pub(crate) fn builtin(
        name: &'static str,
        args: Vec<Value>,
        template: &'static str,
        check: impl Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::sync(
            name,
            args,
            Message::Template(template.to_string()),
            Box::new(move |rule: &RuleArgs<'_, T>| check(rule.value, rule.constraints)),
        )
    }
}

pub(crate) fn is_defined(value: &Value, _: &[Value]) -> bool {
    !value.is_null()
}

pub(crate) fn is_not_empty(value: &Value, _: &[Value]) -> bool {
    !value.is_null() && value.as_str() != Some("")
}

pub(crate) fn equals(value: &Value, args: &[Value]) -> bool {
    args.first() == Some(value)
}

pub(crate) fn contains(value: &Value, args: &[Value]) -> bool {
    match (value.as_str(), args.first().and_then(Value::as_str)) {
        (Some(value), Some(seed)) => value.contains(seed),
        _ => false,
    }
}

fn first_count(args: &[Value]) -> Option<usize> {
    args.first()
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
}

pub(crate) fn min_length(value: &Value, args: &[Value]) -> bool {
    match (value.as_str(), first_count(args)) {
        (Some(value), Some(min)) => value.chars().count() >= min,
        _ => false,
    }
}

pub(crate) fn max_length(value: &Value, args: &[Value]) -> bool {
    match (value.as_str(), first_count(args)) {
        (Some(value), Some(max)) => value.chars().count() <= max,
        _ => false,
    }
}

pub(crate) fn min(value: &Value, args: &[Value]) -> bool {
    match (value.as_f64(), args.first().and_then(Value::as_f64)) {
        (Some(value), Some(min)) => value >= min,
        _ => false,
    }
}

pub(crate) fn max(value: &Value, args: &[Value]) -> bool {
    match (value.as_f64(), args.first().and_then(Value::as_f64)) {
        (Some(value), Some(max)) => value <= max,
        _ => false,
    }
}

pub(crate) fn is_string(value: &Value, _: &[Value]) -> bool {
    value.is_string()
}

pub(crate) fn is_number(value: &Value, _: &[Value]) -> bool {
    value.is_number()
}

pub(crate) fn is_int(value: &Value, _: &[Value]) -> bool {
    value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|n| n.fract() == 0.0)
}

pub(crate) fn is_boolean(value: &Value, _: &[Value]) -> bool {
    value.is_boolean()
}

pub(crate) fn is_array(value: &Value, _: &[Value]) -> bool {
    value.is_array()
}

pub(crate) fn is_date(value: &Value, _: &[Value]) -> bool {
    value
        .as_str()
        .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
}

pub(crate) fn is_url(value: &Value, _: &[Value]) -> bool {
    value.as_str().is_some_and(|s| URL.is_match(s))
}

pub(crate) fn is_email(value: &Value, _: &[Value]) -> bool {
    value.as_str().is_some_and(|s| EMAIL.is_match(s))
}

pub(crate) fn array_min_size(value: &Value, args: &[Value]) -> bool {
    match (value.as_array(), first_count(args)) {
        (Some(items), Some(min)) => items.len() >= min,
        _ => false,
    }
}
