//! Message templates
//!
//! Templates may reference `$property`, `$value`, `$target` and
//! `$constraint1` .. `$constraintN` (the constraint's declared arguments,
//! one-based).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static CONSTRAINT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$constraint(\d+)").expect("constraint token pattern"));

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub(crate) struct TemplateArgs<'a> {
    pub(crate) property: &'a str,
    pub(crate) value: &'a Value,
    pub(crate) target: &'a str,
    pub(crate) constraints: &'a [Value],
}

/// Substitute template tokens
pub(crate) fn interpolate(template: &str, args: &TemplateArgs<'_>) -> String {
    let with_constraints = CONSTRAINT_TOKEN.replace_all(template, |caps: &Captures<'_>| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| args.constraints.get(index))
            .map(display_value)
            .unwrap_or_default()
    });

    with_constraints
        .replace("$value", &display_value(args.value))
        .replace("$property", args.property)
        .replace("$target", args.target)
}

/// Loose string form of a JSON value, the way it reads inside a sentence
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
