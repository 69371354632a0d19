//! Field rules and field checks
//!
//! [`FieldRules`] is the per-field rule list a schema author builds. Once a
//! schema is assembled each field becomes a boxed [`FieldCheck`], erasing the
//! field type so a schema is just an ordered list of checks.

use crate::constraint::{self, Check, Constraint, Message, RuleArgs};
use crate::error::ValidationError;
use crate::nested::Nested;
use crate::options::ValidatorOptions;
use crate::pending::Awaitable;
use crate::target::{snapshot, Target};
use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

type Condition<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Whole numbers are stored as integers so `$constraint1` reads `5`, not `5.0`
#[allow(clippy::cast_possible_truncation)]
fn number_arg(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Hooks captured when a field is marked `nested()`
struct NestedHooks<F> {
    sync: fn(&F, &ValidatorOptions) -> Vec<ValidationError>,
    deferred: for<'a> fn(&'a F, &'a ValidatorOptions) -> BoxFuture<'a, Vec<ValidationError>>,
}

/// Rules declared for one field of record `T` whose value has type `F`
pub struct FieldRules<T, F> {
    property: &'static str,
    target_name: &'static str,
    conditions: Vec<Condition<T>>,
    optional: bool,
    constraints: Vec<Constraint<T>>,
    nested: Option<NestedHooks<F>>,
    _field: PhantomData<fn(&F)>,
}

impl<T: 'static, F> FieldRules<T, F> {
    pub(crate) fn new(property: &'static str, target_name: &'static str) -> Self {
        Self {
            property,
            target_name,
            conditions: Vec::new(),
            optional: false,
            constraints: Vec::new(),
            nested: None,
            _field: PhantomData,
        }
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// Number of declared constraints
    #[inline]
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn push(mut self, constraint: Constraint<T>) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn modify_last(mut self, apply: impl FnOnce(&mut Constraint<T>)) -> Self {
        match self.constraints.last_mut() {
            Some(last) => apply(last),
            None => tracing::warn!(
                property = self.property,
                "constraint modifier used before any constraint was declared"
            ),
        }
        self
    }

    /// Only validate this field when `condition` holds for the record
    #[must_use]
    pub fn validate_if(mut self, condition: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Skip the whole field, `is_defined` included, when the value is missing
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Value must not be missing (`None`/`null`)
    #[must_use]
    pub fn is_defined(self) -> Self {
        let mut defined = Constraint::builtin(
            "isDefined",
            Vec::new(),
            "$property should not be null or undefined",
            constraint::is_defined,
        );
        defined.always = true;
        self.push(defined)
    }

    /// Value must not be missing or an empty string
    #[must_use]
    pub fn is_not_empty(self) -> Self {
        self.push(Constraint::builtin(
            "isNotEmpty",
            Vec::new(),
            "$property should not be empty",
            constraint::is_not_empty,
        ))
    }

    /// Value must equal `expected`
    #[must_use]
    pub fn equals(self, expected: impl Serialize) -> Self {
        self.push(Constraint::builtin(
            "equals",
            vec![snapshot(&expected)],
            "$property must be equal to $constraint1",
            constraint::equals,
        ))
    }

    /// String value must contain `seed`
    #[must_use]
    pub fn contains(self, seed: &str) -> Self {
        self.push(Constraint::builtin(
            "contains",
            vec![Value::from(seed)],
            "$property must contain a $constraint1 string",
            constraint::contains,
        ))
    }

    /// String value must have at least `min` characters
    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.push(Constraint::builtin(
            "minLength",
            vec![Value::from(min)],
            "$property must be longer than or equal to $constraint1 characters",
            constraint::min_length,
        ))
    }

    /// String value must have at most `max` characters
    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.push(Constraint::builtin(
            "maxLength",
            vec![Value::from(max)],
            "$property must be shorter than or equal to $constraint1 characters",
            constraint::max_length,
        ))
    }

    /// Numeric value must be at least `min`
    #[must_use]
    pub fn min(self, min: f64) -> Self {
        self.push(Constraint::builtin(
            "min",
            vec![number_arg(min)],
            "$property must not be less than $constraint1",
            constraint::min,
        ))
    }

    /// Numeric value must be at most `max`
    #[must_use]
    pub fn max(self, max: f64) -> Self {
        self.push(Constraint::builtin(
            "max",
            vec![number_arg(max)],
            "$property must not be greater than $constraint1",
            constraint::max,
        ))
    }

    /// Value must be a string
    #[must_use]
    pub fn is_string(self) -> Self {
        self.push(Constraint::builtin(
            "isString",
            Vec::new(),
            "$property must be a string",
            constraint::is_string,
        ))
    }

    /// Value must be a number
    #[must_use]
    pub fn is_number(self) -> Self {
        self.push(Constraint::builtin(
            "isNumber",
            Vec::new(),
            "$property must be a number conforming to the specified constraints",
            constraint::is_number,
        ))
    }

    /// Value must be an integer
    #[must_use]
    pub fn is_int(self) -> Self {
        self.push(Constraint::builtin(
            "isInt",
            Vec::new(),
            "$property must be an integer number",
            constraint::is_int,
        ))
    }

    /// Value must be a boolean
    #[must_use]
    pub fn is_boolean(self) -> Self {
        self.push(Constraint::builtin(
            "isBoolean",
            Vec::new(),
            "$property must be a boolean value",
            constraint::is_boolean,
        ))
    }

    /// Value must be an array
    #[must_use]
    pub fn is_array(self) -> Self {
        self.push(Constraint::builtin(
            "isArray",
            Vec::new(),
            "$property must be an array",
            constraint::is_array,
        ))
    }

    /// Value must be an RFC 3339 timestamp
    #[must_use]
    pub fn is_date(self) -> Self {
        self.push(Constraint::builtin(
            "isDate",
            Vec::new(),
            "$property must be a Date instance",
            constraint::is_date,
        ))
    }

    /// Value must be an http(s) or ftp URL
    #[must_use]
    pub fn is_url(self) -> Self {
        self.push(Constraint::builtin(
            "isUrl",
            Vec::new(),
            "$property must be a URL address",
            constraint::is_url,
        ))
    }

    /// Value must look like an email address
    #[must_use]
    pub fn is_email(self) -> Self {
        self.push(Constraint::builtin(
            "isEmail",
            Vec::new(),
            "$property must be an email",
            constraint::is_email,
        ))
    }

    /// String value must match `pattern`
    #[must_use]
    pub fn matches(self, pattern: Regex) -> Self {
        let source = Value::from(pattern.as_str());
        self.push(Constraint::builtin(
            "matches",
            vec![source],
            "$property must match $constraint1 regular expression",
            move |value, _| value.as_str().is_some_and(|s| pattern.is_match(s)),
        ))
    }

    /// Array value must have at least `min` elements
    #[must_use]
    pub fn array_min_size(self, min: usize) -> Self {
        self.push(Constraint::builtin(
            "arrayMinSize",
            vec![Value::from(min)],
            "$property must contain at least $constraint1 elements",
            constraint::array_min_size,
        ))
    }

    /// Custom rule with access to the whole record
    #[must_use]
    pub fn rule(
        self,
        name: &str,
        check: impl Fn(&RuleArgs<'_, T>) -> bool + Send + Sync + 'static,
    ) -> Self {
        let fallback = format!("$property failed the {name} rule");
        self.push(Constraint::sync(
            name,
            Vec::new(),
            Message::Template(fallback),
            Box::new(check),
        ))
    }

    /// Custom rule whose verdict is itself pending
    ///
    /// Skipped by synchronous validation.
    #[must_use]
    pub fn async_rule(
        self,
        name: &str,
        check: impl Fn(&RuleArgs<'_, T>) -> BoxFuture<'static, bool> + Send + Sync + 'static,
    ) -> Self {
        let fallback = format!("$property failed the {name} rule");
        self.push(Constraint::deferred(
            name,
            Vec::new(),
            Message::Template(fallback),
            Box::new(check),
        ))
    }

    /// Arguments for the last constraint (`$constraint1`, ...)
    #[must_use]
    pub fn args<I, V>(self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.modify_last(|last| last.args = args)
    }

    /// Message template for the last constraint
    #[must_use]
    pub fn message(self, template: impl Into<String>) -> Self {
        let template = template.into();
        self.modify_last(|last| last.message = Some(Message::Template(template)))
    }

    /// Message builder for the last constraint
    #[must_use]
    pub fn message_with(
        self,
        build: impl Fn(&RuleArgs<'_, T>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.modify_last(|last| last.message = Some(Message::Dynamic(Box::new(build))))
    }

    /// Context payload reported with the last constraint when it fails
    #[must_use]
    pub fn context(self, context: Value) -> Self {
        self.modify_last(|last| last.context = Some(context))
    }
}

impl<T: 'static, F: Nested> FieldRules<T, F> {
    /// Validate the value's own rules (records, containers of records)
    #[must_use]
    pub fn nested(mut self) -> Self {
        self.nested = Some(NestedHooks {
            sync: F::nested_errors,
            deferred: F::nested_errors_async,
        });
        self
    }
}

/// Work left after the up-front checks of a field
struct Draft<'a, T> {
    error: ValidationError,
    value: Value,
    remaining: Vec<&'a Constraint<T>>,
    missing_skipped: bool,
}

impl<T, F> FieldRules<T, F>
where
    T: Send + Sync + 'static,
    F: Serialize + Send + Sync,
{
    /// Conditions, snapshot, presence checks. `None` when the field is skipped.
    fn begin(
        &self,
        object: &T,
        value: &F,
        target: Option<&Target>,
        options: &ValidatorOptions,
    ) -> Option<Draft<'_, T>> {
        if !self.conditions.iter().all(|condition| condition(object)) {
            return None;
        }

        let value = snapshot(value);
        if self.optional && value.is_null() {
            return None;
        }
        let error = ValidationError::new(self.property)
            .with_target(target.cloned())
            .with_value(options.validation_error.value.then(|| value.clone()));
        let mut draft = Draft {
            error,
            value,
            remaining: Vec::new(),
            missing_skipped: false,
        };

        let (always, rest): (Vec<_>, Vec<_>) = self.constraints.iter().partition(|c| c.always);
        for constraint in always {
            self.apply_sync(constraint, object, &mut draft, options);
        }

        draft.missing_skipped = draft.value.is_null() && options.skip_missing_properties;
        if !draft.missing_skipped {
            draft.remaining = rest;
        }
        Some(draft)
    }

    fn rule_args<'a>(
        &self,
        constraint: &'a Constraint<T>,
        object: &'a T,
        value: &'a Value,
    ) -> RuleArgs<'a, T> {
        RuleArgs {
            object,
            property: self.property,
            value,
            constraints: &constraint.args,
            target_name: self.target_name,
        }
    }

    fn record_failure(
        &self,
        constraint: &Constraint<T>,
        args: &RuleArgs<'_, T>,
        error: &mut ValidationError,
        options: &ValidatorOptions,
    ) {
        let message = constraint.message_for(args, options.dismiss_default_messages);
        error.add_constraint(constraint.name.clone(), message);
        if let Some(context) = &constraint.context {
            error.add_context(constraint.name.clone(), context.clone());
        }
    }

    fn stopped(draft: &Draft<'_, T>, options: &ValidatorOptions) -> bool {
        options.stop_at_first_error && draft.error.constraints.is_some()
    }

    fn apply_sync(
        &self,
        constraint: &Constraint<T>,
        object: &T,
        draft: &mut Draft<'_, T>,
        options: &ValidatorOptions,
    ) {
        let Check::Sync(check) = &constraint.check else {
            return;
        };
        let args = self.rule_args(constraint, object, &draft.value);
        if !check(&args) {
            self.record_failure(constraint, &args, &mut draft.error, options);
        }
    }

    fn finish(draft: Draft<'_, T>) -> Option<ValidationError> {
        draft.error.has_failures().then_some(draft.error)
    }

    /// Evaluate synchronously; pending-verdict rules are skipped
    pub(crate) fn evaluate(
        &self,
        object: &T,
        value: &F,
        target: Option<&Target>,
        options: &ValidatorOptions,
    ) -> Option<ValidationError> {
        let mut draft = self.begin(object, value, target, options)?;
        let remaining = std::mem::take(&mut draft.remaining);

        for constraint in remaining.iter().filter(|c| !c.is_async()) {
            if Self::stopped(&draft, options) {
                break;
            }
            self.apply_sync(constraint, object, &mut draft, options);
        }

        if let (Some(hooks), false) = (&self.nested, draft.missing_skipped) {
            draft.error.children = (hooks.sync)(value, options);
        }
        Self::finish(draft)
    }

    /// Evaluate, awaiting pending-verdict rules and nested values
    pub(crate) async fn evaluate_async(
        &self,
        object: &T,
        value: &F,
        target: Option<&Target>,
        options: &ValidatorOptions,
    ) -> Option<ValidationError> {
        let mut draft = self.begin(object, value, target, options)?;
        let remaining = std::mem::take(&mut draft.remaining);

        for constraint in remaining {
            if Self::stopped(&draft, options) {
                break;
            }
            match &constraint.check {
                Check::Sync(_) => self.apply_sync(constraint, object, &mut draft, options),
                Check::Async(check) => {
                    let verdict = check(&self.rule_args(constraint, object, &draft.value));
                    if !verdict.await {
                        let args = self.rule_args(constraint, object, &draft.value);
                        self.record_failure(constraint, &args, &mut draft.error, options);
                    }
                }
            }
        }

        if let (Some(hooks), false) = (&self.nested, draft.missing_skipped) {
            draft.error.children = (hooks.deferred)(value, options).await;
        }
        Self::finish(draft)
    }
}

/// One type-erased field of a schema
pub(crate) trait FieldCheck<T>: Send + Sync {
    fn check(&self, object: &T, target: Option<&Target>, options: &ValidatorOptions) -> Option<ValidationError>;

    fn check_async<'a>(
        &'a self,
        object: &'a T,
        target: Option<&'a Target>,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Option<ValidationError>>;
}

/// A field read directly off the record
pub(crate) struct PlainField<T, F> {
    pub(crate) getter: fn(&T) -> &F,
    pub(crate) rules: FieldRules<T, F>,
}

impl<T, F> FieldCheck<T> for PlainField<T, F>
where
    T: Send + Sync + 'static,
    F: Serialize + Send + Sync,
{
    fn check(&self, object: &T, target: Option<&Target>, options: &ValidatorOptions) -> Option<ValidationError> {
        self.rules.evaluate(object, (self.getter)(object), target, options)
    }

    fn check_async<'a>(
        &'a self,
        object: &'a T,
        target: Option<&'a Target>,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Option<ValidationError>> {
        self.rules
            .evaluate_async(object, (self.getter)(object), target, options)
            .boxed()
    }
}

/// A field whose value has to be awaited before its rules apply
pub(crate) struct AwaitedField<T, A: Awaitable> {
    pub(crate) getter: fn(&T) -> &A,
    pub(crate) rules: FieldRules<T, A::Output>,
}

impl<T, A> FieldCheck<T> for AwaitedField<T, A>
where
    T: Send + Sync + 'static,
    A: Awaitable,
{
    fn check(&self, object: &T, target: Option<&Target>, options: &ValidatorOptions) -> Option<ValidationError> {
        match (self.getter)(object).settled() {
            Some(value) => self.rules.evaluate(object, &value, target, options),
            None => {
                tracing::trace!(
                    property = self.rules.property(),
                    "pending field skipped by synchronous validation"
                );
                None
            }
        }
    }

    fn check_async<'a>(
        &'a self,
        object: &'a T,
        target: Option<&'a Target>,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Option<ValidationError>> {
        async move {
            let value = (self.getter)(object).settle().await;
            self.rules.evaluate_async(object, &value, target, options).await
        }
        .boxed()
    }
}

/// A base record's field spliced into a composite record
///
/// The base check runs against the base value but reports the composite
/// record as its target.
pub(crate) struct InheritedField<T, B> {
    pub(crate) getter: fn(&T) -> &B,
    pub(crate) inner: Box<dyn FieldCheck<B>>,
}

impl<T, B> FieldCheck<T> for InheritedField<T, B>
where
    T: Send + Sync + 'static,
    B: Send + Sync + 'static,
{
    fn check(&self, object: &T, target: Option<&Target>, options: &ValidatorOptions) -> Option<ValidationError> {
        self.inner.check((self.getter)(object), target, options)
    }

    fn check_async<'a>(
        &'a self,
        object: &'a T,
        target: Option<&'a Target>,
        options: &'a ValidatorOptions,
    ) -> BoxFuture<'a, Option<ValidationError>> {
        self.inner.check_async((self.getter)(object), target, options)
    }
}
