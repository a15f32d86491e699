//! Validator builder for fluent validation API.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::result::{FieldError, ValidationResult};
use super::validatable::Validatable;
use super::value::{InputValue, is_real_selection};
use super::ErrorDisplay;
use super::messages::ErrorMessages;

/// Type alias for boxed futures used in async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for sync validation rule closures.
type SyncRule<V> = Box<dyn Fn(&V) -> Result<(), String> + Send + Sync>;

/// Type alias for async validation rule closures.
type AsyncRule<V> = Box<dyn Fn(V) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digit pattern is valid"));

/// Internal representation of a registered field.
struct FieldEntry {
    name: String,
    field_id: String,
    set_error: Box<dyn Fn(Option<String>) + Send + Sync>,
    set_display: Box<dyn Fn(ErrorDisplay) + Send + Sync>,
    set_parent: Box<dyn Fn(bool) + Send + Sync>,
    reset: Box<dyn Fn() + Send + Sync>,
    /// First failing sync rule, if any.
    validate_sync: Box<dyn Fn() -> Option<String> + Send + Sync>,
    /// First failing rule, sync rules first.
    validate_async: Box<dyn Fn() -> BoxFuture<'static, Option<String>> + Send + Sync>,
}

impl FieldEntry {
    /// Apply an outcome to the input and collect the error.
    fn record(&self, outcome: Option<String>, errors: &mut Vec<FieldError>) {
        match outcome {
            Some(message) => {
                (self.set_error)(Some(message.clone()));
                errors.push(FieldError {
                    field_name: self.name.clone(),
                    field_id: self.field_id.clone(),
                    message,
                });
            }
            None => (self.set_error)(None),
        }
    }
}

/// A set of fields and their rules.
///
/// Built once with the fluent [`FieldBuilder`] API and run as often as
/// needed.
pub struct Validator {
    fields: Vec<FieldEntry>,
    messages: ErrorMessages,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("messages", &self.messages)
            .finish()
    }
}

impl Validator {
    /// Create a new validator with the default rule messages.
    pub fn new() -> Self {
        Self::with_messages(ErrorMessages::default())
    }

    /// Create a validator whose named rules ([`FieldBuilder::check`])
    /// report the given messages.
    pub fn with_messages(messages: ErrorMessages) -> Self {
        Self {
            fields: Vec::new(),
            messages,
        }
    }

    /// Messages used by named rules.
    pub fn messages(&self) -> &ErrorMessages {
        &self.messages
    }

    /// Add a field to validate.
    pub fn field<W: Validatable + Clone + 'static>(
        self,
        widget: &W,
        name: impl Into<String>,
    ) -> FieldBuilder<W>
    where
        W::Value: Clone + Send + 'static,
    {
        FieldBuilder {
            validator: self,
            widget: widget.clone(),
            name: name.into(),
            sync_rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }

    /// Names of the registered fields, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run all synchronous rules.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        for field in &self.fields {
            field.record((field.validate_sync)(), &mut errors);
        }
        log::debug!(
            "[validation] {} field(s) checked, {} invalid",
            self.fields.len(),
            errors.len()
        );
        ValidationResult::from_errors(errors)
    }

    /// Run all rules including async ones.
    pub async fn validate_async(&self) -> ValidationResult {
        let mut errors = Vec::new();
        for field in &self.fields {
            let outcome = (field.validate_async)().await;
            field.record(outcome, &mut errors);
        }
        ValidationResult::from_errors(errors)
    }

    /// Run the synchronous rules of one field.
    ///
    /// Returns `None` if no field has that name.
    pub fn validate_field(&self, name: &str) -> Option<ValidationResult> {
        let field = self.fields.iter().find(|f| f.name == name)?;
        let mut errors = Vec::new();
        field.record((field.validate_sync)(), &mut errors);
        Some(ValidationResult::from_errors(errors))
    }

    /// Set the error display mode of every field.
    pub fn set_error_display(&self, display: ErrorDisplay) {
        for field in &self.fields {
            (field.set_display)(display);
        }
    }

    /// Mirror marks onto every field's container, or stop doing so.
    pub fn set_mirror_parent(&self, mirror: bool) {
        for field in &self.fields {
            (field.set_parent)(mirror);
        }
    }

    /// Reset every field to its initial value.
    pub fn reset(&self) {
        for field in &self.fields {
            (field.reset)();
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// A built-in rule whose message comes from the validator's
/// [`ErrorMessages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Number,
    Email,
    /// A ticked checkbox.
    Checkbox,
    /// A ticked radio.
    Radio,
    /// A real option, not the placeholder.
    Select,
    /// At least this many characters.
    MinLen(usize),
    /// At most this many characters.
    MaxLen(usize),
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<W: Validatable> {
    validator: Validator,
    widget: W,
    name: String,
    sync_rules: Vec<SyncRule<W::Value>>,
    async_rules: Vec<AsyncRule<W::Value>>,
}

impl<W: Validatable + Clone + 'static> FieldBuilder<W>
where
    W::Value: Clone + Send + 'static,
{
    /// Add a custom synchronous validation rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&W::Value) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.sync_rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Add a custom asynchronous validation rule.
    pub fn rule_async<F, Fut>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(W::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let msg = msg.into();
        self.async_rules.push(Box::new(move |v| {
            let fut = f(v);
            let msg = msg.clone();
            Box::pin(async move { if fut.await { Ok(()) } else { Err(msg) } })
        }));
        self
    }

    /// Continue to the next field.
    pub fn field<W2: Validatable + Clone + 'static>(
        self,
        widget: &W2,
        name: impl Into<String>,
    ) -> FieldBuilder<W2>
    where
        W2::Value: Clone + Send + 'static,
    {
        self.build().field(widget, name)
    }

    /// Finish this field and return the validator.
    pub fn build(self) -> Validator {
        let field_id = self.widget.field_id();
        let name = self.name;

        let widget_for_sync = self.widget.clone();
        let widget_for_async = self.widget.clone();
        let widget_for_error = self.widget.clone();
        let widget_for_display = self.widget.clone();
        let widget_for_parent = self.widget.clone();
        let widget_for_reset = self.widget;

        let sync_rules = Arc::new(self.sync_rules);
        let async_rules = Arc::new(self.async_rules);

        let sync_rules_for_sync = Arc::clone(&sync_rules);

        let validate_sync: Box<dyn Fn() -> Option<String> + Send + Sync> = Box::new(move || {
            let value = widget_for_sync.validation_value();
            sync_rules_for_sync
                .iter()
                .find_map(|rule| rule(&value).err())
        });

        let sync_rules_for_async = Arc::clone(&sync_rules);
        let async_rules_for_async = Arc::clone(&async_rules);

        let validate_async: Box<dyn Fn() -> BoxFuture<'static, Option<String>> + Send + Sync> =
            Box::new(move || {
                let value = widget_for_async.validation_value();
                let sync_rules = Arc::clone(&sync_rules_for_async);
                let async_rules = Arc::clone(&async_rules_for_async);

                Box::pin(async move {
                    if let Some(msg) = sync_rules.iter().find_map(|rule| rule(&value).err()) {
                        return Some(msg);
                    }

                    for rule in async_rules.iter() {
                        let candidate = value.clone();
                        if let Err(msg) = rule(candidate).await {
                            return Some(msg);
                        }
                    }

                    None
                })
            });

        let set_error: Box<dyn Fn(Option<String>) + Send + Sync> = Box::new(move |msg| {
            if let Some(msg) = msg {
                widget_for_error.set_error(msg);
            } else {
                widget_for_error.clear_error();
            }
        });

        let set_display: Box<dyn Fn(ErrorDisplay) + Send + Sync> =
            Box::new(move |display| widget_for_display.set_error_display(display));

        let set_parent: Box<dyn Fn(bool) + Send + Sync> =
            Box::new(move |mirror| widget_for_parent.set_mirror_parent(mirror));

        let reset: Box<dyn Fn() + Send + Sync> = Box::new(move || widget_for_reset.reset());

        let mut validator = self.validator;
        validator.fields.push(FieldEntry {
            name,
            field_id,
            set_error,
            set_display,
            set_parent,
            reset,
            validate_sync,
            validate_async,
        });

        validator
    }

    /// Finish this field and run all synchronous rules.
    pub fn validate(self) -> ValidationResult {
        self.build().validate()
    }

    /// Finish this field and run all rules including async ones.
    pub async fn validate_async(self) -> ValidationResult {
        self.build().validate_async().await
    }
}

// Built-in rules. Each only inspects the value shape it applies to and
// passes any other shape.
impl<W: Validatable + Clone + 'static> FieldBuilder<W>
where
    W::Value: InputValue + Clone + Send + 'static,
{
    /// Require a non-empty text, a ticked box or a real selection.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| {
                if let Some(text) = v.as_text() {
                    !text.is_empty()
                } else if let Some(checked) = v.as_checked() {
                    checked
                } else if let Some(selected) = v.as_selected() {
                    is_real_selection(selected)
                } else {
                    true
                }
            },
            msg,
        )
    }

    /// Require the text to consist of ASCII digits only.
    pub fn number(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.as_text().is_none_or(|t| DIGITS.is_match(t)), msg)
    }

    /// Require a valid email address. An empty text is not one.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| {
                v.as_text()
                    .is_none_or(|t| email_address::EmailAddress::is_valid(&t.to_lowercase()))
            },
            msg,
        )
    }

    /// Require a checkbox or radio to be ticked.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.as_checked().unwrap_or(true), msg)
    }

    /// Require a select to pick something other than the placeholder option.
    pub fn selected(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.as_selected().is_none_or(is_real_selection), msg)
    }

    /// Require the text to equal another input's text at validation time.
    pub fn equals<O>(self, other: &O, msg: impl Into<String>) -> Self
    where
        O: Validatable + Clone + 'static,
        O::Value: InputValue,
    {
        let other = other.clone();
        self.rule(
            move |v| {
                let theirs = other.validation_value();
                v.as_text() == theirs.as_text()
            },
            msg,
        )
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.as_text().is_none_or(|t| t.chars().count() >= min),
            msg,
        )
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.as_text().is_none_or(|t| t.chars().count() <= max),
            msg,
        )
    }

    /// Require the text to match a pattern.
    pub fn pattern(self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.as_text().is_none_or(|t| pattern.is_match(t)), msg)
    }

    /// Add a built-in rule reporting the validator's message for it.
    pub fn check(self, rule: Rule) -> Self {
        let m = self.validator.messages.clone();
        match rule {
            Rule::Required => self.required(m.required),
            Rule::Number => self.number(m.number),
            Rule::Email => self.email(m.email),
            Rule::Checkbox => self.checked(m.checkbox),
            Rule::Radio => self.checked(m.radio),
            Rule::Select => self.selected(m.select),
            Rule::MinLen(min) => self.min_length(min, m.min_len),
            Rule::MaxLen(max) => self.max_length(max, m.max_len),
        }
    }

    /// Like [`FieldBuilder::equals`], reporting the validator's `equal`
    /// message.
    pub fn check_equals<O>(self, other: &O) -> Self
    where
        O: Validatable + Clone + 'static,
        O::Value: InputValue,
    {
        let msg = self.validator.messages.equal.clone();
        self.equals(other, msg)
    }
}
