//! Form submission flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::validation::{ErrorDisplay, ErrorMessages, FieldError, ValidationResult, Validator};

/// Default delay before a delayed submission goes out.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 3000;

/// Default label of the success message's close control.
pub const DEFAULT_CLOSE_TEXT: &str = "\u{2717}";

/// Options recognised by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Mirror valid/invalid marks onto each field's container.
    pub parent: bool,

    /// Validate single fields as they are edited.
    pub keypress: bool,

    /// Show error messages next to invalid fields, not just the mark.
    pub show_errors: bool,

    /// Submit the form once it is valid.
    pub submit: bool,

    /// Wait `delay` milliseconds before submitting.
    pub submit_delay: bool,

    pub delay: u64,

    /// Clear every field after a successful submission.
    ///
    /// Off by default, so fields keep their values after a submit unless
    /// this is set.
    pub reset_form: bool,

    /// Show `msg` after a successful submission.
    pub success_msg: bool,

    pub msg: String,

    /// Label of the control that closes the success message.
    pub close_text: String,

    /// Where to navigate after a successful submission.
    pub redirect: Option<String>,

    /// Messages for rules added with [`FieldBuilder::check`].
    ///
    /// [`FieldBuilder::check`]: crate::validation::FieldBuilder::check
    pub errors: ErrorMessages,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            parent: false,
            keypress: false,
            show_errors: false,
            submit: true,
            submit_delay: true,
            delay: DEFAULT_SUBMIT_DELAY_MS,
            reset_form: false,
            success_msg: false,
            msg: "Form has been successfully sent!".into(),
            close_text: DEFAULT_CLOSE_TEXT.into(),
            redirect: None,
            errors: ErrorMessages::default(),
        }
    }
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON options object.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Start a validator whose named rules report `errors`.
    pub fn validator(&self) -> Validator {
        Validator::with_messages(self.errors.clone())
    }

    /// Mirror marks onto field containers.
    pub fn parent(mut self, enabled: bool) -> Self {
        self.parent = enabled;
        self
    }

    /// Enable validation while typing.
    pub fn keypress(mut self, enabled: bool) -> Self {
        self.keypress = enabled;
        self
    }

    /// Show error messages next to fields.
    pub fn show_errors(mut self, enabled: bool) -> Self {
        self.show_errors = enabled;
        self
    }

    /// Submit immediately instead of after `delay`.
    pub fn immediate(mut self) -> Self {
        self.submit_delay = false;
        self
    }

    /// Clear fields after a successful submission.
    pub fn reset_form(mut self, enabled: bool) -> Self {
        self.reset_form = enabled;
        self
    }

    /// Show a message after a successful submission.
    pub fn success_message(mut self, msg: impl Into<String>) -> Self {
        self.success_msg = true;
        self.msg = msg.into();
        self
    }

    /// Navigate to `url` after a successful submission.
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect = Some(url.into());
        self
    }

    fn error_display(&self) -> ErrorDisplay {
        if self.show_errors {
            ErrorDisplay::Message
        } else {
            ErrorDisplay::MarkOnly
        }
    }
}

/// What the host should do after a submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub valid: bool,
    /// First error of each invalid field.
    pub errors: Vec<FieldError>,
    /// Send the form after this delay; `None` means do not send.
    pub submit_after: Option<Duration>,
    pub success_message: Option<String>,
    /// Close label shown with the success message.
    pub close_text: Option<String>,
    pub redirect: Option<String>,
}

/// A validated form.
#[derive(Debug)]
pub struct Form {
    options: FormOptions,
    validator: Validator,
}

impl Form {
    /// Bind options to the fields registered on `validator`.
    pub fn new(options: FormOptions, validator: Validator) -> Self {
        validator.set_error_display(options.error_display());
        validator.set_mirror_parent(options.parent);
        Self { options, validator }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate a single field after it was edited.
    ///
    /// Returns `None` when keypress validation is off or no field has that
    /// name.
    pub fn validate_field(&self, name: &str) -> Option<ValidationResult> {
        if !self.options.keypress {
            return None;
        }
        self.validator.validate_field(name)
    }

    /// Validate every field and decide what happens next.
    pub fn submit(&self) -> SubmitOutcome {
        let result = self.validator.validate();
        self.conclude(result)
    }

    /// Like [`Form::submit`], including async rules.
    pub async fn submit_async(&self) -> SubmitOutcome {
        let result = self.validator.validate_async().await;
        self.conclude(result)
    }

    fn conclude(&self, result: ValidationResult) -> SubmitOutcome {
        if result.is_invalid() {
            log::debug!(
                "[validation] submit blocked by {} invalid field(s)",
                result.errors().len()
            );
            return SubmitOutcome {
                valid: false,
                errors: result.into_errors(),
                ..Default::default()
            };
        }

        let options = &self.options;
        if options.reset_form {
            self.validator.reset();
        }

        let submit_after = options.submit.then(|| {
            if options.submit_delay {
                Duration::from_millis(options.delay)
            } else {
                Duration::ZERO
            }
        });

        SubmitOutcome {
            valid: true,
            errors: Vec::new(),
            submit_after,
            success_message: options.success_msg.then(|| options.msg.clone()),
            close_text: options.success_msg.then(|| options.close_text.clone()),
            redirect: options.redirect.clone(),
        }
    }
}
