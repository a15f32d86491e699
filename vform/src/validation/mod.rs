//! Declarative form validation.
//!
//! Fields are registered on a [`Validator`] with a fluent list of rules.
//! Rules run in the order they were added and only the first failing rule
//! of each field is reported. Asynchronous rules run after the synchronous
//! ones.
//!
//! # Example
//!
//! ```
//! use vform::Field;
//! use vform::validation::{ErrorMessages, Validator};
//!
//! let messages = ErrorMessages::default();
//! let email = Field::text("email");
//! let terms = Field::checkbox("terms");
//!
//! let validator = Validator::new()
//!     .field(&email, "email")
//!         .required(&messages.required)
//!         .email(&messages.email)
//!     .field(&terms, "terms")
//!         .checked(&messages.checkbox)
//!     .build();
//!
//! email.set_text("someone@example.com");
//! let result = validator.validate();
//! assert_eq!(result.message_for("terms"), Some("Field(s) not checked"));
//! ```

mod error_display;
mod messages;
mod result;
mod validatable;
mod validator;
mod value;

pub use error_display::ErrorDisplay;
pub use messages::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, ErrorMessages};
pub use result::{FieldError, ValidationResult};
pub use validatable::Validatable;
pub use validator::{BoxFuture, FieldBuilder, Rule, Validator};
pub use value::{InputValue, is_real_selection};
