//! Page form widgets
//!
//! State-level replacements for native form controls: a dropdown that
//! mirrors a native select, and a declarative validation engine for text,
//! checkbox, radio and select inputs.

pub mod error;
pub mod field;
pub mod form;
pub mod select;
pub mod validation;

pub use error::OptionsError;
pub use field::{Field, FieldKind, FieldValue, Mark};
pub use form::{Form, FormOptions, SubmitOutcome};
pub use select::{NativeSelect, Select, SelectOptions, SelectSet};
