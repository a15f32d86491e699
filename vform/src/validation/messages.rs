//! Default rule messages.

use serde::{Deserialize, Serialize};

/// Minimum length used when a form does not specify one.
pub const DEFAULT_MIN_LENGTH: usize = 5;

/// Maximum length used when a form does not specify one.
pub const DEFAULT_MAX_LENGTH: usize = 15;

/// Messages for the built-in rules.
///
/// JSON keys follow the rule names used in form markup (`minLen`, `maxLen`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorMessages {
    pub required: String,
    pub number: String,
    pub email: String,
    pub checkbox: String,
    pub radio: String,
    pub select: String,
    pub equal: String,
    pub min_len: String,
    pub max_len: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            required: "Field is required".into(),
            number: "Only numbers".into(),
            email: "Incorrect email".into(),
            checkbox: "Field(s) not checked".into(),
            radio: "Field(s) not checked".into(),
            select: "Please select something".into(),
            equal: "Fields aren't equal".into(),
            min_len: "Min length is 5 symbols".into(),
            max_len: "Max length is 15 symbols".into(),
        }
    }
}
