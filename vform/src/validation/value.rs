//! Views of input values used by the built-in rules.

/// An input value the built-in rules can inspect.
///
/// Each accessor returns `None` when the value is not of that shape. Rules
/// that do not apply to a value's shape pass.
pub trait InputValue {
    /// Text content of text-like inputs.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Checked state of checkboxes and radios.
    fn as_checked(&self) -> Option<bool> {
        None
    }

    /// Selected option of selects. Index 0 is the placeholder option.
    fn as_selected(&self) -> Option<Option<usize>> {
        None
    }
}

impl InputValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl InputValue for bool {
    fn as_checked(&self) -> Option<bool> {
        Some(*self)
    }
}

impl InputValue for Option<usize> {
    fn as_selected(&self) -> Option<Option<usize>> {
        Some(*self)
    }
}

/// Whether a selection picks a real option rather than the placeholder.
pub fn is_real_selection(selected: Option<usize>) -> bool {
    matches!(selected, Some(index) if index > 0)
}
