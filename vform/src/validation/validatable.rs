//! Validatable trait for inputs that support validation.

use super::ErrorDisplay;

/// Trait for inputs that can be validated.
///
/// Implementors are cheap shared handles: validation clones them and reads
/// the current value each time it runs.
pub trait Validatable: Send + Sync {
    /// The value type used for validation.
    type Value;

    /// Extract the current value for validation.
    fn validation_value(&self) -> Self::Value;

    /// Mark the input invalid with a message.
    fn set_error(&self, msg: impl Into<String>);

    /// Mark the input valid.
    fn clear_error(&self);

    /// Get the current validation error message (if any).
    fn error(&self) -> Option<String>;

    /// Check if the input has a validation error.
    fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// Unique ID of the input.
    fn field_id(&self) -> String;

    /// Get the error display mode.
    fn error_display(&self) -> ErrorDisplay;

    /// Set the error display mode.
    fn set_error_display(&self, display: ErrorDisplay);

    /// Mirror the valid/invalid mark onto the input's container.
    /// Inputs without a container ignore this.
    fn set_mirror_parent(&self, _mirror: bool) {}

    /// Restore the initial value and drop any mark.
    fn reset(&self);
}
