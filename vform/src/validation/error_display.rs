/// How a field shows a failed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Only the valid/invalid mark changes (default).
    #[default]
    MarkOnly,
    /// The mark changes and the error message is shown next to the field.
    Message,
}
