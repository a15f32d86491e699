//! Form input handles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::validation::{ErrorDisplay, InputValue, Validatable};

/// Unique identifier for a field instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// The kind of input a field stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Checkbox,
    Radio,
    Select,
}

/// Current value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    /// Selected option index; index 0 is the placeholder.
    Selected(Option<usize>),
}

impl FieldValue {
    fn initial(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::TextArea => Self::Text(String::new()),
            FieldKind::Checkbox | FieldKind::Radio => Self::Checked(false),
            FieldKind::Select => Self::Selected(None),
        }
    }
}

impl InputValue for FieldValue {
    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn as_checked(&self) -> Option<bool> {
        match self {
            Self::Checked(checked) => Some(*checked),
            _ => None,
        }
    }

    fn as_selected(&self) -> Option<Option<usize>> {
        match self {
            Self::Selected(selected) => Some(*selected),
            _ => None,
        }
    }
}

/// Validation mark on a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mark {
    /// Not validated since creation or the last reset.
    #[default]
    Unmarked,
    Valid,
    Invalid,
}

#[derive(Debug)]
struct FieldInner {
    value: FieldValue,
    error: Option<String>,
    mark: Mark,
    error_display: ErrorDisplay,
    mirror_parent: bool,
}

/// A form input with shared state.
///
/// Clones share state, so the caller can keep a handle while a validator
/// holds another.
#[derive(Debug, Clone)]
pub struct Field {
    id: FieldId,
    name: Arc<str>,
    kind: FieldKind,
    inner: Arc<RwLock<FieldInner>>,
}

impl Field {
    /// Create a field of the given kind with its initial value.
    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            id: FieldId::new(),
            name: name.into(),
            kind,
            inner: Arc::new(RwLock::new(FieldInner {
                value: FieldValue::initial(kind),
                error: None,
                mark: Mark::Unmarked,
                error_display: ErrorDisplay::default(),
                mirror_parent: false,
            })),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, name)
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(FieldKind::TextArea, name)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Checkbox, name)
    }

    pub fn radio(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Radio, name)
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Select, name)
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value.
    pub fn value(&self) -> FieldValue {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_else(|_| FieldValue::initial(self.kind))
    }

    /// Set the text of a text or textarea field. Ignored for other kinds.
    pub fn set_text(&self, text: impl Into<String>) {
        if matches!(self.kind, FieldKind::Text | FieldKind::TextArea) {
            self.set_value(FieldValue::Text(text.into()));
        }
    }

    /// Tick or untick a checkbox or radio. Ignored for other kinds.
    pub fn set_checked(&self, checked: bool) {
        if matches!(self.kind, FieldKind::Checkbox | FieldKind::Radio) {
            self.set_value(FieldValue::Checked(checked));
        }
    }

    /// Select an option of a select field. Ignored for other kinds.
    pub fn set_selected(&self, index: Option<usize>) {
        if self.kind == FieldKind::Select {
            self.set_value(FieldValue::Selected(index));
        }
    }

    /// Current text, empty for non-text kinds.
    pub fn text_value(&self) -> String {
        self.value().as_text().unwrap_or_default().to_string()
    }

    /// Whether the field is ticked.
    pub fn is_checked(&self) -> bool {
        self.value().as_checked().unwrap_or(false)
    }

    fn set_value(&self, value: FieldValue) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value;
        }
    }

    // -------------------------------------------------------------------------
    // Marks
    // -------------------------------------------------------------------------

    /// Current validation mark.
    pub fn mark(&self) -> Mark {
        self.inner
            .read()
            .map(|guard| guard.mark)
            .unwrap_or_default()
    }

    /// Mark carried by the field's container; `Unmarked` unless mirroring
    /// is enabled.
    pub fn parent_mark(&self) -> Mark {
        self.inner
            .read()
            .map(|guard| if guard.mirror_parent { guard.mark } else { Mark::Unmarked })
            .unwrap_or_default()
    }

    /// Error message to show next to the field, if errors are displayed.
    pub fn displayed_error(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| match guard.error_display {
            ErrorDisplay::Message => guard.error.clone(),
            ErrorDisplay::MarkOnly => None,
        })
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for Field {
    type Value = FieldValue;

    fn validation_value(&self) -> Self::Value {
        self.value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
            guard.mark = Mark::Invalid;
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = None;
            guard.mark = Mark::Valid;
        }
    }

    fn error(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    fn field_id(&self) -> String {
        self.id.to_string()
    }

    fn error_display(&self) -> ErrorDisplay {
        self.inner
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_display = display;
        }
    }

    fn set_mirror_parent(&self, mirror: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.mirror_parent = mirror;
        }
    }

    fn reset(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = FieldValue::initial(self.kind);
            guard.error = None;
            guard.mark = Mark::Unmarked;
        }
    }
}
