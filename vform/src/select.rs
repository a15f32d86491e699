//! Dropdown replacement for native selects.
//!
//! A [`Select`] mirrors one native select: its bar shows the displayed
//! label, clicking the bar toggles the option list and clicking an option
//! closes the list and writes the choice back to the native control.
//! [`SelectSet`] manages every select on a page.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::validation::{ErrorDisplay, Validatable};

/// Options recognised by the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOptions {
    /// Show the native placeholder until something is chosen.
    /// When false the first option's label is shown instead.
    pub txt_from_placeholder: bool,

    /// Animate opening and closing of the option list.
    pub easing: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            txt_from_placeholder: true,
            easing: true,
        }
    }
}

impl SelectOptions {
    /// Parse a JSON options object.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A native select as found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeSelect {
    pub name: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    /// Index written back when an option is chosen.
    #[serde(default)]
    pub selected_index: Option<usize>,
}

impl NativeSelect {
    pub fn new<S: Into<String>>(name: impl Into<String>, options: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            placeholder: None,
            options: options.into_iter().map(Into::into).collect(),
            selected_index: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Unique identifier for a Select instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SelectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__select_{}", self.0)
    }
}

#[derive(Debug)]
struct SelectInner {
    native: NativeSelect,
    displayed: String,
    error: Option<String>,
    error_display: ErrorDisplay,
}

/// A dropdown bound to one native select.
#[derive(Debug, Clone)]
pub struct Select {
    id: SelectId,
    options: SelectOptions,
    inner: Arc<RwLock<SelectInner>>,
    is_open: Arc<AtomicBool>,
}

impl Select {
    /// Build a dropdown for a native select.
    pub fn new(native: NativeSelect, options: SelectOptions) -> Self {
        let displayed = initial_label(&native, &options);
        Self {
            id: SelectId::new(),
            options,
            inner: Arc::new(RwLock::new(SelectInner {
                native,
                displayed,
                error: None,
                error_display: ErrorDisplay::default(),
            })),
            is_open: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> SelectId {
        self.id
    }

    /// Name of the native select.
    pub fn name(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.native.name.clone())
            .unwrap_or_default()
    }

    /// Whether the option list animates.
    pub fn easing(&self) -> bool {
        self.options.easing
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Check if the option list is open.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Open or close the option list (bar click).
    pub fn toggle(&self) {
        self.is_open.fetch_xor(true, Ordering::SeqCst);
    }

    /// Close the option list.
    pub fn close(&self) {
        self.is_open.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Choose an option (option click).
    ///
    /// Closes the list, shows the option's label and writes the index to
    /// the native select. Out-of-range indices are ignored.
    pub fn choose(&self, index: usize) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let Some(label) = guard.native.options.get(index).cloned() else {
            log::debug!(
                "[select] {}: ignoring out-of-range option {}",
                guard.native.name,
                index
            );
            return;
        };
        guard.displayed = label;
        guard.native.selected_index = Some(index);
        guard.error = None;
        drop(guard);
        self.close();
    }

    /// Index written to the native select, if any option was chosen.
    pub fn selected_index(&self) -> Option<usize> {
        self.inner
            .read()
            .map(|guard| guard.native.selected_index)
            .unwrap_or(None)
    }

    /// Label shown on the bar.
    pub fn displayed_label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.displayed.clone())
            .unwrap_or_default()
    }

    /// Labels of all options, in order.
    pub fn option_labels(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.native.options.clone())
            .unwrap_or_default()
    }

    /// Whether the option at `index` is the default one.
    pub fn is_default_option(&self, index: usize) -> bool {
        index == 0
    }

    /// Snapshot of the native select with the current selection.
    pub fn native(&self) -> NativeSelect {
        self.inner
            .read()
            .map(|guard| guard.native.clone())
            .unwrap_or_default()
    }
}

fn initial_label(native: &NativeSelect, options: &SelectOptions) -> String {
    let first = native.options.first().cloned().unwrap_or_default();
    if options.txt_from_placeholder {
        native.placeholder.clone().unwrap_or(first)
    } else {
        first
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for Select {
    type Value = Option<usize>;

    fn validation_value(&self) -> Self::Value {
        self.selected_index()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = None;
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

    fn reset(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.native.selected_index = None;
            guard.displayed = initial_label(&guard.native, &self.options);
            guard.error = None;
        }
        self.close();
    }
}

// -----------------------------------------------------------------------------
// SelectSet
// -----------------------------------------------------------------------------

/// Every dropdown on a page.
#[derive(Debug, Default)]
pub struct SelectSet {
    options: SelectOptions,
    selects: Vec<Select>,
    initialized: bool,
}

impl SelectSet {
    pub fn new(options: SelectOptions) -> Self {
        Self {
            options,
            selects: Vec::new(),
            initialized: false,
        }
    }

    /// Create one dropdown per native select.
    ///
    /// Returns false without changing anything if the set was already
    /// initialized.
    pub fn initialize(&mut self, natives: &[NativeSelect]) -> bool {
        if self.initialized {
            return false;
        }
        self.build(natives);
        self.initialized = true;
        true
    }

    /// Recreate every dropdown after the native selects changed.
    pub fn rebuild(&mut self, natives: &[NativeSelect]) {
        self.build(natives);
        self.initialized = true;
    }

    /// Remove every dropdown and hand back the native selects with their
    /// current selection.
    pub fn destroy(&mut self) -> Vec<NativeSelect> {
        self.initialized = false;
        self.selects.drain(..).map(|s| s.native()).collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn selects(&self) -> &[Select] {
        &self.selects
    }

    /// Find a dropdown by its native select's name.
    pub fn get(&self, name: &str) -> Option<&Select> {
        self.selects.iter().find(|s| s.name() == name)
    }

    fn build(&mut self, natives: &[NativeSelect]) {
        self.selects = natives
            .iter()
            .cloned()
            .map(|native| Select::new(native, self.options))
            .collect();
        log::debug!("[select] built {} dropdown(s)", self.selects.len());
    }
}
