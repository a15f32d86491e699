//! Scrollbar configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default inactivity timeout before the thumb hides.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Default viewport width below which the widget is suppressed.
pub const DEFAULT_DESTROY_ON: f64 = 768.0;

/// Options recognised by the scrollbar.
///
/// Unknown keys are ignored and missing keys fall back to the defaults, so
/// a partial JSON object behaves like an options object merged over the
/// defaults.
///
/// # Example
///
/// ```
/// use vscroll::ScrollConfig;
///
/// let config = ScrollConfig::from_json(r#"{ "destroy": true, "destroyOn": 1024 }"#).unwrap();
/// assert!(config.destroy);
/// assert_eq!(config.destroy_on, 1024.0);
/// assert_eq!(config.duration, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Hide the thumb after a period without wheel or drag input.
    pub hide_slider: bool,

    /// Inactivity timeout in milliseconds (used with `hide_slider`).
    pub duration: u64,

    /// Keep the widget on detected mobile devices.
    /// When false the widget is suppressed on mobile and native scrolling takes over.
    pub mobile: bool,

    /// Enable breakpoint-based suppression.
    pub destroy: bool,

    /// Breakpoint width in pixels (used with `destroy`).
    pub destroy_on: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            hide_slider: false,
            duration: DEFAULT_DURATION_MS,
            mobile: false,
            destroy: false,
            destroy_on: DEFAULT_DESTROY_ON,
        }
    }
}

impl ScrollConfig {
    /// Create a config with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON options object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destroy && (self.destroy_on.is_nan() || self.destroy_on <= 0.0) {
            return Err(ConfigError::ZeroBreakpoint);
        }
        Ok(())
    }

    /// Enable auto-hiding of the thumb.
    pub fn hide_slider(mut self, hide: bool) -> Self {
        self.hide_slider = hide;
        self
    }

    /// Set the inactivity timeout.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration.as_millis() as u64;
        self
    }

    /// Keep or suppress the widget on mobile devices.
    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Enable breakpoint suppression at the given width.
    pub fn destroy_on(mut self, width: f64) -> Self {
        self.destroy = true;
        self.destroy_on = width;
        self
    }

    /// Inactivity timeout as a `Duration`.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.duration)
    }
}
