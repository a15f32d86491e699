//! In-memory page used by the simulator and tests.

use std::collections::BTreeMap;

use crate::error::ScrollError;
use crate::page::{EventKind, ListenTarget, ListenerId, Page, ThumbPlacement};

/// A page with no DOM behind it.
///
/// Metrics are plain fields the caller sets; everything the widget writes
/// is recorded so it can be inspected afterwards. Scroll commands are
/// clamped to the scrollable range the way a browser clamps them.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub scroll_top: f64,
    pub track_width: f64,
    pub track_origin_y: f64,
    pub user_agent: String,
    /// Whether the page has a body to attach the widget to.
    pub has_body: bool,
    pub mutation_observer: bool,

    pub widget_mounted: bool,
    pub thumb: Option<ThumbPlacement>,
    pub track_visible: bool,
    pub breakpoint: bool,
    pub idle_hidden: bool,
    /// Every offset passed to `scroll_to`, in order.
    pub scroll_log: Vec<f64>,

    listeners: BTreeMap<ListenerId, (ListenTarget, EventKind)>,
    next_listener: u64,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            document_height: 800.0,
            scroll_top: 0.0,
            track_width: 10.0,
            track_origin_y: 0.0,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
            has_body: true,
            mutation_observer: true,
            widget_mounted: false,
            thumb: None,
            track_visible: false,
            breakpoint: false,
            idle_hidden: false,
            scroll_log: Vec::new(),
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }
}

impl HeadlessPage {
    /// Create a desktop page with the given viewport and document heights.
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            ..Default::default()
        }
    }

    /// Set the viewport width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Set the rendered track width.
    pub fn with_track_width(mut self, width: f64) -> Self {
        self.track_width = width;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disable mutation observation.
    pub fn without_mutation_observer(mut self) -> Self {
        self.mutation_observer = false;
        self
    }

    /// Whether any listener of this kind is registered.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|(_, k)| *k == kind)
    }

    /// Number of listeners of this kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|(_, k)| *k == kind).count()
    }

    /// Total number of live listeners.
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Largest offset the document can scroll to.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

impl Page for HeadlessPage {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scroll_top = offset.clamp(0.0, self.max_scroll());
        self.scroll_log.push(offset);
    }

    fn has_widget(&self) -> bool {
        self.widget_mounted
    }

    fn mount_widget(&mut self) -> Result<(), ScrollError> {
        if !self.has_body {
            return Err(ScrollError::MissingAnchor("body"));
        }
        self.widget_mounted = true;
        Ok(())
    }

    fn unmount_widget(&mut self) {
        self.widget_mounted = false;
        self.thumb = None;
        self.track_visible = false;
    }

    fn track_width(&self) -> f64 {
        self.track_width
    }

    fn track_origin_y(&self) -> f64 {
        self.track_origin_y
    }

    fn place_thumb(&mut self, placement: ThumbPlacement) {
        self.thumb = Some(placement);
    }

    fn set_track_visible(&mut self, visible: bool) {
        self.track_visible = visible;
    }

    fn set_breakpoint(&mut self, active: bool) {
        self.breakpoint = active;
    }

    fn set_idle_hidden(&mut self, hidden: bool) {
        self.idle_hidden = hidden;
    }

    fn listen(&mut self, target: ListenTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (target, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn supports_mutation_observer(&self) -> bool {
        self.mutation_observer
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
