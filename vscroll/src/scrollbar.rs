//! The mounted scrollbar widget.
//!
//! [`VirtualScrollbar`] wires the synchronizer, input controller and
//! lifecycle to a [`Page`]. The host feeds it page events with
//! [`VirtualScrollbar::handle`] and drives timers with
//! [`VirtualScrollbar::tick`]; the widget writes scroll commands, thumb
//! placement and visual markers back through the page.

use std::time::Instant;

use crate::config::ScrollConfig;
use crate::error::ScrollError;
use crate::geometry::ScrollTrack;
use crate::input::{InputController, normalize_wheel};
use crate::lifecycle::{DeviceMode, Lifecycle, ModeChange, below_breakpoint};
use crate::page::{
    EventKind, ListenTarget, ListenerId, Page, PageEvent, ThumbPlacement, WheelInput,
};
use crate::persist::{PersistedPosition, Persistence, SessionStore};
use crate::state::ScrollState;
use crate::sync::{Layout, SyncPhase, Synchronizer};

/// User callback.
pub type Callback = Box<dyn FnMut()>;

#[derive(Default)]
struct Callbacks {
    on_init: Option<Callback>,
    on_scroll: Option<Callback>,
    on_drag: Option<Callback>,
    on_destroy: Option<Callback>,
}

fn fire(slot: &mut Option<Callback>) {
    if let Some(callback) = slot {
        callback();
    }
}

/// Builder for a [`VirtualScrollbar`].
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use vscroll::{HeadlessPage, MemoryStore, Mounted, ScrollConfig, ScrollbarBuilder};
///
/// let mounted = ScrollbarBuilder::new(ScrollConfig::new())
///     .on_scroll(|| println!("scrolled"))
///     .mount(HeadlessPage::new(800.0, 2400.0), MemoryStore::new(), Instant::now())
///     .unwrap();
/// assert!(matches!(mounted, Mounted::Fresh(_)));
/// ```
pub struct ScrollbarBuilder {
    config: ScrollConfig,
    callbacks: Callbacks,
}

impl ScrollbarBuilder {
    /// Start building a scrollbar with the given options.
    ///
    /// The page type is fixed by [`ScrollbarBuilder::mount`].
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
        }
    }

    /// Called once the widget is mounted.
    pub fn on_init(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.on_init = Some(Box::new(callback));
        self
    }

    /// Called after a wheel step moves the thumb.
    pub fn on_scroll(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.on_scroll = Some(Box::new(callback));
        self
    }

    /// Called on every pointer move while the thumb is dragged.
    pub fn on_drag(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.on_drag = Some(Box::new(callback));
        self
    }

    /// Called whenever the widget steps aside for native scrolling.
    pub fn on_destroy(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.on_destroy = Some(Box::new(callback));
        self
    }

    /// Mount the widget on a page.
    ///
    /// A page that already carries a widget is handed back untouched as
    /// [`Mounted::Existing`].
    pub fn mount<P: Page>(
        self,
        mut page: P,
        store: impl SessionStore + 'static,
        now: Instant,
    ) -> Result<Mounted<P>, ScrollError> {
        if page.has_widget() {
            log::debug!("[scrollbar] page already has a scrollbar, skipping mount");
            return Ok(Mounted::Existing(page));
        }
        page.mount_widget()?;

        let lifecycle = Lifecycle::attach(&mut page);
        let sync = Synchronizer::new(Layout::read(&page), Persistence::new(store));
        let mut bar = VirtualScrollbar {
            config: self.config,
            callbacks: self.callbacks,
            page,
            sync,
            input: InputController::new(),
            lifecycle,
            drag_listeners: None,
            idle_deadline: None,
        };

        match bar.lifecycle.evaluate(&bar.config, &bar.page) {
            Some(ModeChange::Suppressed) => bar.suppress(),
            _ => {
                let restore = bar.sync.persisted().unwrap_or_default();
                bar.activate(Some(restore), now);
            }
        }
        fire(&mut bar.callbacks.on_init);
        log::debug!("[scrollbar] mounted in {:?} mode", bar.mode());
        Ok(Mounted::Fresh(bar))
    }
}

/// Result of [`ScrollbarBuilder::mount`].
#[derive(Debug)]
pub enum Mounted<P: Page> {
    Fresh(VirtualScrollbar<P>),
    /// The page already had a widget; nothing was changed.
    Existing(P),
}

impl<P: Page> Mounted<P> {
    /// The new widget, if one was mounted.
    pub fn into_fresh(self) -> Option<VirtualScrollbar<P>> {
        match self {
            Mounted::Fresh(bar) => Some(bar),
            Mounted::Existing(_) => None,
        }
    }
}

/// A custom scrollbar bound to a page.
pub struct VirtualScrollbar<P: Page> {
    config: ScrollConfig,
    callbacks: Callbacks,
    page: P,
    sync: Synchronizer,
    input: InputController,
    lifecycle: Lifecycle,
    /// Document move/up listeners, held only while dragging.
    drag_listeners: Option<[ListenerId; 2]>,
    idle_deadline: Option<Instant>,
}

impl<P: Page + std::fmt::Debug> std::fmt::Debug for VirtualScrollbar<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualScrollbar")
            .field("config", &self.config)
            .field("page", &self.page)
            .field("sync", &self.sync)
            .field("mode", &self.lifecycle.mode())
            .finish_non_exhaustive()
    }
}

impl<P: Page> VirtualScrollbar<P> {
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> ScrollState {
        self.sync.state()
    }

    pub fn track(&self) -> ScrollTrack {
        self.sync.track()
    }

    pub fn mode(&self) -> DeviceMode {
        self.lifecycle.mode()
    }

    pub fn phase(&self) -> SyncPhase {
        self.sync.phase()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable access to the page, e.g. to change its metrics before
    /// delivering a resize.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Deliver a page event.
    pub fn handle(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::Load | PageEvent::Resize | PageEvent::OrientationChange => {
                self.on_viewport_change(now)
            }
            PageEvent::Mutation => self.on_mutation(),
            PageEvent::Wheel(input) => self.on_wheel(input, now),
            PageEvent::MouseDown { client_y } => self.on_press(client_y, now),
            PageEvent::MouseMove { client_y } => self.on_pointer_move(client_y, now),
            PageEvent::MouseUp => self.on_release(),
        }
    }

    /// Advance timers: fire due wheel scrolls, poll for mutations when no
    /// observer is available and apply the inactivity hide.
    pub fn tick(&mut self, now: Instant) {
        for offset in self.sync.fire_due(now) {
            self.page.scroll_to(offset);
        }

        if self.lifecycle.poll_mutation(&self.page) {
            log::trace!("[scrollbar] document height changed while polling");
            self.on_mutation();
        }

        if let Some(deadline) = self.idle_deadline
            && now >= deadline
        {
            self.page.set_idle_hidden(true);
            self.idle_deadline = None;
        }
    }

    /// Release every listener, unmount the widget and hand the page back.
    pub fn teardown(mut self) -> P {
        self.release_drag();
        self.lifecycle.release(&mut self.page);
        self.page.unmount_widget();
        log::debug!("[scrollbar] torn down");
        self.page
    }

    // -------------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------------

    fn on_viewport_change(&mut self, now: Instant) {
        self.sync.persist();
        self.page
            .set_breakpoint(below_breakpoint(&self.config, self.page.viewport_width()));

        match self.lifecycle.evaluate(&self.config, &self.page) {
            Some(ModeChange::Suppressed) => self.suppress(),
            Some(ModeChange::Activated) => {
                let restore = PersistedPosition {
                    document_offset: self.page.scroll_top(),
                    thumb_offset: 0.0,
                };
                self.activate(Some(restore), now);
            }
            None if self.mode() == DeviceMode::Active => {
                self.lifecycle.attach_wheel(&mut self.page);
                self.reconcile(None);
            }
            None => {}
        }
    }

    fn on_mutation(&mut self) {
        if self.mode() == DeviceMode::Suppressed {
            self.lifecycle
                .note_document_height(self.page.document_height());
            return;
        }
        self.reconcile(None);
    }

    fn on_wheel(&mut self, input: WheelInput, now: Instant) {
        if !self.lifecycle.wheel_attached() {
            return;
        }
        let Some(direction) = normalize_wheel(input) else {
            return;
        };
        let prior = self.sync.state();
        let state = self.sync.apply_wheel_delta(direction, now);
        if state != prior {
            self.render();
            self.wake(now);
            fire(&mut self.callbacks.on_scroll);
        }
    }

    fn on_press(&mut self, client_y: f64, now: Instant) {
        if self.mode() == DeviceMode::Suppressed {
            return;
        }
        let track = self.sync.track();
        let state = self.sync.state();
        if !self
            .input
            .press(client_y, self.page.track_origin_y(), &track, &state)
        {
            return;
        }
        self.sync.begin_drag();
        if self.drag_listeners.is_none() {
            self.drag_listeners = Some([
                self.page.listen(ListenTarget::Document, EventKind::MouseMove),
                self.page.listen(ListenTarget::Document, EventKind::MouseUp),
            ]);
        }
        self.wake(now);
        log::trace!("[scrollbar] drag started at {}", client_y);
    }

    fn on_pointer_move(&mut self, client_y: f64, now: Instant) {
        let state = self.sync.state();
        let Some(delta) = self
            .input
            .drag_delta(client_y, self.page.track_origin_y(), &state)
        else {
            return;
        };
        self.wake(now);
        let prior = self.sync.state();
        if self.sync.apply_drag_delta(delta) == prior {
            return;
        }
        self.flush();
        self.render();
        fire(&mut self.callbacks.on_drag);
    }

    fn on_release(&mut self) {
        if self.input.is_dragging() {
            log::trace!("[scrollbar] drag ended");
        }
        self.release_drag();
    }

    // -------------------------------------------------------------------------
    // Mode transitions
    // -------------------------------------------------------------------------

    fn activate(&mut self, restore: Option<PersistedPosition>, now: Instant) {
        self.lifecycle.attach_wheel(&mut self.page);
        self.sync.set_persist_enabled(true);
        self.page.set_breakpoint(false);
        self.reconcile(restore);
        self.wake(now);
    }

    fn suppress(&mut self) {
        self.lifecycle.detach_wheel(&mut self.page);
        self.release_drag();
        self.sync.set_persist_enabled(false);
        self.sync.clear_persisted();
        self.page.set_track_visible(false);
        self.page
            .set_breakpoint(below_breakpoint(&self.config, self.page.viewport_width()));
        self.idle_deadline = None;
        fire(&mut self.callbacks.on_destroy);
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn reconcile(&mut self, restore: Option<PersistedPosition>) {
        let layout = Layout::read(&self.page);
        let reconciled = self.sync.reconcile_layout(layout, restore);
        self.lifecycle.note_document_height(layout.document_height);
        if reconciled.overflow_changed {
            log::debug!(
                "[scrollbar] overflow changed, scrollable={}",
                reconciled.scrollable
            );
        }
        self.flush();
        self.render();
    }

    /// Execute queued immediate scroll commands.
    fn flush(&mut self) {
        for offset in self.sync.take_commands() {
            self.page.scroll_to(offset);
        }
    }

    fn render(&mut self) {
        let track = self.sync.track();
        self.page.place_thumb(ThumbPlacement {
            top: self.sync.state().thumb_offset,
            length: track.thumb_length,
            width: track.thumb_width,
            track_width: track.track_width,
        });
        self.page
            .set_track_visible(self.mode() == DeviceMode::Active && track.scrollable);
    }

    /// Show the thumb and restart the inactivity timer.
    fn wake(&mut self, now: Instant) {
        if !self.config.hide_slider {
            return;
        }
        self.page.set_idle_hidden(false);
        self.idle_deadline = Some(now + self.config.idle_timeout());
    }

    fn release_drag(&mut self) {
        self.input.release();
        self.sync.end_drag();
        if let Some(ids) = self.drag_listeners.take() {
            ids.into_iter().for_each(|id| self.page.unlisten(id));
        }
    }
}
