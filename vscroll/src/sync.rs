//! Position synchronizer.
//!
//! Owns the track geometry and the live [`ScrollState`]. Wheel steps, drag
//! movement and layout changes all go through here; each operation returns
//! the new state and queues the scroll commands the page has to execute.
//!
//! Two kinds of scroll command exist:
//! - immediate commands (drag, layout reconciliation), collected with
//!   [`Synchronizer::take_commands`]
//! - deferred commands (wheel steps), released by [`Synchronizer::fire_due`]
//!   once [`WHEEL_SETTLE_DELAY`] has elapsed. A deferred command scrolls to
//!   the document offset current when it fires, so a drag or layout change
//!   inside the delay is never undone.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::geometry::{ScrollTrack, compute_track, document_to_thumb, sanitize, thumb_to_document};
use crate::page::Page;
use crate::persist::{PersistedPosition, Persistence};
use crate::state::ScrollState;

/// Share of the viewport height one wheel click moves the thumb.
pub const WHEEL_STEP_RATIO: f64 = 0.018;

/// Delay between a wheel step and its scroll command.
///
/// Scrolling the document while the wheel event is still being handled
/// stutters in some browsers. The delay is a best-effort heuristic for
/// landing after native wheel handling, not an ordering guarantee.
pub const WHEEL_SETTLE_DELAY: Duration = Duration::from_millis(30);

/// Direction of a single wheel click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// What the synchronizer is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// The thumb is held by the pointer.
    Dragging,
    /// Wheel steps have scroll commands waiting to fire.
    WheelAnimating,
}

/// Page dimensions the track is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub viewport_height: f64,
    pub document_height: f64,
    pub track_pixel_width: f64,
}

impl Layout {
    pub fn new(viewport_height: f64, document_height: f64, track_pixel_width: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            track_pixel_width,
        }
    }

    /// Read the current dimensions from a page.
    pub fn read<P: Page + ?Sized>(page: &P) -> Self {
        Self::new(
            page.viewport_height(),
            page.document_height(),
            page.track_width(),
        )
    }

    /// Largest document offset for this layout.
    pub fn max_document_offset(&self) -> f64 {
        ScrollTrack::max_document_offset(self.viewport_height, self.document_height)
    }
}

/// A wheel step's scroll command waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredScroll {
    pub due: Instant,
}

/// Outcome of [`Synchronizer::reconcile_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciled {
    pub state: ScrollState,
    /// Whether the document overflows the viewport after the change.
    pub scrollable: bool,
    /// Whether the overflow state flipped.
    pub overflow_changed: bool,
}

/// Keeps thumb offset and document offset in agreement.
#[derive(Debug)]
pub struct Synchronizer {
    layout: Layout,
    track: ScrollTrack,
    state: ScrollState,
    phase: SyncPhase,
    /// Wheel commands in scheduling order. Never coalesced.
    pending: VecDeque<DeferredScroll>,
    /// Immediate commands not yet handed to the page.
    commands: Vec<f64>,
    persistence: Persistence,
    persist_enabled: bool,
}

impl Synchronizer {
    /// Create a synchronizer scrolled to the top of `layout`.
    pub fn new(layout: Layout, persistence: Persistence) -> Self {
        let track = compute_track(
            layout.viewport_height,
            layout.document_height,
            layout.track_pixel_width,
        );
        Self {
            layout,
            track,
            state: ScrollState::TOP,
            phase: SyncPhase::Idle,
            pending: VecDeque::new(),
            commands: Vec::new(),
            persistence,
            persist_enabled: true,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn track(&self) -> ScrollTrack {
        self.track
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Wheel commands that have not fired yet.
    pub fn pending(&self) -> impl Iterator<Item = &DeferredScroll> {
        self.pending.iter()
    }

    /// Pixels one wheel click moves the thumb.
    pub fn wheel_step(&self) -> f64 {
        (WHEEL_STEP_RATIO * self.layout.viewport_height).trunc()
    }

    // -------------------------------------------------------------------------
    // Wheel
    // -------------------------------------------------------------------------

    /// Move the thumb one wheel step and schedule the matching scroll.
    ///
    /// Ignored while dragging. Each call schedules its own command; earlier
    /// commands still pending are left alone.
    pub fn apply_wheel_delta(&mut self, direction: WheelDirection, now: Instant) -> ScrollState {
        if self.phase == SyncPhase::Dragging {
            log::trace!("[sync] wheel ignored while dragging");
            return self.state;
        }
        if !self.track.scrollable {
            return self.state;
        }

        let step = self.wheel_step();
        let prior = self.state.thumb_offset;
        let target = match direction {
            WheelDirection::Up => prior - step,
            WheelDirection::Down => prior + step,
        };
        let thumb = self.clamp_thumb(target);
        if thumb == prior {
            return self.state;
        }

        self.set_from_thumb(thumb);
        self.pending.push_back(DeferredScroll {
            due: now + WHEEL_SETTLE_DELAY,
        });
        self.phase = SyncPhase::WheelAnimating;
        self.persist();

        log::trace!(
            "[sync] wheel {:?}: thumb {} -> {}, document {}",
            direction,
            prior,
            thumb,
            self.state.document_offset
        );
        self.state
    }

    /// Release wheel commands whose deadline has passed, oldest first.
    ///
    /// Every due command yields the document offset of the current state,
    /// one entry per wheel step. Returns to `Idle` once nothing is pending.
    pub fn fire_due(&mut self, now: Instant) -> Vec<f64> {
        let mut fired = Vec::new();
        while let Some(next) = self.pending.front() {
            if next.due > now {
                break;
            }
            self.pending.pop_front();
            fired.push(self.state.document_offset);
        }
        if self.pending.is_empty() && self.phase == SyncPhase::WheelAnimating {
            self.phase = SyncPhase::Idle;
        }
        fired
    }

    // -------------------------------------------------------------------------
    // Drag
    // -------------------------------------------------------------------------

    /// Enter `Dragging`. Returns false if a drag is already active.
    pub fn begin_drag(&mut self) -> bool {
        if self.phase == SyncPhase::Dragging {
            return false;
        }
        self.phase = SyncPhase::Dragging;
        true
    }

    /// Leave `Dragging`. Returns false if no drag was active.
    pub fn end_drag(&mut self) -> bool {
        if self.phase != SyncPhase::Dragging {
            return false;
        }
        self.phase = if self.pending.is_empty() {
            SyncPhase::Idle
        } else {
            SyncPhase::WheelAnimating
        };
        true
    }

    /// Move the thumb by a pointer delta and scroll immediately.
    ///
    /// Only applies while dragging. The thumb snaps to exactly 0 or exactly
    /// `travel_range` at the ends of the track.
    pub fn apply_drag_delta(&mut self, pointer_delta_y: f64) -> ScrollState {
        if self.phase != SyncPhase::Dragging {
            return self.state;
        }
        let delta = if pointer_delta_y.is_finite() {
            pointer_delta_y
        } else {
            0.0
        };

        let prior = self.state.thumb_offset;
        let thumb = self.clamp_thumb(prior + delta);
        if thumb == prior {
            return self.state;
        }

        self.set_from_thumb(thumb);
        self.commands.push(self.state.document_offset);
        self.persist();
        self.state
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Rebuild the track for a new layout.
    ///
    /// With `restore`, the document offset comes from the snapshot (clamped
    /// into range) and the thumb is derived from it. Without, the scroll
    /// fraction from before the change is kept so the reader stays at the
    /// same relative position. Always queues a scroll command so the page
    /// agrees with the new state.
    pub fn reconcile_layout(
        &mut self,
        layout: Layout,
        restore: Option<PersistedPosition>,
    ) -> Reconciled {
        let was_scrollable = self.track.scrollable;
        let fraction = self
            .state
            .document_fraction(self.layout.viewport_height, self.layout.document_height);

        self.layout = layout;
        self.track = compute_track(
            layout.viewport_height,
            layout.document_height,
            layout.track_pixel_width,
        );

        let max_offset = layout.max_document_offset();
        self.state = if !self.track.scrollable {
            ScrollState::TOP
        } else if let Some(position) = restore {
            let document_offset = sanitize(position.document_offset).min(max_offset);
            ScrollState::new(
                document_to_thumb(
                    document_offset,
                    layout.document_height,
                    layout.viewport_height,
                    self.track.travel_range,
                ),
                document_offset,
            )
        } else {
            ScrollState::new(
                fraction * self.track.travel_range,
                fraction * max_offset,
            )
        };

        self.commands.push(self.state.document_offset);
        if restore.is_none() {
            self.persist();
        }

        let overflow_changed = was_scrollable != self.track.scrollable;
        log::debug!(
            "[sync] reconciled viewport={} document={} scrollable={} state={:?}",
            layout.viewport_height,
            layout.document_height,
            self.track.scrollable,
            self.state
        );

        Reconciled {
            state: self.state,
            scrollable: self.track.scrollable,
            overflow_changed,
        }
    }

    /// Take the immediate scroll commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.commands)
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Allow or forbid writes to the store (forbidden while suppressed).
    pub fn set_persist_enabled(&mut self, enabled: bool) {
        self.persist_enabled = enabled;
    }

    /// Write the current state if writes are allowed.
    pub fn persist(&self) {
        if self.persist_enabled {
            self.persistence.write(self.state.into());
        }
    }

    /// The position left in the store by an earlier page.
    pub fn persisted(&self) -> Option<PersistedPosition> {
        self.persistence.read()
    }

    /// Remove the stored position.
    pub fn clear_persisted(&self) {
        self.persistence.clear();
    }

    fn clamp_thumb(&self, target: f64) -> f64 {
        let target = if target.is_finite() { target } else { 0.0 };
        target.clamp(0.0, self.track.travel_range)
    }

    fn set_from_thumb(&mut self, thumb_offset: f64) {
        self.state = ScrollState::new(
            thumb_offset,
            thumb_to_document(
                thumb_offset,
                self.track.travel_range,
                self.layout.document_height,
                self.layout.viewport_height,
            ),
        );
    }
}
