//! Input normalization.
//!
//! Turns raw wheel events into a [`WheelDirection`] and pointer positions
//! into thumb deltas for the synchronizer.

use crate::geometry::ScrollTrack;
use crate::page::WheelInput;
use crate::state::ScrollState;
use crate::sync::WheelDirection;

/// Normalize a wheel event to a direction.
///
/// Modern events report `wheel_delta`; legacy events report `detail` with
/// the opposite sign. A positive value scrolls up. Returns `None` when the
/// event carries no movement.
pub fn normalize_wheel(input: WheelInput) -> Option<WheelDirection> {
    let raw = if input.wheel_delta != 0.0 {
        input.wheel_delta
    } else {
        -input.detail
    };
    if !raw.is_finite() || raw == 0.0 {
        return None;
    }
    match raw.signum() {
        s if s > 0.0 => Some(WheelDirection::Up),
        _ => Some(WheelDirection::Down),
    }
}

/// Active thumb drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbDrag {
    /// Pointer position relative to the thumb's top edge at press time.
    pub grab_offset: f64,
}

/// Tracks the pointer while the thumb is held.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    drag: Option<ThumbDrag>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<ThumbDrag> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle a pointer press at `client_y`.
    ///
    /// Starts a drag and returns `true` only if the press lands on the
    /// thumb. Presses elsewhere on the track or page are ignored.
    pub fn press(
        &mut self,
        client_y: f64,
        track_origin_y: f64,
        track: &ScrollTrack,
        state: &ScrollState,
    ) -> bool {
        if !track.scrollable || !client_y.is_finite() {
            return false;
        }
        let thumb_top = track_origin_y + state.thumb_offset;
        let thumb_bottom = thumb_top + track.thumb_length;
        if client_y < thumb_top || client_y > thumb_bottom {
            log::trace!("[input] press at {} missed the thumb", client_y);
            return false;
        }

        self.drag = Some(ThumbDrag {
            grab_offset: client_y - thumb_top,
        });
        true
    }

    /// Delta to move the thumb by so it follows a pointer at `client_y`.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_delta(
        &self,
        client_y: f64,
        track_origin_y: f64,
        state: &ScrollState,
    ) -> Option<f64> {
        let drag = self.drag?;
        if !client_y.is_finite() {
            return Some(0.0);
        }
        let target = client_y - drag.grab_offset - track_origin_y;
        Some(target - state.thumb_offset)
    }

    /// End the drag. Returns `true` if one was active.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some()
    }
}
