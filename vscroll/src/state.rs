//! Live scroll state.

use crate::geometry::ScrollTrack;

/// Where the thumb sits and where the document is scrolled to.
///
/// Both offsets are views of one scroll fraction. Whenever an update has
/// completed, `thumb_offset / travel_range` and
/// `document_offset / (document_height - viewport_height)` agree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Thumb position within the track, `0..=travel_range`.
    pub thumb_offset: f64,
    /// Document scroll offset, `0..=document_height - viewport_height`.
    pub document_offset: f64,
}

impl ScrollState {
    /// Scrolled to the top.
    pub const TOP: Self = Self {
        thumb_offset: 0.0,
        document_offset: 0.0,
    };

    /// Create a state from both offsets.
    pub fn new(thumb_offset: f64, document_offset: f64) -> Self {
        Self {
            thumb_offset,
            document_offset,
        }
    }

    /// Scroll fraction according to the thumb (0.0 = top, 1.0 = bottom).
    pub fn thumb_fraction(&self, track: &ScrollTrack) -> f64 {
        if track.travel_range > 0.0 {
            (self.thumb_offset / track.travel_range).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Scroll fraction according to the document (0.0 = top, 1.0 = bottom).
    pub fn document_fraction(&self, viewport_height: f64, document_height: f64) -> f64 {
        let max = ScrollTrack::max_document_offset(viewport_height, document_height);
        if max > 0.0 {
            (self.document_offset / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the thumb rests at the top of its travel.
    pub fn at_top(&self) -> bool {
        self.thumb_offset <= 0.0
    }

    /// Whether the thumb rests at the bottom of its travel.
    pub fn at_bottom(&self, track: &ScrollTrack) -> bool {
        self.thumb_offset >= track.travel_range
    }
}
