//! Pure geometry for the virtual scrollbar.
//!
//! Maps between the document scroll offset and the thumb's pixel position
//! inside the track. Nothing here touches the page; every function is a
//! plain transform over the dimensions it is given.

/// Smallest thumb length in pixels.
pub const THUMB_MIN: f64 = 2.0;
/// Largest thumb length in pixels.
pub const THUMB_MAX: f64 = 24.0;
/// Narrowest track the widget renders.
pub const TRACK_WIDTH_MIN: f64 = 4.0;
/// Widest track the widget renders.
pub const TRACK_WIDTH_MAX: f64 = 26.0;
/// Gap kept between the thumb and the track edge.
pub const THUMB_MARGIN: f64 = 2.0;

/// The scrollbar's travel envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollTrack {
    /// Length of the track along the scroll axis (the viewport height).
    pub track_length: f64,
    /// Cross-axis width of the track, within `[4, 26]`.
    pub track_width: f64,
    /// Cross-axis width of the thumb (`track_width - 2`).
    pub thumb_width: f64,
    /// Length of the thumb along the scroll axis, within `[2, 24]`.
    pub thumb_length: f64,
    /// Distance the thumb can travel (`track_length - thumb_length`, never
    /// negative, 0 when the document does not overflow).
    pub travel_range: f64,
    /// Whether the document overflows the viewport.
    pub scrollable: bool,
}

impl ScrollTrack {
    /// Largest document offset for the given layout.
    pub fn max_document_offset(viewport_height: f64, document_height: f64) -> f64 {
        (sanitize(document_height) - sanitize(viewport_height)).max(0.0)
    }
}

/// Replace non-finite or negative lengths with the nearest valid value.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Build the track for a viewport/document pair.
///
/// `track_pixel_width` is the width the page currently renders the track
/// at. The thumb length is `viewport / document * track_pixel_width`
/// clamped to `[2, 24]`; the track width is clamped to `[4, 26]` and the
/// thumb is kept two pixels narrower than the track.
pub fn compute_track(
    viewport_height: f64,
    document_height: f64,
    track_pixel_width: f64,
) -> ScrollTrack {
    let viewport_height = sanitize(viewport_height);
    let document_height = sanitize(document_height);
    let track_pixel_width = sanitize(track_pixel_width);

    let visible_ratio = if document_height > 0.0 {
        viewport_height / document_height
    } else {
        1.0
    };

    let thumb_length = (visible_ratio * track_pixel_width).clamp(THUMB_MIN, THUMB_MAX);
    let track_width = track_pixel_width.clamp(TRACK_WIDTH_MIN, TRACK_WIDTH_MAX);
    let track_length = viewport_height;
    let scrollable = document_height > viewport_height;
    // A document that fits the viewport pins the thumb at 0
    let travel_range = if scrollable {
        (track_length - thumb_length).max(0.0)
    } else {
        0.0
    };

    ScrollTrack {
        track_length,
        track_width,
        thumb_width: track_width - THUMB_MARGIN,
        thumb_length,
        travel_range,
        scrollable,
    }
}

/// Map a thumb offset to the matching document offset.
pub fn thumb_to_document(
    thumb_offset: f64,
    travel_range: f64,
    document_height: f64,
    viewport_height: f64,
) -> f64 {
    let travel_range = sanitize(travel_range);
    let fraction = if travel_range > 0.0 {
        (sanitize(thumb_offset) / travel_range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    fraction * ScrollTrack::max_document_offset(viewport_height, document_height)
}

/// Map a document offset back to a thumb offset.
///
/// Used when the track is rebuilt around a restored document position.
pub fn document_to_thumb(
    document_offset: f64,
    document_height: f64,
    viewport_height: f64,
    travel_range: f64,
) -> f64 {
    let max_offset = ScrollTrack::max_document_offset(viewport_height, document_height);
    let fraction = if max_offset > 0.0 {
        (sanitize(document_offset) / max_offset).clamp(0.0, 1.0)
    } else {
        0.0
    };
    fraction * sanitize(travel_range)
}
