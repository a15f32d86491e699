use vscroll::geometry::{
    THUMB_MAX, THUMB_MIN, compute_track, document_to_thumb, thumb_to_document,
};

// =============================================================================
// Track Tests
// =============================================================================

#[test]
fn test_track_tall_document_wide_track() {
    let track = compute_track(800.0, 2400.0, 100.0);
    assert_eq!(track.thumb_length, THUMB_MAX);
    assert_eq!(track.track_length, 800.0);
    assert_eq!(track.travel_range, 800.0 - 24.0);
    assert!(track.scrollable);
}

#[test]
fn test_track_thumb_length_floor() {
    let track = compute_track(100.0, 100_000.0, 10.0);
    assert_eq!(track.thumb_length, THUMB_MIN);
    assert_eq!(track.travel_range, 98.0);
}

#[test]
fn test_track_proportional_thumb() {
    // 800 / 1600 * 20 = 10
    let track = compute_track(800.0, 1600.0, 20.0);
    assert_eq!(track.thumb_length, 10.0);
    assert_eq!(track.travel_range, 790.0);
}

#[test]
fn test_track_width_clamped_with_margin() {
    let wide = compute_track(800.0, 2400.0, 40.0);
    assert_eq!(wide.track_width, 26.0);
    assert_eq!(wide.thumb_width, 24.0);

    let narrow = compute_track(800.0, 2400.0, 1.0);
    assert_eq!(narrow.track_width, 4.0);
    assert_eq!(narrow.thumb_width, 2.0);
}

#[test]
fn test_track_visibility_boundary() {
    assert!(!compute_track(800.0, 800.0, 10.0).scrollable);
    assert!(compute_track(800.0, 801.0, 10.0).scrollable);
    assert!(!compute_track(800.0, 300.0, 10.0).scrollable);
}

#[test]
fn test_track_travel_never_negative() {
    let track = compute_track(1.0, 50.0, 10.0);
    assert_eq!(track.thumb_length, THUMB_MIN);
    assert_eq!(track.travel_range, 0.0);
}

#[test]
fn test_track_invalid_input_clamped() {
    let track = compute_track(f64::NAN, -20.0, f64::INFINITY);
    assert_eq!(track.track_length, 0.0);
    assert_eq!(track.travel_range, 0.0);
    assert!(!track.scrollable);
}

// =============================================================================
// Mapping Tests
// =============================================================================

#[test]
fn test_thumb_to_document_extremes() {
    assert_eq!(thumb_to_document(0.0, 776.0, 2400.0, 800.0), 0.0);
    assert_eq!(thumb_to_document(776.0, 776.0, 2400.0, 800.0), 1600.0);
    assert_eq!(thumb_to_document(388.0, 776.0, 2400.0, 800.0), 800.0);
}

#[test]
fn test_thumb_to_document_overshoot_clamped() {
    assert_eq!(thumb_to_document(5000.0, 776.0, 2400.0, 800.0), 1600.0);
    assert_eq!(thumb_to_document(-10.0, 776.0, 2400.0, 800.0), 0.0);
}

#[test]
fn test_thumb_to_document_zero_travel() {
    assert_eq!(thumb_to_document(10.0, 0.0, 2400.0, 800.0), 0.0);
}

#[test]
fn test_document_to_thumb_not_scrollable() {
    assert_eq!(document_to_thumb(100.0, 800.0, 800.0, 776.0), 0.0);
}

#[test]
fn test_round_trip_within_one_pixel() {
    let layouts = [(2400.0, 800.0), (801.0, 800.0), (10_000.0, 0.0), (5000.0, 1234.5)];
    for (document_height, viewport_height) in layouts {
        let track = compute_track(viewport_height, document_height, 10.0);
        if track.travel_range == 0.0 {
            continue;
        }
        let max_offset = document_height - viewport_height;
        for step in 0..=10 {
            let d = max_offset * step as f64 / 10.0;
            let thumb = document_to_thumb(d, document_height, viewport_height, track.travel_range);
            let back = thumb_to_document(thumb, track.travel_range, document_height, viewport_height);
            assert!(
                (back - d).abs() <= 1.0,
                "round trip drifted: {} -> {} -> {}",
                d,
                thumb,
                back
            );
        }
    }
}
