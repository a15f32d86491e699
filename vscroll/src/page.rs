//! The page contract the scrollbar drives.
//!
//! Everything the widget needs from the host document goes through the
//! [`Page`] trait: reading metrics, issuing scroll commands, writing the
//! thumb's placement, toggling visual markers and managing listener
//! subscriptions. A browser binding implements it over the DOM;
//! [`HeadlessPage`](crate::HeadlessPage) implements it in memory.

use crate::error::ScrollError;

/// Handle for a registered event listener.
///
/// Returned by [`Page::listen`] and released with [`Page::unlisten`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    Window,
    Document,
    Body,
    Thumb,
}

/// Kinds of events the widget subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Resize,
    OrientationChange,
    /// Modern wheel event (`mousewheel`).
    Wheel,
    /// Legacy wheel event (`DOMMouseScroll`).
    LegacyWheel,
    MouseDown,
    MouseMove,
    MouseUp,
    /// Subtree mutation notifications.
    Mutation,
}

/// Raw wheel input as delivered by the page.
///
/// Modern events carry `wheel_delta` (positive = away from the user);
/// legacy events carry `detail` with the opposite sign. Zero means absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub wheel_delta: f64,
    pub detail: f64,
}

impl WheelInput {
    /// A modern wheel event.
    pub fn delta(wheel_delta: f64) -> Self {
        Self {
            wheel_delta,
            detail: 0.0,
        }
    }

    /// A legacy wheel event.
    pub fn legacy(detail: f64) -> Self {
        Self {
            wheel_delta: 0.0,
            detail,
        }
    }
}

/// Events delivered to the scrollbar by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Load,
    Resize,
    OrientationChange,
    Wheel(WheelInput),
    /// Pointer pressed; `client_y` is the pointer's vertical client coordinate.
    MouseDown { client_y: f64 },
    MouseMove { client_y: f64 },
    MouseUp,
    /// Content was inserted or removed somewhere in the document.
    Mutation,
}

/// Placement of the thumb inside its track, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThumbPlacement {
    pub top: f64,
    pub length: f64,
    pub width: f64,
    pub track_width: f64,
}

/// Host document as seen by the scrollbar.
pub trait Page {
    /// Inner width of the viewport.
    fn viewport_width(&self) -> f64;

    /// Inner height of the viewport.
    fn viewport_height(&self) -> f64;

    /// Full height of the document.
    fn document_height(&self) -> f64;

    /// Current document scroll offset.
    fn scroll_top(&self) -> f64;

    /// Scroll the document to an absolute offset.
    fn scroll_to(&mut self, offset: f64);

    /// Whether a scrollbar widget is already mounted on this page.
    fn has_widget(&self) -> bool;

    /// Create the track and thumb elements.
    fn mount_widget(&mut self) -> Result<(), ScrollError>;

    /// Remove the track and thumb elements.
    fn unmount_widget(&mut self);

    /// Width the page currently renders the track at.
    fn track_width(&self) -> f64;

    /// Client coordinate of the top of the track.
    fn track_origin_y(&self) -> f64;

    /// Write the thumb's position and size.
    fn place_thumb(&mut self, placement: ThumbPlacement);

    /// Show or hide the whole track.
    fn set_track_visible(&mut self, visible: bool);

    /// Toggle the breakpoint marker on the track and body.
    fn set_breakpoint(&mut self, active: bool);

    /// Toggle the inactivity marker that fades the track out.
    fn set_idle_hidden(&mut self, hidden: bool);

    /// Subscribe to an event; the returned handle releases it.
    fn listen(&mut self, target: ListenTarget, kind: EventKind) -> ListenerId;

    /// Release a subscription. Unknown handles are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Whether the environment can report subtree mutations.
    fn supports_mutation_observer(&self) -> bool;

    /// The browser's user agent string.
    fn user_agent(&self) -> &str;
}
