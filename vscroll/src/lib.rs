//! Virtual page scrollbar
//!
//! A custom-drawn vertical scrollbar that keeps its thumb, the document
//! scroll offset and a session-persisted position in agreement. The host
//! page is reached through the [`Page`] trait; [`HeadlessPage`] provides an
//! in-memory page for simulation and tests.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod page;
pub mod persist;
pub mod state;
pub mod sync;

mod headless;
mod scrollbar;

pub use config::ScrollConfig;
pub use error::{ConfigError, ScrollError, StoreError};
pub use geometry::ScrollTrack;
pub use headless::HeadlessPage;
pub use lifecycle::DeviceMode;
pub use page::{EventKind, ListenTarget, ListenerId, Page, PageEvent, ThumbPlacement, WheelInput};
pub use persist::{DisabledStore, MemoryStore, PersistedPosition, SessionStore};
pub use scrollbar::*;
pub use state::ScrollState;
pub use sync::{SyncPhase, WHEEL_SETTLE_DELAY, WheelDirection};
