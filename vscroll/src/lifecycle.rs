//! Device mode and listener lifecycle.
//!
//! Decides whether the widget is active for the current viewport and
//! device, and owns every listener handle the widget registers outside of
//! a drag. Nothing here touches scroll state.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ScrollConfig;
use crate::page::{EventKind, ListenTarget, ListenerId, Page};

static MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|windows phone")
        .expect("mobile agent pattern is valid")
});

/// Whether a user agent belongs to a mobile device.
pub fn detect_mobile(user_agent: &str) -> bool {
    MOBILE_AGENT.is_match(user_agent)
}

/// Whether the custom scrollbar runs or steps aside for native scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceMode {
    #[default]
    Active,
    Suppressed,
}

/// Decide the device mode for a viewport width and device class.
pub fn device_mode(config: &ScrollConfig, viewport_width: f64, is_mobile: bool) -> DeviceMode {
    if below_breakpoint(config, viewport_width) || (is_mobile && !config.mobile) {
        DeviceMode::Suppressed
    } else {
        DeviceMode::Active
    }
}

/// Whether the breakpoint rule applies at this width.
pub fn below_breakpoint(config: &ScrollConfig, viewport_width: f64) -> bool {
    config.destroy && viewport_width < config.destroy_on
}

/// A device mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Suppressed,
    Activated,
}

/// How document mutations are noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationWatch {
    Observer(ListenerId),
    /// No observer available; the document height is compared on every tick.
    Polling,
}

/// Listener handles and device mode of one mounted widget.
#[derive(Debug)]
pub struct Lifecycle {
    mode: DeviceMode,
    window: Vec<ListenerId>,
    thumb: ListenerId,
    /// Held while attached; its presence is what makes attaching idempotent.
    wheel: Option<[ListenerId; 2]>,
    mutation: MutationWatch,
    last_document_height: f64,
}

impl Lifecycle {
    /// Register the listeners that live as long as the widget.
    pub fn attach<P: Page + ?Sized>(page: &mut P) -> Self {
        let window = [EventKind::Load, EventKind::Resize, EventKind::OrientationChange]
            .into_iter()
            .map(|kind| page.listen(ListenTarget::Window, kind))
            .collect();
        let thumb = page.listen(ListenTarget::Thumb, EventKind::MouseDown);
        let mutation = if page.supports_mutation_observer() {
            MutationWatch::Observer(page.listen(ListenTarget::Document, EventKind::Mutation))
        } else {
            log::debug!("[lifecycle] no mutation observer, polling document height");
            MutationWatch::Polling
        };

        Self {
            mode: DeviceMode::Active,
            window,
            thumb,
            wheel: None,
            mutation,
            last_document_height: page.document_height(),
        }
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn mutation_watch(&self) -> MutationWatch {
        self.mutation
    }

    pub fn wheel_attached(&self) -> bool {
        self.wheel.is_some()
    }

    /// Recompute the device mode. Returns the transition, if any.
    pub fn evaluate<P: Page + ?Sized>(
        &mut self,
        config: &ScrollConfig,
        page: &P,
    ) -> Option<ModeChange> {
        let next = device_mode(
            config,
            page.viewport_width(),
            detect_mobile(page.user_agent()),
        );
        if next == self.mode {
            return None;
        }
        self.mode = next;
        log::debug!("[lifecycle] device mode -> {:?}", next);
        Some(match next {
            DeviceMode::Active => ModeChange::Activated,
            DeviceMode::Suppressed => ModeChange::Suppressed,
        })
    }

    /// Subscribe to wheel input. No-op if already subscribed.
    pub fn attach_wheel<P: Page + ?Sized>(&mut self, page: &mut P) -> bool {
        if self.wheel.is_some() {
            return false;
        }
        self.wheel = Some([
            page.listen(ListenTarget::Body, EventKind::Wheel),
            page.listen(ListenTarget::Body, EventKind::LegacyWheel),
        ]);
        true
    }

    /// Unsubscribe from wheel input. No-op if not subscribed.
    pub fn detach_wheel<P: Page + ?Sized>(&mut self, page: &mut P) -> bool {
        match self.wheel.take() {
            Some(ids) => {
                ids.into_iter().for_each(|id| page.unlisten(id));
                true
            }
            None => false,
        }
    }

    /// Remember the document height seen by the last reconciliation.
    pub fn note_document_height(&mut self, height: f64) {
        self.last_document_height = height;
    }

    /// In polling mode, report whether the document height changed since
    /// the last call or reconciliation.
    pub fn poll_mutation<P: Page + ?Sized>(&mut self, page: &P) -> bool {
        if self.mutation != MutationWatch::Polling {
            return false;
        }
        let height = page.document_height();
        if height == self.last_document_height {
            return false;
        }
        self.last_document_height = height;
        true
    }

    /// Release every handle this lifecycle holds.
    pub fn release<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.detach_wheel(page);
        for id in self.window.drain(..) {
            page.unlisten(id);
        }
        page.unlisten(self.thumb);
        if let MutationWatch::Observer(id) = self.mutation {
            page.unlisten(id);
        }
        self.mutation = MutationWatch::Polling;
    }
}
