//! Scenario files and their replay against a headless page.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use vscroll::{
    HeadlessPage, MemoryStore, PageEvent, ScrollConfig, ScrollbarBuilder, VirtualScrollbar,
    WheelInput,
};

use crate::error::ScenarioError;

fn default_tick_ms() -> u64 {
    16
}

fn default_tail_ms() -> u64 {
    500
}

/// A scripted session: widget options, the page and what happens to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub config: ScrollConfig,
    #[serde(default)]
    pub page: PageSetup,
    /// Interval between ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// How long to keep ticking after the last event.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Scenario {
    /// Parse a scenario and validate its widget options.
    ///
    /// Events are ordered by time; events at the same time keep file order.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let mut scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        scenario.events.sort_by_key(|e| e.at_ms);
        Ok(scenario)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ScenarioError> {
        match &self.log_level {
            None => Ok(LevelFilter::Debug),
            Some(level) => level
                .parse()
                .map_err(|_| ScenarioError::LogLevel(level.clone())),
        }
    }

    fn end(&self) -> Duration {
        let last = self.events.last().map_or(0, |e| e.at_ms);
        Duration::from_millis(last + self.tail_ms)
    }
}

/// Initial page metrics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSetup {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub user_agent: Option<String>,
    pub mutation_observer: bool,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            document_height: 2400.0,
            user_agent: None,
            mutation_observer: true,
        }
    }
}

impl PageSetup {
    fn build(&self) -> HeadlessPage {
        let mut page = HeadlessPage::new(self.viewport_height, self.document_height)
            .with_width(self.viewport_width);
        if let Some(agent) = &self.user_agent {
            page = page.with_user_agent(agent.clone());
        }
        if !self.mutation_observer {
            page = page.without_mutation_observer();
        }
        page
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    /// Milliseconds after the start of the replay.
    pub at_ms: u64,
    #[serde(flatten)]
    pub step: Step,
}

/// Something that happens to the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    Load,
    Resize { width: f64, height: f64 },
    OrientationChange { width: f64, height: f64 },
    /// Modern wheel notch; positive scrolls up.
    Wheel { delta: f64 },
    /// Legacy wheel notch; positive scrolls down.
    LegacyWheel { detail: f64 },
    MouseDown { client_y: f64 },
    MouseMove { client_y: f64 },
    MouseUp,
    /// Content was added or removed, leaving the document this tall.
    Content { document_height: f64 },
}

#[derive(Debug, Default)]
struct Counters {
    init: Cell<u32>,
    scroll: Cell<u32>,
    drag: Cell<u32>,
    destroy: Cell<u32>,
}

fn bump(cell: &Cell<u32>) {
    cell.set(cell.get() + 1);
}

/// Callback invocations seen during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallbackCounts {
    pub init: u32,
    pub scroll: u32,
    pub drag: u32,
    pub destroy: u32,
}

/// Final state of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub mode: String,
    pub phase: String,
    pub thumb_offset: f64,
    pub document_offset: f64,
    pub scroll_top: f64,
    pub track_visible: bool,
    pub idle_hidden: bool,
    pub scroll_commands: usize,
    pub callbacks: CallbackCounts,
    /// Listeners still registered after teardown.
    pub leaked_listeners: usize,
}

/// A mounted scrollbar fed with scenario steps.
pub struct Replay {
    bar: VirtualScrollbar<HeadlessPage>,
    counters: Rc<Counters>,
}

impl Replay {
    /// Mount the scrollbar on the scenario's page.
    pub fn start(scenario: &Scenario, now: Instant) -> Result<Self, ScenarioError> {
        let counters = Rc::new(Counters::default());
        let (init, scroll, drag, destroy) = (
            Rc::clone(&counters),
            Rc::clone(&counters),
            Rc::clone(&counters),
            Rc::clone(&counters),
        );

        let bar = ScrollbarBuilder::new(scenario.config.clone())
            .on_init(move || bump(&init.init))
            .on_scroll(move || bump(&scroll.scroll))
            .on_drag(move || bump(&drag.drag))
            .on_destroy(move || bump(&destroy.destroy))
            .mount(scenario.page.build(), MemoryStore::new(), now)?
            .into_fresh()
            .ok_or(ScenarioError::AlreadyMounted)?;

        Ok(Self { bar, counters })
    }

    /// Apply one step to the page and deliver the matching event.
    pub fn apply(&mut self, step: &Step, now: Instant) {
        log::debug!("[sim] {:?}", step);
        let event = match *step {
            Step::Load => PageEvent::Load,
            Step::Resize { width, height } => {
                self.resize(width, height);
                PageEvent::Resize
            }
            Step::OrientationChange { width, height } => {
                self.resize(width, height);
                PageEvent::OrientationChange
            }
            Step::Wheel { delta } => PageEvent::Wheel(WheelInput::delta(delta)),
            Step::LegacyWheel { detail } => PageEvent::Wheel(WheelInput::legacy(detail)),
            Step::MouseDown { client_y } => PageEvent::MouseDown { client_y },
            Step::MouseMove { client_y } => PageEvent::MouseMove { client_y },
            Step::MouseUp => PageEvent::MouseUp,
            Step::Content { document_height } => {
                let page = self.bar.page_mut();
                page.document_height = document_height;
                if !page.mutation_observer {
                    // Picked up by polling on the next tick.
                    return;
                }
                PageEvent::Mutation
            }
        };
        self.bar.handle(event, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.bar.tick(now);
    }

    fn resize(&mut self, width: f64, height: f64) {
        let page = self.bar.page_mut();
        page.viewport_width = width;
        page.viewport_height = height;
    }

    fn callbacks(&self) -> CallbackCounts {
        CallbackCounts {
            init: self.counters.init.get(),
            scroll: self.counters.scroll.get(),
            drag: self.counters.drag.get(),
            destroy: self.counters.destroy.get(),
        }
    }

    /// Tear the widget down and report what was left behind.
    pub fn finish(self) -> Report {
        let callbacks = self.callbacks();
        let state = self.bar.state();
        let mode = format!("{:?}", self.bar.mode());
        let phase = format!("{:?}", self.bar.phase());
        let page = self.bar.teardown();

        Report {
            mode,
            phase,
            thumb_offset: state.thumb_offset,
            document_offset: state.document_offset,
            scroll_top: page.scroll_top,
            track_visible: page.track_visible,
            idle_hidden: page.idle_hidden,
            scroll_commands: page.scroll_log.len(),
            callbacks,
            leaked_listeners: page.total_listeners(),
        }
    }
}

/// Replay a scenario in real time.
pub async fn play(scenario: &Scenario) -> Result<Report, ScenarioError> {
    let start = Instant::now();
    let mut replay = Replay::start(scenario, start)?;
    let mut interval = tokio::time::interval(Duration::from_millis(scenario.tick_ms.max(1)));
    let mut pending = scenario.events.iter().peekable();
    let end = scenario.end();

    loop {
        interval.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(start);

        while let Some(event) =
            pending.next_if(|e| Duration::from_millis(e.at_ms) <= elapsed)
        {
            replay.apply(&event.step, now);
        }
        replay.tick(now);

        if pending.peek().is_none() && elapsed >= end {
            break;
        }
    }

    log::info!("[sim] replay finished after {:?}", start.elapsed());
    Ok(replay.finish())
}
