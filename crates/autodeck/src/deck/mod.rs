//! Presentation controller core.
//!
//! [`Presenter`] owns the slide index, autoplay driver, panel controller,
//! input router and every pending timer. The host feeds it input events and
//! commands, calls [`Presenter::run_due`] every frame, and draws from
//! [`Presenter::surface`]. Nothing here knows about egui.

pub mod autoplay;
pub mod commands;
pub mod input;
pub mod panel;
pub mod progress;
pub mod slides;
pub mod surface;
pub mod timers;

#[cfg(test)]
mod tests;

use std::time::Duration;

use log::{debug, trace};

use autoplay::Autoplay;
use commands::{Command, DurationChoices, Fullscreen};
use input::{InputEvent, InputRouter, Intent, Target, Viewport};
use panel::Panel;
use slides::SlideIndex;
use surface::Surface;
use timers::{Clock, Fired, TimerKind, Timers};

pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_DURATIONS: [Duration; 3] = [
    Duration::from_secs(10),
    Duration::from_secs(30),
    Duration::from_secs(60),
];
pub const PANEL_HIDE_DELAY: Duration = Duration::from_secs(10);
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
pub const SWIPE_THRESHOLD: f32 = 50.0;
pub const TOP_ZONE_RATIO: f32 = 0.25;

/// Startup behaviour and tuning for a [`Presenter`].
#[derive(Debug, Clone)]
pub struct DeckSettings {
    pub duration: Duration,
    pub durations: Vec<Duration>,
    pub autoplay: bool,
    pub auto_hide: bool,
    /// Starting autoplay switches auto-hide on.
    pub autoplay_enables_auto_hide: bool,
    pub hide_delay: Duration,
    pub progress_interval: Duration,
    pub countdown_interval: Duration,
    pub swipe_threshold: f32,
    pub top_zone_ratio: f32,
    pub start_slide: usize,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            durations: DEFAULT_DURATIONS.to_vec(),
            autoplay: true,
            auto_hide: true,
            autoplay_enables_auto_hide: true,
            hide_delay: PANEL_HIDE_DELAY,
            progress_interval: PROGRESS_INTERVAL,
            countdown_interval: COUNTDOWN_INTERVAL,
            swipe_threshold: SWIPE_THRESHOLD,
            top_zone_ratio: TOP_ZONE_RATIO,
            start_slide: 0,
        }
    }
}

impl DeckSettings {
    /// The duration buttons, with the selected duration added if it is not
    /// one of them.
    fn duration_buttons(&self) -> Vec<Duration> {
        let mut buttons = self.durations.clone();
        if !buttons.contains(&self.duration) {
            buttons.push(self.duration);
            buttons.sort();
        }
        buttons
    }
}

pub struct Presenter {
    clock: Box<dyn Clock>,
    timers: Timers,
    slides: SlideIndex,
    autoplay: Autoplay,
    panel: Panel,
    router: InputRouter,
    durations: DurationChoices,
    autoplay_enables_auto_hide: bool,
    surface: Surface,
}

impl Presenter {
    pub fn new(total_slides: usize, settings: &DeckSettings, clock: Box<dyn Clock>) -> Self {
        let durations = DurationChoices::new(settings.duration_buttons(), settings.duration);
        let mut surface = Surface::new(total_slides, durations.values().len());
        durations.paint(&mut surface);

        let mut presenter = Self {
            clock,
            timers: Timers::new(),
            slides: SlideIndex::new(total_slides),
            autoplay: Autoplay::new(settings.duration, settings.progress_interval),
            panel: Panel::new(
                settings.auto_hide,
                settings.hide_delay,
                settings.countdown_interval,
            ),
            router: InputRouter::new(settings.top_zone_ratio, settings.swipe_threshold),
            durations,
            autoplay_enables_auto_hide: settings.autoplay_enables_auto_hide,
            surface,
        };

        let now = presenter.clock.now();
        presenter
            .slides
            .go_to(settings.start_slide as i64, &mut presenter.surface);
        presenter.surface.auto_hide_active = settings.auto_hide;
        if settings.autoplay {
            presenter.start_autoplay(now);
        } else {
            presenter.reveal_panel(now);
        }
        debug!(
            "presenter ready: {} slides, autoplay {}, auto-hide {}",
            total_slides,
            presenter.autoplay.is_running(),
            presenter.panel.auto_hide()
        );
        presenter
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn current_slide(&self) -> usize {
        self.slides.current()
    }

    pub fn total_slides(&self) -> usize {
        self.slides.total()
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn durations(&self) -> &DurationChoices {
        &self.durations
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.timers.pending_of(kind)
    }

    /// How long until the next timer is due, for scheduling a repaint.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .next_deadline()
            .map(|due| due.saturating_sub(now))
    }

    /// Deliver every timer that has come due, in due order.
    pub fn run_due(&mut self) {
        let now = self.clock.now();
        while let Some(fired) = self.timers.pop_due(now) {
            self.fire(fired);
        }
    }

    fn fire(&mut self, fired: Fired) {
        trace!("timer {:?} fired at {:?}", fired.kind, fired.at);
        match fired.kind {
            TimerKind::Advance => {
                if !self.autoplay.take_advance(&fired) {
                    return;
                }
                self.slides.next(&mut self.surface);
                if self.autoplay.is_running() {
                    self.autoplay
                        .start(fired.at, &mut self.timers, &mut self.surface);
                }
            }
            TimerKind::ProgressTick => self.autoplay.on_tick(&fired, &mut self.surface),
            TimerKind::Hide => self
                .panel
                .on_hide(&fired, &mut self.timers, &mut self.surface),
            TimerKind::CountdownTick => self.panel.on_countdown(&fired, &mut self.surface),
        }
    }

    /// Route a decoded input event. Pointer input on the controls is dropped
    /// before it reaches the router.
    pub fn handle_input(&mut self, target: Target, event: InputEvent, viewport: Viewport) {
        if target == Target::Controls && !matches!(event, InputEvent::Key(_)) {
            self.router.cancel_gesture();
            return;
        }
        if let Some(intent) = self.router.route(event, viewport) {
            self.apply(intent);
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        let now = self.clock.now();
        match intent {
            Intent::Next => self.slides.next(&mut self.surface),
            Intent::Prev => self.slides.prev(&mut self.surface),
            Intent::RevealPanel => self.reveal_panel(now),
        }
    }

    /// Run a control panel command. Every command counts as panel activity
    /// and restarts the hide countdown.
    pub fn execute(&mut self, command: Command, fullscreen: Option<&mut dyn Fullscreen>) {
        let now = self.clock.now();
        debug!("command {command:?}");
        match command {
            Command::ToggleAutoplay => {
                let was_running = self.autoplay.is_running();
                self.autoplay
                    .toggle(now, &mut self.timers, &mut self.surface);
                if self.autoplay.is_running() {
                    self.couple_auto_hide(now, was_running);
                }
            }
            Command::ToggleAutoHide => {
                let enabled = !self.panel.auto_hide();
                self.panel
                    .set_auto_hide(enabled, now, &mut self.timers, &mut self.surface);
            }
            Command::ToggleFullscreen => commands::toggle_fullscreen(fullscreen),
            Command::SelectDuration(index) => {
                if let Some(duration) = self.durations.select(index, &mut self.surface) {
                    self.autoplay
                        .set_duration(duration, now, &mut self.timers, &mut self.surface);
                }
            }
        }
        self.reveal_panel(now);
    }

    pub fn go_to(&mut self, index: i64) {
        self.slides.go_to(index, &mut self.surface);
    }

    pub fn next(&mut self) {
        self.slides.next(&mut self.surface);
    }

    pub fn prev(&mut self) {
        self.slides.prev(&mut self.surface);
    }

    fn start_autoplay(&mut self, now: Duration) {
        let was_running = self.autoplay.is_running();
        self.autoplay
            .start(now, &mut self.timers, &mut self.surface);
        self.couple_auto_hide(now, was_running);
    }

    /// Once autoplay runs, the panel is visible with its auto-hide baseline
    /// armed. Restarting a cycle that was already running leaves it alone.
    fn couple_auto_hide(&mut self, now: Duration, was_running: bool) {
        if self.autoplay_enables_auto_hide && !self.panel.auto_hide() {
            self.panel
                .set_auto_hide(true, now, &mut self.timers, &mut self.surface);
        } else if !was_running {
            self.reveal_panel(now);
        }
    }

    fn reveal_panel(&mut self, now: Duration) {
        self.panel.show(now, &mut self.timers, &mut self.surface);
    }
}
