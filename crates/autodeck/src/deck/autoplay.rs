//! Timed slide advancement.
//!
//! A running cycle holds two timers: a one-shot advance and a repeating
//! progress tick. The advance is not periodic; the presenter restarts the
//! cycle after each advance so a duration change takes effect on the next
//! cycle.

use std::time::Duration;

use log::debug;

use super::progress::ProgressClock;
use super::surface::Surface;
use super::timers::{Fired, TimerHandle, TimerKind, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    Stopped,
    Running(Duration),
}

#[derive(Debug)]
pub struct Autoplay {
    state: AutoplayState,
    duration: Duration,
    tick_interval: Duration,
    progress: ProgressClock,
    advance_timer: Option<TimerHandle>,
    tick_timer: Option<TimerHandle>,
}

impl Autoplay {
    pub fn new(duration: Duration, tick_interval: Duration) -> Self {
        Self {
            state: AutoplayState::Stopped,
            duration,
            tick_interval,
            progress: ProgressClock::default(),
            advance_timer: None,
            tick_timer: None,
        }
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AutoplayState::Running(_))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin a fresh cycle from zero elapsed, replacing any cycle in flight.
    pub fn start(&mut self, now: Duration, timers: &mut Timers, surface: &mut Surface) {
        timers.cancel(&mut self.advance_timer);
        timers.cancel(&mut self.tick_timer);

        self.progress.reset(now, surface);
        self.advance_timer = Some(timers.schedule_once(TimerKind::Advance, self.duration, now));
        self.tick_timer =
            Some(timers.schedule_every(TimerKind::ProgressTick, self.tick_interval, now));

        if !self.is_running() {
            debug!("autoplay started ({:?} per slide)", self.duration);
        }
        self.state = AutoplayState::Running(self.duration);
        surface.autoplay_active = true;
    }

    pub fn stop(&mut self, timers: &mut Timers, surface: &mut Surface) {
        timers.cancel(&mut self.advance_timer);
        timers.cancel(&mut self.tick_timer);
        if self.is_running() {
            debug!("autoplay stopped");
        }
        self.state = AutoplayState::Stopped;
        surface.autoplay_active = false;
        surface.progress_percent = 0.0;
    }

    /// Change the per-slide duration. A running cycle restarts with no
    /// carry-over of partial progress.
    pub fn set_duration(
        &mut self,
        duration: Duration,
        now: Duration,
        timers: &mut Timers,
        surface: &mut Surface,
    ) {
        self.duration = duration;
        if self.is_running() {
            self.start(now, timers, surface);
        }
    }

    pub fn toggle(&mut self, now: Duration, timers: &mut Timers, surface: &mut Surface) {
        if self.is_running() {
            self.stop(timers, surface);
        } else {
            self.start(now, timers, surface);
        }
    }

    /// Accept a fired advance timer. Returns `false` for a stale handle.
    pub fn take_advance(&mut self, fired: &Fired) -> bool {
        if self.advance_timer == Some(fired.handle) {
            self.advance_timer = None;
            true
        } else {
            false
        }
    }

    /// Refresh the progress fill from a fired tick timer.
    pub fn on_tick(&self, fired: &Fired, surface: &mut Surface) {
        if self.tick_timer != Some(fired.handle) {
            return;
        }
        self.progress
            .tick(fired.at, self.duration, self.is_running(), surface);
    }

    pub fn progress_fraction(&self, now: Duration) -> f32 {
        if self.is_running() {
            self.progress.fraction(now, self.duration)
        } else {
            0.0
        }
    }
}
