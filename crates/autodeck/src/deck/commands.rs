use std::time::Duration;

use super::surface::Surface;

/// Button actions from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleAutoplay,
    ToggleAutoHide,
    ToggleFullscreen,
    /// Pick the duration button at this index.
    SelectDuration(usize),
}

/// Platform fullscreen capability. Hosts without one pass `None`.
pub trait Fullscreen {
    fn is_fullscreen(&self) -> bool;
    fn enter(&mut self);
    fn exit(&mut self);
}

/// Enter fullscreen if not already there, otherwise leave it.
pub fn toggle_fullscreen(api: Option<&mut dyn Fullscreen>) {
    let Some(api) = api else {
        log::debug!("fullscreen unavailable, ignoring toggle");
        return;
    };
    if api.is_fullscreen() {
        api.exit();
    } else {
        api.enter();
    }
}

/// The fixed set of per-slide durations offered on the panel.
#[derive(Debug, Clone)]
pub struct DurationChoices {
    values: Vec<Duration>,
    active: usize,
}

impl DurationChoices {
    /// `values` must not be empty. The active button is the one matching
    /// `initial`, or the first button if none does.
    pub fn new(values: Vec<Duration>, initial: Duration) -> Self {
        let active = values.iter().position(|&v| v == initial).unwrap_or(0);
        Self { values, active }
    }

    pub fn values(&self) -> &[Duration] {
        &self.values
    }

    pub fn active(&self) -> Option<usize> {
        self.values.get(self.active).map(|_| self.active)
    }

    /// Make `index` the only active button. Returns its duration, or `None`
    /// if there is no such button.
    pub fn select(&mut self, index: usize, surface: &mut Surface) -> Option<Duration> {
        let value = *self.values.get(index)?;
        self.active = index;
        self.paint(surface);
        Some(value)
    }

    pub fn paint(&self, surface: &mut Surface) {
        for (i, flag) in surface.duration_active.iter_mut().enumerate() {
            *flag = i == self.active;
        }
    }
}
