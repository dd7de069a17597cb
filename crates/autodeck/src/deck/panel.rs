//! Control panel visibility with optional auto-hide.
//!
//! While auto-hide is on and the panel is visible there is a hide deadline,
//! a pending hide timer and a repeating countdown tick that refreshes the
//! "Auto Hide (N)" label. With auto-hide off the panel is pinned visible and
//! none of those exist.

use std::time::Duration;

use log::debug;

use super::surface::{AUTO_HIDE_LABEL, Surface};
use super::timers::{Fired, TimerHandle, TimerKind, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Visible { auto_hide: bool },
    Hidden,
}

#[derive(Debug)]
pub struct Panel {
    visible: bool,
    auto_hide: bool,
    hide_delay: Duration,
    countdown_interval: Duration,
    deadline: Option<Duration>,
    hide_timer: Option<TimerHandle>,
    countdown_timer: Option<TimerHandle>,
}

impl Panel {
    pub fn new(auto_hide: bool, hide_delay: Duration, countdown_interval: Duration) -> Self {
        Self {
            visible: true,
            auto_hide,
            hide_delay,
            countdown_interval,
            deadline: None,
            hide_timer: None,
            countdown_timer: None,
        }
    }

    pub fn state(&self) -> PanelState {
        if self.visible {
            PanelState::Visible {
                auto_hide: self.auto_hide,
            }
        } else {
            PanelState::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn auto_hide(&self) -> bool {
        self.auto_hide
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Reveal the panel and restart the hide countdown from the full delay.
    pub fn show(&mut self, now: Duration, timers: &mut Timers, surface: &mut Surface) {
        self.visible = true;
        surface.panel_visible = true;
        timers.cancel(&mut self.hide_timer);

        if self.auto_hide {
            self.deadline = Some(now + self.hide_delay);
            self.hide_timer = Some(timers.schedule_once(TimerKind::Hide, self.hide_delay, now));
            self.start_countdown(now, timers, surface);
        } else {
            self.deadline = None;
            self.stop_countdown(timers, surface);
        }
    }

    /// Hide the panel. Only auto-hide ever hides it, so this does nothing
    /// while auto-hide is off.
    pub fn hide(&mut self, timers: &mut Timers, surface: &mut Surface) {
        if !self.auto_hide {
            return;
        }
        self.visible = false;
        surface.panel_visible = false;
        self.deadline = None;
        timers.cancel(&mut self.hide_timer);
        self.stop_countdown(timers, surface);
        debug!("panel hidden");
    }

    pub fn set_auto_hide(
        &mut self,
        enabled: bool,
        now: Duration,
        timers: &mut Timers,
        surface: &mut Surface,
    ) {
        self.auto_hide = enabled;
        surface.auto_hide_active = enabled;
        debug!("auto-hide {}", if enabled { "on" } else { "off" });

        if enabled {
            self.show(now, timers, surface);
        } else {
            self.visible = true;
            surface.panel_visible = true;
            self.deadline = None;
            timers.cancel(&mut self.hide_timer);
            self.stop_countdown(timers, surface);
        }
    }

    /// Whole seconds left before the panel hides, rounded up.
    pub fn remaining_secs(&self, now: Duration) -> Option<u64> {
        if !self.auto_hide || !self.visible {
            return None;
        }
        let left = self.deadline?.saturating_sub(now);
        let secs = left.as_millis().div_ceil(1000) as u64;
        (secs > 0).then_some(secs)
    }

    pub fn label(&self, now: Duration) -> String {
        match self.remaining_secs(now) {
            Some(secs) => format!("{AUTO_HIDE_LABEL} ({secs})"),
            None => AUTO_HIDE_LABEL.to_string(),
        }
    }

    pub fn on_hide(&mut self, fired: &Fired, timers: &mut Timers, surface: &mut Surface) {
        if self.hide_timer != Some(fired.handle) {
            return;
        }
        self.hide_timer = None;
        self.hide(timers, surface);
    }

    pub fn on_countdown(&self, fired: &Fired, surface: &mut Surface) {
        if self.countdown_timer != Some(fired.handle) {
            return;
        }
        surface.auto_hide_label = self.label(fired.at);
    }

    fn start_countdown(&mut self, now: Duration, timers: &mut Timers, surface: &mut Surface) {
        timers.cancel(&mut self.countdown_timer);
        surface.auto_hide_label = self.label(now);
        self.countdown_timer = Some(timers.schedule_every(
            TimerKind::CountdownTick,
            self.countdown_interval,
            now,
        ));
    }

    fn stop_countdown(&mut self, timers: &mut Timers, surface: &mut Surface) {
        timers.cancel(&mut self.countdown_timer);
        surface.auto_hide_label = AUTO_HIDE_LABEL.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn setup(auto_hide: bool) -> (Panel, Timers, Surface) {
        let mut surface = Surface::new(1, 0);
        surface.auto_hide_active = auto_hide;
        (
            Panel::new(auto_hide, secs(10), secs(1)),
            Timers::new(),
            surface,
        )
    }

    /// Fire everything due up to `now`, the way the presenter does.
    fn run(panel: &mut Panel, timers: &mut Timers, surface: &mut Surface, now: Duration) {
        while let Some(fired) = timers.pop_due(now) {
            match fired.kind {
                TimerKind::Hide => panel.on_hide(&fired, timers, surface),
                TimerKind::CountdownTick => panel.on_countdown(&fired, surface),
                _ => {}
            }
        }
    }

    #[test]
    fn test_show_arms_deadline_when_auto_hide() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        assert_eq!(panel.deadline(), Some(secs(10)));
        assert_eq!(timers.pending_of(TimerKind::Hide), 1);
        assert_eq!(timers.pending_of(TimerKind::CountdownTick), 1);
        assert_eq!(surface.auto_hide_label, "Auto Hide (10)");
    }

    #[test]
    fn test_show_without_auto_hide_arms_nothing() {
        let (mut panel, mut timers, mut surface) = setup(false);
        panel.show(secs(0), &mut timers, &mut surface);
        assert_eq!(panel.deadline(), None);
        assert_eq!(timers.pending(), 0);
        assert_eq!(surface.auto_hide_label, "Auto Hide");
    }

    #[test]
    fn test_hides_after_delay() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        run(&mut panel, &mut timers, &mut surface, secs(9));
        assert!(panel.is_visible());
        assert_eq!(surface.auto_hide_label, "Auto Hide (1)");

        run(&mut panel, &mut timers, &mut surface, secs(10));
        assert_eq!(panel.state(), PanelState::Hidden);
        assert!(!surface.panel_visible);
        assert_eq!(panel.deadline(), None);
        assert_eq!(timers.pending(), 0);
        assert_eq!(surface.auto_hide_label, "Auto Hide");
    }

    #[test]
    fn test_countdown_label_steps_down() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        run(&mut panel, &mut timers, &mut surface, secs(1));
        assert_eq!(surface.auto_hide_label, "Auto Hide (9)");
        run(&mut panel, &mut timers, &mut surface, secs(4));
        assert_eq!(surface.auto_hide_label, "Auto Hide (6)");
    }

    #[test]
    fn test_remaining_rounds_up() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        assert_eq!(panel.remaining_secs(Duration::from_millis(8_001)), Some(2));
        assert_eq!(panel.remaining_secs(Duration::from_millis(9_999)), Some(1));
        assert_eq!(panel.remaining_secs(secs(10)), None);
    }

    #[test]
    fn test_reveal_restarts_full_delay() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        run(&mut panel, &mut timers, &mut surface, secs(7));
        panel.show(secs(7), &mut timers, &mut surface);
        assert_eq!(panel.deadline(), Some(secs(17)));
        assert_eq!(timers.pending_of(TimerKind::Hide), 1);

        run(&mut panel, &mut timers, &mut surface, secs(16));
        assert!(panel.is_visible());
        run(&mut panel, &mut timers, &mut surface, secs(17));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_hide_ignored_without_auto_hide() {
        let (mut panel, mut timers, mut surface) = setup(false);
        panel.hide(&mut timers, &mut surface);
        assert!(panel.is_visible());
        assert!(surface.panel_visible);
    }

    #[test]
    fn test_disable_while_hidden_pins_visible() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        run(&mut panel, &mut timers, &mut surface, secs(10));
        assert!(!panel.is_visible());

        panel.set_auto_hide(false, secs(11), &mut timers, &mut surface);
        assert_eq!(panel.state(), PanelState::Visible { auto_hide: false });
        assert!(surface.panel_visible);
        assert!(!surface.auto_hide_active);
        assert_eq!(timers.pending(), 0);

        panel.show(secs(12), &mut timers, &mut surface);
        run(&mut panel, &mut timers, &mut surface, secs(600));
        assert!(panel.is_visible());
    }

    #[test]
    fn test_disable_while_visible_cancels_pending_hide() {
        let (mut panel, mut timers, mut surface) = setup(true);
        panel.show(secs(0), &mut timers, &mut surface);
        panel.set_auto_hide(false, secs(3), &mut timers, &mut surface);
        assert_eq!(timers.pending(), 0);
        assert_eq!(surface.auto_hide_label, "Auto Hide");
        run(&mut panel, &mut timers, &mut surface, secs(60));
        assert!(panel.is_visible());
    }

    #[test]
    fn test_enable_arms_new_deadline() {
        let (mut panel, mut timers, mut surface) = setup(false);
        panel.set_auto_hide(true, secs(5), &mut timers, &mut surface);
        assert_eq!(panel.deadline(), Some(secs(15)));
        assert!(surface.auto_hide_active);
        run(&mut panel, &mut timers, &mut surface, secs(15));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_stale_hide_is_ignored() {
        let (mut panel, mut timers, mut surface) = setup(true);
        let mut slot = Some(timers.schedule_once(TimerKind::Hide, secs(1), secs(0)));
        let stale = slot.unwrap();
        timers.cancel(&mut slot);

        panel.show(secs(0), &mut timers, &mut surface);
        let forged = Fired {
            handle: stale,
            kind: TimerKind::Hide,
            at: secs(10),
        };
        panel.on_hide(&forged, &mut timers, &mut surface);
        assert!(panel.is_visible());
        assert_eq!(timers.pending_of(TimerKind::Hide), 1);
    }
}
