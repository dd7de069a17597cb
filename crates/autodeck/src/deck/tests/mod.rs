mod input_routing;

use std::time::Duration;

use super::timers::ManualClock;
use super::{DeckSettings, Presenter};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Helper to build a presenter on a manual clock.
fn presenter(total: usize, settings: DeckSettings) -> (Presenter, ManualClock) {
    let clock = ManualClock::new();
    let presenter = Presenter::new(total, &settings, Box::new(clock.clone()));
    (presenter, clock)
}

/// Settings with autoplay off, so tests start from a quiet deck.
fn manual_settings() -> DeckSettings {
    DeckSettings {
        autoplay: false,
        ..DeckSettings::default()
    }
}

/// Advance the clock and deliver every timer that came due.
fn step(presenter: &mut Presenter, clock: &ManualClock, by: Duration) {
    clock.advance(by);
    presenter.run_due();
}

/// Assert the surface shows exactly one active slide, the current one.
fn assert_single_active(presenter: &Presenter) {
    let surface = presenter.surface();
    let active: Vec<usize> = surface
        .active_slides
        .iter()
        .enumerate()
        .filter(|(_, a)| **a)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(
        active,
        vec![presenter.current_slide()],
        "expected only slide {} active",
        presenter.current_slide()
    );
}
