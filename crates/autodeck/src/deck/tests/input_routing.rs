use super::*;
use crate::deck::input::{InputEvent, Key, Point, Target, Viewport};

const VIEW: Viewport = Viewport {
    width: 1200.0,
    height: 800.0,
};

fn tap(p: &mut Presenter, target: Target, from: (f32, f32), to: (f32, f32)) {
    p.handle_input(target, InputEvent::PointerDown(Point::new(from.0, from.1)), VIEW);
    p.handle_input(target, InputEvent::PointerUp(Point::new(to.0, to.1)), VIEW);
}

fn key(p: &mut Presenter, key: Key) {
    p.handle_input(Target::Stage, InputEvent::Key(key), VIEW);
}

#[test]
fn test_five_slides_next_four_times_then_wrap() {
    let (mut p, _clock) = presenter(5, manual_settings());
    for _ in 0..4 {
        key(&mut p, Key::Right);
    }
    assert_eq!(p.current_slide(), 4);
    key(&mut p, Key::Space);
    assert_eq!(p.current_slide(), 0);
    assert_single_active(&p);
}

#[test]
fn test_keys_navigate_both_ways() {
    let (mut p, _clock) = presenter(5, manual_settings());
    key(&mut p, Key::Down);
    key(&mut p, Key::Down);
    assert_eq!(p.current_slide(), 2);
    key(&mut p, Key::Up);
    key(&mut p, Key::Left);
    key(&mut p, Key::Left);
    assert_eq!(p.current_slide(), 4);
    key(&mut p, Key::Other);
    assert_eq!(p.current_slide(), 4);
}

#[test]
fn test_swipe_left_80_is_next() {
    let (mut p, _clock) = presenter(5, manual_settings());
    tap(&mut p, Target::Stage, (600.0, 500.0), (520.0, 500.0));
    assert_eq!(p.current_slide(), 1);
}

#[test]
fn test_swipe_left_20_falls_through_to_click_zone() {
    let (mut p, _clock) = presenter(5, manual_settings());
    // Ends in the left half, so it reads as a prev click.
    tap(&mut p, Target::Stage, (300.0, 500.0), (280.0, 500.0));
    assert_eq!(p.current_slide(), 4);
}

#[test]
fn test_click_halves_navigate() {
    let (mut p, _clock) = presenter(5, manual_settings());
    tap(&mut p, Target::Stage, (900.0, 500.0), (900.0, 500.0));
    assert_eq!(p.current_slide(), 1);
    tap(&mut p, Target::Stage, (100.0, 500.0), (100.0, 500.0));
    assert_eq!(p.current_slide(), 0);
}

#[test]
fn test_top_zone_tap_reveals_without_navigating() {
    let (mut p, clock) = presenter(5, manual_settings());
    step(&mut p, &clock, secs(10));
    assert!(!p.panel().is_visible());

    tap(&mut p, Target::Stage, (900.0, 100.0), (900.0, 100.0));
    assert!(p.panel().is_visible());
    assert!(p.surface().panel_visible);
    assert_eq!(p.current_slide(), 0);
}

#[test]
fn test_pointer_on_controls_never_navigates() {
    let (mut p, _clock) = presenter(5, manual_settings());
    tap(&mut p, Target::Controls, (900.0, 500.0), (900.0, 500.0));
    tap(&mut p, Target::Controls, (600.0, 500.0), (100.0, 500.0));
    assert_eq!(p.current_slide(), 0);
}

#[test]
fn test_press_on_stage_released_on_controls_is_dropped() {
    let (mut p, _clock) = presenter(5, manual_settings());
    p.handle_input(
        Target::Stage,
        InputEvent::PointerDown(Point::new(900.0, 500.0)),
        VIEW,
    );
    p.handle_input(
        Target::Controls,
        InputEvent::PointerUp(Point::new(100.0, 500.0)),
        VIEW,
    );
    assert_eq!(p.current_slide(), 0);
}

#[test]
fn test_keys_work_while_pointer_is_over_controls() {
    let (mut p, _clock) = presenter(5, manual_settings());
    p.handle_input(Target::Controls, InputEvent::Key(Key::Right), VIEW);
    assert_eq!(p.current_slide(), 1);
}

#[test]
fn test_empty_deck_ignores_navigation() {
    let (mut p, _clock) = presenter(0, manual_settings());
    key(&mut p, Key::Right);
    tap(&mut p, Target::Stage, (100.0, 500.0), (100.0, 500.0));
    assert_eq!(p.current_slide(), 0);
    assert_eq!(p.surface().counter_text(), "0 / 0");
}
