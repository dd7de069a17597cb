//! Turns decoded key and pointer events into presenter intents.

/// Where an event landed. Pointer input aimed at the control panel is never
/// a navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stage,
    Controls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Touch start or mouse button press.
    PointerDown(Point),
    /// Touch end or mouse button release.
    PointerUp(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    RevealPanel,
}

#[derive(Debug, Clone)]
pub struct InputRouter {
    top_zone_ratio: f32,
    swipe_threshold: f32,
    press: Option<Point>,
}

impl InputRouter {
    pub fn new(top_zone_ratio: f32, swipe_threshold: f32) -> Self {
        Self {
            top_zone_ratio,
            swipe_threshold,
            press: None,
        }
    }

    pub fn route(&mut self, event: InputEvent, viewport: Viewport) -> Option<Intent> {
        match event {
            InputEvent::Key(key) => route_key(key),
            InputEvent::PointerDown(point) => {
                self.press = Some(point);
                None
            }
            InputEvent::PointerUp(end) => {
                // A release without a press counts as a tap where it landed.
                let start = self.press.take().unwrap_or(end);
                Some(self.route_gesture(start, end, viewport))
            }
        }
    }

    /// Drop a half-finished gesture, e.g. when the release lands on the panel.
    pub fn cancel_gesture(&mut self) {
        self.press = None;
    }

    /// Classify a press/release pair: top-zone tap, then swipe, then click zone.
    pub fn route_gesture(&self, start: Point, end: Point, viewport: Viewport) -> Intent {
        let dx = start.x - end.x;
        let in_top_zone = start.y < viewport.height * self.top_zone_ratio;

        if in_top_zone && dx.abs() < self.swipe_threshold {
            return Intent::RevealPanel;
        }

        if dx.abs() > self.swipe_threshold {
            // Finger moved left.
            return if dx > 0.0 { Intent::Next } else { Intent::Prev };
        }

        if end.x > viewport.width / 2.0 {
            Intent::Next
        } else {
            Intent::Prev
        }
    }
}

pub fn route_key(key: Key) -> Option<Intent> {
    match key {
        Key::Left | Key::Up => Some(Intent::Prev),
        Key::Right | Key::Down | Key::Space => Some(Intent::Next),
        Key::Other => None,
    }
}
