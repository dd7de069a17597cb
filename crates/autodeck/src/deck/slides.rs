use log::debug;

use super::surface::Surface;

/// Current slide position with wrap-around arithmetic.
#[derive(Debug, Clone)]
pub struct SlideIndex {
    total: usize,
    current: usize,
}

impl SlideIndex {
    pub fn new(total: usize) -> Self {
        Self { total, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Show the slide at `index`, wrapping any integer into range.
    pub fn go_to(&mut self, index: i64, surface: &mut Surface) {
        if self.total == 0 {
            return;
        }
        let index = index.rem_euclid(self.total as i64) as usize;
        for (i, active) in surface.active_slides.iter_mut().enumerate() {
            *active = i == index;
        }
        self.current = index;
        surface.counter = index + 1;
        debug!("slide {} / {}", index + 1, self.total);
    }

    pub fn next(&mut self, surface: &mut Surface) {
        self.go_to(self.current as i64 + 1, surface);
    }

    pub fn prev(&mut self, surface: &mut Surface) {
        self.go_to(self.current as i64 - 1, surface);
    }
}
