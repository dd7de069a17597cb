/// Label shown on the auto-hide button when no countdown is running.
pub const AUTO_HIDE_LABEL: &str = "Auto Hide";

/// Everything the host needs to draw the presentation chrome.
///
/// Components write here; the host only reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// One flag per slide. At most one is set.
    pub active_slides: Vec<bool>,
    /// 1-indexed position shown in the counter, 0 for an empty deck.
    pub counter: usize,
    pub total: usize,
    /// Progress bar fill in percent, within `[0, 100]`.
    pub progress_percent: f32,
    pub panel_visible: bool,
    pub autoplay_active: bool,
    pub auto_hide_active: bool,
    pub auto_hide_label: String,
    /// One flag per duration button. Exactly one is set.
    pub duration_active: Vec<bool>,
}

impl Surface {
    pub fn new(total: usize, duration_buttons: usize) -> Self {
        Self {
            active_slides: vec![false; total],
            counter: 0,
            total,
            progress_percent: 0.0,
            panel_visible: true,
            autoplay_active: false,
            auto_hide_active: false,
            auto_hide_label: AUTO_HIDE_LABEL.to_string(),
            duration_active: vec![false; duration_buttons],
        }
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.active_slides.iter().position(|&a| a)
    }

    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.counter, self.total)
    }
}
