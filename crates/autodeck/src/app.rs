use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::LaunchOptions;
use crate::config::Config;
use crate::deck::commands::{Command, Fullscreen};
use crate::deck::input::{InputEvent, Key, Point, Target, Viewport};
use crate::deck::surface::Surface;
use crate::deck::timers::SystemClock;
use crate::deck::{DeckSettings, Presenter};
use crate::parser::{self, Presentation};
use crate::theme::Theme;

const PROGRESS_BAR_HEIGHT: f32 = 6.0;

/// Fullscreen through egui viewport commands. Must not be used inside
/// `ctx.input()` (sending a viewport command there deadlocks).
struct ViewportFullscreen<'a> {
    ctx: &'a egui::Context,
}

impl Fullscreen for ViewportFullscreen<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx.input(|i| i.viewport().fullscreen.unwrap_or(false))
    }

    fn enter(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
    }

    fn exit(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
    }
}

struct PresentationApp {
    presentation: Presentation,
    presenter: Presenter,
    theme: Theme,
    /// Cached slide rect from last frame, used for pointer coordinates
    last_slide_rect: egui::Rect,
    /// Control panel rect from last frame; pointer input inside it is not navigation
    panel_rect: Option<egui::Rect>,
}

impl PresentationApp {
    fn new(presentation: Presentation, settings: &DeckSettings, theme: Theme) -> Self {
        let presenter = Presenter::new(
            presentation.slides.len(),
            settings,
            Box::new(SystemClock::new()),
        );
        Self {
            presentation,
            presenter,
            theme,
            last_slide_rect: egui::Rect::ZERO,
            panel_rect: None,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.last_slide_rect.width(),
            height: self.last_slide_rect.height(),
        }
    }

    fn target_at(&self, pos: egui::Pos2) -> Target {
        match self.panel_rect {
            Some(rect) if self.presenter.surface().panel_visible && rect.contains(pos) => {
                Target::Controls
            }
            _ => Target::Stage,
        }
    }

    fn to_local(&self, pos: egui::Pos2) -> Point {
        let rect = self.last_slide_rect;
        Point::new(pos.x - rect.left(), pos.y - rect.top())
    }

    /// Pull key and pointer events for this frame, in arrival order.
    fn collect_input(&self, ctx: &egui::Context) -> (Vec<(Target, InputEvent)>, bool, bool) {
        let mut events = Vec::new();
        let mut quit = false;
        let mut fullscreen = false;

        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Q | egui::Key::Escape => quit = true,
                        egui::Key::F => fullscreen = true,
                        _ => events.push((Target::Stage, InputEvent::Key(map_key(*key)))),
                    },
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => {
                        let point = self.to_local(*pos);
                        let input = if *pressed {
                            InputEvent::PointerDown(point)
                        } else {
                            InputEvent::PointerUp(point)
                        };
                        events.push((self.target_at(*pos), input));
                    }
                    _ => {}
                }
            }
        });

        (events, quit, fullscreen)
    }

    fn draw_slide(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let Some(index) = self.presenter.surface().active_slide() else {
            return;
        };
        let Some(slide) = self.presentation.slides.get(index) else {
            return;
        };

        let painter = ui.painter();
        let margin = 96.0 * scale;
        let width = rect.width() - margin * 2.0;
        let mut y = rect.top() + margin;

        if let Some(ref heading) = slide.heading {
            let galley = painter.layout(
                heading.clone(),
                egui::FontId::proportional(self.theme.heading_size * scale),
                self.theme.heading_color,
                width,
            );
            let height = galley.rect.height();
            painter.galley(
                egui::pos2(rect.left() + margin, y),
                galley,
                self.theme.heading_color,
            );
            y += height + 32.0 * scale;
        }

        if !slide.body.is_empty() {
            let galley = painter.layout(
                slide.body.clone(),
                egui::FontId::proportional(self.theme.body_size * scale),
                self.theme.foreground,
                width,
            );
            painter.galley(
                egui::pos2(rect.left() + margin, y),
                galley,
                self.theme.foreground,
            );
        }
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let surface = self.presenter.surface();

        // Progress bar
        let bar_height = PROGRESS_BAR_HEIGHT * scale.max(0.5);
        let track = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - bar_height),
            rect.right_bottom(),
        );
        ui.painter().rect_filled(
            track,
            0.0,
            Theme::with_opacity(self.theme.foreground, 0.1),
        );
        let fill_width = track.width() * surface.progress_percent / 100.0;
        if fill_width > 0.0 {
            let fill = egui::Rect::from_min_size(track.min, egui::vec2(fill_width, bar_height));
            ui.painter().rect_filled(fill, 0.0, self.theme.accent);
        }

        // Slide counter
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let counter_galley = ui.painter().layout_no_wrap(
            surface.counter_text(),
            egui::FontId::monospace(14.0 * scale.max(0.75)),
            counter_color,
        );
        let counter_pos = egui::pos2(
            rect.right() - counter_galley.rect.width() - 16.0 * scale,
            rect.bottom() - 30.0 * scale - bar_height,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);
    }

    /// Draw the control panel and return the commands its buttons produced.
    fn draw_panel(&mut self, ctx: &egui::Context, surface: &Surface) -> Vec<Command> {
        let mut commands = Vec::new();
        if !surface.panel_visible {
            self.panel_rect = None;
            return commands;
        }

        let durations = self.presenter.durations().values().to_vec();
        let frame = egui::Frame::new()
            .fill(Theme::with_opacity(self.theme.panel_background, 0.92))
            .corner_radius(8.0)
            .inner_margin(12.0);

        let response = egui::Area::new(egui::Id::new("control_panel"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
            .show(ctx, |ui| {
                frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .add(egui::Button::new("Autoplay").selected(surface.autoplay_active))
                            .clicked()
                        {
                            commands.push(Command::ToggleAutoplay);
                        }
                        if ui
                            .add(
                                egui::Button::new(surface.auto_hide_label.as_str())
                                    .selected(surface.auto_hide_active),
                            )
                            .clicked()
                        {
                            commands.push(Command::ToggleAutoHide);
                        }
                        if ui.button("Fullscreen").clicked() {
                            commands.push(Command::ToggleFullscreen);
                        }

                        ui.separator();

                        for (index, duration) in durations.iter().enumerate() {
                            let active = surface.duration_active.get(index).copied().unwrap_or(false);
                            let label = format_duration(*duration);
                            if ui
                                .add(egui::Button::new(label).small().selected(active))
                                .clicked()
                            {
                                commands.push(Command::SelectDuration(index));
                            }
                        }
                    });
                });
            });

        self.panel_rect = Some(response.response.rect);
        commands
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.presenter.run_due();

        let (events, quit, fullscreen_key) = self.collect_input(ctx);
        let viewport = self.viewport();
        for (target, event) in events {
            self.presenter.handle_input(target, event, viewport);
        }

        // Viewport commands go out after the input closure
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if fullscreen_key {
            let mut fullscreen = ViewportFullscreen { ctx };
            self.presenter
                .execute(Command::ToggleFullscreen, Some(&mut fullscreen));
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.last_slide_rect = rect;
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = compute_scale(rect);
                self.draw_slide(ui, rect, scale);
                self.draw_chrome(ui, rect, scale);
            });

        let surface = self.presenter.surface().clone();
        let commands = self.draw_panel(ctx, &surface);
        for command in commands {
            let mut fullscreen = ViewportFullscreen { ctx };
            self.presenter.execute(command, Some(&mut fullscreen));
        }

        match self.presenter.time_until_next_timer() {
            Some(wait) => ctx.request_repaint_after(wait),
            None => ctx.request_repaint_after(Duration::from_secs(1)),
        }
    }
}

fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowUp => Key::Up,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::ArrowDown => Key::Down,
        egui::Key::Space => Key::Space,
        _ => Key::Other,
    }
}

fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

/// Merge config defaults with command-line overrides.
fn launch_settings(config: &Config, options: &LaunchOptions, slide_count: usize) -> DeckSettings {
    let mut settings = config.deck_settings();
    if let Some(secs) = options.duration {
        settings.duration = Duration::from_secs(secs);
    }
    if options.no_autoplay {
        settings.autoplay = false;
    }
    if options.no_auto_hide {
        // A pinned panel stays pinned even when autoplay starts.
        settings.auto_hide = false;
        settings.autoplay_enables_auto_hide = false;
    }
    settings.start_slide = options
        .slide
        .map(|s| s.saturating_sub(1))
        .unwrap_or(0)
        .min(slide_count.saturating_sub(1));
    settings
}

pub fn run(file: PathBuf, options: LaunchOptions) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let presentation = parser::parse(&content);

    if presentation.slides.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let title = presentation.title.clone().unwrap_or_else(|| {
        format!(
            "autodeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let config = Config::load_or_default();
    let settings = launch_settings(&config, &options, presentation.slides.len());
    let theme = Theme::from_name(config.theme());
    log::info!(
        "presenting {} ({} slides, {}s per slide)",
        file.display(),
        presentation.slides.len(),
        settings.duration.as_secs()
    );

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(presentation, &settings, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> LaunchOptions {
        LaunchOptions {
            windowed: true,
            slide: None,
            duration: None,
            no_autoplay: false,
            no_auto_hide: false,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(10)), "10s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(90)), "90s");
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(egui::Key::ArrowRight), Key::Right);
        assert_eq!(map_key(egui::Key::Space), Key::Space);
        assert_eq!(map_key(egui::Key::A), Key::Other);
    }

    #[test]
    fn test_launch_settings_overrides() {
        let opts = LaunchOptions {
            slide: Some(3),
            duration: Some(60),
            no_autoplay: true,
            no_auto_hide: true,
            ..options()
        };
        let settings = launch_settings(&Config::default(), &opts, 10);
        assert_eq!(settings.duration, Duration::from_secs(60));
        assert_eq!(settings.start_slide, 2);
        assert!(!settings.autoplay);
        assert!(!settings.auto_hide);
        assert!(!settings.autoplay_enables_auto_hide);
    }

    #[test]
    fn test_launch_settings_clamps_start_slide() {
        let opts = LaunchOptions {
            slide: Some(99),
            ..options()
        };
        assert_eq!(launch_settings(&Config::default(), &opts, 4).start_slide, 3);
    }
}
