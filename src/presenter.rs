//! Screen composition: the category sidebar on the left, the slide area on
//! the right. Reads coordinator state each frame but never changes it.

use anyhow::Result;
use log::warn;
use raylib::prelude::*;

use crate::catalog::Category;
use crate::config::{Config, Rgb};
use crate::constants::*;
use crate::image_loader::ImageResource;
use crate::slide::{CrossFade, Slide};
use crate::state::LoadingState;

/// What the presenter needs to know about the application for one frame.
pub struct Frame<'a> {
    pub categories: &'a [Category],
    pub selected: usize,
    pub state: LoadingState,
    pub slide_count: usize,
    pub paused: bool,
}

struct Palette {
    background: Color,
    font_active: Color,
    font_inactive: Color,
    loading_text: Color,
    spinner: Color,
}

fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.0;
    Color::new(r, g, b, 255)
}

pub struct Presenter {
    palette: Palette,
    menu_width: f32,

    scroll: f32,
    spinner_angle: f32,

    current: Option<Slide>,
    previous: Option<Slide>,
    fade: CrossFade,
}

impl Presenter {
    pub fn new(config: &Config) -> Self {
        let colors = &config.colors;
        Self {
            palette: Palette {
                background: to_color(colors.background),
                font_active: to_color(colors.font_active),
                font_inactive: to_color(colors.font_inactive),
                loading_text: to_color(colors.loading_text),
                spinner: to_color(colors.spinner),
            },
            menu_width: config.window.menu_width as f32,
            scroll: 0.0,
            spinner_angle: 0.0,
            current: None,
            previous: None,
            fade: CrossFade::new(config.slideshow.fade_duration().as_secs_f32()),
        }
    }

    /// Starts a cross-fade from whatever is on screen to `resource`, or to
    /// the bare background when there is nothing to show.
    pub fn show(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        resource: Option<&ImageResource>,
    ) -> Result<()> {
        let next = resource.map(|r| Slide::upload(rl, thread, r)).transpose()?;
        self.previous = self.current.take();
        self.current = next;
        self.fade.start();
        Ok(())
    }

    /// Like `show`, but a failed upload only blanks the slide area.
    pub fn show_or_blank(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        resource: Option<&ImageResource>,
    ) {
        if let Err(e) = self.show(rl, thread, resource) {
            warn!("{:#}", e);
            self.previous = self.current.take();
            self.fade.start();
        }
    }

    pub fn update(&mut self, dt: f32, frame: &Frame, screen_height: f32) {
        self.fade.update(dt);
        if !self.fade.is_animating {
            self.previous = None;
        }

        let target = sidebar_target(frame.selected, frame.categories.len(), screen_height);
        self.scroll = approach(self.scroll, target, MENU_SCROLL_RATE, dt);

        self.spinner_angle = (self.spinner_angle + SPINNER_SPEED * dt) % 360.0;
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, frame: &Frame) {
        d.clear_background(self.palette.background);

        let screen_width = d.get_screen_width() as f32;
        let screen_height = d.get_screen_height() as f32;
        let area = Rectangle::new(
            self.menu_width,
            0.0,
            (screen_width - self.menu_width).max(0.0),
            screen_height,
        );

        match frame.state {
            LoadingState::Loading => self.draw_loading(d, area, frame),
            LoadingState::Idle => self.draw_slides(d, area, frame),
        }
        self.draw_sidebar(d, frame, screen_height);
    }

    fn draw_slides(&self, d: &mut RaylibDrawHandle, area: Rectangle, frame: &Frame) {
        let progress = self.fade.progress();
        if let Some(previous) = &self.previous {
            previous.draw(d, area, 1.0 - progress);
        }
        if let Some(current) = &self.current {
            current.draw(d, area, progress);
        } else if frame.slide_count == 0 && !self.fade.is_animating {
            draw_centered_label(d, "No images", area, self.palette.loading_text);
        }
    }

    fn draw_loading(&self, d: &mut RaylibDrawHandle, area: Rectangle, frame: &Frame) {
        let center = Vector2::new(area.x + area.width * 0.5, area.y + area.height * 0.5);
        d.draw_ring(
            center,
            SPINNER_RADIUS - SPINNER_THICKNESS,
            SPINNER_RADIUS,
            self.spinner_angle,
            self.spinner_angle + SPINNER_ARC,
            36,
            self.palette.spinner,
        );

        let label = match frame.categories.get(frame.selected) {
            Some(category) => format!("Loading {}...", category.name),
            None => "Loading...".to_string(),
        };
        let below = Rectangle::new(
            area.x,
            center.y + SPINNER_RADIUS * 2.0,
            area.width,
            LABEL_FONT_SIZE as f32,
        );
        draw_centered_label(d, &label, below, self.palette.loading_text);
    }

    fn draw_sidebar(&self, d: &mut RaylibDrawHandle, frame: &Frame, screen_height: f32) {
        d.draw_rectangle(
            0,
            0,
            self.menu_width as i32,
            screen_height as i32,
            self.palette.background,
        );

        for (i, category) in frame.categories.iter().enumerate() {
            let y = MENU_ROW_HEIGHT * (i as f32 + 0.5) - self.scroll;
            if y < -MENU_ROW_HEIGHT || y > screen_height {
                continue;
            }
            let color = if i == frame.selected {
                self.palette.font_active
            } else {
                self.palette.font_inactive
            };
            d.draw_text(&category.name, MENU_LEFT_MARGIN, y as i32, MENU_FONT_SIZE, color);
        }

        if frame.paused {
            let y = screen_height as i32 - MENU_FONT_SIZE - MENU_LEFT_MARGIN;
            d.draw_text(
                PAUSED_LABEL,
                MENU_LEFT_MARGIN,
                y,
                MENU_FONT_SIZE,
                self.palette.font_inactive,
            );
        }
    }
}

// Default font glyphs are about half as wide as they are tall.
fn draw_centered_label(d: &mut RaylibDrawHandle, text: &str, area: Rectangle, color: Color) {
    let width = text.chars().count() as f32 * LABEL_FONT_SIZE as f32 * 0.5;
    let x = area.x + (area.width - width) * 0.5;
    let y = area.y + (area.height - LABEL_FONT_SIZE as f32) * 0.5;
    d.draw_text(text, x as i32, y as i32, LABEL_FONT_SIZE, color);
}

/// Scroll offset that puts the selected row in the middle of the sidebar,
/// clamped so the list never scrolls past either end.
pub fn sidebar_target(selected: usize, count: usize, height: f32) -> f32 {
    let content = MENU_ROW_HEIGHT * count as f32;
    let max_scroll = (content - height).max(0.0);
    let row_center = MENU_ROW_HEIGHT * (selected as f32 + 0.5);
    (row_center - height * 0.5).clamp(0.0, max_scroll)
}

/// Moves `current` toward `target`, closing `rate` of the gap per second.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = (rate * dt).min(1.0);
    let next = current + (target - current) * step;
    if (target - next).abs() < 0.5 { target } else { next }
}
