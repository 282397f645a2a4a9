use anyhow::{Result, anyhow};
use raylib::prelude::*;

use crate::image_loader::ImageResource;

/// Number of discrete alpha levels a fade goes through.
pub const FADE_STEPS: f32 = 10.0;

/// A slide uploaded to the GPU, ready to draw into the content area.
pub struct Slide {
    texture: Texture2D,
}

impl Slide {
    pub fn upload(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        resource: &ImageResource,
    ) -> Result<Self> {
        let (width, height) = resource.display.dimensions();
        let blank = Image::gen_image_color(width as i32, height as i32, Color::BLANK);
        let mut texture = rl
            .load_texture_from_image(thread, &blank)
            .map_err(|e| anyhow!("Failed to create texture for {}: {}", resource.filename, e))?;
        texture
            .update_texture(resource.display.as_raw())
            .map_err(|e| anyhow!("Failed to upload {}: {}", resource.filename, e))?;

        Ok(Self { texture })
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, area: Rectangle, alpha: f32) {
        let tex_width = self.texture.width() as f32;
        let tex_height = self.texture.height() as f32;
        let tint = Color::new(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0) as u8);

        d.draw_texture_pro(
            &self.texture,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            fit_rect(tex_width, tex_height, area),
            Vector2::new(0.0, 0.0),
            0.0,
            tint,
        );
    }
}

/// Centers a `width` x `height` picture in `area`, shrinking it to fit if
/// needed. Pictures are never enlarged.
pub fn fit_rect(width: f32, height: f32, area: Rectangle) -> Rectangle {
    if width <= 0.0 || height <= 0.0 {
        return Rectangle::new(area.x, area.y, 0.0, 0.0);
    }
    let scale = (area.width / width).min(area.height / height).min(1.0);
    let scaled_width = width * scale;
    let scaled_height = height * scale;
    Rectangle::new(
        area.x + (area.width - scaled_width) * 0.5,
        area.y + (area.height - scaled_height) * 0.5,
        scaled_width,
        scaled_height,
    )
}

/// Timing of the cross-fade from the previous slide to the next one.
#[derive(Debug, Clone)]
pub struct CrossFade {
    duration: f32,
    animation_timer: f32,
    pub is_animating: bool,
}

impl CrossFade {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    pub fn start(&mut self) {
        self.animation_timer = 0.0;
        self.is_animating = self.duration > 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }
        self.animation_timer += dt;
        if self.animation_timer >= self.duration {
            self.animation_timer = self.duration;
            self.is_animating = false;
        }
    }

    /// Opacity of the incoming slide, stepped into `FADE_STEPS` levels. The
    /// outgoing slide is drawn at `1.0 - progress()`.
    pub fn progress(&self) -> f32 {
        if !self.is_animating {
            return 1.0;
        }
        let t = (self.animation_timer / self.duration).min(1.0);
        (t * FADE_STEPS).floor() / FADE_STEPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_runs_for_its_duration() {
        let mut fade = CrossFade::new(0.5);
        assert_eq!(fade.progress(), 1.0);

        fade.start();
        assert!(fade.is_animating);
        assert_eq!(fade.progress(), 0.0);

        fade.update(0.25);
        assert!((fade.progress() - 0.5).abs() < 1e-6);

        fade.update(0.3);
        assert!(!fade.is_animating);
        assert_eq!(fade.progress(), 1.0);
    }

    #[test]
    fn test_fade_is_stepped() {
        let mut fade = CrossFade::new(1.0);
        fade.start();
        fade.update(0.16);
        assert!((fade.progress() - 0.1).abs() < 1e-6);
        fade.update(0.03);
        assert!((fade.progress() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut fade = CrossFade::new(0.0);
        fade.start();
        assert!(!fade.is_animating);
        assert_eq!(fade.progress(), 1.0);
    }

    #[test]
    fn test_fit_rect_centers_and_shrinks() {
        let area = Rectangle::new(200.0, 0.0, 800.0, 600.0);

        let big = fit_rect(1600.0, 600.0, area);
        assert_eq!((big.width, big.height), (800.0, 300.0));
        assert_eq!((big.x, big.y), (200.0, 150.0));

        let small = fit_rect(400.0, 300.0, area);
        assert_eq!((small.width, small.height), (400.0, 300.0));
        assert_eq!((small.x, small.y), (400.0, 150.0));
    }
}
