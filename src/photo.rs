//! Floating photo frames.
//!
//! Frames live in screen space: they drift, spin slowly, bounce off the
//! viewport edges and get shoved around by drags. They refer to their image
//! by index so the simulation never waits on decoding.

use glam::Vec2;
use rand::Rng;

use crate::config::Config;
use crate::frame::Overlay;
use crate::palette;
use crate::projection::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFrame {
    /// Index into the configured photo list.
    pub photo: usize,
    /// Edge length of the photo, without border.
    pub size: f32,
    /// Top-left corner in screen pixels.
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub spin: f32,
    pub frame_color: u32,
}

impl PhotoFrame {
    /// Spawn a frame for `photo` at a random spot fully inside `viewport`.
    pub fn spawn<R: Rng + ?Sized>(photo: usize, viewport: &Viewport, config: &Config, rng: &mut R) -> Self {
        let size = config.photo_min_size + rng.gen::<f32>() * config.photo_size_spread;
        let position = Vec2::new(
            rng.gen::<f32>() * (viewport.width - size).max(0.0),
            rng.gen::<f32>() * (viewport.height - size).max(0.0),
        );
        let velocity = Vec2::new(rng.gen::<f32>() * 2.0 - 1.0, rng.gen::<f32>() * 2.0 - 1.0) * config.photo_speed;
        let spin = (rng.gen::<f32>() * 2.0 - 1.0) * config.photo_spin;

        Self {
            photo,
            size,
            position,
            velocity,
            angle: 0.0,
            spin,
            frame_color: palette::GOLD,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }

    /// Advance one tick.
    pub fn update(&mut self, drag: Option<Vec2>, viewport: &Viewport, config: &Config) {
        if let Some(drag) = drag {
            self.velocity += drag * config.drag_push * config.frame_drag_boost;
        }

        self.position += self.velocity;
        self.angle += self.spin;
        self.velocity *= config.photo_friction;

        let max = Vec2::new(viewport.width - self.size, viewport.height - self.size).max(Vec2::ZERO);
        for axis in 0..2 {
            if self.position[axis] <= 0.0 {
                self.position[axis] = 0.0;
                self.velocity[axis] = self.velocity[axis].abs();
            } else if self.position[axis] >= max[axis] {
                self.position[axis] = max[axis];
                self.velocity[axis] = -self.velocity[axis].abs();
            }
        }
    }

    pub fn overlay(&self, config: &Config) -> Overlay {
        Overlay::Photo {
            photo: self.photo,
            center: self.center(),
            size: self.size,
            angle: self.angle,
            border: config.photo_border,
            frame_color: self.frame_color,
        }
    }
}
