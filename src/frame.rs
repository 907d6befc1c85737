//! Renderer-neutral output of one simulation tick.
//!
//! The scene never touches the GPU. Each tick it fills a [`Frame`] which the
//! render shell replays: fade the trail texture, draw the glow discs, then
//! paint the overlays with egui.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One glow disc, laid out for the instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Centre in screen pixels.
    pub center: [f32; 2],
    /// Core radius in screen pixels.
    pub radius: f32,
    /// Final opacity in `0.0..=1.0`.
    pub alpha: f32,
    pub color: [f32; 3],
    pub _padding: f32,
}

/// Flat shapes drawn on top of the particles.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Five-pointed star centred at `center` with outer radius `radius`.
    Star { center: Vec2, radius: f32, color: u32 },
    /// Text whose bottom edge is horizontally centred on `anchor`.
    Text {
        text: String,
        anchor: Vec2,
        size: f32,
        color: u32,
    },
    /// A rotated photo with a square border.
    Photo {
        /// Index into the configured photo list.
        photo: usize,
        center: Vec2,
        size: f32,
        angle: f32,
        border: f32,
        frame_color: u32,
    },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Opacity of the black overlay laid over the previous frame.
    pub fade: f32,
    /// Glow discs in back-to-front order.
    pub particles: Vec<ParticleInstance>,
    pub overlays: Vec<Overlay>,
}

impl Frame {
    pub fn new(fade: f32) -> Self {
        Self {
            fade,
            ..Default::default()
        }
    }

    /// Number of text overlays.
    pub fn text_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Text { .. }))
            .count()
    }
}
