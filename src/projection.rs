//! Perspective projection from simulation space to screen space.
//!
//! Simulation space is centred on the tree axis: x grows to the right, y grows
//! upward from the tree base, and z grows away from the viewer. The projection
//! pins the tree apex to a fixed fraction of the viewport height, so resizing
//! the window rescales the whole scene on the next tick.

use glam::{Vec2, Vec3};

use crate::config::Config;

/// Smallest `focal_length + z` that still projects.
///
/// Anything closer sits on or behind the eye and would blow the scale up.
pub const MIN_DEPTH: f32 = 1.0;

/// Lowest opacity a distant point fades to.
pub const DEPTH_ALPHA_FLOOR: f32 = 0.1;

/// Current drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `min(width, height)`, the base every size-dependent constant scales with.
    pub fn base_size(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn tree_height(&self, config: &Config) -> f32 {
        self.base_size() * config.tree_height_ratio
    }

    pub fn tree_radius(&self, config: &Config) -> f32 {
        self.base_size() * config.tree_radius_ratio
    }

    /// Screen y of the tree apex.
    pub fn tip_y(&self, config: &Config) -> f32 {
        self.height * config.tip_ratio
    }

    /// Simulation y that lands on `screen_y` at depth zero.
    pub fn world_y_at(&self, screen_y: f32, config: &Config) -> f32 {
        self.tip_y(config) + self.tree_height(config) - screen_y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub scale: f32,
    pub screen: Vec2,
    pub radius: f32,
    /// Depth cue in `[DEPTH_ALPHA_FLOOR, ..)`; callers clamp after combining.
    pub depth_alpha: f32,
}

/// Project `position` with apparent size `radius` onto `viewport`.
///
/// Returns `None` when the point sits at or behind the eye or when any output
/// would be non-finite. Such points stay simulated but are not drawn.
pub fn project(position: Vec3, radius: f32, viewport: &Viewport, config: &Config) -> Option<Projected> {
    let depth = config.focal_length + position.z;
    if depth.is_nan() || depth <= MIN_DEPTH {
        return None;
    }

    let scale = config.focal_length / depth;
    let base_y = viewport.tip_y(config) + viewport.tree_height(config) * scale;
    let screen = Vec2::new(
        position.x * scale + viewport.width / 2.0,
        base_y - position.y * scale,
    );
    let radius = radius * scale;

    if !(scale.is_finite() && screen.is_finite() && radius.is_finite()) {
        return None;
    }

    Some(Projected {
        scale,
        screen,
        radius,
        depth_alpha: (scale * 1.5).max(DEPTH_ALPHA_FLOOR),
    })
}
