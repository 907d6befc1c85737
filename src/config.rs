//! Tunable constants for the greeting show.
//!
//! Every number the simulation uses lives here so the scene, the emitters and
//! the tests agree on them. Distances are screen pixels at depth zero, speeds
//! are pixels per tick, and decay factors are applied once per tick.
//!
//! # Example
//!
//! ```ignore
//! let config = Config {
//!     tree_particles: 3000,
//!     rotation_speed: 0.01,
//!     ..Config::default()
//! };
//! ```

use std::time::Duration;

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Projection
    /// Perspective focal distance.
    pub focal_length: f32,
    /// Fraction of the viewport height where the tree apex sits.
    pub tip_ratio: f32,
    /// Tree height as a fraction of `min(width, height)`.
    pub tree_height_ratio: f32,
    /// Tree base radius as a fraction of `min(width, height)`.
    pub tree_radius_ratio: f32,

    // Tree
    /// Particles seeded when the show starts.
    pub tree_particles: usize,
    /// Rotation per tick while nobody drags.
    pub rotation_speed: f32,
    /// Largest wobble offset before the wobble velocity reflects.
    pub wobble_limit: f32,

    // Free particles
    /// Velocity multiplier applied each tick to free particles.
    pub friction: f32,
    /// Friction used by released particles once they become permanent.
    pub permanent_friction: f32,
    /// Extra damping for permanent particles.
    pub permanent_damping: f32,
    /// Speed components below this snap to zero on permanent particles.
    pub rest_speed: f32,
    /// Alpha lost per tick by non-permanent free particles.
    pub alpha_decay: f32,

    // Emitters
    /// Sparkles spawned every tick.
    pub sparkles_per_tick: usize,
    /// Heart particles spawned every tick in the heart stage.
    pub hearts_per_tick: usize,
    /// Heart curve scale factor.
    pub heart_scale: f32,
    /// Random positional jitter applied to heart particles.
    pub heart_jitter: f32,
    /// Spread of the random heart depth.
    pub heart_depth: f32,

    // Explosion
    /// Minimum explosion speed of a released tree particle.
    pub explosion_speed_min: f32,
    /// Maximum explosion speed of a released tree particle.
    pub explosion_speed_max: f32,
    /// Delay between the explosion and the photo stage.
    pub explosion_delay: Duration,

    // Interaction
    /// Pointer displacement to drag velocity factor.
    pub drag_force: f32,
    /// Drag velocity multiplier applied every tick.
    pub drag_damping: f32,
    /// Share of the drag velocity injected into particles.
    pub drag_push: f32,
    /// Extra drag multiplier for photo frames.
    pub frame_drag_boost: f32,
    /// Pointer travel below which a release counts as a click.
    pub click_slop: f32,

    // Photo frames
    /// Smallest photo edge.
    pub photo_min_size: f32,
    /// Random extra edge length added to `photo_min_size`.
    pub photo_size_spread: f32,
    /// Maximum initial speed of a frame along each axis.
    pub photo_speed: f32,
    /// Maximum angular speed of a frame.
    pub photo_spin: f32,
    /// Velocity multiplier applied to frames every tick.
    pub photo_friction: f32,
    /// Width of the gold border around each photo.
    pub photo_border: f32,

    // Render
    /// Opacity of the black overlay that produces trails.
    pub fade: f32,
    /// Heading shown above the tree.
    pub title: String,
    /// Caption shown over the heart.
    pub caption: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focal_length: 300.0,
            tip_ratio: 0.15,
            tree_height_ratio: 0.7,
            tree_radius_ratio: 0.3,

            tree_particles: 1500,
            rotation_speed: 0.005,
            wobble_limit: 1.0,

            friction: 0.99,
            permanent_friction: 0.995,
            permanent_damping: 0.95,
            rest_speed: 0.01,
            alpha_decay: 0.005,

            sparkles_per_tick: 3,
            hearts_per_tick: 10,
            heart_scale: 12.0,
            heart_jitter: 2.0,
            heart_depth: 50.0,

            explosion_speed_min: 10.0,
            explosion_speed_max: 25.0,
            explosion_delay: Duration::from_millis(500),

            drag_force: 0.005,
            drag_damping: 0.95,
            drag_push: 0.5,
            frame_drag_boost: 5.0,
            click_slop: 4.0,

            photo_min_size: 100.0,
            photo_size_spread: 50.0,
            photo_speed: 0.75,
            photo_spin: 0.005,
            photo_friction: 0.98,
            photo_border: 5.0,

            fade: 0.2,
            title: "MERRY CHRISTMAS".to_string(),
            caption: "I LOVE YOU".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_stable() {
        let config = Config::default();
        assert!(config.friction < 1.0);
        assert!(config.permanent_friction > config.friction);
        assert!(config.drag_damping < 1.0);
        assert!(config.explosion_speed_min < config.explosion_speed_max);
        assert_eq!(config.explosion_delay, Duration::from_millis(500));
    }
}
