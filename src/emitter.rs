//! Particle emitters.
//!
//! Emitters append freshly spawned particles to the scene's particle list.
//! They read the viewport and configuration, consume the random source and
//! touch nothing else.
//!
//! # Emitter Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Emitter::Sparkle`] | Warm sparks drifting out of the tree base |
//! | [`Emitter::Tree`] | Cone of gold lights, denser near the trunk |
//! | [`Emitter::Heart`] | Points on the parametric heart curve |
//!
//! # Example
//!
//! ```ignore
//! let mut particles = Vec::new();
//! Emitter::Tree { count: 1500 }.emit(&viewport, &config, &mut rng, &mut particles);
//! assert_eq!(particles.len(), 1500);
//! ```

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::config::Config;
use crate::palette;
use crate::particle::{Particle, ParticleKind};
use crate::projection::Viewport;

/// Radius of tree and heart points.
const POINT_RADIUS: f32 = 1.5;

/// Spread of the initial tree wobble velocity.
const TREE_WOBBLE: f32 = 0.05;

/// Particle emitter configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum Emitter {
    /// Short-lived sparks at the world origin.
    ///
    /// Each spark gets a random direction in the screen plane and a speed
    /// below 0.5 px per tick.
    Sparkle {
        /// Number of sparks per call.
        count: usize,
    },

    /// Conical Christmas tree.
    ///
    /// Height is sampled uniformly; the cone radius shrinks linearly to zero at
    /// the apex and the radial offset is `sqrt`-biased so the disc at each
    /// height is filled evenly.
    Tree {
        /// Number of tree lights.
        count: usize,
    },

    /// Points on the classic heart curve.
    ///
    /// See [`heart_curve`] for the formula.
    Heart {
        /// Number of points per call.
        count: usize,
        /// Simulation-space position of the curve origin.
        center: Vec3,
    },
}

impl Emitter {
    /// Number of particles one call appends.
    pub fn count(&self) -> usize {
        match self {
            Emitter::Sparkle { count } => *count,
            Emitter::Tree { count } => *count,
            Emitter::Heart { count, .. } => *count,
        }
    }

    /// Spawn particles into `out`.
    pub fn emit<R: Rng + ?Sized>(&self, viewport: &Viewport, config: &Config, rng: &mut R, out: &mut Vec<Particle>) {
        out.reserve(self.count());
        match self {
            Emitter::Sparkle { count } => {
                for _ in 0..*count {
                    let radius = rng.gen::<f32>() * 2.0 + 0.5;
                    let angle = rng.gen::<f32>() * TAU;
                    let speed = rng.gen::<f32>() * 0.5;
                    let velocity = Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0);
                    out.push(Particle::new(
                        ParticleKind::Sparkle,
                        Vec3::ZERO,
                        velocity,
                        radius,
                        palette::pick(palette::SPARKLE, rng),
                        config.friction,
                    ));
                }
            }

            Emitter::Tree { count } => {
                let height = viewport.tree_height(config);
                let max_radius = viewport.tree_radius(config);
                for _ in 0..*count {
                    let level = rng.gen::<f32>();
                    let r = max_radius * (1.0 - level) * rng.gen::<f32>().sqrt();
                    let angle = rng.gen::<f32>() * TAU;
                    let position = Vec3::new(angle.cos() * r, level * height, angle.sin() * r);
                    let wobble = Vec3::new(
                        rng.gen::<f32>() - 0.5,
                        rng.gen::<f32>() - 0.5,
                        rng.gen::<f32>() - 0.5,
                    ) * TREE_WOBBLE;
                    out.push(Particle::new(
                        ParticleKind::Tree,
                        position,
                        wobble,
                        POINT_RADIUS,
                        palette::pick(palette::TREE, rng),
                        config.friction,
                    ));
                }
            }

            Emitter::Heart { count, center } => {
                for _ in 0..*count {
                    let t = rng.gen_range(0.0..TAU);
                    let curve = heart_curve(t, config.heart_scale);
                    let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 2.0 * config.heart_jitter;
                    let depth = (rng.gen::<f32>() - 0.5) * config.heart_depth;
                    let position = *center + (curve + jitter).extend(depth);
                    out.push(Particle::new(
                        ParticleKind::Heart,
                        position,
                        Vec3::ZERO,
                        POINT_RADIUS,
                        palette::pick(palette::HEART, rng),
                        config.friction,
                    ));
                }
            }
        }
    }
}

/// Point on the heart curve at parameter `t`, y pointing up.
///
/// `x = 16 sin³t`, `y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t`, both
/// multiplied by `scale`.
pub fn heart_curve(t: f32, scale: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x, y) * scale
}
