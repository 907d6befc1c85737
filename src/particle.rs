//! Simulated points and their per-tick update rules.
//!
//! Each particle carries a [`ParticleKind`] that selects its update rule:
//!
//! | Kind | Regime | Fades |
//! |------|--------|-------|
//! | [`ParticleKind::Sparkle`] | free | yes |
//! | [`ParticleKind::Tree`] | rotation + wobble | no |
//! | [`ParticleKind::Released`] | free | no |
//! | [`ParticleKind::Permanent`] | free, damped to rest | no |
//! | [`ParticleKind::Heart`] | free | yes |
//!
//! Tree particles orbit the vertical axis around their `origin`. Everything
//! else integrates velocity with friction and reacts to drags.

use glam::{Vec2, Vec3};

use crate::config::Config;
use crate::frame::ParticleInstance;
use crate::projection::{project, Viewport};

/// Fading particles at or below this alpha are removed.
pub const ALPHA_CUTOFF: f32 = 0.1;

/// Projected radii at or below this are not drawn.
pub const MIN_DRAW_RADIUS: f32 = 0.1;

/// What a particle is and therefore how it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Short-lived ambient spark.
    Sparkle,
    /// Point of the rotating tree.
    Tree,
    /// Tree point thrown out by the explosion, not yet settled.
    Released,
    /// Released point that never fades and comes to rest.
    Permanent,
    /// Point of the heart stream.
    Heart,
}

/// Per-tick inputs shared by every particle.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Current rotation of the tree around the vertical axis.
    pub rotation: f32,
    /// Screen-space drag velocity while the pointer is held.
    pub drag: Option<Vec2>,
    pub config: &'a Config,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Rest position the tree rotation is applied to.
    pub origin: Vec3,
    pub velocity: Vec3,
    /// Accumulated wobble around the rotated origin (tree only).
    pub wobble: Vec3,
    pub radius: f32,
    pub color: Vec3,
    pub alpha: f32,
    pub friction: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Vec3, velocity: Vec3, radius: f32, color: Vec3, friction: f32) -> Self {
        Self {
            position,
            origin: position,
            velocity,
            wobble: Vec3::ZERO,
            radius,
            color,
            alpha: 1.0,
            friction,
            kind,
        }
    }

    #[inline]
    pub fn is_tree(&self) -> bool {
        self.kind == ParticleKind::Tree
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.kind == ParticleKind::Permanent
    }

    /// Whether the particle loses alpha every tick.
    #[inline]
    pub fn fades(&self) -> bool {
        matches!(self.kind, ParticleKind::Sparkle | ParticleKind::Heart)
    }

    /// Whether the particle has faded out and should be dropped.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.fades() && self.alpha <= ALPHA_CUTOFF
    }

    /// Detach a tree particle and fling it with `velocity`.
    ///
    /// Returns `false` and leaves the particle untouched if it is not part of
    /// the tree.
    pub fn release(&mut self, velocity: Vec3) -> bool {
        if !self.is_tree() {
            return false;
        }
        self.kind = ParticleKind::Released;
        self.origin = self.position;
        self.wobble = Vec3::ZERO;
        self.velocity = velocity;
        true
    }

    /// Turn a released particle into a permanent one.
    pub fn promote(&mut self, friction: f32) -> bool {
        if self.kind != ParticleKind::Released {
            return false;
        }
        self.kind = ParticleKind::Permanent;
        self.alpha = 1.0;
        self.friction = friction;
        true
    }

    /// Advance one tick.
    pub fn update(&mut self, ctx: &UpdateContext) {
        match self.kind {
            ParticleKind::Tree => self.update_tree(ctx.rotation, ctx.config.wobble_limit),
            _ => self.update_free(ctx.drag, ctx.config),
        }
    }

    fn update_tree(&mut self, rotation: f32, limit: f32) {
        let (sin, cos) = rotation.sin_cos();
        let rotated = Vec3::new(
            self.origin.x * cos - self.origin.z * sin,
            self.origin.y,
            self.origin.x * sin + self.origin.z * cos,
        );

        self.wobble += self.velocity;
        for axis in 0..3 {
            // Only reflect while still heading outward so the wobble cannot stick
            if self.wobble[axis].abs() > limit && self.wobble[axis] * self.velocity[axis] > 0.0 {
                self.velocity[axis] = -self.velocity[axis];
            }
        }

        self.position = rotated + self.wobble;
    }

    fn update_free(&mut self, drag: Option<Vec2>, config: &Config) {
        if let Some(drag) = drag {
            // Screen y grows downward, simulation y grows upward
            self.velocity.x += drag.x * config.drag_push;
            self.velocity.y -= drag.y * config.drag_push;
        }

        self.velocity *= self.friction;
        self.position += self.velocity;

        if self.is_permanent() {
            self.velocity *= config.permanent_damping;
            for axis in 0..3 {
                if self.velocity[axis].abs() < config.rest_speed {
                    self.velocity[axis] = 0.0;
                }
            }
        } else if self.fades() {
            self.alpha = (self.alpha - config.alpha_decay).max(0.0);
        }
    }

    /// Project the particle and build its glow disc.
    ///
    /// Returns `None` if the particle is behind the eye or too small to see.
    pub fn instance(&self, viewport: &Viewport, config: &Config) -> Option<ParticleInstance> {
        let projected = project(self.position, self.radius, viewport, config)?;
        if projected.radius <= MIN_DRAW_RADIUS {
            return None;
        }

        Some(ParticleInstance {
            center: projected.screen.to_array(),
            radius: projected.radius,
            alpha: (self.alpha * projected.depth_alpha).clamp(0.0, 1.0),
            color: self.color.to_array(),
            _padding: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(config: &Config) -> UpdateContext<'_> {
        UpdateContext {
            rotation: 0.0,
            drag: None,
            config,
        }
    }

    fn free(kind: ParticleKind, velocity: Vec3) -> Particle {
        Particle::new(kind, Vec3::ZERO, velocity, 1.5, Vec3::ONE, 0.99)
    }

    #[test]
    fn test_alpha_strictly_decreases_until_expiry() {
        let config = Config::default();
        let mut p = free(ParticleKind::Sparkle, Vec3::new(0.2, 0.1, 0.0));

        let mut ticks = 0;
        let mut last = p.alpha;
        while !p.is_expired() {
            p.update(&ctx(&config));
            assert!(p.alpha < last);
            last = p.alpha;
            ticks += 1;
            assert!(ticks < 1000, "particle never expired");
        }

        assert!(p.alpha <= ALPHA_CUTOFF);
        // 0.9 / 0.005 = 180 ticks, give or take float error
        assert!((179..=181).contains(&ticks), "expired after {ticks} ticks");
    }

    #[test]
    fn test_expiry_only_below_cutoff() {
        let mut p = free(ParticleKind::Heart, Vec3::ZERO);
        p.alpha = ALPHA_CUTOFF + 0.001;
        assert!(!p.is_expired());
        p.alpha = ALPHA_CUTOFF;
        assert!(p.is_expired());
    }

    #[test]
    fn test_released_particles_keep_full_alpha() {
        let config = Config::default();
        let mut p = free(ParticleKind::Released, Vec3::new(3.0, 1.0, -2.0));

        for _ in 0..1000 {
            p.update(&ctx(&config));
        }
        assert_eq!(p.alpha, 1.0);
        assert!(!p.is_expired());
        assert!(p.promote(config.permanent_friction));
    }

    #[test]
    fn test_permanent_particles_settle_to_rest() {
        let config = Config::default();
        let mut p = free(ParticleKind::Released, Vec3::new(12.0, -7.0, 4.0));
        assert!(p.promote(config.permanent_friction));

        let mut last_speed = p.velocity.length();
        for _ in 0..400 {
            p.update(&ctx(&config));
            assert_eq!(p.alpha, 1.0);
            let speed = p.velocity.length();
            assert!(speed <= last_speed);
            last_speed = speed;
        }

        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(!p.is_expired());
    }

    #[test]
    fn test_tree_wobble_stays_bounded() {
        let config = Config::default();
        let mut p = Particle::new(
            ParticleKind::Tree,
            Vec3::new(40.0, 100.0, -25.0),
            Vec3::new(0.03, -0.02, 0.025),
            1.5,
            Vec3::ONE,
            0.99,
        );

        for _ in 0..5000 {
            p.update(&ctx(&config));
            assert!(p.wobble.abs().max_element() <= config.wobble_limit + 0.05);
        }
        assert_eq!(p.alpha, 1.0);
    }

    #[test]
    fn test_tree_rotation_preserves_axis_distance() {
        let config = Config::default();
        let mut p = Particle::new(
            ParticleKind::Tree,
            Vec3::new(30.0, 50.0, 40.0),
            Vec3::ZERO,
            1.5,
            Vec3::ONE,
            0.99,
        );

        let context = UpdateContext {
            rotation: std::f32::consts::FRAC_PI_2,
            drag: None,
            config: &config,
        };
        p.update(&context);

        assert!((p.position.x - -40.0).abs() < 1e-4);
        assert!((p.position.z - 30.0).abs() < 1e-4);
        assert_eq!(p.position.y, 50.0);
    }

    #[test]
    fn test_drag_pushes_free_particles_only() {
        let config = Config::default();
        let context = UpdateContext {
            rotation: 0.0,
            drag: Some(Vec2::new(2.0, 4.0)),
            config: &config,
        };

        let mut spark = free(ParticleKind::Sparkle, Vec3::ZERO);
        spark.update(&context);
        assert!((spark.velocity.x - 1.0 * 0.99).abs() < 1e-6);
        assert!((spark.velocity.y - -2.0 * 0.99).abs() < 1e-6);

        let mut tree = Particle::new(ParticleKind::Tree, Vec3::new(5.0, 5.0, 0.0), Vec3::ZERO, 1.5, Vec3::ONE, 0.99);
        tree.update(&context);
        assert_eq!(tree.position, Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_release_and_promote_follow_kind_order() {
        let mut p = Particle::new(ParticleKind::Tree, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.5, Vec3::ONE, 0.99);
        assert!(!p.promote(0.995));
        assert!(p.release(Vec3::X));
        assert!(!p.is_tree());
        assert!(!p.release(Vec3::Y));
        assert_eq!(p.velocity, Vec3::X);
        assert!(p.promote(0.995));
        assert!(p.is_permanent());
        assert_eq!(p.friction, 0.995);
    }

    #[test]
    fn test_instance_skips_tiny_and_hidden_points() {
        let config = Config::default();
        let viewport = Viewport::default();

        let mut p = free(ParticleKind::Sparkle, Vec3::ZERO);
        assert!(p.instance(&viewport, &config).is_some());

        p.radius = 0.05;
        assert!(p.instance(&viewport, &config).is_none());

        p.radius = 1.5;
        p.position.z = -config.focal_length - 10.0;
        assert!(p.instance(&viewport, &config).is_none());
    }

    #[test]
    fn test_instance_alpha_is_clamped() {
        let config = Config::default();
        let viewport = Viewport::default();
        let p = free(ParticleKind::Permanent, Vec3::ZERO);

        let instance = p.instance(&viewport, &config).unwrap();
        assert_eq!(instance.alpha, 1.0);
        assert_eq!(instance.radius, 1.5);
    }
}
