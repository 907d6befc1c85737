//! The simulation context.
//!
//! [`Scene`] owns every piece of mutable show state: particles, photo frames,
//! the stage, the tree rotation, the pointer interaction, the clock and the
//! random source. The window loop feeds it events and calls [`Scene::tick`]
//! once per redraw; the returned [`Frame`] is all the renderer needs.
//!
//! # Example
//!
//! ```ignore
//! let mut scene = Scene::with_seed(Config::default(), Viewport::new(1280.0, 720.0), 8, 1);
//! scene.start();
//! let frame = scene.tick(Duration::from_millis(16));
//! assert!(!frame.particles.is_empty());
//! ```

use std::time::Duration;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::emitter::Emitter;
use crate::frame::{Frame, Overlay};
use crate::input::{Interaction, PointerEvent, Release};
use crate::palette;
use crate::particle::{Particle, UpdateContext};
use crate::photo::PhotoFrame;
use crate::projection::Viewport;
use crate::stage::{Stage, Transition};

/// Outer radius of the star on top of the tree.
const STAR_RADIUS: f32 = 25.0;
const TITLE_SIZE: f32 = 36.0;
const CAPTION_SIZE: f32 = 50.0;

/// Vertical middle of the heart curve in curve units.
const HEART_MIDLINE: f32 = -2.5;

pub struct Scene {
    config: Config,
    viewport: Viewport,
    stage: Stage,
    particles: Vec<Particle>,
    frames: Vec<PhotoFrame>,
    photo_count: usize,
    rotation: f32,
    interaction: Interaction,
    clock: Duration,
    rng: StdRng,
}

impl Scene {
    /// Create an idle scene seeded from system entropy.
    ///
    /// `photo_count` frames appear in the photo stage, one per photo.
    pub fn new(config: Config, viewport: Viewport, photo_count: usize) -> Self {
        Self::with_rng(config, viewport, photo_count, StdRng::from_entropy())
    }

    /// Create an idle scene with a deterministic random source.
    pub fn with_seed(config: Config, viewport: Viewport, photo_count: usize, seed: u64) -> Self {
        Self::with_rng(config, viewport, photo_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, viewport: Viewport, photo_count: usize, rng: StdRng) -> Self {
        let interaction = Interaction::new(&config);
        Self {
            config,
            viewport,
            stage: Stage::Idle,
            particles: Vec::new(),
            frames: Vec::new(),
            photo_count,
            rotation: 0.0,
            interaction,
            clock: Duration::ZERO,
            rng,
        }
    }

    // ========== Queries ==========

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn frames(&self) -> &[PhotoFrame] {
        &self.frames
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Simulation time since the show started.
    #[inline]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== Events ==========

    /// The drawing surface changed size. Takes effect on the next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The explicit start action. Returns `true` if the show started.
    pub fn start(&mut self) -> bool {
        match self.stage.on_start() {
            Some(transition) => {
                self.apply(transition);
                true
            }
            None => false,
        }
    }

    /// A click on the canvas. Returns `true` if the stage changed.
    pub fn click(&mut self) -> bool {
        let transition = self.stage.on_click(
            self.interaction.is_dragging(),
            self.clock,
            self.config.explosion_delay,
        );
        match transition {
            Some(transition) => {
                self.apply(transition);
                true
            }
            None => {
                log::debug!("click ignored in {} stage", self.stage);
                false
            }
        }
    }

    /// Keyboard shortcut: start when idle, click otherwise.
    pub fn advance(&mut self) -> bool {
        if self.stage.is_running() {
            self.click()
        } else {
            self.start()
        }
    }

    /// Feed a pointer event. Returns `true` if it changed the stage.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Pressed => {
                if self.stage.is_running() {
                    let cursor = self.interaction.cursor();
                    self.interaction.pointer_down(cursor);
                }
                false
            }
            PointerEvent::Moved(position) => {
                self.interaction.pointer_move(position);
                false
            }
            PointerEvent::Released => match self.interaction.pointer_up() {
                Some(Release::Click) => self.click(),
                Some(Release::Drag) | None => false,
            },
            PointerEvent::Left => {
                self.interaction.pointer_leave();
                false
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Start => {
                let emitter = Emitter::Tree {
                    count: self.config.tree_particles,
                };
                emitter.emit(&self.viewport, &self.config, &mut self.rng, &mut self.particles);
            }

            Transition::Explode { .. } => {
                let (min, max) = (self.config.explosion_speed_min, self.config.explosion_speed_max);
                let mut released = 0;
                for particle in self.particles.iter_mut().filter(|p| p.is_tree()) {
                    let speed = min + self.rng.gen::<f32>() * (max - min);
                    let velocity = Vec3::new(
                        self.rng.gen::<f32>() - 0.5,
                        self.rng.gen::<f32>() - 0.5,
                        self.rng.gen::<f32>() - 0.5,
                    ) * speed;
                    particle.release(velocity);
                    released += 1;
                }
                log::debug!("released {released} tree particles");
            }

            Transition::Settle => {
                let friction = self.config.permanent_friction;
                let mut promoted = 0;
                for particle in &mut self.particles {
                    if particle.promote(friction) {
                        promoted += 1;
                    }
                }
                log::debug!("{promoted} particles became permanent");

                self.frames = (0..self.photo_count)
                    .map(|photo| PhotoFrame::spawn(photo, &self.viewport, &self.config, &mut self.rng))
                    .collect();
            }

            Transition::Hearts => {
                self.frames.clear();
                self.particles.clear();
            }
        }

        let next = transition.target();
        log::info!("stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    // ========== Tick ==========

    /// Simulation-space position the heart curve is drawn around, chosen so the
    /// heart sits in the middle of the viewport.
    pub fn heart_center(&self) -> Vec3 {
        let y = self.viewport.world_y_at(self.viewport.height / 2.0, &self.config);
        Vec3::new(0.0, y - HEART_MIDLINE * self.config.heart_scale, 0.0)
    }

    /// Advance the show by one frame lasting `delta` and describe what to draw.
    pub fn tick(&mut self, delta: Duration) -> Frame {
        let mut frame = Frame::new(self.config.fade);

        if !self.stage.is_running() {
            self.interaction.decay();
            return frame;
        }

        Emitter::Sparkle {
            count: self.config.sparkles_per_tick,
        }
        .emit(&self.viewport, &self.config, &mut self.rng, &mut self.particles);

        self.clock += delta;
        if let Some(transition) = self.stage.on_clock(self.clock) {
            self.apply(transition);
        }

        let drag = self.interaction.impulse();
        if self.stage == Stage::Tree {
            self.rotation += drag.map_or(self.config.rotation_speed, |d| d.x);
        }
        if self.stage.shows_tree() {
            // Back to front: larger z is further away
            self.particles.sort_by(|a, b| b.position.z.total_cmp(&a.position.z));
        }

        let viewport = self.viewport;
        let context = UpdateContext {
            rotation: self.rotation,
            drag,
            config: &self.config,
        };
        frame.particles.reserve(self.particles.len());
        self.particles.retain_mut(|particle| {
            particle.update(&context);
            if let Some(instance) = particle.instance(&viewport, context.config) {
                frame.particles.push(instance);
            }
            !particle.is_expired()
        });

        let center = viewport.center();
        match self.stage {
            Stage::Tree | Stage::Dissolving { .. } => {
                let tip_y = viewport.tip_y(&self.config);
                frame.overlays.push(Overlay::Star {
                    center: Vec2::new(center.x, tip_y - STAR_RADIUS * 0.6),
                    radius: STAR_RADIUS,
                    color: palette::STAR,
                });
                frame.overlays.push(Overlay::Text {
                    text: self.config.title.clone(),
                    anchor: Vec2::new(center.x, tip_y - STAR_RADIUS * 2.0),
                    size: TITLE_SIZE,
                    color: palette::GOLD,
                });
            }

            Stage::Photos => {
                for photo in &mut self.frames {
                    photo.update(drag, &viewport, &self.config);
                    frame.overlays.push(photo.overlay(&self.config));
                }
            }

            Stage::Hearts => {
                let emitter = Emitter::Heart {
                    count: self.config.hearts_per_tick,
                    center: self.heart_center(),
                };
                emitter.emit(&viewport, &self.config, &mut self.rng, &mut self.particles);
                frame.overlays.push(Overlay::Text {
                    text: self.config.caption.clone(),
                    anchor: center + Vec2::new(0.0, 10.0),
                    size: CAPTION_SIZE,
                    color: palette::PINK,
                });
            }

            Stage::Idle => {}
        }

        self.interaction.decay();
        log::trace!(
            "tick {:?}: {} particles, {} frames",
            self.clock,
            self.particles.len(),
            self.frames.len()
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleKind;

    const FRAME: Duration = Duration::from_millis(16);

    fn scene() -> Scene {
        Scene::with_seed(Config::default(), Viewport::new(1280.0, 720.0), 8, 9)
    }

    #[test]
    fn test_idle_tick_draws_nothing() {
        let mut scene = scene();
        let frame = scene.tick(FRAME);
        assert!(frame.particles.is_empty());
        assert!(frame.overlays.is_empty());
        assert_eq!(scene.clock(), Duration::ZERO);
    }

    #[test]
    fn test_start_seeds_tree_once() {
        let mut scene = scene();
        assert!(scene.start());
        assert_eq!(scene.stage(), Stage::Tree);
        assert_eq!(scene.particles().iter().filter(|p| p.is_tree()).count(), 1500);
        assert!(!scene.start());
        assert_eq!(scene.particles().len(), 1500);
    }

    #[test]
    fn test_tree_tick_rotates_sorts_and_draws_overlays() {
        let mut scene = scene();
        scene.start();
        let frame = scene.tick(FRAME);

        assert!((scene.rotation() - 0.005).abs() < 1e-6);
        assert_eq!(frame.text_count(), 1);
        assert!(frame.overlays.iter().any(|o| matches!(o, Overlay::Star { .. })));
        assert!(frame.particles.len() >= 1500);

        let frame = scene.tick(FRAME);
        // Sorted by the previous tick's depth; rotation barely moves points
        let zs: Vec<f32> = scene.particles().iter().map(|p| p.position.z).collect();
        let out_of_order = zs.windows(2).filter(|w| w[0] < w[1] - 5.0).count();
        assert_eq!(out_of_order, 0);
        assert!(!frame.particles.is_empty());
    }

    #[test]
    fn test_sparkles_fade_out_of_the_collection() {
        let mut scene = scene();
        scene.start();
        scene.tick(FRAME);
        let sparkles = scene.particles().iter().filter(|p| p.kind == ParticleKind::Sparkle).count();
        assert_eq!(sparkles, 3);

        // 0.9 alpha at 0.005 per tick: steady state holds ~180 ticks of sparkles
        for _ in 0..400 {
            scene.tick(FRAME);
        }
        let sparkles = scene.particles().iter().filter(|p| p.kind == ParticleKind::Sparkle).count();
        assert!(sparkles <= 3 * 181, "{sparkles} sparkles alive");
        assert!(scene.particles().iter().all(|p| !p.is_expired()));
    }

    #[test]
    fn test_drag_spins_the_tree() {
        let mut scene = scene();
        scene.start();

        scene.handle_pointer(PointerEvent::Moved(Vec2::new(100.0, 100.0)));
        scene.handle_pointer(PointerEvent::Pressed);
        scene.handle_pointer(PointerEvent::Moved(Vec2::new(140.0, 100.0)));

        let expected = 40.0 * scene.config().drag_force;
        scene.tick(FRAME);
        assert!((scene.rotation() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_down_ignored_while_idle() {
        let mut scene = scene();
        scene.handle_pointer(PointerEvent::Pressed);
        assert!(!scene.interaction().is_dragging());
    }

    #[test]
    fn test_short_press_is_a_click() {
        let mut scene = scene();
        scene.start();
        scene.handle_pointer(PointerEvent::Moved(Vec2::new(10.0, 10.0)));
        scene.handle_pointer(PointerEvent::Pressed);
        scene.handle_pointer(PointerEvent::Moved(Vec2::new(11.0, 10.0)));
        assert!(scene.handle_pointer(PointerEvent::Released));
        assert!(matches!(scene.stage(), Stage::Dissolving { .. }));
    }

    #[test]
    fn test_long_drag_is_not_a_click() {
        let mut scene = scene();
        scene.start();
        scene.handle_pointer(PointerEvent::Pressed);
        scene.handle_pointer(PointerEvent::Moved(Vec2::new(200.0, 0.0)));
        assert!(!scene.handle_pointer(PointerEvent::Released));
        assert_eq!(scene.stage(), Stage::Tree);
    }

    #[test]
    fn test_heart_stage_emits_and_captions() {
        let mut scene = scene();
        scene.start();
        scene.click();
        for _ in 0..40 {
            scene.tick(FRAME);
        }
        assert_eq!(scene.stage(), Stage::Photos);

        assert!(scene.click());
        assert_eq!(scene.stage(), Stage::Hearts);
        assert!(scene.particles().is_empty());
        assert!(scene.frames().is_empty());

        let frame = scene.tick(FRAME);
        assert_eq!(frame.text_count(), 1);
        let hearts = scene.particles().iter().filter(|p| p.kind == ParticleKind::Heart).count();
        assert_eq!(hearts, 10);

        assert!(!scene.click());
        assert_eq!(scene.stage(), Stage::Hearts);
    }

    #[test]
    fn test_heart_is_centred_on_screen() {
        let scene = scene();
        let viewport = scene.viewport();
        let config = scene.config();
        let center = scene.heart_center();

        // Curve midline projects onto the viewport centre at depth zero
        let mid = center + Vec3::new(0.0, HEART_MIDLINE * config.heart_scale, 0.0);
        let projected = crate::projection::project(mid, 1.0, &viewport, config).unwrap();
        assert!((projected.screen.y - viewport.height / 2.0).abs() < 1e-3);
    }
}
