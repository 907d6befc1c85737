//! Integration tests driving a headless scene through the whole show.
//!
//! These tests only use the public API: pointer events, `start`/`click` and
//! `tick`, then inspect the stage, the particles and the emitted frames.

use std::time::Duration;

use noel::prelude::*;
use noel::{ParticleKind, DEFAULT_PHOTO_COUNT};

const FRAME: Duration = Duration::from_millis(16);

fn scene() -> Scene {
    Scene::with_seed(Config::default(), Viewport::new(1280.0, 720.0), DEFAULT_PHOTO_COUNT, 2024)
}

fn run(scene: &mut Scene, ticks: usize) -> Frame {
    let mut frame = Frame::default();
    for _ in 0..ticks {
        frame = scene.tick(FRAME);
    }
    frame
}

fn count(scene: &Scene, kind: ParticleKind) -> usize {
    scene.particles().iter().filter(|p| p.kind == kind).count()
}

// ============================================================================
// Stage scenario
// ============================================================================

#[test]
fn test_click_explodes_tree_then_photos_arrive() {
    let mut scene = scene();
    scene.start();
    run(&mut scene, 30);
    assert_eq!(count(&scene, ParticleKind::Tree), 1500);

    assert!(scene.click());
    assert!(matches!(scene.stage(), Stage::Dissolving { .. }));
    assert_eq!(count(&scene, ParticleKind::Tree), 0);
    assert_eq!(count(&scene, ParticleKind::Released), 1500);

    // 31 ticks of 16 ms is 496 ms: still dissolving
    run(&mut scene, 31);
    assert!(matches!(scene.stage(), Stage::Dissolving { .. }));
    assert!(scene.frames().is_empty());

    let frame = run(&mut scene, 1);
    assert_eq!(scene.stage(), Stage::Photos);
    assert_eq!(scene.frames().len(), DEFAULT_PHOTO_COUNT);
    assert_eq!(count(&scene, ParticleKind::Released), 0);
    assert_eq!(count(&scene, ParticleKind::Permanent), 1500);

    let photos = frame
        .overlays
        .iter()
        .filter(|o| matches!(o, Overlay::Photo { .. }))
        .count();
    assert_eq!(photos, DEFAULT_PHOTO_COUNT);
    assert_eq!(frame.text_count(), 0);
}

#[test]
fn test_fast_refresh_keeps_every_released_point() {
    let mut scene = scene();
    scene.start();
    scene.click();

    let fast = Duration::from_millis(2);
    let mut ticks = 0;
    while scene.stage() != Stage::Photos {
        scene.tick(fast);
        ticks += 1;
        assert!(ticks <= 251, "never settled after {ticks} ticks");
    }
    assert_eq!(count(&scene, ParticleKind::Released), 0);
    assert_eq!(count(&scene, ParticleKind::Permanent), 1500);
}

#[test]
fn test_fixed_explosion_speed_is_allowed() {
    let config = Config {
        explosion_speed_min: 12.0,
        explosion_speed_max: 12.0,
        ..Config::default()
    };
    let mut scene = Scene::with_seed(config, Viewport::new(1280.0, 720.0), DEFAULT_PHOTO_COUNT, 5);
    scene.start();
    assert!(scene.click());

    for particle in scene.particles().iter().filter(|p| p.kind == ParticleKind::Released) {
        // Each axis is scaled by at most half the speed
        assert!(particle.velocity.abs().max_element() <= 6.0 + 1e-4);
    }
    assert_eq!(count(&scene, ParticleKind::Released), 1500);
}

#[test]
fn test_permanent_points_come_to_rest() {
    let mut scene = scene();
    scene.start();
    scene.click();
    run(&mut scene, 40);
    assert_eq!(scene.stage(), Stage::Photos);

    run(&mut scene, 600);
    for particle in scene.particles().iter().filter(|p| p.is_permanent()) {
        assert_eq!(particle.velocity, Vec3::ZERO);
        assert_eq!(particle.alpha, 1.0);
    }
    assert_eq!(count(&scene, ParticleKind::Permanent), 1500);
}

#[test]
fn test_hearts_are_terminal() {
    let mut scene = scene();
    scene.start();
    scene.click();
    run(&mut scene, 40);
    scene.click();
    assert_eq!(scene.stage(), Stage::Hearts);

    let frame = run(&mut scene, 100);
    assert_eq!(frame.text_count(), 1);
    assert!(scene.frames().is_empty());
    assert_eq!(count(&scene, ParticleKind::Permanent), 0);
    assert!(count(&scene, ParticleKind::Heart) > 0);

    assert!(!scene.click());
    assert!(!scene.start());
    assert_eq!(scene.stage(), Stage::Hearts);
}

#[test]
fn test_every_drawn_point_is_finite() {
    let mut scene = scene();
    scene.start();

    let mut check = |frame: &Frame| {
        for p in &frame.particles {
            assert!(p.center.iter().all(|c| c.is_finite()));
            assert!(p.radius.is_finite() && p.radius > 0.0);
            assert!((0.0..=1.0).contains(&p.alpha));
        }
    };

    for _ in 0..20 {
        check(&scene.tick(FRAME));
    }
    scene.click();
    for _ in 0..200 {
        check(&scene.tick(FRAME));
    }
    scene.click();
    for _ in 0..200 {
        check(&scene.tick(FRAME));
    }
}

// ============================================================================
// Drag scenario
// ============================================================================

#[test]
fn test_drag_sets_velocity_and_release_stops_updates() {
    let mut scene = scene();
    scene.start();
    let k = scene.config().drag_force;

    scene.handle_pointer(PointerEvent::Moved(Vec2::new(300.0, 300.0)));
    scene.handle_pointer(PointerEvent::Pressed);
    scene.handle_pointer(PointerEvent::Moved(Vec2::new(320.0, 290.0)));
    assert_eq!(scene.interaction().drag_velocity(), Vec2::new(20.0, -10.0) * k);

    assert!(!scene.handle_pointer(PointerEvent::Released));
    assert_eq!(scene.stage(), Stage::Tree);
    let released = scene.interaction().drag_velocity();

    scene.handle_pointer(PointerEvent::Moved(Vec2::new(900.0, 900.0)));
    assert_eq!(scene.interaction().drag_velocity(), released);

    scene.tick(FRAME);
    let decayed = scene.interaction().drag_velocity();
    assert!((decayed - released * scene.config().drag_damping).length() < 1e-6);
}

#[test]
fn test_click_while_dragging_keeps_stage() {
    let mut scene = scene();
    scene.start();

    scene.handle_pointer(PointerEvent::Pressed);
    assert!(scene.interaction().is_dragging());
    assert!(!scene.advance());
    assert_eq!(scene.stage(), Stage::Tree);
}

#[test]
fn test_dragged_photos_stay_on_screen() {
    let mut scene = scene();
    scene.start();
    scene.click();
    run(&mut scene, 40);

    scene.handle_pointer(PointerEvent::Moved(Vec2::new(100.0, 100.0)));
    scene.handle_pointer(PointerEvent::Pressed);
    for step in 0..300 {
        let x = 100.0 + (step % 50) as f32 * 12.0;
        scene.handle_pointer(PointerEvent::Moved(Vec2::new(x, 100.0 + step as f32)));
        scene.tick(FRAME);

        let viewport = scene.viewport();
        for photo in scene.frames() {
            assert!(photo.position.x >= 0.0 && photo.position.y >= 0.0);
            assert!(photo.position.x + photo.size <= viewport.width + 1e-3);
            assert!(photo.position.y + photo.size <= viewport.height + 1e-3);
        }
    }
    scene.handle_pointer(PointerEvent::Left);
    assert!(!scene.interaction().is_dragging());
}

#[test]
fn test_resize_takes_effect_next_tick() {
    let mut scene = scene();
    scene.start();

    scene.resize(Viewport::new(400.0, 300.0));
    let frame = scene.tick(FRAME);
    let star = frame
        .overlays
        .iter()
        .find_map(|o| match o {
            Overlay::Star { center, .. } => Some(*center),
            _ => None,
        })
        .unwrap();
    assert_eq!(star.x, 200.0);
}
