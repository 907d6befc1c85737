//! Pointer interaction.
//!
//! [`Interaction`] turns raw pointer motion into a drag velocity that decays
//! a little every tick, so pushes keep coasting after the button goes up.
//! It also tells clicks apart from drags: a press and release with almost no
//! travel in between is a click.
//!
//! # Usage
//!
//! ```ignore
//! let mut interaction = Interaction::new(&config);
//! interaction.pointer_down(Vec2::new(100.0, 100.0));
//! interaction.pointer_move(Vec2::new(110.0, 96.0));
//! assert_eq!(interaction.drag_velocity(), Vec2::new(10.0, -4.0) * config.drag_force);
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::config::Config;

/// Pointer events the scene cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button went down at the last known cursor position.
    Pressed,
    /// Primary button went up.
    Released,
    /// Cursor moved to this position in physical pixels.
    Moved(Vec2),
    /// Cursor left the window.
    Left,
}

impl PointerEvent {
    /// Translate a winit window event. Only the left button counts.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => PointerEvent::Pressed,
                ElementState::Released => PointerEvent::Released,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                Some(PointerEvent::Moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::CursorLeft { .. } => Some(PointerEvent::Left),
            _ => None,
        }
    }
}

/// How a press ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The pointer barely moved.
    Click,
    /// The pointer travelled further than the click slop.
    Drag,
}

/// Drag tracking and inertial drag velocity.
#[derive(Debug, Clone)]
pub struct Interaction {
    dragging: bool,
    cursor: Vec2,
    last: Vec2,
    travel: f32,
    drag_velocity: Vec2,
    force: f32,
    damping: f32,
    click_slop: f32,
}

impl Interaction {
    pub fn new(config: &Config) -> Self {
        Self {
            dragging: false,
            cursor: Vec2::ZERO,
            last: Vec2::ZERO,
            travel: 0.0,
            drag_velocity: Vec2::ZERO,
            force: config.drag_force,
            damping: config.drag_damping,
            click_slop: config.click_slop,
        }
    }

    // ========== Queries ==========

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last known cursor position.
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Current drag velocity, including the coasting tail after release.
    #[inline]
    pub fn drag_velocity(&self) -> Vec2 {
        self.drag_velocity
    }

    /// Drag velocity to inject into entities, present only while dragging.
    #[inline]
    pub fn impulse(&self) -> Option<Vec2> {
        self.dragging.then_some(self.drag_velocity)
    }

    // ========== Events ==========

    /// Start a drag at `position`.
    pub fn pointer_down(&mut self, position: Vec2) {
        self.cursor = position;
        self.last = position;
        self.travel = 0.0;
        self.dragging = true;
    }

    /// Track the cursor; while dragging, the step since the previous move sets
    /// the drag velocity.
    pub fn pointer_move(&mut self, position: Vec2) {
        self.cursor = position;
        if !self.dragging {
            return;
        }

        let delta = position - self.last;
        self.drag_velocity = delta * self.force;
        self.travel += delta.length();
        self.last = position;
    }

    /// End the drag. Returns `None` if no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<Release> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        Some(if self.travel < self.click_slop {
            Release::Click
        } else {
            Release::Drag
        })
    }

    /// Pointer left the window: end the drag without a click.
    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    /// Per-tick inertial decay, applied whether or not a drag is active.
    pub fn decay(&mut self) {
        self.drag_velocity *= self.damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_sets_scaled_drag_velocity() {
        let config = Config::default();
        let mut input = Interaction::new(&config);

        input.pointer_down(Vec2::new(100.0, 100.0));
        input.pointer_move(Vec2::new(130.0, 80.0));
        assert_eq!(input.drag_velocity(), Vec2::new(30.0, -20.0) * config.drag_force);

        // Only the step since the previous move counts
        input.pointer_move(Vec2::new(134.0, 80.0));
        assert_eq!(input.drag_velocity(), Vec2::new(4.0, 0.0) * config.drag_force);
    }

    #[test]
    fn test_moves_without_drag_only_track_cursor() {
        let config = Config::default();
        let mut input = Interaction::new(&config);

        input.pointer_move(Vec2::new(50.0, 60.0));
        assert_eq!(input.drag_velocity(), Vec2::ZERO);
        assert_eq!(input.cursor(), Vec2::new(50.0, 60.0));
        assert!(input.impulse().is_none());
    }

    #[test]
    fn test_release_classifies_click_and_drag() {
        let config = Config::default();
        let mut input = Interaction::new(&config);

        input.pointer_down(Vec2::ZERO);
        input.pointer_move(Vec2::new(1.0, 1.0));
        assert_eq!(input.pointer_up(), Some(Release::Click));

        input.pointer_down(Vec2::ZERO);
        input.pointer_move(Vec2::new(40.0, 0.0));
        assert_eq!(input.pointer_up(), Some(Release::Drag));

        assert_eq!(input.pointer_up(), None);
    }

    #[test]
    fn test_decay_continues_after_release() {
        let config = Config::default();
        let mut input = Interaction::new(&config);

        input.pointer_down(Vec2::ZERO);
        input.pointer_move(Vec2::new(200.0, 0.0));
        input.pointer_up();
        assert!(input.impulse().is_none());

        let before = input.drag_velocity();
        input.decay();
        assert_eq!(input.drag_velocity(), before * config.drag_damping);

        // Moves after release no longer touch the velocity
        input.pointer_move(Vec2::new(500.0, 500.0));
        assert_eq!(input.drag_velocity(), before * config.drag_damping);
    }

    #[test]
    fn test_leave_ends_drag() {
        let config = Config::default();
        let mut input = Interaction::new(&config);

        input.pointer_down(Vec2::ZERO);
        assert!(input.is_dragging());
        input.pointer_leave();
        assert!(!input.is_dragging());
        assert_eq!(input.pointer_up(), None);
    }
}
