//! Frame timing.
//!
//! Motion in the show is expressed per tick, like a browser animation frame,
//! so the clock only drives scheduled events (the explosion delay) and the
//! FPS readout.
//!
//! # Example
//!
//! ```ignore
//! let mut time = Time::new();
//!
//! // In the redraw handler:
//! let delta = time.update();
//! scene.tick(delta);
//! println!("FPS: {:.1}", time.fps());
//! ```

use std::time::{Duration, Instant};

/// Longest delta a single tick may report.
///
/// A window that was dragged or stalled would otherwise skip scheduled
/// events in one jump.
pub const MAX_DELTA: Duration = Duration::from_millis(100);

/// Time tracking for the redraw loop.
#[derive(Debug)]
pub struct Time {
    /// When tracking started.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame, clamped to [`MAX_DELTA`].
    delta: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns the delta for this frame.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();

        if self.paused {
            self.delta = Duration::ZERO;
            return self.delta;
        }

        self.delta = now.duration_since(self.last_frame).min(MAX_DELTA);
        self.last_frame = now;
        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta
    }

    /// Time since last frame.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Wall-clock time since tracking started, pauses included.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause time progression.
    ///
    /// While paused, `update()` returns a zero delta.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression without counting the paused span.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
