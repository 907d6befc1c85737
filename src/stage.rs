//! The scripted sequence of the show.
//!
//! ```text
//! Idle --start--> Tree --click--> Dissolving --500 ms--> Photos --click--> Hearts
//! ```
//!
//! Transitions only go forward and `Hearts` is final. Clicks that arrive while
//! a drag is in progress never advance the show. The functions here only
//! decide; [`crate::scene::Scene`] carries out the side effects.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Waiting for the start action.
    #[default]
    Idle,
    /// Rotating tree.
    Tree,
    /// Tree exploded; photos appear once the clock reaches `until`.
    Dissolving { until: Duration },
    /// Floating photo frames.
    Photos,
    /// Heart stream. Terminal.
    Hearts,
}

/// A stage change together with the work it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Seed the tree.
    Start,
    /// Release every tree point and schedule the photos.
    Explode { until: Duration },
    /// Make released points permanent and spawn the photo frames.
    Settle,
    /// Drop frames and particles, start the heart stream.
    Hearts,
}

impl Transition {
    /// Stage the show is in after this transition.
    pub fn target(&self) -> Stage {
        match self {
            Transition::Start => Stage::Tree,
            Transition::Explode { until } => Stage::Dissolving { until: *until },
            Transition::Settle => Stage::Photos,
            Transition::Hearts => Stage::Hearts,
        }
    }
}

impl Stage {
    /// The explicit start action. Only valid while idle.
    pub fn on_start(&self) -> Option<Transition> {
        match self {
            Stage::Idle => Some(Transition::Start),
            _ => None,
        }
    }

    /// A click at simulation time `now`.
    pub fn on_click(&self, dragging: bool, now: Duration, delay: Duration) -> Option<Transition> {
        if dragging {
            return None;
        }
        match self {
            Stage::Tree => Some(Transition::Explode { until: now + delay }),
            Stage::Photos => Some(Transition::Hearts),
            Stage::Idle | Stage::Dissolving { .. } | Stage::Hearts => None,
        }
    }

    /// The simulation clock advanced to `now`.
    pub fn on_clock(&self, now: Duration) -> Option<Transition> {
        match self {
            Stage::Dissolving { until } if now >= *until => Some(Transition::Settle),
            _ => None,
        }
    }

    /// Whether the show has started.
    pub fn is_running(&self) -> bool {
        !matches!(self, Stage::Idle)
    }

    /// Whether the tree title and star are shown.
    pub fn shows_tree(&self) -> bool {
        matches!(self, Stage::Tree | Stage::Dissolving { .. })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::Tree => write!(f, "tree"),
            Stage::Dissolving { .. } => write!(f, "dissolving"),
            Stage::Photos => write!(f, "photos"),
            Stage::Hearts => write!(f, "hearts"),
        }
    }
}
