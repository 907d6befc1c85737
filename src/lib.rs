//! # Noel
//!
//! An animated greeting card: a rotating 3D Christmas tree made of glowing
//! points, which explodes on click into a field of drifting photo frames,
//! which in turn give way to a stream of heart-shaped particles.
//!
//! ## Quick Start
//!
//! ```ignore
//! use noel::Greeting;
//!
//! fn main() -> Result<(), noel::AppError> {
//!     env_logger::init();
//!     Greeting::new()
//!         .with_photos(["images/image1.jpg", "images/image2.jpg"])
//!         .run()
//! }
//! ```
//!
//! ## The Show
//!
//! The card runs a fixed forward-only sequence of [`Stage`]s:
//!
//! | Stage | Entered by | What happens |
//! |-------|------------|--------------|
//! | `Idle` | launch | A start prompt over a black canvas |
//! | `Tree` | start (button, Enter or Space) | 1500 points form a spinning cone with a star and title |
//! | `Dissolving` | click | Tree points fly apart; the title stays |
//! | `Photos` | 500 ms later | Released points freeze in place; photo frames drift and bounce |
//! | `Hearts` | click | Everything clears; a heart curve keeps emitting pink points |
//!
//! Sparks drift out of the tree base in every stage after `Idle`. Dragging
//! spins the tree, pushes free points and shoves photo frames around.
//!
//! ## Architecture
//!
//! The simulation core ([`Scene`] and everything it owns) is plain data with
//! no GPU or window dependency, so it runs headless in tests and benchmarks.
//! Each call to [`Scene::tick`] returns a [`Frame`]: the glow discs to draw and
//! the flat overlays (star, text, photos) to paint. The window shell replays
//! frames with wgpu into a persistent trail texture that fades a little every
//! frame, then paints overlays and UI with egui.
//!
//! ## Projection
//!
//! Points live in a 3D space centred on the tree axis (y up from the tree base,
//! z away from the viewer). [`project`] maps them to the screen with a simple
//! focal-length perspective; see [`projection`] for the exact formula.
//!
//! ## Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Left click | Advance the show (explode tree, show hearts) |
//! | Left drag | Spin tree, push particles and photos |
//! | Enter / Space | Start, or advance like a click |
//! | F3 | Toggle FPS and particle readout |
//! | Escape | Quit |
//!
//! ## Features
//!
//! - `audio`: loop background music from the start of the show (Kira).

pub mod album;
#[cfg(feature = "audio")]
pub mod audio;
pub mod config;
pub mod emitter;
pub mod error;
pub mod frame;
mod gpu;
mod greeting;
pub mod input;
pub mod overlay;
pub mod palette;
pub mod particle;
pub mod photo;
pub mod projection;
pub mod scene;
pub mod shaders;
pub mod stage;
pub mod time;
mod window;

pub use config::Config;
pub use emitter::{heart_curve, Emitter};
#[cfg(feature = "audio")]
pub use error::AudioError;
pub use error::{AppError, GpuError, PhotoError};
pub use frame::{Frame, Overlay, ParticleInstance};
pub use glam::{Vec2, Vec3};
pub use greeting::{default_photos, Greeting, DEFAULT_PHOTO_COUNT};
pub use input::{Interaction, PointerEvent, Release};
pub use particle::{Particle, ParticleKind};
pub use photo::PhotoFrame;
pub use projection::{project, Projected, Viewport};
pub use scene::Scene;
pub use stage::{Stage, Transition};
pub use time::Time;

/// Common imports for driving a scene headless.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::frame::{Frame, Overlay};
    pub use crate::input::PointerEvent;
    pub use crate::projection::Viewport;
    pub use crate::scene::Scene;
    pub use crate::stage::Stage;
    pub use crate::Greeting;
    pub use glam::{Vec2, Vec3};
}
