//! Builder and entry point for the greeting card.

use std::path::PathBuf;

use winit::event_loop::{ControlFlow, EventLoop};

use crate::album::Album;
use crate::config::Config;
use crate::error::AppError;
use crate::projection::Viewport;
use crate::scene::Scene;
use crate::window::{App, WindowSettings};

/// Number of photos looked up by [`default_photos`].
pub const DEFAULT_PHOTO_COUNT: usize = 8;

/// `images/image1.jpg` through `images/image8.jpg`.
pub fn default_photos() -> Vec<PathBuf> {
    (1..=DEFAULT_PHOTO_COUNT)
        .map(|i| PathBuf::from(format!("images/image{i}.jpg")))
        .collect()
}

/// The greeting card, configured through `with_*` methods.
///
/// # Example
///
/// ```ignore
/// use noel::Greeting;
///
/// Greeting::new()
///     .with_photos(["us/beach.jpg", "us/snow.jpg"])
///     .with_music("music/jingle.ogg")
///     .run()?;
/// ```
pub struct Greeting {
    config: Config,
    photos: Vec<PathBuf>,
    music: Option<PathBuf>,
    seed: Option<u64>,
    title: String,
    size: (u32, u32),
}

impl Greeting {
    /// Default show: eight photos from `images/`, music from `music/music.mp3`.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            photos: default_photos(),
            music: Some(PathBuf::from("music/music.mp3")),
            seed: None,
            title: "Noel".to_string(),
            size: (1280, 720),
        }
    }

    /// Replace every tunable constant at once.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Photos shown in the photo stage, one frame each, in order.
    pub fn with_photos<I, P>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.photos = photos.into_iter().map(Into::into).collect();
        self
    }

    /// Music looped from the start of the show. Needs the `audio` feature.
    pub fn with_music(mut self, path: impl Into<PathBuf>) -> Self {
        self.music = Some(path.into());
        self
    }

    pub fn without_music(mut self) -> Self {
        self.music = None;
        self
    }

    /// Fix the random seed so every run looks the same.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn photos(&self) -> &[PathBuf] {
        &self.photos
    }

    pub fn music(&self) -> Option<&PathBuf> {
        self.music.as_ref()
    }

    /// The idle scene this greeting starts from.
    pub fn scene(&self) -> Scene {
        let viewport = Viewport::new(self.size.0 as f32, self.size.1 as f32);
        match self.seed {
            Some(seed) => Scene::with_seed(self.config.clone(), viewport, self.photos.len(), seed),
            None => Scene::new(self.config.clone(), viewport, self.photos.len()),
        }
    }

    /// Open the window and run the show. This blocks until the window is closed.
    pub fn run(self) -> Result<(), AppError> {
        let scene = self.scene();
        log::info!("starting with {} photos", self.photos.len());
        let album = Album::load(self.photos);

        let settings = WindowSettings {
            title: self.title,
            width: self.size.0,
            height: self.size.1,
            music: self.music,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(settings, scene, album);
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Greeting {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;

    #[test]
    fn test_defaults() {
        let greeting = Greeting::new();
        assert_eq!(greeting.photos().len(), 8);
        assert_eq!(greeting.photos()[0], PathBuf::from("images/image1.jpg"));
        assert_eq!(greeting.photos()[7], PathBuf::from("images/image8.jpg"));
        assert_eq!(greeting.music(), Some(&PathBuf::from("music/music.mp3")));
        assert_eq!(greeting.config(), &Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config {
            tree_particles: 10,
            ..Config::default()
        };
        let greeting = Greeting::new()
            .with_config(config)
            .with_photos(["a.png", "b.png"])
            .without_music()
            .with_seed(5);

        assert_eq!(greeting.photos().len(), 2);
        assert!(greeting.music().is_none());

        let mut scene = greeting.scene();
        assert_eq!(scene.stage(), Stage::Idle);
        scene.start();
        assert_eq!(scene.particles().len(), 10);
    }

    #[test]
    fn test_seeded_scenes_match() {
        let greeting = Greeting::new().with_seed(42);
        let mut a = greeting.scene();
        let mut b = greeting.scene();
        a.start();
        b.start();
        assert_eq!(a.particles(), b.particles());
    }
}
