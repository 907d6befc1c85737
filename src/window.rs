//! The winit application shell.
//!
//! [`App`] owns the window, the GPU state, egui and the [`Scene`]. Events are
//! offered to egui first; whatever egui does not consume drives the scene.
//! Every `RedrawRequested` ticks the scene once, renders the resulting frame
//! and asks for the next redraw. Losing focus pauses the clock and the redraw
//! loop; the last frame is replayed if the system asks for a repaint.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::album::Album;
#[cfg(feature = "audio")]
use crate::audio::Music;
use crate::error::AppError;
use crate::frame::Frame;
use crate::gpu::{EguiIntegration, GpuState};
use crate::input::PointerEvent;
use crate::overlay::{self, DebugStats};
use crate::projection::Viewport;
use crate::scene::Scene;
use crate::time::Time;

/// Frames between window title refreshes while the readout is on.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Window settings handed over by [`crate::Greeting`].
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub music: Option<PathBuf>,
}

pub(crate) struct App {
    settings: WindowSettings,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui: Option<EguiIntegration>,
    scene: Scene,
    album: Album,
    time: Time,
    /// Last ticked frame, replayed while the window is unfocused.
    frame: Frame,
    #[cfg(feature = "audio")]
    music: Option<Music>,
    show_debug: bool,
    error: Option<AppError>,
}

impl App {
    pub fn new(settings: WindowSettings, scene: Scene, album: Album) -> Self {
        #[cfg(feature = "audio")]
        let music = settings.music.as_ref().and_then(|path| {
            Music::load(path)
                .map_err(|e| log::warn!("{e}; continuing without music"))
                .ok()
        });
        #[cfg(not(feature = "audio"))]
        {
            if let Some(path) = &settings.music {
                log::debug!("built without the audio feature, ignoring {}", path.display());
            }
        }

        Self {
            settings,
            window: None,
            gpu: None,
            egui: None,
            scene,
            album,
            time: Time::new(),
            frame: Frame::default(),
            #[cfg(feature = "audio")]
            music,
            show_debug: false,
            error: None,
        }
    }

    /// The first fatal error hit inside the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// Side effects of the show starting or moving on.
    fn on_stage_change(&mut self) {
        #[cfg(feature = "audio")]
        {
            if self.scene.stage().is_running() {
                if let Some(music) = &mut self.music {
                    if let Err(e) = music.play() {
                        log::warn!("{e}");
                    }
                }
            }
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => {
                if self.scene.advance() {
                    self.on_stage_change();
                }
            }
            KeyCode::Escape => event_loop.exit(),
            KeyCode::F3 => {
                self.show_debug = !self.show_debug;
                if !self.show_debug {
                    if let Some(window) = &self.window {
                        window.set_title(&self.settings.title);
                    }
                }
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.time.update();
        if !self.time.is_paused() {
            self.frame = self.scene.tick(delta);
        }
        let frame = &self.frame;

        let (Some(window), Some(gpu), Some(egui)) = (&self.window, &mut self.gpu, &mut self.egui) else {
            return;
        };

        self.album.poll(&egui.ctx);

        let stage = self.scene.stage();
        let stats = DebugStats {
            fps: self.time.fps(),
            particles: self.scene.particles().len(),
            frames: self.scene.frames().len(),
            photos_ready: self.album.ready_count(),
            photos: self.album.len(),
            uptime: self.time.elapsed(),
        };
        let show_debug = self.show_debug;
        let album = &self.album;
        let mut start_pressed = false;

        let egui_output = egui.run(window, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            overlay::paint(&painter, &frame.overlays, album, ctx.pixels_per_point());

            if !stage.is_running() {
                start_pressed |= overlay::start_prompt(ctx);
            }
            if show_debug {
                overlay::debug_readout(ctx, &stage.to_string(), &stats);
            }
        });

        match gpu.render(frame, egui, &egui_output) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        if show_debug && self.time.frame() % TITLE_REFRESH_FRAMES == 0 {
            window.set_title(&format!("{} ({:.0} fps)", self.settings.title, stats.fps));
        }
        if !self.time.is_paused() {
            window.request_redraw();
        }

        if start_pressed && self.scene.start() {
            self.on_stage_change();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.settings.width, self.settings.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let gpu = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => return self.fail(event_loop, e.into()),
        };
        let egui = EguiIntegration::new(gpu.device(), gpu.format(), &window);

        let size = window.inner_size();
        self.scene
            .resize(Viewport::new(size.width as f32, size.height as f32));
        log::info!("window ready at {}x{}", size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui = Some(egui);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (&self.window, &mut self.egui) {
            (Some(window), Some(egui)) => egui.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.scene.resize(Viewport::new(
                        physical_size.width as f32,
                        physical_size.height as f32,
                    ));
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => {
                self.on_key(event_loop, key);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            WindowEvent::Focused(false) => {
                log::debug!("focus lost, pausing");
                self.time.pause();
            }
            WindowEvent::Focused(true) => {
                self.time.resume();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => {
                let Some(pointer) = PointerEvent::from_window_event(&other) else {
                    return;
                };
                // Presses on egui widgets belong to egui; everything else
                // keeps the drag state consistent
                if consumed && pointer == PointerEvent::Pressed {
                    return;
                }
                if self.scene.handle_pointer(pointer) {
                    self.on_stage_change();
                }
            }
        }
    }
}
