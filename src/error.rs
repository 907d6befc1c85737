//! Error types.
//!
//! Only the window shell can fail. The simulation core has no failure modes:
//! bad numbers are skipped at projection time instead of reported.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable configuration for this adapter.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12/GL support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "Surface is not supported by the selected adapter"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while loading a photo.
///
/// These never stop the show; the frame just keeps its plain background.
#[derive(Debug)]
pub enum PhotoError {
    /// Failed to read the file from disk.
    Io { path: PathBuf, source: std::io::Error },
    /// Failed to decode the image.
    Decode { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::Io { path, source } => write!(f, "Failed to read photo {}: {}", path.display(), source),
            PhotoError::Decode { path, source } => write!(f, "Failed to decode photo {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for PhotoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhotoError::Io { source, .. } => Some(source),
            PhotoError::Decode { source, .. } => Some(source),
        }
    }
}

/// Errors from the optional music player.
#[cfg(feature = "audio")]
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device could be opened.
    Backend(String),
    /// The music file could not be loaded.
    Load { path: PathBuf, message: String },
    /// Playback could not start.
    Play(String),
}

#[cfg(feature = "audio")]
impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Backend(msg) => write!(f, "Failed to open audio output: {}", msg),
            AudioError::Load { path, message } => write!(f, "Failed to load music {}: {}", path.display(), message),
            AudioError::Play(msg) => write!(f, "Failed to start music: {}", msg),
        }
    }
}

#[cfg(feature = "audio")]
impl std::error::Error for AudioError {}

/// Errors that can occur when running the greeting.
#[derive(Debug)]
pub enum AppError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            AppError::Window(e) => write!(f, "Failed to create window: {}", e),
            AppError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}

impl From<GpuError> for AppError {
    fn from(e: GpuError) -> Self {
        AppError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_photo_error_names_the_file() {
        let err = PhotoError::Io {
            path: PathBuf::from("images/image3.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("images/image3.jpg"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_app_error_wraps_gpu_error() {
        let err: AppError = GpuError::NoAdapter.into();
        assert!(err.to_string().starts_with("GPU error"));
        assert!(err.source().is_some());
    }
}
