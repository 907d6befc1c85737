//! Photo loading.
//!
//! Photos decode on a background thread so the first frames of the show never
//! wait on disk. The window loop calls [`Album::poll`] every frame; finished
//! images are uploaded as egui textures and looked up by index when a frame
//! overlay is painted. A photo that fails to load is logged and stays blank.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::imageops::FilterType;

use crate::error::PhotoError;

/// Longest edge kept after decoding. Frames never draw larger than this.
pub const MAX_PHOTO_EDGE: u32 = 512;

enum Slot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

type Decoded = (usize, Result<egui::ColorImage, PhotoError>);

pub struct Album {
    paths: Vec<PathBuf>,
    slots: Vec<Slot>,
    receiver: Option<Receiver<Decoded>>,
}

impl Album {
    /// Start decoding `paths` in the background, in order.
    pub fn load(paths: Vec<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let jobs = paths.clone();

        let spawned = thread::Builder::new()
            .name("photo-decoder".into())
            .spawn(move || {
                for (index, path) in jobs.iter().enumerate() {
                    if sender.send((index, decode(path))).is_err() {
                        break;
                    }
                }
            });

        let mut album = Self {
            slots: paths.iter().map(|_| Slot::Loading).collect(),
            paths,
            receiver: Some(receiver),
        };

        if let Err(e) = spawned {
            log::warn!("could not start photo decoder: {e}");
            album.receiver = None;
            album.slots.iter_mut().for_each(|slot| *slot = Slot::Failed);
        }
        album
    }

    /// Number of configured photos, loaded or not.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Upload every image decoded since the last call.
    pub fn poll(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.receiver else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok((index, Ok(image))) => {
                    let name = format!("photo-{index}");
                    let handle = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
                    log::debug!("photo {} ready", self.paths[index].display());
                    self.slots[index] = Slot::Ready(handle);
                }
                Ok((index, Err(e))) => {
                    log::warn!("{e}");
                    self.slots[index] = Slot::Failed;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    for slot in &mut self.slots {
                        if matches!(slot, Slot::Loading) {
                            *slot = Slot::Failed;
                        }
                    }
                    break;
                }
            }
        }
    }

    /// Texture for photo `index`, once it is ready.
    pub fn texture(&self, index: usize) -> Option<&egui::TextureHandle> {
        match self.slots.get(index)? {
            Slot::Ready(handle) => Some(handle),
            Slot::Loading | Slot::Failed => None,
        }
    }

    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Ready(_))).count()
    }

    /// Whether every photo has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(|s| !matches!(s, Slot::Loading))
    }
}

/// Read and decode one photo, center-cropped to a square.
pub fn decode(path: &Path) -> Result<egui::ColorImage, PhotoError> {
    let bytes = std::fs::read(path).map_err(|source| PhotoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| PhotoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let side = img.width().min(img.height());
    let x = (img.width() - side) / 2;
    let y = (img.height() - side) / 2;
    let mut square = img.crop_imm(x, y, side, side);
    if side > MAX_PHOTO_EDGE {
        square = square.resize_exact(MAX_PHOTO_EDGE, MAX_PHOTO_EDGE, FilterType::Triangle);
    }

    let rgba = square.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
