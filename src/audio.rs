//! Background music.
//!
//! Compiled with the `audio` feature. The track is decoded up front and starts
//! looping when the show starts. A missing output device or music file only
//! costs the music: the show keeps running silent.

use std::path::{Path, PathBuf};

use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend};

use crate::error::AudioError;

/// Playback volume as linear amplitude.
pub const MUSIC_VOLUME: f32 = 0.5;

pub struct Music {
    manager: AudioManager<DefaultBackend>,
    track: StaticSoundData,
    path: PathBuf,
    playing: Option<StaticSoundHandle>,
}

impl Music {
    /// Open the default output device and decode the track at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref().to_path_buf();
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Backend(e.to_string()))?;
        let track = StaticSoundData::from_file(&path).map_err(|e| AudioError::Load {
            path: path.clone(),
            message: e.to_string(),
        })?;

        log::info!("loaded music {}", path.display());
        Ok(Self {
            manager,
            track,
            path,
            playing: None,
        })
    }

    /// Start the loop. Calling it again while playing does nothing.
    pub fn play(&mut self) -> Result<(), AudioError> {
        if self.playing.is_some() {
            return Ok(());
        }

        let data = self.track.clone().volume(amplitude_to_db(MUSIC_VOLUME)).loop_region(..);
        let handle = self.manager.play(data).map_err(|e| AudioError::Play(e.to_string()))?;
        log::debug!("playing {}", self.path.display());
        self.playing = Some(handle);
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }
}

/// Convert linear amplitude to decibels, flooring at -60 dB.
fn amplitude_to_db(amplitude: f32) -> Decibels {
    if amplitude <= 0.0 {
        Decibels(-60.0)
    } else {
        Decibels((20.0 * amplitude.log10()).max(-60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_amplitude_is_about_minus_six_db() {
        let db = amplitude_to_db(MUSIC_VOLUME);
        assert!((db.0 + 6.02).abs() < 0.01);
        assert_eq!(amplitude_to_db(0.0).0, -60.0);
        assert_eq!(amplitude_to_db(1.0).0, 0.0);
    }
}
