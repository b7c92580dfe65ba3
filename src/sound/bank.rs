//! Sound bank using rodio
//!
//! Decodes every sound once at startup and keeps it in memory, so triggering a
//! sound during play is only a clone into the output mixer.

use super::SoundPlayer;
use crate::{RepeatError, Result};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type CachedSound = Buffered<Decoder<BufReader<File>>>;

/// Preloaded WAV samples played on the default audio device
pub struct SoundBank {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: HashMap<String, CachedSound>,
}

impl SoundBank {
    /// Open the default output device and load `<dir>/<id>.wav` for every id
    ///
    /// # Arguments
    /// * `dir` - Directory holding the WAV files
    /// * `sound_ids` - Sounds to preload; duplicates are loaded once
    pub fn load<'a>(dir: &Path, sound_ids: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| {
            RepeatError::AudioDeviceError(format!("Failed to create audio stream: {}", e))
        })?;

        let mut sounds = HashMap::new();
        for id in sound_ids {
            if sounds.contains_key(id) {
                continue;
            }
            let sound = Self::decode(&dir.join(format!("{}.wav", id)))?;
            sounds.insert(id.to_string(), sound);
        }
        log::info!("Loaded {} sounds from {}", sounds.len(), dir.display());

        Ok(SoundBank {
            _stream: stream,
            handle,
            sounds,
        })
    }

    /// Whether `sound_id` was preloaded
    pub fn contains(&self, sound_id: &str) -> bool {
        self.sounds.contains_key(sound_id)
    }

    fn decode(path: &Path) -> Result<CachedSound> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open sound '{}': {}", path.display(), e))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| {
            RepeatError::AudioDeviceError(format!("Failed to decode '{}': {}", path.display(), e))
        })?;
        Ok(decoder.buffered())
    }
}

impl SoundPlayer for SoundBank {
    fn play(&self, sound_id: &str) {
        let Some(sound) = self.sounds.get(sound_id) else {
            log::warn!("Sound '{}' was not preloaded", sound_id);
            return;
        };
        if let Err(e) = self
            .handle
            .play_raw(sound.clone().convert_samples::<f32>())
        {
            log::warn!("Failed to play '{}': {}", sound_id, e);
        }
    }
}
