//! Sound Collaborators
//!
//! The game only asks for a sound to start; it never waits for one to finish
//! and never checks that it played.

#[cfg(feature = "audio")]
pub mod bank;

#[cfg(feature = "audio")]
pub use bank::SoundBank;

/// Fire-and-forget sound playback
pub trait SoundPlayer {
    /// Start playing `sound_id` without blocking
    fn play(&self, sound_id: &str);
}

/// Plays nothing; used when no audio device is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundPlayer for SilentSound {
    fn play(&self, sound_id: &str) {
        log::debug!("Sound '{}' (silent)", sound_id);
    }
}
