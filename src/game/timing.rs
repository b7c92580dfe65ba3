//! Game Timing
//!
//! Pacing constants in milliseconds, and the [`Delay`] used for the
//! non-interactive pauses on the game thread.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Light/sound per slot during the attract sweep
pub const ATTRACT_STEP_MS: u64 = 250;
/// Idle wait between attract sweeps
pub const ATTRACT_IDLE_MS: u64 = 5000;
/// Pause before every round except the first
pub const INTER_ROUND_PAUSE_MS: u64 = 1000;
/// Playback: slot lit
pub const PLAYBACK_ON_MS: u64 = 250;
/// Playback: slot dark
pub const PLAYBACK_OFF_MS: u64 = 250;
/// Time allowed for each press while listening
pub const INPUT_DEADLINE_MS: u64 = 3000;
/// Failure flash duration
pub const FAILURE_HOLD_MS: u64 = 1500;
/// Dark pause after the failure flash
pub const FAILURE_BLANK_MS: u64 = 2000;
/// Pause before the victory animation
pub const WIN_HOLD_MS: u64 = 500;
/// Victory animation step
pub const WIN_STEP_MS: u64 = 125;
/// Window for starting a new game straight after a loss
pub const LOSS_GRACE_MS: u64 = 5000;

/// Game pacing, defaulting to the constants above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Light/sound per slot during the attract sweep
    pub attract_step_ms: u64,
    /// Idle wait between attract sweeps
    pub attract_idle_ms: u64,
    /// Pause before every round except the first
    pub inter_round_pause_ms: u64,
    /// Playback: slot lit
    pub playback_on_ms: u64,
    /// Playback: slot dark
    pub playback_off_ms: u64,
    /// Time allowed for each press while listening
    pub input_deadline_ms: u64,
    /// Failure flash duration
    pub failure_hold_ms: u64,
    /// Dark pause after the failure flash
    pub failure_blank_ms: u64,
    /// Pause before the victory animation
    pub win_hold_ms: u64,
    /// Victory animation step
    pub win_step_ms: u64,
    /// Window for starting a new game straight after a loss
    pub loss_grace_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            attract_step_ms: ATTRACT_STEP_MS,
            attract_idle_ms: ATTRACT_IDLE_MS,
            inter_round_pause_ms: INTER_ROUND_PAUSE_MS,
            playback_on_ms: PLAYBACK_ON_MS,
            playback_off_ms: PLAYBACK_OFF_MS,
            input_deadline_ms: INPUT_DEADLINE_MS,
            failure_hold_ms: FAILURE_HOLD_MS,
            failure_blank_ms: FAILURE_BLANK_MS,
            win_hold_ms: WIN_HOLD_MS,
            win_step_ms: WIN_STEP_MS,
            loss_grace_ms: LOSS_GRACE_MS,
        }
    }
}

/// Convert a millisecond setting into a `Duration`
pub(crate) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Non-cancellable pause on the game thread
pub trait Delay: Send {
    /// Sleep for `duration`
    fn delay(&self, duration: Duration);
}

/// Sleeps the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately; for driving the state machine in tests and tools
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_defaults_match_constants() {
        let timings = Timings::default();
        assert_eq!(timings.attract_step_ms, 250);
        assert_eq!(timings.attract_idle_ms, 5000);
        assert_eq!(timings.input_deadline_ms, 3000);
        assert_eq!(timings.win_step_ms, 125);
        assert_eq!(timings.loss_grace_ms, 5000);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let timings: Timings = serde_json::from_str(r#"{ "input_deadline_ms": 1500 }"#).unwrap();
        assert_eq!(timings.input_deadline_ms, 1500);
        assert_eq!(timings.playback_on_ms, PLAYBACK_ON_MS);
    }

    #[test]
    fn test_thread_delay_sleeps() {
        let start = Instant::now();
        ThreadDelay.delay(ms(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
