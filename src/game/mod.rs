//! Game State Machine
//!
//! Runs synchronously on one thread:
//!
//! ```text
//! Idle → Attracting → PlayingBack → Listening → (Won | Lost) → Attracting …
//!                          ↑____________|  (next round)
//! ```
//!
//! Wrong presses and missed deadlines are ordinary transitions to `Lost`, not
//! errors. Errors only come from the event layer (a timer that cannot be
//! scheduled) and end the run.

pub mod machine;
pub mod sequence;
pub mod timing;

pub use machine::{Game, ListenVerdict};
pub use sequence::Sequence;
pub use timing::{Delay, NoDelay, ThreadDelay, Timings};

use crate::events::SlotIndex;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Not started
    #[default]
    Idle,
    /// Attract pattern, waiting for a button to start a game
    Attracting,
    /// Showing the sequence for a round (1-based)
    PlayingBack {
        /// Round number, equal to the sequence length
        round: usize,
    },
    /// Waiting for the player to repeat the sequence
    Listening {
        /// Round number, equal to the sequence length
        round: usize,
    },
    /// Sequence completed
    Won,
    /// Wrong press or missed deadline
    Lost,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Idle => f.write_str("idle"),
            GamePhase::Attracting => f.write_str("press any button"),
            GamePhase::PlayingBack { round } => write!(f, "round {}: watch", round),
            GamePhase::Listening { round } => write!(f, "round {}: repeat", round),
            GamePhase::Won => f.write_str("you win"),
            GamePhase::Lost => f.write_str("game over"),
        }
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every round was repeated correctly
    Won,
    /// A round was failed
    Lost,
}

/// Notified on the game thread at every phase transition
pub trait PhaseObserver: Send {
    /// `sequence` is the chain of the game in progress (empty outside a game)
    fn phase_changed(&mut self, phase: GamePhase, sequence: &[SlotIndex]);
}

/// Shared cell holding the latest phase, for display on another thread
impl PhaseObserver for Arc<Mutex<GamePhase>> {
    fn phase_changed(&mut self, phase: GamePhase, _sequence: &[SlotIndex]) {
        *self.lock() = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(GamePhase::Listening { round: 3 }.to_string(), "round 3: repeat");
        assert_eq!(GamePhase::default(), GamePhase::Idle);
    }

    #[test]
    fn test_shared_phase_cell() {
        let cell = Arc::new(Mutex::new(GamePhase::Idle));
        let mut observer = Arc::clone(&cell);
        observer.phase_changed(GamePhase::Won, &[0, 1]);
        assert_eq!(*cell.lock(), GamePhase::Won);
    }
}
