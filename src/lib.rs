//! Reflex memory game for GPIO buttons, lights and sound
//!
//! A "Simon"-style game: the board plays back a growing random sequence of
//! lights and sounds, and the player repeats it on the buttons. The interesting
//! part is the synchronization layer underneath: noisy edge callbacks from the
//! input hardware are debounced into clean press/release events, merged with
//! deadline timeouts into one ordered queue, and consumed by a single game
//! thread with bounded, cancellable waits.
//!
//! # Layers
//! - [`board`]: hardware collaborator traits, the position registry, and an
//!   in-memory simulated board
//! - [`input`]: the debounce filter turning raw edges into logical events
//! - [`events`]: the event queue, deadline timers and the wait primitive
//! - [`game`]: the attract / playback / listen / win / lose state machine
//! - [`config`]: JSON board configuration
//! - [`sound`]: sound collaborators (`audio` feature enables rodio playback)
//!
//! # Crate feature flags
//! - `audio` (opt-in): sample playback through the system audio device
//!   (enables the optional `rodio` dep)
//!
//! # Quick start
//! ```no_run
//! use std::sync::Arc;
//! use repeat::board::{DigitalInput, SimulatedBoard};
//! use repeat::config::BoardConfig;
//! use repeat::events::EventQueue;
//! use repeat::game::Game;
//! use repeat::input::DebounceFilter;
//! use repeat::sound::SilentSound;
//!
//! let config = BoardConfig::default();
//! let positions = Arc::new(config.position_table().unwrap());
//! let board = Arc::new(SimulatedBoard::new(positions.input_pins()));
//! let queue = Arc::new(EventQueue::new());
//!
//! let filter = Arc::new(DebounceFilter::new(
//!     Arc::clone(&positions),
//!     Arc::clone(&board) as Arc<dyn DigitalInput>,
//!     Arc::clone(&queue),
//! ));
//! filter.install(&*board).unwrap();
//!
//! let mut game = Game::new(positions, config.failure_sound, config.timings, queue, board, Box::new(SilentSound));
//! game.run().unwrap();
//! ```

#![warn(missing_docs)]

pub mod board; // Hardware collaborators & Position Registry
pub mod config; // Board Configuration
pub mod events; // Event Queue & Wait Primitive
pub mod game; // Game State Machine
pub mod input; // Debounce Filter
pub mod sound; // Sound Collaborators

/// Error types for game and board operations
#[derive(thiserror::Error, Debug)]
pub enum RepeatError {
    /// Edge notification for a pin that no position is wired to
    #[error("Unknown input pin: {0}")]
    UnknownPin(board::Pin),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Deadline timer could not be scheduled
    #[error("Timer error: {0}")]
    Timer(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for RepeatError {
    /// Converts a String into `RepeatError::Other`.
    ///
    /// Prefer a specific variant (`Config`, `Timer`, `AudioDeviceError`) where
    /// the failure domain is known.
    fn from(msg: String) -> Self {
        RepeatError::Other(msg)
    }
}

impl From<&str> for RepeatError {
    /// Converts a string slice into `RepeatError::Other`.
    fn from(msg: &str) -> Self {
        RepeatError::Other(msg.to_string())
    }
}

/// Result type for game and board operations
pub type Result<T> = std::result::Result<T, RepeatError>;

// Public API exports
pub use board::{DigitalInput, DigitalOutput, Pin, Position, PositionTable, SimulatedBoard};
pub use config::BoardConfig;
pub use events::{ButtonEdge, Event, EventQueue, EventWaiter, SlotIndex, TimeoutToken, WaitOutcome};
pub use game::{Game, GameOutcome, GamePhase, PhaseObserver, Timings};
pub use input::{ButtonState, DebounceFilter};
#[cfg(feature = "audio")]
pub use sound::SoundBank;
pub use sound::{SilentSound, SoundPlayer};
