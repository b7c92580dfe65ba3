//! Board Collaborators
//!
//! Interfaces to the hardware the game runs on: digital inputs wired to the
//! buttons (pulled up, so idle reads high and a press reads low), digital
//! outputs driving the lights, and the static table of playable positions.
//!
//! The core never talks to a GPIO library directly. A platform layer provides
//! [`DigitalInput`] and [`DigitalOutput`]; [`SimulatedBoard`] is the in-memory
//! implementation used by the terminal front end and by tests.

pub mod position;
pub mod sim;

pub use position::{Position, PositionTable};
pub use sim::SimulatedBoard;

use std::sync::Arc;

/// Hardware pin number (BCM numbering on a Raspberry Pi)
pub type Pin = u8;

/// Callback invoked on every electrical transition of a watched pin
pub type EdgeCallback = Arc<dyn Fn(Pin) + Send + Sync>;

/// Digital input access with edge detection
pub trait DigitalInput: Send + Sync {
    /// Current logical level of the pin (`true` = high)
    fn read_level(&self, pin: Pin) -> bool;

    /// Register a callback fired on both rising and falling transitions.
    ///
    /// The callback may run on any thread, concurrently with itself for other
    /// pins, and may fire more than once for a single physical transition.
    fn watch_edges(&self, pin: Pin, callback: EdgeCallback) -> crate::Result<()>;
}

/// Digital output access
pub trait DigitalOutput: Send + Sync {
    /// Drive the pin high or low
    fn set_level(&self, pin: Pin, high: bool);
}

/// Blanks every light of a position table when dropped
///
/// Hold one for the lifetime of the process so lights are switched off on
/// every exit path, including unwinding.
pub struct OutputGuard {
    output: Arc<dyn DigitalOutput>,
    pins: Vec<Pin>,
}

impl OutputGuard {
    /// Create a guard over all output pins of `positions`
    pub fn new(output: Arc<dyn DigitalOutput>, positions: &PositionTable) -> Self {
        OutputGuard {
            output,
            pins: positions.output_pins(),
        }
    }

    /// Switch every guarded output off now
    pub fn blank(&self) {
        for &pin in &self.pins {
            self.output.set_level(pin, false);
        }
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        self.blank();
        log::debug!("Outputs released ({} pins blanked)", self.pins.len());
    }
}
