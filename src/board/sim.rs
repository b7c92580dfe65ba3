//! Simulated Board
//!
//! In-memory GPIO: pull-up inputs that can be pressed, released and bounced
//! from any thread, and outputs whose levels can be inspected.

use super::{DigitalInput, DigitalOutput, EdgeCallback, Pin};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

/// In-memory board implementing both input and output access
pub struct SimulatedBoard {
    /// Input levels (true = high = released)
    inputs: Mutex<HashMap<Pin, bool>>,
    /// Registered edge callbacks per input pin
    callbacks: Mutex<HashMap<Pin, Vec<EdgeCallback>>>,
    /// Output pins currently driven high
    outputs: Mutex<BTreeSet<Pin>>,
}

impl SimulatedBoard {
    /// Create a board whose `input_pins` all start idle (high)
    pub fn new(input_pins: impl IntoIterator<Item = Pin>) -> Self {
        SimulatedBoard {
            inputs: Mutex::new(input_pins.into_iter().map(|pin| (pin, true)).collect()),
            callbacks: Mutex::new(HashMap::new()),
            outputs: Mutex::new(BTreeSet::new()),
        }
    }

    /// Pull the input low and fire its edge callbacks
    pub fn press(&self, pin: Pin) {
        self.inputs.lock().insert(pin, false);
        self.fire(pin);
    }

    /// Let the input float high and fire its edge callbacks
    pub fn release(&self, pin: Pin) {
        self.inputs.lock().insert(pin, true);
        self.fire(pin);
    }

    /// Fire the edge callbacks `count` times without changing the level,
    /// as contact bounce does
    pub fn chatter(&self, pin: Pin, count: usize) {
        for _ in 0..count {
            self.fire(pin);
        }
    }

    /// Output pins currently driven high, ascending
    pub fn lit_outputs(&self) -> Vec<Pin> {
        self.outputs.lock().iter().copied().collect()
    }

    /// Whether an output pin is driven high
    pub fn is_lit(&self, pin: Pin) -> bool {
        self.outputs.lock().contains(&pin)
    }

    fn fire(&self, pin: Pin) {
        // Callbacks read the level back, so they must run without our locks held
        let callbacks = self.callbacks.lock().get(&pin).cloned().unwrap_or_default();
        for callback in callbacks {
            callback(pin);
        }
    }
}

impl DigitalInput for SimulatedBoard {
    fn read_level(&self, pin: Pin) -> bool {
        // Unconnected pins float high through the pull-up
        self.inputs.lock().get(&pin).copied().unwrap_or(true)
    }

    fn watch_edges(&self, pin: Pin, callback: EdgeCallback) -> crate::Result<()> {
        self.callbacks.lock().entry(pin).or_default().push(callback);
        Ok(())
    }
}

impl DigitalOutput for SimulatedBoard {
    fn set_level(&self, pin: Pin, high: bool) {
        let mut outputs = self.outputs.lock();
        if high {
            outputs.insert(pin);
        } else {
            outputs.remove(&pin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_inputs_idle_high() {
        let board = SimulatedBoard::new([4, 18]);
        assert!(board.read_level(4));
        board.press(4);
        assert!(!board.read_level(4));
        assert!(board.read_level(18));
        board.release(4);
        assert!(board.read_level(4));
    }

    #[test]
    fn test_callbacks_fire_on_every_notification() {
        let board = SimulatedBoard::new([4]);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        board
            .watch_edges(
                4,
                Arc::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        board.press(4);
        board.chatter(4, 3);
        board.release(4);

        assert_eq!(fired.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_outputs_track_levels() {
        let board = SimulatedBoard::new([]);
        board.set_level(27, true);
        board.set_level(22, true);
        assert_eq!(board.lit_outputs(), vec![22, 27]);
        board.set_level(27, false);
        assert!(!board.is_lit(27));
        assert!(board.is_lit(22));
    }
}
