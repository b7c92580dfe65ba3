//! Debounce Filter
//!
//! Converts raw edge notifications into clean press/release events while
//! enforcing that at most one button is down at a time. A press of a second
//! button while one is held, and a release of a button that is not the held
//! one, are both dropped. This absorbs bounce at the cost of occasionally
//! missing a very fast second press.

use crate::board::{DigitalInput, Pin, PositionTable};
use crate::events::{ButtonEdge, Event, EventQueue, SlotIndex};
use crate::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Which slot, if any, is logically held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    currently_down: Option<SlotIndex>,
}

impl ButtonState {
    /// Slot currently held, if any
    pub fn currently_down(&self) -> Option<SlotIndex> {
        self.currently_down
    }

    /// Apply a reading of `slot` and return the logical edge it produces
    pub fn apply(&mut self, slot: SlotIndex, pressed: bool) -> Option<ButtonEdge> {
        match (self.currently_down, pressed) {
            (None, true) => {
                self.currently_down = Some(slot);
            }
            (Some(held), false) if held == slot => {
                self.currently_down = None;
            }
            _ => return None,
        }
        Some(ButtonEdge { slot, pressed })
    }
}

/// Edge callback target feeding the event queue
pub struct DebounceFilter {
    positions: Arc<PositionTable>,
    input: Arc<dyn DigitalInput>,
    queue: Arc<EventQueue>,
    state: Mutex<ButtonState>,
}

impl DebounceFilter {
    /// Create a filter reading levels from `input` and emitting into `queue`
    pub fn new(positions: Arc<PositionTable>, input: Arc<dyn DigitalInput>, queue: Arc<EventQueue>) -> Self {
        DebounceFilter {
            positions,
            input,
            queue,
            state: Mutex::new(ButtonState::default()),
        }
    }

    /// Handle one edge notification for `pin`.
    ///
    /// Returns the emitted edge, or `None` if the notification was absorbed.
    pub fn on_edge(&self, pin: Pin) -> Result<Option<ButtonEdge>> {
        let slot = self.positions.slot_for_input(pin)?;

        // Sample, apply and push under one lock so no stale level is applied
        // and queue order matches state order
        let mut state = self.state.lock();
        // Inputs are pulled up: low means pressed
        let pressed = !self.input.read_level(pin);
        let edge = state.apply(slot, pressed);
        match edge {
            Some(edge) => {
                log::debug!(
                    "Slot {} {}",
                    edge.slot,
                    if edge.pressed { "pressed" } else { "released" }
                );
                self.queue.push(Event::Button(edge));
            }
            None => log::trace!(
                "Dropped notification for slot {} (pressed={}, held={:?})",
                slot,
                pressed,
                state.currently_down()
            ),
        }
        Ok(edge)
    }

    /// Snapshot of the held-slot state
    pub fn state(&self) -> ButtonState {
        *self.state.lock()
    }

    /// Register the filter on every input pin of the position table.
    ///
    /// A notification for a pin outside the table means the wiring and the
    /// configuration disagree; the installed callback aborts the process.
    pub fn install(self: &Arc<Self>, input: &dyn DigitalInput) -> Result<()> {
        for pin in self.positions.input_pins() {
            let filter = Arc::clone(self);
            input.watch_edges(
                pin,
                Arc::new(move |pin| {
                    if let Err(e) = filter.on_edge(pin) {
                        log::error!("Fatal input configuration error: {}", e);
                        std::process::abort();
                    }
                }),
            )?;
        }
        log::debug!("Watching {} inputs", self.positions.len());
        Ok(())
    }
}
