//! Resynchronized Button Events
//!
//! Button edges and deadline timeouts originate on different threads and meet
//! in one thread-safe blocking queue, which the game then consumes
//! synchronously.
//!
//! - [`EventQueue`]: FIFO queue with blocking pop
//! - [`DeadlineTimer`]: cancellable one-shot timer injecting a timeout marker
//! - [`EventWaiter`]: the wait primitive racing a deadline against input

pub mod deadline;
pub mod queue;
pub mod waiter;

pub use deadline::DeadlineTimer;
pub use queue::EventQueue;
pub use waiter::{EventWaiter, WaitOutcome};

use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a position in the position table
pub type SlotIndex = usize;

/// A logical press or release of one slot's button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    /// Slot whose button changed
    pub slot: SlotIndex,
    /// true = pressed, false = released
    pub pressed: bool,
}

/// Marker identifying the wait call that scheduled a timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutToken(u64);

impl TimeoutToken {
    /// Allocate a token never handed out before in this process
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TimeoutToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Entry in the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Debounced button edge
    Button(ButtonEdge),
    /// A deadline elapsed for the wait call owning `token`
    Timeout {
        /// Token of the wait call that scheduled the deadline
        token: TimeoutToken,
    },
}

impl Event {
    /// Shorthand for a press of `slot`
    pub fn press(slot: SlotIndex) -> Self {
        Event::Button(ButtonEdge {
            slot,
            pressed: true,
        })
    }

    /// Shorthand for a release of `slot`
    pub fn release(slot: SlotIndex) -> Self {
        Event::Button(ButtonEdge {
            slot,
            pressed: false,
        })
    }
}
