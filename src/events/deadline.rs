//! Deadline Timer
//!
//! One-shot timer running on its own thread. When it elapses it pushes a
//! `Timeout` event carrying the owner's token, unless cancelled first.
//! Cancellation is best effort: a timer that has already decided to fire still
//! delivers its marker, which the owner's successor ignores by token.

use super::{Event, EventQueue, TimeoutToken};
use crate::{RepeatError, Result};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Default)]
struct CancelSignal {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Handle to a scheduled timeout; dropping it cancels the timeout
pub struct DeadlineTimer {
    signal: Arc<CancelSignal>,
}

impl DeadlineTimer {
    /// Schedule `Event::Timeout { token }` onto `queue` after `after`
    pub fn schedule(queue: Arc<EventQueue>, after: Duration, token: TimeoutToken) -> Result<Self> {
        let signal = Arc::new(CancelSignal::default());
        let timer_signal = Arc::clone(&signal);
        let deadline = Instant::now() + after;

        thread::Builder::new()
            .name("deadline-timer".into())
            .spawn(move || {
                let mut cancelled = timer_signal.cancelled.lock();
                while !*cancelled {
                    if timer_signal
                        .wake
                        .wait_until(&mut cancelled, deadline)
                        .timed_out()
                    {
                        break;
                    }
                }
                if !*cancelled {
                    drop(cancelled);
                    queue.push(Event::Timeout { token });
                }
            })
            .map_err(|e| RepeatError::Timer(format!("Failed to spawn deadline timer: {}", e)))?;

        Ok(DeadlineTimer { signal })
    }

    /// Cancel the timeout if it has not fired yet
    pub fn cancel(&self) {
        *self.signal.cancelled.lock() = true;
        self.signal.wake.notify_one();
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
