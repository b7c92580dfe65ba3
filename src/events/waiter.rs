//! Wait Primitive
//!
//! Blocks the game thread until a qualifying button edge arrives or a deadline
//! passes. Each call gets a fresh [`TimeoutToken`]; timeout markers left over
//! from earlier calls are recognised by token and skipped.

use super::{ButtonEdge, DeadlineTimer, Event, EventQueue, SlotIndex, TimeoutToken};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// How a wait call resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// An edge satisfied the predicate
    Matched(ButtonEdge),
    /// The deadline elapsed first
    TimedOut,
}

impl WaitOutcome {
    /// The matched edge, if any
    pub fn edge(self) -> Option<ButtonEdge> {
        match self {
            WaitOutcome::Matched(edge) => Some(edge),
            WaitOutcome::TimedOut => None,
        }
    }
}

/// Consumer side of the event queue
pub struct EventWaiter {
    queue: Arc<EventQueue>,
}

impl EventWaiter {
    /// Wrap the queue the game consumes
    pub fn new(queue: Arc<EventQueue>) -> Self {
        EventWaiter { queue }
    }

    /// Block until `predicate` accepts an edge or `timeout` elapses.
    ///
    /// Edges the predicate rejects are dropped. With no timeout the call only
    /// returns on a match.
    pub fn wait_for_events<F>(&self, timeout: Option<Duration>, mut predicate: F) -> Result<WaitOutcome>
    where
        F: FnMut(&ButtonEdge) -> bool,
    {
        let token = TimeoutToken::next();
        let timer = match timeout {
            Some(after) => Some(DeadlineTimer::schedule(Arc::clone(&self.queue), after, token)?),
            None => None,
        };

        loop {
            match self.queue.pop() {
                Event::Timeout { token: fired } if fired == token => {
                    log::debug!("Wait timed out after {:?}", timeout.unwrap_or_default());
                    return Ok(WaitOutcome::TimedOut);
                }
                Event::Timeout { token: stale } => {
                    log::trace!("Ignoring stale timeout {:?}", stale);
                }
                Event::Button(edge) if predicate(&edge) => {
                    if let Some(timer) = &timer {
                        timer.cancel();
                    }
                    return Ok(WaitOutcome::Matched(edge));
                }
                Event::Button(edge) => {
                    log::trace!("Skipping {:?}", edge);
                }
            }
        }
    }

    /// Wait for a press of any slot
    pub fn wait_for_press(&self, timeout: Option<Duration>) -> Result<WaitOutcome> {
        self.wait_for_events(timeout, |edge| edge.pressed)
    }

    /// Wait for a release of any slot
    pub fn wait_for_release(&self, timeout: Option<Duration>) -> Result<WaitOutcome> {
        self.wait_for_events(timeout, |edge| !edge.pressed)
    }

    /// Wait for the release of one particular slot
    pub fn wait_for_release_of(&self, slot: SlotIndex, timeout: Option<Duration>) -> Result<WaitOutcome> {
        self.wait_for_events(timeout, |edge| !edge.pressed && edge.slot == slot)
    }

    /// Drop every pending event
    pub fn clear_events(&self) {
        let dropped = self.queue.clear();
        if dropped > 0 {
            log::debug!("Discarded {} pending events", dropped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    fn waiter() -> (Arc<EventQueue>, EventWaiter) {
        let queue = Arc::new(EventQueue::new());
        (Arc::clone(&queue), EventWaiter::new(queue))
    }

    #[test]
    fn test_matches_first_qualifying_edge() {
        let (queue, waiter) = waiter();
        queue.push(Event::release(0));
        queue.push(Event::press(2));

        let outcome = waiter.wait_for_press(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(outcome.edge().map(|e| e.slot), Some(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_times_out_without_input() {
        let (_queue, waiter) = waiter();
        let start = Instant::now();

        let outcome = waiter.wait_for_press(Some(Duration::from_millis(30))).unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_stale_timeout_is_ignored() {
        let (queue, waiter) = waiter();
        // Marker from an earlier call that resolved before its timer was cancelled
        queue.push(Event::Timeout {
            token: TimeoutToken::next(),
        });
        queue.push(Event::press(1));

        let outcome = waiter.wait_for_press(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(outcome.edge().map(|e| e.slot), Some(1));
    }

    #[test]
    fn test_stale_timeout_does_not_cut_wait_short() {
        let (queue, waiter) = waiter();
        queue.push(Event::Timeout {
            token: TimeoutToken::next(),
        });
        let start = Instant::now();

        let outcome = waiter.wait_for_press(Some(Duration::from_millis(50))).unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_successive_calls_do_not_leak_timeouts() {
        let (queue, waiter) = waiter();
        queue.push(Event::press(0));
        let first = waiter.wait_for_press(Some(Duration::from_millis(10))).unwrap();
        assert!(matches!(first, WaitOutcome::Matched(_)));

        // Give the first timer every chance to fire late
        thread::sleep(Duration::from_millis(40));
        let producer = Arc::clone(&queue);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(Event::press(3));
        });

        let second = waiter.wait_for_press(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(second.edge().map(|e| e.slot), Some(3));
        handle.join().unwrap();
    }

    #[test]
    fn test_no_deadline_waits_for_match() {
        let (queue, waiter) = waiter();
        let producer = Arc::clone(&queue);
        let handle = thread::spawn(move || {
            producer.push(Event::press(1));
            thread::sleep(Duration::from_millis(20));
            producer.push(Event::release(0));
            producer.push(Event::release(1));
        });

        let outcome = waiter.wait_for_release_of(1, None).unwrap();
        assert_eq!(
            outcome,
            WaitOutcome::Matched(ButtonEdge {
                slot: 1,
                pressed: false
            })
        );
        handle.join().unwrap();
    }

    #[test]
    fn test_release_helper_ignores_presses() {
        let (queue, waiter) = waiter();
        queue.push(Event::press(0));
        queue.push(Event::release(0));

        let outcome = waiter.wait_for_release(None).unwrap();
        assert_eq!(outcome.edge(), Some(ButtonEdge { slot: 0, pressed: false }));
    }

    #[test]
    fn test_clear_events_empties_queue() {
        let (queue, waiter) = waiter();
        queue.push(Event::press(0));
        queue.push(Event::release(0));
        waiter.clear_events();
        assert!(queue.is_empty());
    }
}
