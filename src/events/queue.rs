//! Blocking Event Queue
//!
//! Multi-producer, single-consumer FIFO. Producers are the input callbacks and
//! the deadline timers; the consumer is the game thread.

use super::Event;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Thread-safe FIFO of events with a blocking pop
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<Event>>,
    available: Condvar,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and wake the consumer
    pub fn push(&self, event: Event) {
        self.events.lock().push_back(event);
        self.available.notify_one();
    }

    /// Remove the oldest event, blocking while the queue is empty
    pub fn pop(&self) -> Event {
        let mut events = self.events.lock();
        loop {
            if let Some(event) = events.pop_front() {
                return event;
            }
            self.available.wait(&mut events);
        }
    }

    /// Remove the oldest event if there is one
    pub fn try_pop(&self) -> Option<Event> {
        self.events.lock().pop_front()
    }

    /// Discard every pending event, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut events = self.events.lock();
        let dropped = events.len();
        events.clear();
        dropped
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = EventQueue::new();
        queue.push(Event::press(1));
        queue.push(Event::release(1));
        queue.push(Event::press(3));

        assert_eq!(queue.pop(), Event::press(1));
        assert_eq!(queue.pop(), Event::release(1));
        assert_eq!(queue.pop(), Event::press(3));
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = Arc::new(EventQueue::new());
        let producer = Arc::clone(&queue);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(Event::press(0));
        });

        assert_eq!(queue.pop(), Event::press(0));
        handle.join().unwrap();
    }

    #[test]
    fn test_clear_discards_pending() {
        let queue = EventQueue::new();
        queue.push(Event::press(0));
        queue.push(Event::release(0));

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_concurrent_producers_lose_nothing() {
        let queue = Arc::new(EventQueue::new());
        let producers: Vec<_> = (0..4)
            .map(|slot| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for _ in 0..100 {
                        queue.push(Event::press(slot));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        assert_eq!(queue.len(), 400);
    }
}
