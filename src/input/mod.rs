//! Button Input
//!
//! Both edges of every button are watched so that each press and each release
//! produces at least one notification. Notifications cannot be trusted to say
//! which edge occurred, and may repeat, so the debounce filter re-reads the
//! level and decides whether the logical button state actually changed.

pub mod debounce;

pub use debounce::{ButtonState, DebounceFilter};
