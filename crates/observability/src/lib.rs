//! Process-wide tracing setup.
//!
//! Library crates only emit `tracing` events. Binaries and test harnesses
//! install a subscriber once through [`init`] or [`init_with`].

pub mod subscriber;

pub use subscriber::{DEFAULT_FILTER, LogFormat, init, init_with};
