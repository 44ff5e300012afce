#![forbid(unsafe_code)]

//! Open state for swipe panels in scrolling lists.
//!
//! # Role
//! A list recycles a few [`SwipeLayout`](swipe_core::SwipeLayout) instances
//! across many rows. [`OpenStateRegistry`] remembers which positions are
//! open, re-primes a panel every time it is bound to a row, and keeps at
//! most one row open in [`Mode::Single`].
//!
//! # How it fits in the system
//! The host binds each visible row with [`OpenStateRegistry::bind`] and
//! forwards the events a panel produces to [`OpenStateRegistry::observe`].
//! Programmatic changes go through `open_item` / `close_item`, which call
//! back into the host's [`ListHost::notify_data_changed`] to trigger a
//! rebind.

pub mod registry;

pub use registry::{ListHost, Mode, OpenStateRegistry, PanelHandle};
