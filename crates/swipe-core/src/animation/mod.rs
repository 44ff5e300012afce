#![forbid(unsafe_code)]

//! Settle animation.
//!
//! The settle is host-driven: the layout never sleeps or spawns. Each redraw
//! tick advances the active [`Settle`] by the elapsed time and the layout
//! asks for another frame until the surface reaches its target.

pub mod settle;
pub mod spring;

pub use settle::{Settle, SettleStep};
pub use spring::Spring;
