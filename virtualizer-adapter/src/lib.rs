//! Collaborator contracts and a small driver loop for wiring a [`virtualizer::VirtualStore`] to a
//! concrete scroll container.
//!
//! `virtualizer` itself never touches a UI: it has no opinion on pixels, rows, DOM nodes, or
//! terminal cells. This crate supplies the two contracts an adapter needs to implement
//! ([`ScrollContainer`], [`ItemSizeSource`]) and a [`Driver`] that polls them once per frame/tick,
//! feeding scroll events in and jump corrections back out.
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings) and does not take
//! a position on animation timing; a smooth-scroll tween belongs in the adapter, not here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod contracts;
mod driver;
mod ios_webkit;

#[cfg(test)]
mod tests;

pub use contracts::{ItemSizeSource, NullScrollContainer, ScrollContainer};
pub use driver::{Driver, DEFAULT_IDLE_TICKS};
pub use ios_webkit::is_ios_webkit;
