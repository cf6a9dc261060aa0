//! A headless list/scroll virtualization core.
//!
//! This crate is UI-agnostic: it answers three questions for a caller that owns a scrolling
//! viewport over a large linear item sequence (which subrange of items must be materialized,
//! where each one should be placed, and how to compensate the scroll position) so that measured
//! size changes, list mutations, and programmatic scrolls never produce a visible jump.
//!
//! Three pieces do the work:
//! - [`SizeCache`]: per-item sizes (many initially unknown) plus a lazily-computed,
//!   lazily-invalidated prefix-sum cache for fast offset lookups and range search.
//! - [`VirtualStore`]: a reducer over an [`Action`] union. It owns viewport geometry, scroll
//!   offset/direction, the jump-compensation bookkeeping, and the currently rendered range, and
//!   notifies [interest](types::interest)-masked subscribers after every mutating action.
//! - The jump-compensation protocol described on [`VirtualStore::flush_jump`] and
//!   [`VirtualStore::get_item_offset`].
//!
//! For the traits that describe the external collaborators this crate expects (a scroll
//! container, an item-size observer) and a small driver loop wiring them to a [`VirtualStore`],
//! see the `virtualizer-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod action;
mod error;
mod options;
mod size_cache;
mod store;
mod subscriber;
mod types;


pub use action::Action;
pub use error::StoreError;
pub use options::VirtualStoreOptions;
pub use size_cache::{CacheSnapshot, SizeCache, UNCACHED_SENTINEL};
pub use store::{VirtualStore, SUBPIXEL_THRESHOLD};
pub use subscriber::{Subscriber, SubscriptionId};
pub use types::{interest, Range, ScrollDirection};
