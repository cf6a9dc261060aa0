use alloc::vec::Vec;

use virtualizer::VirtualStore;

use crate::contracts::{ItemSizeSource, ScrollContainer};

/// Consecutive quiescent ticks (no change in the container's reported scroll offset) required
/// before the driver treats a scroll gesture as finished and signals `ScrollEnd`.
pub const DEFAULT_IDLE_TICKS: u32 = 2;

/// Ties a [`VirtualStore`] to a concrete [`ScrollContainer`] and [`ItemSizeSource`].
///
/// Call [`Driver::tick`] once per frame/timer tick (or once per scroll/resize event plus a
/// trailing timer for quiescence, whichever the host environment makes easiest). Each tick:
/// 1. syncs the container's viewport size into the store,
/// 2. feeds the container's current scroll offset in as a `Scroll` action,
/// 3. detects quiescence and signals `ScrollEnd` after `idle_ticks` unchanged ticks,
/// 4. pulls measured sizes for the currently visible range and feeds them in as `ItemResize`,
/// 5. flushes any pending jump and writes the corrected offset back to the container.
///
/// This mirrors the shape of the source engine's own per-frame controller loop, minus tween/easing
/// animation, which is a consumer-level concern this crate does not take a position on.
pub struct Driver<C, S> {
    store: VirtualStore,
    container: C,
    sizes: S,
    /// `None` until the first tick has synced a scroll offset into the store; forces that first
    /// tick to submit whatever the container reports even if it matches the store's default 0,
    /// rather than silently adopting a nonzero starting offset the store was never told about.
    last_scroll_offset: Option<f64>,
    idle_ticks_seen: u32,
    idle_ticks_threshold: u32,
    scroll_end_signaled: bool,
}

impl<C: ScrollContainer, S: ItemSizeSource> Driver<C, S> {
    pub fn new(store: VirtualStore, container: C, sizes: S) -> Self {
        Self {
            store,
            container,
            sizes,
            last_scroll_offset: None,
            idle_ticks_seen: 0,
            idle_ticks_threshold: DEFAULT_IDLE_TICKS,
            scroll_end_signaled: true,
        }
    }

    pub fn with_idle_ticks_threshold(mut self, threshold: u32) -> Self {
        self.idle_ticks_threshold = threshold.max(1);
        self
    }

    pub fn store(&self) -> &VirtualStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VirtualStore {
        &mut self.store
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Advances the driver by one tick. Returns the offset it wrote back to the container, if a
    /// jump correction was applied this tick.
    pub fn tick(&mut self) -> Option<f64> {
        self.sync_viewport();
        self.poll_scroll();
        self.poll_item_sizes();
        self.flush_jump()
    }

    fn sync_viewport(&mut self) {
        let viewport_size = self.container.viewport_size();
        if viewport_size != self.store.get_viewport_size() {
            self.store.submit_viewport_resize(viewport_size, 0.0, 0.0);
        }
    }

    fn poll_scroll(&mut self) {
        let offset = self.container.scroll_offset();
        let changed = match self.last_scroll_offset {
            None => true,
            Some(last) => (offset - last).abs() > f64::EPSILON,
        };
        if changed {
            self.store.submit_scroll(offset);
            self.last_scroll_offset = Some(offset);
            self.idle_ticks_seen = 0;
            self.scroll_end_signaled = false;
            return;
        }

        if self.scroll_end_signaled {
            return;
        }
        self.idle_ticks_seen += 1;
        if self.idle_ticks_seen >= self.idle_ticks_threshold {
            self.store.signal_scroll_end();
            self.scroll_end_signaled = true;
        }
    }

    fn poll_item_sizes(&mut self) {
        let range = self.store.get_range(0);
        if range.is_empty() {
            return;
        }
        let mut updates = Vec::new();
        for index in range.start..=range.end {
            if let Some(size) = self.sizes.measured_size(index) {
                updates.push((index, size));
            }
        }
        if !updates.is_empty() {
            self.store.submit_item_resize(updates);
        }
    }

    fn flush_jump(&mut self) -> Option<f64> {
        let jump = self.store.flush_jump();
        if jump == 0.0 {
            return None;
        }
        let new_offset = self.container.scroll_offset() + jump;
        self.container.set_scroll_offset(new_offset);
        self.last_scroll_offset = Some(new_offset);
        Some(new_offset)
    }

    pub fn into_parts(self) -> (VirtualStore, C, S) {
        (self.store, self.container, self.sizes)
    }
}
