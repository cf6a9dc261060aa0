use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::action::Action;
use crate::error::StoreError;
use crate::options::VirtualStoreOptions;
use crate::size_cache::{CacheSnapshot, SizeCache};
use crate::subscriber::{Subscriber, SubscriberList, SubscriptionId};
use crate::types::{interest, Range, ScrollDirection};

/// Allows for devicePixelRatio-induced fractional scroll when comparing offsets against edges.
pub const SUBPIXEL_THRESHOLD: f64 = 1.5;

/// The virtual store reducer.
///
/// Owns the size cache and every piece of state in the Virtual Store State table: viewport
/// geometry, scroll offset/direction, the jump/pendingJump/flushedJump/jumpCount bookkeeping, the
/// prepend and manual-scroll flags, the smooth-scroll target range, and the memoized previous
/// range. The only way to mutate it is [`VirtualStore::dispatch`]; a dispatcher over a tagged
/// action union replaces per-field setters here on purpose, so invariants spanning several fields
/// (jump, direction, range) have exactly one place to hold.
///
/// The cache is wrapped in a `RefCell` because its prefix-sum memoization needs to mutate even
/// from read-only query methods (`get_range`, `get_item_offset`, ...): the same reasoning applies
/// to the source engine's own `Cell`-based notify-depth bookkeeping.
pub struct VirtualStore {
    cache: RefCell<SizeCache>,

    viewport_size: f64,
    start_spacer_size: f64,
    end_spacer_size: f64,

    scroll_offset: f64,
    scroll_direction: ScrollDirection,

    jump: f64,
    pending_jump: f64,
    flushed_jump: f64,
    jump_count: u64,

    prepended: bool,
    is_manual_scrolling: bool,
    smooth_scroll_range: Option<Range>,
    prev_range: Cell<Range>,

    is_reverse: bool,
    should_auto_estimate_item_size: bool,
    auto_estimate_done: bool,
    is_ios_webkit: bool,

    subscribers: SubscriberList,
}

impl VirtualStore {
    pub fn new(options: VirtualStoreOptions) -> Self {
        let cache = SizeCache::new(
            options.elements_count,
            options.item_size,
            options.cache.as_ref(),
        );
        let viewport_size = options.initial_item_count as f64 * options.item_size;
        vdebug!(
            elements_count = options.elements_count,
            item_size = options.item_size,
            viewport_size,
            "VirtualStore constructed"
        );
        Self {
            cache: RefCell::new(cache),
            viewport_size,
            start_spacer_size: 0.0,
            end_spacer_size: 0.0,
            scroll_offset: 0.0,
            scroll_direction: ScrollDirection::Idle,
            jump: 0.0,
            pending_jump: 0.0,
            flushed_jump: 0.0,
            jump_count: 0,
            prepended: false,
            is_manual_scrolling: false,
            smooth_scroll_range: None,
            prev_range: Cell::new(Range::empty()),
            is_reverse: options.is_reverse,
            should_auto_estimate_item_size: options.should_auto_estimate_item_size,
            auto_estimate_done: false,
            is_ios_webkit: options.is_ios_webkit,
            subscribers: SubscriberList::default(),
        }
    }

    /// Like [`VirtualStore::new`], but rejects a restored snapshot whose length disagrees with
    /// `options.elements_count` instead of trusting it and logging a warning.
    ///
    /// Every other anomaly this crate can encounter is a runtime action, not a construction-time
    /// one, and keeps the silent-clamp/no-op behavior documented on the individual `on_*` action
    /// handlers; this is the one entry point where a caller can opt into observing a malformed
    /// input instead.
    pub fn try_new(options: VirtualStoreOptions) -> Result<Self, StoreError> {
        if let Some(snapshot) = options.cache.as_ref() {
            if snapshot.length != options.elements_count {
                return Err(StoreError::SnapshotLengthMismatch {
                    expected: options.elements_count,
                    found: snapshot.length,
                });
            }
        }
        Ok(Self::new(options))
    }

    // ---- Subscription model -------------------------------------------------------------------

    pub fn subscribe(&mut self, interest: u8, callback: Subscriber) -> SubscriptionId {
        self.subscribers.subscribe(interest, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ---- Scroller/Resizer Contract: dispatch -------------------------------------------------

    pub fn dispatch(&mut self, action: Action) {
        vtrace!(?action, "dispatch");
        match action {
            Action::ItemResize(updates) => self.on_item_resize(updates),
            Action::ViewportResize {
                viewport_size,
                start_spacer_size,
                end_spacer_size,
            } => self.on_viewport_resize(viewport_size, start_spacer_size, end_spacer_size),
            Action::ItemsLengthChange {
                new_length,
                is_shift,
            } => self.on_items_length_change(new_length, is_shift),
            Action::Scroll(offset) => self.on_scroll(offset),
            Action::ScrollEnd => self.on_scroll_end(),
            Action::ManualScroll => self.on_manual_scroll(),
            Action::BeforeManualSmoothScroll(target) => {
                self.on_before_manual_smooth_scroll(target)
            }
        }
    }

    /// Convenience wrapper: `dispatch(Action::ItemResize(updates))`.
    pub fn submit_item_resize(&mut self, updates: Vec<(usize, f64)>) {
        self.dispatch(Action::ItemResize(updates));
    }

    /// Convenience wrapper: `dispatch(Action::ViewportResize { .. })`.
    pub fn submit_viewport_resize(
        &mut self,
        viewport_size: f64,
        start_spacer_size: f64,
        end_spacer_size: f64,
    ) {
        self.dispatch(Action::ViewportResize {
            viewport_size,
            start_spacer_size,
            end_spacer_size,
        });
    }

    /// Convenience wrapper: `dispatch(Action::ItemsLengthChange { .. })`.
    pub fn submit_length_change(&mut self, new_length: usize, is_shift: bool) {
        self.dispatch(Action::ItemsLengthChange {
            new_length,
            is_shift,
        });
    }

    /// Convenience wrapper: `dispatch(Action::Scroll(offset))`.
    pub fn submit_scroll(&mut self, offset: f64) {
        self.dispatch(Action::Scroll(offset));
    }

    /// Convenience wrapper: `dispatch(Action::ScrollEnd)`.
    pub fn signal_scroll_end(&mut self) {
        self.dispatch(Action::ScrollEnd);
    }

    /// Convenience wrapper: `dispatch(Action::ManualScroll)`.
    pub fn signal_manual_scroll(&mut self) {
        self.dispatch(Action::ManualScroll);
    }

    /// Convenience wrapper: `dispatch(Action::BeforeManualSmoothScroll(target))`.
    pub fn signal_before_manual_smooth_scroll(&mut self, target_offset: f64) {
        self.dispatch(Action::BeforeManualSmoothScroll(target_offset));
    }

    // ---- Action handlers -----------------------------------------------------------------------

    fn on_item_resize(&mut self, updates: Vec<(usize, f64)>) {
        if updates.is_empty() {
            return;
        }

        let diff = self.calculate_resize_diff(&updates);
        if diff != 0.0 {
            self.schedule_jump(diff);
        }

        let mut any_new = false;
        {
            let mut cache = self.cache.borrow_mut();
            for (index, size) in &updates {
                if cache.set_item_size(*index, *size) {
                    any_new = true;
                }
            }
        }

        if self.should_auto_estimate_item_size
            && !self.auto_estimate_done
            && any_new
            && self.scroll_offset == 0.0
        {
            self.cache.borrow_mut().estimate_default_item_size();
            self.auto_estimate_done = true;
        }

        self.prepended = false;
        self.notify(interest::UPDATE_SIZE_STATE, true);
    }

    /// `calculateJump`: decides which of the resized indices should count towards a jump, and by
    /// how much, depending on where the user is currently anchored.
    fn calculate_resize_diff(&self, updates: &[(usize, f64)]) -> f64 {
        let max_scroll = self.max_scroll_offset();
        let cache = self.cache.borrow();

        if self.scroll_offset == 0.0 {
            return 0.0;
        }
        if self.scroll_offset > max_scroll - SUBPIXEL_THRESHOLD {
            return updates
                .iter()
                .map(|&(i, size)| (size - cache.get_item_size(i)).max(0.0))
                .sum();
        }
        if self.prepended {
            return updates
                .iter()
                .map(|&(i, size)| size - cache.get_item_size(i))
                .sum();
        }
        let start = self.prev_range.get().start;
        updates
            .iter()
            .filter(|&&(i, _)| i < start)
            .map(|&(i, size)| size - cache.get_item_size(i))
            .sum()
    }

    fn on_viewport_resize(
        &mut self,
        viewport_size: f64,
        start_spacer_size: f64,
        end_spacer_size: f64,
    ) {
        if viewport_size == self.viewport_size
            && start_spacer_size == self.start_spacer_size
            && end_spacer_size == self.end_spacer_size
        {
            return;
        }
        self.viewport_size = viewport_size;
        self.start_spacer_size = start_spacer_size;
        self.end_spacer_size = end_spacer_size;
        self.notify(interest::UPDATE_SIZE_STATE, false);
    }

    fn on_items_length_change(&mut self, new_length: usize, is_shift: bool) {
        if new_length == self.cache.borrow().length() {
            return;
        }
        if is_shift {
            let distance_to_end = self.max_scroll_offset() - self.scroll_offset;
            let (shift, is_remove) = self.cache.borrow_mut().update_length(new_length, true);
            if is_remove {
                self.schedule_jump(-shift.min(distance_to_end));
            } else {
                self.schedule_jump(shift);
            }
            self.prepended = !is_remove;
            self.notify(interest::UPDATE_SCROLL_STATE, false);
        } else {
            self.cache.borrow_mut().update_length(new_length, false);
            self.notify(interest::UPDATE_SIZE_STATE, false);
        }
    }

    fn on_scroll(&mut self, payload: f64) {
        let next = payload.clamp(0.0, self.max_scroll_offset().max(0.0));
        let flushed = self.flushed_jump;
        self.flushed_jump = 0.0;

        if next == self.scroll_offset {
            return;
        }

        let delta = next - self.scroll_offset;
        let distance = delta.abs();
        let is_just_jumped = flushed != 0.0 && distance < flushed.abs() + 1.0;

        if !is_just_jumped && !self.is_manual_scrolling {
            self.scroll_direction = if delta < 0.0 {
                ScrollDirection::Up
            } else {
                ScrollDirection::Down
            };
        }

        let should_sync = distance > self.viewport_size;
        self.scroll_offset = next;

        let mut mutated = interest::UPDATE_SCROLL_STATE;
        if !is_just_jumped {
            mutated |= interest::UPDATE_SCROLL_WITH_EVENT;
        }
        self.notify(mutated, should_sync);
    }

    fn on_scroll_end(&mut self) {
        let was_scrolling = self.scroll_direction != ScrollDirection::Idle;
        self.scroll_direction = ScrollDirection::Idle;
        if was_scrolling && self.pending_jump != 0.0 {
            let pending = self.pending_jump;
            self.pending_jump = 0.0;
            self.apply_jump(pending);
        }
        self.is_manual_scrolling = false;
        self.smooth_scroll_range = None;
        self.notify(interest::UPDATE_SCROLL_STATE, false);
    }

    fn on_manual_scroll(&mut self) {
        self.is_manual_scrolling = true;
    }

    fn on_before_manual_smooth_scroll(&mut self, target_offset: f64) {
        let target = target_offset.clamp(0.0, self.max_scroll_offset().max(0.0));
        let seed = self.prev_range.get().start;
        let range = self
            .cache
            .borrow_mut()
            .compute_range(target, seed, self.viewport_size);
        self.smooth_scroll_range = Some(range);
        self.notify(interest::UPDATE_SCROLL_STATE, false);
    }

    // ---- Jump compensation protocol -----------------------------------------------------------

    fn apply_jump(&mut self, diff: f64) {
        if diff == 0.0 {
            return;
        }
        self.jump += diff;
        self.jump_count += 1;
        vdebug!(
            diff,
            jump = self.jump,
            jump_count = self.jump_count,
            "jump applied"
        );
    }

    /// Routes a scroll-position correction either straight to `jump` or, on iOS WebKit while a
    /// scroll is in progress, to `pendingJump` (folded into `jump` on SCROLL_END instead, so the
    /// write does not cancel the platform's momentum scroll).
    fn schedule_jump(&mut self, diff: f64) {
        if diff == 0.0 {
            return;
        }
        if self.is_ios_webkit && self.scroll_direction != ScrollDirection::Idle {
            self.pending_jump += diff;
            vdebug!(
                diff,
                pending_jump = self.pending_jump,
                "jump deferred (iOS WebKit mid-scroll)"
            );
        } else {
            self.apply_jump(diff);
        }
    }

    /// Reads and clears the ready-to-deliver jump. Dropped (returns 0) if the viewport is at
    /// least as large as the total content, since no scroll can occur in that case.
    pub fn flush_jump(&mut self) -> f64 {
        if self.viewport_size >= self.cache.borrow_mut().compute_total_size() {
            self.jump = 0.0;
            return 0.0;
        }
        let flushed = self.jump;
        self.flushed_jump = flushed;
        self.jump = 0.0;
        flushed
    }

    pub fn jump_count(&self) -> u64 {
        self.jump_count
    }

    fn notify(&self, mutated: u8, sync: bool) {
        self.subscribers.notify(self, mutated, sync);
    }

    // ---- Public query surface ------------------------------------------------------------------

    /// Inclusive `[start, end]` range to materialize, widened by `overscan` items on each side.
    ///
    /// During a smooth programmatic scroll, returns `union(prevRange, smoothScrollRange)` so
    /// items are not unmounted mid-animation. While a `flushedJump` has not yet been consumed by a
    /// matching SCROLL, returns the last memoized range unchanged, to avoid a flicker before the
    /// compensation completes.
    pub fn get_range(&self, overscan: usize) -> Range {
        if self.flushed_jump != 0.0 {
            return self.prev_range.get();
        }
        let seed = self.prev_range.get().start;
        let base = self
            .cache
            .borrow_mut()
            .compute_range(self.scroll_offset, seed, self.viewport_size);
        self.prev_range.set(base);

        let length = self.cache.borrow().length();
        let widened = if base.is_empty() {
            base
        } else {
            Range {
                start: base.start.saturating_sub(overscan),
                end: (base.end + overscan).min(length.saturating_sub(1)),
            }
        };

        match self.smooth_scroll_range {
            Some(smooth) => widened.union(smooth),
            None => widened,
        }
    }

    /// Offset at which item `i` should be laid out: `computeOffset(i) − pendingJump`, plus a
    /// reverse-mode adjustment so items hug the bottom when content is shorter than the viewport.
    pub fn get_item_offset(&self, i: usize) -> f64 {
        let mut cache = self.cache.borrow_mut();
        let mut offset = cache.compute_offset(i) - self.pending_jump;
        if self.is_reverse {
            offset += (self.viewport_size - cache.compute_total_size()).max(0.0);
        }
        offset
    }

    pub fn get_item_size(&self, i: usize) -> f64 {
        self.cache.borrow().get_item_size(i)
    }

    pub fn get_items_length(&self) -> usize {
        self.cache.borrow().length()
    }

    pub fn is_unmeasured_item(&self, i: usize) -> bool {
        self.cache.borrow().is_unmeasured(i)
    }

    pub fn has_unmeasured_items_in_smooth_scroll_range(&self) -> bool {
        let Some(range) = self.smooth_scroll_range else {
            return false;
        };
        let cache = self.cache.borrow();
        if cache.length() == 0 {
            return false;
        }
        let lo = range.start.saturating_sub(1);
        let hi = (range.end + 1).min(cache.length() - 1);
        (lo..=hi).any(|i| cache.is_unmeasured(i))
    }

    pub fn get_scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn get_max_scroll_offset(&self) -> f64 {
        self.max_scroll_offset()
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.cache.borrow_mut().compute_total_size() - self.viewport_size).max(0.0)
    }

    pub fn get_scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    pub fn get_viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn get_start_spacer_size(&self) -> f64 {
        self.start_spacer_size
    }

    pub fn get_scroll_size(&self) -> f64 {
        self.get_total_size()
            .max(self.viewport_size - self.start_spacer_size - self.end_spacer_size)
    }

    pub fn get_total_size(&self) -> f64 {
        self.cache.borrow_mut().compute_total_size()
    }

    pub fn get_cache(&self) -> CacheSnapshot {
        self.cache.borrow_mut().snapshot()
    }
}

impl core::fmt::Debug for VirtualStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualStore")
            .field("viewport_size", &self.viewport_size)
            .field("scroll_offset", &self.scroll_offset)
            .field("scroll_direction", &self.scroll_direction)
            .field("jump", &self.jump)
            .field("pending_jump", &self.pending_jump)
            .field("flushed_jump", &self.flushed_jump)
            .field("jump_count", &self.jump_count)
            .field("prepended", &self.prepended)
            .field("is_manual_scrolling", &self.is_manual_scrolling)
            .field("items_length", &self.cache.borrow().length())
            .finish_non_exhaustive()
    }
}
