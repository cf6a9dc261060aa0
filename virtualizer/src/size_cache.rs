use alloc::vec;
use alloc::vec::Vec;

/// Sentinel value used in [`CacheSnapshot`] to mark an UNCACHED slot (serializable form of
/// `sizes[i]`/`offsets[i]` being unknown). Never a valid size or offset.
pub const UNCACHED_SENTINEL: f64 = -1.0;

/// A deep-copied, serializable snapshot of a [`SizeCache`].
///
/// Producers must not rely on `offsets`: consumers may ignore them and recompute lazily. Only
/// `sizes`, `default_size` and `length` are authoritative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheSnapshot {
    pub sizes: Vec<f64>,
    pub offsets: Vec<f64>,
    pub default_size: f64,
    pub length: usize,
}

/// Per-item sizes plus a lazily-computed, lazily-invalidated prefix-sum cache.
///
/// `sizes[i]` is `None` (UNCACHED) until the renderer reports a measurement. `offsets[i]` caches
/// the prefix sum of `sizes[0..i)` using `effective_size` for any still-UNCACHED slot; a write to
/// `sizes[i]` invalidates every cached offset at or above `i + 1`, to be recomputed lazily on next
/// read. This trades a small amount of redundant summation for avoiding a tree structure: forward
/// and backward scroll (the dominant access pattern) stays O(visible) amortized even with plain
/// lazy invalidation.
#[derive(Clone, Debug)]
pub struct SizeCache {
    sizes: Vec<Option<f64>>,
    offsets: Vec<Option<f64>>,
    default_size: f64,
    length: usize,
}

impl SizeCache {
    pub fn new(length: usize, default_size: f64, snapshot: Option<&CacheSnapshot>) -> Self {
        let mut sizes = vec![None; length];
        let mut default_size = default_size;
        if let Some(snap) = snapshot {
            default_size = snap.default_size;
            if snap.length != length {
                vwarn!(
                    snapshot_length = snap.length,
                    length,
                    "SizeCache: snapshot length disagrees with configured length, trusting the caller"
                );
            }
            for (i, &v) in snap.sizes.iter().enumerate().take(length) {
                if v != UNCACHED_SENTINEL {
                    sizes[i] = Some(v);
                }
            }
        }
        let mut offsets = vec![None; length + 1];
        offsets[0] = Some(0.0);
        Self {
            sizes,
            offsets,
            default_size,
            length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn default_size(&self) -> f64 {
        self.default_size
    }

    fn effective_size(&self, i: usize) -> f64 {
        self.sizes[i].unwrap_or(self.default_size)
    }

    /// Measured size if known, else the default size estimate.
    pub fn get_item_size(&self, i: usize) -> f64 {
        self.effective_size(i)
    }

    pub fn is_unmeasured(&self, i: usize) -> bool {
        self.sizes[i].is_none()
    }

    /// Writes `sizes[i]`, invalidating every cached offset above `i`.
    ///
    /// Returns `true` if this is a new measurement (the slot was previously UNCACHED). A write
    /// whose value equals the current effective size is a no-op (not even a "new measurement" is
    /// recorded) and returns `false`, matching the no-op policy for resizes to an unchanged size.
    pub fn set_item_size(&mut self, i: usize, size: f64) -> bool {
        if self.effective_size(i) == size {
            return false;
        }
        let was_uncached = self.sizes[i].is_none();
        self.sizes[i] = Some(size);
        for j in (i + 1)..self.offsets.len() {
            self.offsets[j] = None;
        }
        was_uncached
    }

    /// Lazily computes and caches `offsets[i]` (the prefix sum over `sizes[0..i)`), walking
    /// forward from the nearest lower cached prefix.
    pub fn compute_offset(&mut self, i: usize) -> f64 {
        let i = i.min(self.length);
        if let Some(v) = self.offsets[i] {
            return v;
        }
        let mut j = i;
        while j > 0 && self.offsets[j].is_none() {
            j -= 1;
        }
        let mut acc = self.offsets[j].unwrap_or(0.0);
        for k in j..i {
            acc += self.effective_size(k);
            self.offsets[k + 1] = Some(acc);
        }
        acc
    }

    pub fn compute_total_size(&mut self) -> f64 {
        self.compute_offset(self.length)
    }

    /// Returns the inclusive `[start, end]` index range whose effective offsets intersect
    /// `[scroll_offset, scroll_offset + viewport_size)`, seeded at `prev_start` to avoid a full
    /// search on every call during monotone scroll.
    ///
    /// Returns [`Range::empty`] if there are no items or the viewport has no extent.
    pub fn compute_range(
        &mut self,
        scroll_offset: f64,
        prev_start: usize,
        viewport_size: f64,
    ) -> crate::Range {
        if self.length == 0 || viewport_size <= 0.0 {
            return crate::Range::empty();
        }
        let target_end = scroll_offset + viewport_size;
        let mut start = prev_start.min(self.length - 1);

        while start > 0 && self.compute_offset(start) > scroll_offset {
            start -= 1;
        }
        while start + 1 < self.length && self.compute_offset(start + 1) <= scroll_offset {
            start += 1;
        }

        let mut end = start;
        while end + 1 < self.length && self.compute_offset(end + 1) < target_end {
            end += 1;
        }

        crate::Range { start, end }
    }

    /// Applies a length mutation. `is_shift == true` applies the delta at the start (prepend when
    /// growing, remove-from-head when shrinking); `is_shift == false` applies it at the end
    /// (append when growing, pop-from-tail when shrinking).
    ///
    /// Returns `(shift, is_remove)`: `shift` is the absolute content-size contribution of the
    /// items that were inserted or removed (using effective sizes for removed items, and
    /// `default_size` for freshly inserted UNCACHED ones); `is_remove = new_length < old_length`.
    pub fn update_length(&mut self, new_length: usize, is_shift: bool) -> (f64, bool) {
        let old_length = self.length;
        if new_length == old_length {
            return (0.0, false);
        }
        let is_remove = new_length < old_length;

        if is_shift {
            let shift = if is_remove {
                let removed = old_length - new_length;
                let shift = (0..removed).map(|i| self.effective_size(i)).sum();
                self.sizes.drain(0..removed);
                shift
            } else {
                let added = new_length - old_length;
                let shift = added as f64 * self.default_size;
                let mut new_sizes = Vec::with_capacity(new_length);
                new_sizes.resize(added, None);
                new_sizes.append(&mut self.sizes);
                self.sizes = new_sizes;
                shift
            };
            self.length = new_length;
            self.offsets = vec![None; new_length + 1];
            self.offsets[0] = Some(0.0);
            (shift, is_remove)
        } else if is_remove {
            let shift = (new_length..old_length).map(|i| self.effective_size(i)).sum();
            self.sizes.truncate(new_length);
            self.offsets.truncate(new_length + 1);
            self.length = new_length;
            (shift, true)
        } else {
            let added = new_length - old_length;
            let mut shift = 0.0;
            for _ in 0..added {
                self.sizes.push(None);
                shift += self.default_size;
            }
            self.offsets.resize(new_length + 1, None);
            self.length = new_length;
            (shift, false)
        }
    }

    /// Replaces `default_size` with the average of already-measured sizes and invalidates every
    /// cached prefix sum. No-op if nothing has been measured yet.
    pub fn estimate_default_item_size(&mut self) {
        let mut sum = 0.0;
        let mut count: usize = 0;
        for s in &self.sizes {
            if let Some(v) = s {
                sum += v;
                count += 1;
            }
        }
        if count == 0 {
            return;
        }
        self.default_size = sum / count as f64;
        for o in self.offsets.iter_mut().skip(1) {
            *o = None;
        }
        vdebug!(default_size = self.default_size, count, "re-estimated default item size");
    }

    pub fn snapshot(&mut self) -> CacheSnapshot {
        let sizes = self
            .sizes
            .iter()
            .map(|s| s.unwrap_or(UNCACHED_SENTINEL))
            .collect();
        // Force every offset to materialize so the snapshot is a genuine deep copy, even though
        // consumers are told not to rely on it.
        let _ = self.compute_total_size();
        let offsets = self
            .offsets
            .iter()
            .map(|o| o.unwrap_or(UNCACHED_SENTINEL))
            .collect();
        CacheSnapshot {
            sizes,
            offsets,
            default_size: self.default_size,
            length: self.length,
        }
    }
}
