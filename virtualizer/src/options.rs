use crate::size_cache::CacheSnapshot;

/// Configuration accepted when constructing a [`crate::VirtualStore`].
///
/// Mirrors the source engine's builder-style options: plain data fields plus `with_*` consuming
/// builders, so adapters can assemble configuration fluently without fighting ownership.
#[derive(Clone, Debug)]
pub struct VirtualStoreOptions {
    pub elements_count: usize,
    pub item_size: f64,
    pub initial_item_count: usize,
    pub cache: Option<CacheSnapshot>,
    pub is_reverse: bool,
    pub should_auto_estimate_item_size: bool,
    /// Whether the host platform is iOS WebKit (cancels momentum scroll on a scroll-position
    /// write mid-scroll). Feature-tested by the adapter layer, not by this crate; defaults to
    /// `false` so `no_std`/non-browser hosts are unaffected.
    pub is_ios_webkit: bool,
}

impl VirtualStoreOptions {
    /// `item_size` seeds `defaultSize`; must be positive for sane layout math.
    pub fn new(elements_count: usize, item_size: f64) -> Self {
        Self {
            elements_count,
            item_size,
            initial_item_count: 0,
            cache: None,
            is_reverse: false,
            should_auto_estimate_item_size: true,
            is_ios_webkit: false,
        }
    }

    pub fn with_initial_item_count(mut self, initial_item_count: usize) -> Self {
        self.initial_item_count = initial_item_count;
        self
    }

    pub fn with_cache(mut self, cache: CacheSnapshot) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_reverse(mut self, is_reverse: bool) -> Self {
        self.is_reverse = is_reverse;
        self
    }

    pub fn with_auto_estimate_item_size(mut self, enabled: bool) -> Self {
        self.should_auto_estimate_item_size = enabled;
        self
    }

    pub fn with_ios_webkit(mut self, is_ios_webkit: bool) -> Self {
        self.is_ios_webkit = is_ios_webkit;
        self
    }
}
