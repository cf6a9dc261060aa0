/// A scroll container the [`crate::Driver`] can read from and write to.
///
/// Implemented by an adapter's concrete scrolling widget (a DOM element, a terminal viewport, a
/// game UI panel). The driver never assumes pixels vs. rows vs. any other unit; it only requires
/// internal consistency with the sizes reported by [`ItemSizeSource`].
pub trait ScrollContainer {
    fn scroll_offset(&self) -> f64;
    fn set_scroll_offset(&mut self, offset: f64);
    fn viewport_size(&self) -> f64;
}

/// Supplies freshly measured sizes for items the driver currently considers visible.
///
/// Returning `None` for an index means "not measured yet" (the driver leaves the cache's current
/// estimate alone); returning `Some(size)` equal to the cache's current value is harmless since
/// `VirtualStore` treats a same-size write as a no-op.
pub trait ItemSizeSource {
    fn measured_size(&self, index: usize) -> Option<f64>;
}

/// A [`ScrollContainer`] test double that only ever reports what it was told.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullScrollContainer {
    pub scroll_offset: f64,
    pub viewport_size: f64,
}

impl NullScrollContainer {
    pub fn new(viewport_size: f64) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_size,
        }
    }
}

impl ScrollContainer for NullScrollContainer {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    fn viewport_size(&self) -> f64 {
        self.viewport_size
    }
}
