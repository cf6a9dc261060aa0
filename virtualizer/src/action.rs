use alloc::vec::Vec;

/// The complete set of inputs the [`crate::VirtualStore`] reducer accepts.
///
/// Every state transition happens by dispatching one of these; there is no other way to mutate a
/// store. This mirrors a single serializable log of transitions, which makes the reducer trivial
/// to test by replay.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Layout measured these `(index, size)` pairs; may produce a jump.
    ItemResize(Vec<(usize, f64)>),
    /// The viewport's total extent and its two non-scrollable spacer paddings changed.
    ViewportResize {
        viewport_size: f64,
        start_spacer_size: f64,
        end_spacer_size: f64,
    },
    /// The item count changed to `new_length`. `is_shift` selects whether the delta landed at the
    /// start (prepend/remove-from-head) or the end (append/pop).
    ItemsLengthChange { new_length: usize, is_shift: bool },
    /// A scroll event arrived from the container, reporting its current offset.
    Scroll(f64),
    /// The container's quiescence detector fired: scrolling has settled.
    ScrollEnd,
    /// A programmatic scroll is about to begin.
    ManualScroll,
    /// A smooth programmatic scroll is about to begin, targeting this offset.
    BeforeManualSmoothScroll(f64),
}
