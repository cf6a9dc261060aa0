use std::vec::Vec;

use virtualizer::{VirtualStore, VirtualStoreOptions};

use crate::{Driver, ItemSizeSource, NullScrollContainer};

struct FixedSizes(Vec<(usize, f64)>);

impl ItemSizeSource for FixedSizes {
    fn measured_size(&self, index: usize) -> Option<f64> {
        self.0
            .iter()
            .find(|&&(i, _)| i == index)
            .map(|&(_, size)| size)
    }
}

fn driver(length: usize, item_size: f64, viewport_size: f64) -> Driver<NullScrollContainer, FixedSizes> {
    let store = VirtualStore::new(VirtualStoreOptions::new(length, item_size));
    let container = NullScrollContainer::new(viewport_size);
    Driver::new(store, container, FixedSizes(Vec::new()))
}

#[test]
fn first_tick_syncs_viewport_size_into_store() {
    let mut drv = driver(100, 40.0, 300.0);
    assert_eq!(drv.store().get_viewport_size(), 0.0);
    drv.tick();
    assert_eq!(drv.store().get_viewport_size(), 300.0);
}

#[test]
fn tick_feeds_container_scroll_offset_into_store() {
    let mut drv = driver(100, 40.0, 300.0);
    drv.container_mut().set_scroll_offset(120.0);
    drv.tick();
    assert_eq!(drv.store().get_scroll_offset(), 120.0);
}

#[test]
fn tick_signals_scroll_end_once_container_is_quiescent() {
    let mut drv = driver(100, 40.0, 300.0).with_idle_ticks_threshold(2);
    drv.container_mut().set_scroll_offset(120.0);
    drv.tick();
    assert_ne!(drv.store().get_scroll_direction(), virtualizer::ScrollDirection::Idle);

    drv.tick(); // idle tick 1
    assert_ne!(drv.store().get_scroll_direction(), virtualizer::ScrollDirection::Idle);

    drv.tick(); // idle tick 2: threshold reached, ScrollEnd signaled
    assert_eq!(drv.store().get_scroll_direction(), virtualizer::ScrollDirection::Idle);
}

#[test]
fn tick_applies_measured_sizes_for_the_visible_range() {
    let store = VirtualStore::new(VirtualStoreOptions::new(100, 40.0));
    let container = NullScrollContainer::new(300.0);
    let sizes = FixedSizes(vec![(0, 80.0), (1, 20.0)]);
    let mut drv = Driver::new(store, container, sizes);
    drv.tick();
    assert_eq!(drv.store().get_item_size(0), 80.0);
    assert_eq!(drv.store().get_item_size(1), 20.0);
}

#[test]
fn tick_writes_jump_correction_back_to_container() {
    let store = VirtualStore::new(VirtualStoreOptions::new(10, 40.0));
    let mut container = NullScrollContainer::new(100.0);
    container.set_scroll_offset(300.0); // at the bottom edge
    let sizes = FixedSizes(vec![(9, 200.0)]);
    let mut drv = Driver::new(store, container, sizes);

    drv.tick(); // syncs viewport (100), polls scroll (300), resizes item 9, flushes jump

    assert!(
        drv.container().scroll_offset() > 300.0,
        "a bottom-anchored resize must push the scroll position forward"
    );
}

#[test]
fn into_parts_returns_the_owned_components() {
    let drv = driver(10, 40.0, 100.0);
    let (store, container, _sizes) = drv.into_parts();
    assert_eq!(store.get_items_length(), 10);
    assert_eq!(container.viewport_size(), 100.0);
}
