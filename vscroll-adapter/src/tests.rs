use crate::*;

use alloc::string::String;
use alloc::vec::Vec;
use std::collections::HashSet;

use proptest::prelude::*;
use vscroll::{Align, ListOptions, ListVirtualizer, Rect};

type Feed = VirtualList<u64, u64, String, ManualScheduler, ObservedKeys<u64>>;

fn feed(n: u64, estimated_size: u32) -> (Vec<u64>, Feed) {
    let items: Vec<u64> = (0..n).collect();
    let config = ListConfig::new(|id: &u64| *id, |id: &u64, i: usize| {
        alloc::format!("row {i} ({id})")
    })
    .with_estimated_size(estimated_size)
    .with_class_name("feed")
    .with_aria_label("Signals");
    let list = VirtualList::create(config, &items, ManualScheduler::new(), ObservedKeys::new());
    (items, list)
}

fn scheduler(list: &mut Feed) -> &mut ManualScheduler {
    list.controller_mut().scheduler_mut()
}

#[test]
fn events_are_ignored_until_attached() {
    let (_, mut list) = feed(100, 50);
    assert!(!list.on_scroll(500, 200));
    assert!(!list.on_resize(Rect::new(200, 300)));
    assert!(!list.report_item_size(3, 80));
    assert!(!list.tick());
    assert_eq!(list.after_paint(), None);
    assert_eq!(list.scroll_to_index(10, Align::Start), None);
    assert_eq!(list.controller().scheduler().pending_tick(), None);
    assert_eq!(list.virtualizer().scroll_offset(), 0);
}

#[test]
fn first_paint_before_layout_renders_overscan_only() {
    let (items, mut list) = feed(10_000, 100);
    let pass = list.render(&items);
    assert_eq!(pass.items.len(), 4);
    assert_eq!(pass.total_extent, 1_000_000);
    assert_eq!(pass.class_name, "feed");
    assert_eq!(pass.aria_label, "Signals");
    assert_eq!(pass.items[1].view, "row 1 (1)");
}

#[test]
fn debounced_scroll_renders_expected_window() {
    let (items, mut list) = feed(10_000, 100);
    assert!(list.attach(Rect::new(800, 400)));

    assert!(list.on_scroll(5_000, 800));
    assert!(list.is_scrolling());
    assert_eq!(list.controller().scheduler().pending_tick(), Some(16));

    scheduler(&mut list).advance(10);
    assert!(list.on_scroll(5_000, 800));
    assert!(!list.tick());
    assert_eq!(list.virtualizer().scroll_offset(), 0);

    scheduler(&mut list).advance(6);
    assert!(list.tick());
    assert!(!list.is_scrolling());

    let pass = list.render(&items);
    assert_eq!(pass.scroll_offset, 5_000);
    assert_eq!(pass.items.len(), 15);
    assert_eq!(pass.items[0].index, 47);
    assert_eq!(pass.items[0].offset, 4_700);
    assert_eq!(pass.items[0].extent, 100);
    assert_eq!(pass.total_extent, 1_000_000);
}

#[test]
fn continuous_scroll_updates_once_per_window() {
    let (_, mut list) = feed(10_000, 100);
    list.attach(Rect::new(800, 400));

    let mut applied = Vec::new();
    for step in 0..8u64 {
        let now = step * 5;
        scheduler(&mut list).set_now(now);
        list.on_scroll(now * 10, 800);
        if scheduler(&mut list).take_due_tick() && list.tick() {
            applied.push(list.virtualizer().scroll_offset());
        }
    }
    scheduler(&mut list).set_now(41);
    if scheduler(&mut list).take_due_tick() && list.tick() {
        applied.push(list.virtualizer().scroll_offset());
    }
    assert_eq!(applied, alloc::vec![200, 350]);
}

#[test]
fn measurements_are_written_after_paint() {
    let (_, mut list) = feed(100, 50);
    list.attach(Rect::new(200, 400));
    list.on_scroll(1_000, 200);
    list.flush();

    assert!(list.report_item_size(5, 80));
    assert!(list.controller().scheduler().after_paint_requested());
    assert_eq!(list.virtualizer().item_size(5), Some(50));

    assert_eq!(list.after_paint(), Some(30));
    assert_eq!(list.virtualizer().scroll_offset(), 1_030);
    assert_eq!(list.virtualizer().item_size(5), Some(80));
    assert_eq!(list.after_paint(), None);
}

#[test]
fn correction_shifts_pending_scroll() {
    let (_, mut list) = feed(100, 50);
    list.attach(Rect::new(200, 400));
    list.on_scroll(1_000, 200);
    list.flush();

    list.on_scroll(1_100, 200);
    list.report_item_size(3, 60);
    assert_eq!(list.after_paint(), Some(10));
    assert_eq!(list.virtualizer().scroll_offset(), 1_010);

    list.flush();
    assert_eq!(list.virtualizer().scroll_offset(), 1_110);
}

#[test]
fn scroll_to_index_cancels_pending_scroll() {
    let (_, mut list) = feed(10_000, 100);
    list.attach(Rect::new(800, 400));
    list.on_scroll(3_000, 800);

    assert_eq!(list.scroll_to_index(0, Align::Start), Some(0));
    assert!(!list.is_scrolling());
    scheduler(&mut list).advance(100);
    assert!(!list.tick());
    assert_eq!(list.virtualizer().scroll_offset(), 0);

    assert_eq!(list.scroll_to_index(50, Align::Center), Some(4_650));
    assert_eq!(list.scroll_to_index(20_000, Align::End), Some(999_200));
}

#[test]
fn detach_drops_pending_updates() {
    let (_, mut list) = feed(100, 50);
    list.attach(Rect::new(200, 400));
    list.on_scroll(700, 200);
    list.detach();
    scheduler(&mut list).advance(50);
    assert!(!list.tick());
    assert!(!list.on_scroll(900, 200));

    assert!(list.attach(Rect::new(200, 400)));
    list.on_scroll(900, 200);
    assert!(list.flush());
    assert_eq!(list.virtualizer().scroll_offset(), 900);
}

#[test]
fn rendered_keys_are_observed_and_released() {
    let (items, mut list) = feed(1_000, 100);
    list.render(&items);
    assert_eq!(list.controller().provider().len(), 4);
    assert!(list.controller().provider().contains(&0));

    list.attach(Rect::new(800, 400));
    list.on_scroll(5_000, 800);
    list.flush();
    list.render(&items);
    let observed = list.controller().provider();
    assert_eq!(observed.len(), 15);
    assert!(!observed.contains(&0));
    assert!(observed.contains(&47));
    assert_eq!(list.virtualizer().size_store().len(), 19);

    list.dispose();
    assert!(list.controller().provider().is_empty());
    assert!(list.is_disposed());
    assert!(!list.attach(Rect::new(800, 400)));
    list.dispose();
}

#[test]
fn dropping_the_controller_unobserves_everything() {
    let mut observed = ObservedKeys::<u32>::new();
    {
        let engine = ListVirtualizer::with_keys(ListOptions::new(10), 0..100u32);
        let mut c = ScrollController::new(engine, ManualScheduler::new(), &mut observed);
        c.sync_rendered([1, 2, 3]);
        assert_eq!(c.observed_len(), 3);
        c.sync_rendered([2, 3, 4]);
        assert_eq!(c.observed_len(), 3);
    }
    assert!(observed.is_empty());
}

#[test]
fn duplicate_keys_render_once() {
    let items = alloc::vec![1u64, 2, 2, 3];
    let config = ListConfig::new(|id: &u64| *id, |id: &u64, _| *id);
    let mut list = VirtualList::create(config, &items, ManualScheduler::new(), NoopMeasurement);
    let pass = list.render(&items);
    let indexes: Vec<usize> = pass.items.iter().map(|p| p.index).collect();
    assert_eq!(indexes, alloc::vec![0, 1, 3]);
}

#[test]
fn render_resyncs_when_items_change_length() {
    let (items, mut list) = feed(100, 10);
    list.attach(Rect::new(50, 400));
    list.on_scroll(900, 50);
    list.flush();

    let shorter = &items[..20];
    let pass = list.render(shorter);
    assert_eq!(list.virtualizer().count(), 20);
    assert!(pass.items.iter().all(|p| p.index < 20));
    assert_eq!(pass.total_extent, 200);
}

#[test]
fn render_after_reorder_keeps_extents_with_keys() {
    let (items, mut list) = feed(10, 10);
    list.attach(Rect::new(400, 400));
    list.report_item_size(0, 100);
    list.after_paint();

    let reversed: Vec<u64> = items.iter().rev().copied().collect();
    let pass = list.render(&reversed);
    assert_eq!(pass.items.len(), 10);
    assert_eq!(pass.total_extent, 190);
    let first = &pass.items[0];
    assert_eq!((first.key, first.index, first.offset, first.extent), (9, 0, 0, 10));
    let last = &pass.items[9];
    assert_eq!((last.key, last.index, last.offset, last.extent), (0, 9, 90, 100));
    assert_eq!(list.virtualizer().index_of_key(&0), Some(9));

    // later reports land on the key's new index
    list.report_item_size(9, 30);
    list.after_paint();
    let pass = list.render(&reversed);
    assert_eq!(pass.items[0].extent, 30);
    assert_eq!(pass.items[9].offset, 110);
}

#[test]
fn grid_drops_row_reports_queued_before_a_relayout() {
    let items: Vec<u32> = (0..30).collect();
    let config = GridConfig::new(|id: &u32| *id, |id: &u32, _: usize| *id)
        .with_estimated_row_height(50);
    let mut grid = VirtualGrid::create(config, &items, ManualScheduler::new(), NoopMeasurement);
    grid.attach(Rect::new(100, 1_024));

    assert!(grid.report_row_size(1, 90));
    grid.on_resize(Rect::new(100, 800));
    assert!(grid.flush());
    assert_eq!(grid.virtualizer().columns(), 2);
    assert_eq!(grid.after_paint(), None);
    assert_eq!(grid.virtualizer().measured_row_count(), 0);
    assert_eq!(grid.virtualizer().total_extent(), 750);

    // same length, different order
    let mut swapped = items.clone();
    swapped.swap(0, 29);
    assert!(grid.report_row_size(0, 80));
    let pass = grid.render(&swapped);
    assert_eq!(grid.virtualizer().key_for(0), Some(&29));
    assert_eq!(pass.rows[0].cells[0].key, 29);
    assert_eq!(grid.after_paint(), None);
    assert_eq!(grid.virtualizer().measured_row_count(), 0);
}

#[test]
fn stale_window_skips_out_of_bounds_indexes() {
    let v = ListVirtualizer::with_keys(ListOptions::new(10).with_overscan(2), 0..10u32);
    let mut renderer: ListRenderer<u32, u32, u32> = ListRenderer::new(
        alloc::sync::Arc::new(|id: &u32| *id),
        alloc::sync::Arc::new(|id: &u32, _: usize| *id),
        RegionProps::default(),
    );
    let pass = renderer.pass(&[0, 1], &v);
    assert_eq!(pass.items.len(), 2);
}

#[test]
fn grid_handle_renders_rows_and_relayouts() {
    let items: Vec<u32> = (0..30).collect();
    let config = GridConfig::new(|id: &u32| *id, |id: &u32, _: usize| *id)
        .with_estimated_row_height(50)
        .with_overscan(1);
    let mut grid = VirtualGrid::create(config, &items, ManualScheduler::new(), NoopMeasurement);
    assert!(grid.attach(Rect::new(100, 1_024)));

    let pass = grid.render(&items);
    assert_eq!(pass.columns, 3);
    assert_eq!(pass.total_extent, 500);
    assert_eq!(pass.rows.len(), 4);
    assert_eq!(pass.rows[1].offset, 50);
    assert_eq!(pass.rows[1].cells[2].column, 2);
    assert_eq!(pass.rows[1].cells[2].index, 5);
    assert_eq!(pass.rows[3].cells[0].key, 9);

    assert!(grid.report_row_size(0, 80));
    assert_eq!(grid.after_paint(), None);
    assert_eq!(grid.virtualizer().total_extent(), 530);

    grid.on_resize(Rect::new(100, 800));
    assert!(grid.flush());
    assert_eq!(grid.virtualizer().columns(), 2);
    assert_eq!(grid.virtualizer().measured_row_count(), 0);
    assert_eq!(grid.virtualizer().total_extent(), 750);

    assert_eq!(grid.scroll_to_index(7, Align::Start), Some(150));
    grid.dispose();
    assert!(!grid.on_scroll(0, 100));
}

proptest! {
    #[test]
    fn passes_never_repeat_keys(
        keys in proptest::collection::vec(0u8..20, 0..120),
        scroll in 0u64..2_000,
        extent in 0u32..400,
    ) {
        let config = ListConfig::new(|k: &u8| *k, |k: &u8, _: usize| *k)
            .with_estimated_size(10);
        let mut list = VirtualList::create(config, &keys, ManualScheduler::new(), NoopMeasurement);
        list.attach(Rect::new(extent, 300));
        list.on_scroll(scroll, extent);
        list.flush();

        let pass = list.render(&keys);
        let mut seen = HashSet::new();
        for p in &pass.items {
            prop_assert!(seen.insert(p.key));
            prop_assert!(p.index < keys.len());
        }
        prop_assert!(pass.items.windows(2).all(|w| w[0].index < w[1].index));
        prop_assert_eq!(list.render(&keys), pass);
    }
}
