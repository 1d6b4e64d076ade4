use crate::*;

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use proptest::prelude::*;

static INITIAL_OFFSET_PROVIDER_CALLED: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn expected_start(sizes: &[u32], gap: u32, index: usize) -> u64 {
    sizes[..index]
        .iter()
        .map(|&s| s as u64 + gap as u64)
        .sum()
}

fn expected_total(sizes: &[u32], gap: u32) -> u64 {
    if sizes.is_empty() {
        return 0;
    }
    sizes.iter().map(|&s| s as u64).sum::<u64>() + (sizes.len() as u64 - 1) * gap as u64
}

fn expected_index_at(sizes: &[u32], gap: u32, offset: u64) -> Option<usize> {
    (0..sizes.len())
        .rev()
        .find(|&i| expected_start(sizes, gap, i) <= offset)
}

fn list(n: u32, estimated_size: u32) -> ListVirtualizer<u32> {
    ListVirtualizer::with_keys(ListOptions::new(estimated_size), 0..n)
}

fn list_with(sizes: &[u32], gap: u32, overscan: usize) -> ListVirtualizer<u32> {
    let options = ListOptions::new(10).with_gap(gap).with_overscan(overscan);
    let mut v = ListVirtualizer::with_keys(options, 0..sizes.len() as u32);
    v.measure_many(sizes.iter().copied().enumerate());
    v
}

fn grid(n: u32, width: u32) -> GridVirtualizer<u32> {
    let options = GridOptions::new(50, ColumnBreakpoints::new(1, 2, 3))
        .with_initial_rect(Some(Rect::new(100, width)));
    GridVirtualizer::with_keys(options, 0..n)
}

#[test]
fn empty_list_has_no_window() {
    let v = list(0, 10);
    assert_eq!(v.window(), Window::EMPTY);
    assert_eq!(v.total_extent(), 0);
    assert_eq!(v.scroll_to_index_offset(5, Align::End), 0);
    let mut seen = 0;
    v.for_each_virtual_item(|_| seen += 1);
    assert_eq!(seen, 0);
}

#[test]
fn window_over_ten_thousand_uniform_items() {
    let mut v = ListVirtualizer::with_keys(ListOptions::new(100).with_overscan(3), 0..10_000u32);
    v.set_viewport_and_scroll(800, 5_000);

    let w = v.window();
    assert_eq!(
        w.visible,
        Some(VirtualRange {
            start_index: 50,
            end_index: 58
        })
    );
    assert_eq!(
        w.rendered,
        Some(VirtualRange {
            start_index: 47,
            end_index: 61
        })
    );
    assert_eq!(w.total_extent, 1_000_000);

    let mut items = Vec::new();
    v.collect_virtual_items(&mut items);
    assert_eq!(items.len(), 15);
    assert_eq!(items[0].index, 47);
    assert_eq!(items[0].start, 4_700);
    assert_eq!(items[14].end(), 6_200);
}

#[test]
fn fuzz_offsets_against_model() {
    let mut rng = Lcg::new(0x5eed_0001);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 80);
        let gap = rng.gen_range_u32(0, 6);
        let sizes: Vec<u32> = (0..n).map(|_| rng.gen_range_u32(1, 120)).collect();
        let v = list_with(&sizes, gap, 2);

        assert_eq!(v.total_extent(), expected_total(&sizes, gap));
        for i in 0..n {
            assert_eq!(v.item_start(i), Some(expected_start(&sizes, gap, i)));
            assert_eq!(v.item_size(i), Some(sizes[i]));
        }
        for _ in 0..10 {
            let offset = rng.gen_range_u64(0, v.total_extent() + 50);
            assert_eq!(
                v.index_at_offset(offset),
                expected_index_at(&sizes, gap, offset)
            );
        }
    }
}

#[test]
fn measuring_above_viewport_keeps_top_item_pinned() {
    let mut v = list(100, 50);
    v.set_viewport_and_scroll(200, 1_000);
    assert_eq!(v.window().visible.map(|r| r.start_index), Some(20));

    assert_eq!(v.measure(5, 80), 30);
    assert_eq!(v.scroll_offset(), 1_030);
    assert_eq!(v.window().visible.map(|r| r.start_index), Some(20));
    assert_eq!(v.total_extent(), 5_030);

    assert_eq!(v.measure(25, 10), 0);
    assert_eq!(v.scroll_offset(), 1_030);

    assert_eq!(v.invalidate(5), -30);
    assert_eq!(v.scroll_offset(), 1_000);
    assert!(!v.is_measured(5));
}

#[test]
fn anchor_correction_can_be_disabled() {
    let options = ListOptions::new(50).with_anchor_correction(false);
    let mut v = ListVirtualizer::with_keys(options, 0..100u32);
    v.set_viewport_and_scroll(200, 1_000);
    assert_eq!(v.measure(5, 80), 0);
    assert_eq!(v.scroll_offset(), 1_000);
    assert_eq!(v.window().visible.map(|r| r.start_index), Some(19));
}

#[test]
fn batched_measurements_apply_one_correction() {
    let mut v = list(100, 50);
    v.set_viewport_and_scroll(200, 1_000);
    let correction = v.measure_many([(1, 60), (2, 40), (3, 75), (40, 10), (500, 99)]);
    assert_eq!(correction, 25);
    assert_eq!(v.scroll_offset(), 1_025);
    assert_eq!(v.measurement_cache_len(), 4);
}

#[test]
fn measurements_follow_keys_across_reorder() {
    let mut v = list(10, 20);
    v.measure_key(3, 45);
    v.measure_key(7, 5);

    v.set_keys((0..10u32).rev());
    let i3 = v.index_of_key(&3).unwrap();
    let i7 = v.index_of_key(&7).unwrap();
    assert_eq!(i3, 6);
    assert_eq!(v.item_size(i3), Some(45));
    assert_eq!(v.item_size(i7), Some(5));
    assert_eq!(v.key_for(0), Some(&9));
    assert_eq!(v.total_extent(), 8 * 20 + 45 + 5);
}

#[test]
fn prepending_items_keeps_anchor_item_in_place() {
    let mut v = list(100, 10);
    v.set_viewport_and_scroll(50, 205);

    let mut keys: Vec<u32> = (1_000..1_010).collect();
    keys.extend(0..100);
    v.set_keys(keys);

    assert_eq!(v.index_of_key(&20), Some(30));
    assert_eq!(v.scroll_offset(), 305);
    assert_eq!(v.window().visible.map(|r| r.start_index), Some(30));
}

#[test]
fn removed_anchor_leaves_offset_alone() {
    let mut v = list(100, 10);
    v.set_viewport_and_scroll(50, 200);
    let anchor = v.capture_anchor().unwrap();
    assert_eq!(anchor.key, 20);

    v.set_keys((0..100u32).filter(|&k| k != 20));
    assert!(!v.apply_anchor(&anchor));
}

#[test]
fn scroll_to_index_alignments() {
    let mut v = ListVirtualizer::with_keys(ListOptions::new(100), 0..10_000u32);
    v.set_viewport_extent(800);

    assert_eq!(v.scroll_to_index_offset(50, Align::Start), 5_000);
    assert_eq!(v.scroll_to_index_offset(50, Align::End), 4_300);
    assert_eq!(v.scroll_to_index_offset(50, Align::Center), 4_650);
    assert_eq!(v.scroll_to_index_offset(9_999, Align::Start), 999_200);
    assert_eq!(v.scroll_to_index_offset(50_000, Align::Start), 999_200);

    v.set_scroll_offset(4_950);
    assert_eq!(v.scroll_to_index_offset(52, Align::Auto), 4_950);
    assert_eq!(v.scroll_to_index_offset(49, Align::Auto), 4_900);
    assert_eq!(v.scroll_to_index_offset(60, Align::Auto), 5_300);

    assert_eq!(v.scroll_to_index(50, Align::Start), 5_000);
    assert_eq!(v.scroll_offset(), 5_000);
}

#[test]
fn scroll_to_first_item_is_always_zero() {
    let mut v = list(500, 30);
    v.set_viewport_and_scroll(300, 7_000);
    v.measure_many((0..20).map(|i| (i, 17 + i as u32)));
    for align in [Align::Start, Align::Center, Align::End, Align::Auto] {
        assert_eq!(v.scroll_to_index_offset(0, align), 0);
    }
}

#[test]
fn initial_offset_provider_is_read_on_construction() {
    INITIAL_OFFSET_PROVIDER_CALLED.store(0, Ordering::Relaxed);
    let options = ListOptions::new(10).with_initial_offset_provider(|| {
        INITIAL_OFFSET_PROVIDER_CALLED.fetch_add(1, Ordering::Relaxed);
        42
    });
    let v = ListVirtualizer::<u32>::new(options);
    assert_eq!(v.scroll_offset(), 42);
    assert_eq!(INITIAL_OFFSET_PROVIDER_CALLED.load(Ordering::Relaxed), 1);
}

#[test]
fn measurement_cache_export_import() {
    let mut v = list(20, 10);
    v.touch(0);
    v.measure(2, 33);
    v.measure(4, 44);
    let mut snapshot = v.export_measurement_cache();
    snapshot.sort();
    assert_eq!(snapshot, alloc::vec![(2, 33), (4, 44)]);

    let mut restored = list(20, 10);
    restored.import_measurement_cache(snapshot);
    assert_eq!(restored.item_size(2), Some(33));
    assert_eq!(restored.item_size(4), Some(44));
    assert_eq!(restored.total_extent(), v.total_extent());

    restored.reset_measurements();
    assert_eq!(restored.total_extent(), 200);
}

#[test]
fn evict_stale_drops_departed_keys() {
    let mut v = list(10, 10);
    v.measure_many((0..10).map(|i| (i, 15)));
    v.set_keys(0..4u32);
    assert_eq!(v.size_store().len(), 10);
    v.evict_stale();
    assert_eq!(v.size_store().len(), 4);
    assert_eq!(v.measurement_cache_len(), 4);
}

#[test]
fn gap_and_estimate_changes_rebuild_offsets() {
    let mut v = list(5, 10);
    v.measure(0, 30);
    v.set_gap(2);
    assert_eq!(v.total_extent(), 30 + 4 * 10 + 4 * 2);
    v.set_estimated_size(20);
    assert_eq!(v.total_extent(), 30 + 4 * 20 + 4 * 2);
    assert_eq!(v.item_size(0), Some(30));
}

#[test]
fn options_validation() {
    assert_eq!(
        ListOptions::new(0).validate(),
        Err(ConfigError::NonPositiveEstimate)
    );
    assert!(ListOptions::new(1).validate().is_ok());
    assert_eq!(
        GridOptions::new(40, ColumnBreakpoints::new(3, 2, 1)).validate(),
        Err(ConfigError::BreakpointColumnsDecreasing)
    );
    assert_eq!(
        check_unique_keys([1, 2, 1]),
        Err(ConfigError::DuplicateKey { first: 0, index: 2 })
    );
    assert!(check_unique_keys(["a", "b"]).is_ok());
}

#[test]
fn duplicate_keys_resolve_to_last_index() {
    let v = ListVirtualizer::with_keys(ListOptions::new(10), [1u32, 2, 1]);
    assert_eq!(v.count(), 3);
    assert_eq!(v.index_of_key(&1), Some(2));
    assert_eq!(v.total_extent(), 30);
}

#[test]
fn grid_window_covers_whole_rows() {
    let v = grid(10, 1_024);
    assert_eq!(v.columns(), 3);
    assert_eq!(v.row_count(), 4);

    let w = v.window();
    assert_eq!(w.columns, 3);
    assert_eq!(
        w.rows.visible,
        Some(VirtualRange {
            start_index: 0,
            end_index: 2
        })
    );
    assert_eq!(
        w.rows.rendered,
        Some(VirtualRange {
            start_index: 0,
            end_index: 3
        })
    );
    assert_eq!(
        w.items,
        Some(VirtualRange {
            start_index: 0,
            end_index: 9
        })
    );
    assert_eq!(
        v.row_items(3),
        Some(VirtualRange {
            start_index: 9,
            end_index: 9
        })
    );
    assert_eq!(v.row_items(4), None);

    let mut rows = Vec::new();
    v.for_each_virtual_row(|r| rows.push(r));
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].start, 100);
}

#[test]
fn grid_rows_self_correct_from_measurements() {
    let mut v = grid(30, 1_024);
    v.set_scroll_offset(250);
    assert_eq!(v.measure_row(1, 70), 20);
    assert_eq!(v.scroll_offset(), 270);
    assert!(v.is_row_measured(1));
    assert_eq!(v.total_extent(), 10 * 50 + 20);
    assert_eq!(v.item_start(7), Some(120));

    assert_eq!(v.invalidate_row(1), -20);
    assert_eq!(v.scroll_offset(), 250);
}

#[test]
fn grid_column_change_drops_row_measurements_and_keeps_anchor() {
    let mut v = grid(30, 1_024);
    v.set_scroll_offset(250);
    assert_eq!(v.capture_anchor().map(|a| a.key), Some(15));
    v.measure_rows([(6, 60), (7, 60)]);
    assert_eq!(v.measured_row_count(), 2);

    v.set_rect(Rect::new(100, 800));
    assert_eq!(v.columns(), 2);
    assert_eq!(v.row_count(), 15);
    assert_eq!(v.measured_row_count(), 0);
    assert_eq!(v.total_extent(), 750);
    assert_eq!(v.row_of(15), 7);
    assert_eq!(v.scroll_offset(), 350);

    // same tier: nothing to drop
    v.measure_row(0, 80);
    v.set_rect(Rect::new(100, 900));
    assert_eq!(v.measured_row_count(), 1);
}

#[test]
fn grid_key_changes_drop_rows_from_first_change() {
    let mut v = grid(9, 1_024);
    v.measure_rows([(0, 80), (1, 80), (2, 80)]);
    assert_eq!(v.measured_row_count(), 3);

    v.set_keys(0..9u32);
    assert_eq!(v.measured_row_count(), 3);

    // append: full rows keep their height
    v.set_keys(0..10u32);
    assert_eq!(v.measured_row_count(), 3);
    assert_eq!(v.total_extent(), 3 * 80 + 50);

    // removing item 4 shifts rows 1 and 2
    v.set_keys((0..10u32).filter(|&k| k != 4));
    assert_eq!(v.measured_row_count(), 1);
    assert!(v.is_row_measured(0));
    assert_eq!(v.total_extent(), 80 + 50 + 50);

    // prepend not aligned to the column count
    v.set_keys(core::iter::once(100u32).chain(0..10));
    assert_eq!(v.measured_row_count(), 0);
    assert_eq!(v.total_extent(), 4 * 50);
}

#[test]
fn grid_scroll_to_index_targets_row() {
    let mut v = grid(30, 1_024);
    assert_eq!(v.scroll_to_index(7, Align::Start), 100);
    assert_eq!(v.scroll_to_index_offset(0, Align::End), 0);
    assert_eq!(v.scroll_to_index_offset(29, Align::Start), 400);
}

#[test]
fn grid_narrow_width_is_single_column() {
    let v = grid(5, 0);
    assert_eq!(v.columns(), 1);
    assert_eq!(v.row_count(), 5);
    assert_eq!(v.total_extent(), 250);
}

proptest! {
    #[test]
    fn window_is_bounded_and_has_no_holes(
        sizes in proptest::collection::vec(1u32..200, 1..60),
        gap in 0u32..6,
        overscan in 0usize..5,
        scroll in 0u64..20_000,
        extent in 0u32..1_500,
    ) {
        let mut v = list_with(&sizes, gap, overscan);
        v.set_viewport_and_scroll(extent, scroll);
        let n = sizes.len();

        let w = v.window();
        let visible = w.visible.unwrap();
        let rendered = w.rendered.unwrap();
        prop_assert!(visible.start_index <= visible.end_index);
        prop_assert!(rendered.start_index <= visible.start_index);
        prop_assert!(visible.end_index <= rendered.end_index);
        prop_assert!(rendered.end_index < n);
        prop_assert!(rendered.len() <= visible.len() + 2 * overscan);

        let s = visible.start_index;
        prop_assert!(v.item_start(s).unwrap() <= scroll);
        if s + 1 < n {
            prop_assert!(v.item_start(s + 1).unwrap() > scroll);
        }
        let e = visible.end_index;
        if extent > 0 && e + 1 < n {
            prop_assert!(v.item_start(e + 1).unwrap() > scroll + extent as u64);
        }

        prop_assert_eq!(v.window(), w);
        prop_assert_eq!(w.total_extent, expected_total(&sizes, gap));
    }

    #[test]
    fn growing_one_item_shifts_only_its_suffix(
        sizes in proptest::collection::vec(1u32..200, 1..60),
        gap in 0u32..6,
        pick in any::<prop::sample::Index>(),
        grow in 1u32..300,
    ) {
        let mut v = list_with(&sizes, gap, 1);
        let i = pick.index(sizes.len());
        let before: Vec<u64> = (0..sizes.len()).map(|j| v.item_start(j).unwrap()).collect();
        let total = v.total_extent();

        v.measure(i, sizes[i] + grow);

        prop_assert_eq!(v.total_extent(), total + grow as u64);
        for (j, &start) in before.iter().enumerate() {
            let expected = if j > i { start + grow as u64 } else { start };
            prop_assert_eq!(v.item_start(j).unwrap(), expected);
        }
    }

    #[test]
    fn anchor_item_keeps_its_viewport_position(
        sizes in proptest::collection::vec(1u32..200, 2..60),
        updates in proptest::collection::vec((0usize..60, 1u32..300), 1..10),
        scroll in 0u64..10_000,
    ) {
        let mut v = list_with(&sizes, 0, 1);
        v.set_viewport_and_scroll(300, scroll);
        let anchor = v.capture_anchor().unwrap();
        let index = v.index_of_key(&anchor.key).unwrap();
        let gap_before = v.scroll_offset() - v.item_start(index).unwrap();

        v.measure_many(updates);

        let gap_after = v.scroll_offset() - v.item_start(index).unwrap();
        prop_assert_eq!(gap_before, gap_after);
    }

    #[test]
    fn columns_never_decrease_with_width(
        sm in 1usize..4,
        md_extra in 0usize..4,
        lg_extra in 0usize..4,
        w1 in 0u32..3_000,
        w2 in 0u32..3_000,
    ) {
        let bp = ColumnBreakpoints::new(sm, sm + md_extra, sm + md_extra + lg_extra);
        prop_assert!(bp.validate().is_ok());
        let (lo, hi) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
        prop_assert!(resolve_columns(lo, &bp) <= resolve_columns(hi, &bp));
        prop_assert!(resolve_columns(lo, &bp) >= 1);
    }
}
