// Example: measurements replacing estimates without moving the viewport.
use vscroll::{Align, ListOptions, ListVirtualizer};

fn main() {
    let mut v = ListVirtualizer::with_keys(ListOptions::new(10), 0..100u32);
    v.set_viewport_and_scroll(30, 200);

    println!(
        "before: off={} total={} window={:?}",
        v.scroll_offset(),
        v.total_extent(),
        v.window().visible
    );

    // Item 0 sits above the viewport: the scroll offset moves with it.
    let correction = v.measure(0, 30);
    println!(
        "measure(0): correction={correction} off={} total={}",
        v.scroll_offset(),
        v.total_extent()
    );

    // Several rows reported by one layout pass: a single correction.
    let correction = v.measure_many([(1, 50), (2, 30), (40, 12)]);
    println!("measure_many: correction={correction} off={}", v.scroll_offset());

    // Older entries arrive at the top of the feed.
    let mut keys: Vec<u32> = (1_000..1_005).collect();
    keys.extend(0..100);
    v.set_keys(keys);
    println!(
        "after prepend: off={} first_visible={:?}",
        v.scroll_offset(),
        v.window().visible.and_then(|r| v.key_for(r.start_index))
    );

    let to = v.scroll_to_index(10, Align::Start);
    println!("scroll_to_index(10): off={to} window={:?}", v.window().visible);
}
