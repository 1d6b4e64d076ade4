// Example: minimal usage and scroll-to helper.
use vscroll::{Align, ListOptions, ListVirtualizer};

fn main() {
    let mut v = ListVirtualizer::with_keys(ListOptions::new(100).with_overscan(3), 0..10_000u32);
    v.set_viewport_and_scroll(800, 5_000);

    let mut items = Vec::new();
    v.collect_virtual_items(&mut items);
    println!("total_extent={}", v.total_extent());
    println!("window={:?}", v.window());
    println!("first_rendered={:?}", items.first());

    let off = v.scroll_to_index(9_999, Align::End);
    println!("after scroll_to_index: offset={off}");
}
