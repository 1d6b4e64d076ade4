// Example: export and import measurement cache.
use vscroll::{ListOptions, ListVirtualizer};

fn main() {
    // Persisting measurements lets a re-created list start from real extents instead of
    // re-measuring everything.
    let mut v1 = ListVirtualizer::with_keys(ListOptions::new(10), ["a", "b", "c", "d"]);
    v1.measure_key("b", 40);
    v1.measure_key("d", 25);

    let snapshot = v1.export_measurement_cache();
    println!("exported_cache_len={}", snapshot.len());

    let mut v2 = ListVirtualizer::with_keys(ListOptions::new(10), ["d", "c", "b", "a"]);
    println!("before import: total={}", v2.total_extent());

    v2.import_measurement_cache(snapshot);
    println!(
        "after import: cache_len={} total={} size_of_b={:?}",
        v2.measurement_cache_len(),
        v2.total_extent(),
        v2.index_of_key(&"b").and_then(|i| v2.item_size(i))
    );
}
