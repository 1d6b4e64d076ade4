// Example: responsive grid columns and row windowing.
use vscroll::{ColumnBreakpoints, GridOptions, GridVirtualizer, Rect};

fn main() {
    let options = GridOptions::new(120, ColumnBreakpoints::new(1, 2, 3).with_xl(4))
        .with_gap(8)
        .with_initial_rect(Some(Rect::new(600, 1_100)));
    let mut g = GridVirtualizer::with_keys(options, 0..1_000u32);

    println!("columns={} rows={}", g.columns(), g.row_count());
    g.set_scroll_offset(2_000);
    g.for_each_virtual_row(|row| {
        println!("row {} at {} holds {:?}", row.row, row.start, row.items);
    });

    g.measure_row(16, 180);
    println!("after measure_row: off={} total={}", g.scroll_offset(), g.total_extent());

    // Narrowing the window drops to two columns; row measurements start over.
    g.set_rect(Rect::new(600, 800));
    println!(
        "columns={} rows={} off={} measured_rows={}",
        g.columns(),
        g.row_count(),
        g.scroll_offset(),
        g.measured_row_count()
    );
}
