use vscroll::{ColumnBreakpoints, Rect};
use vscroll_adapter::{GridConfig, ManualScheduler, NoopMeasurement, VirtualGrid};

fn main() {
    // Example: a responsive grid whose column count follows the container width.
    let photos: Vec<u32> = (0..500).collect();
    let config = GridConfig::new(|id: &u32| *id, |id: &u32, _: usize| format!("photo-{id}"))
        .with_estimated_row_height(180)
        .with_gap(12)
        .with_columns(ColumnBreakpoints::new(1, 2, 3).with_xl(4));
    let mut grid = VirtualGrid::create(config, &photos, ManualScheduler::new(), NoopMeasurement);

    for width in [600, 900, 1_100, 1_400] {
        grid.attach(Rect::new(720, width));
        let pass = grid.render(&photos);
        println!(
            "width={width} columns={} rows_rendered={} total={}",
            pass.columns,
            pass.rows.len(),
            pass.total_extent
        );
    }

    let to = grid.scroll_to_index(250, Default::default());
    let pass = grid.render(&photos);
    println!(
        "scroll_to_index(250) -> {to:?}, first row {:?}",
        pass.rows.first().map(|r| r.cells.iter().map(|c| c.index).collect::<Vec<_>>())
    );
}
