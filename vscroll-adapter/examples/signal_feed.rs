use vscroll::{Align, Rect};
use vscroll_adapter::{ListConfig, ManualScheduler, ObservedKeys, VirtualList};

#[derive(Clone, Debug)]
struct Signal {
    id: u64,
    title: String,
}

fn main() {
    // Example: a host loop driving a virtualized feed without any UI toolkit.
    //
    // A real host would:
    // - forward scroll/resize events to the handle
    // - call tick() when the scheduler's requested deadline passes
    // - measure the rendered rows after paint and report them back
    let items: Vec<Signal> = (0..10_000)
        .map(|id| Signal {
            id,
            title: format!("signal #{id}"),
        })
        .collect();

    let config = ListConfig::new(
        |s: &Signal| s.id,
        |s: &Signal, index: usize| format!("[{index}] {}", s.title),
    )
    .with_estimated_size(100)
    .with_aria_label("Signals");
    let mut feed = VirtualList::create(config, &items, ManualScheduler::new(), ObservedKeys::new());
    feed.attach(Rect::new(800, 600));

    for step in 1..=6u64 {
        feed.controller_mut().scheduler_mut().set_now(step * 5);
        feed.on_scroll(step * 1_000, 800);
        let due = feed.controller_mut().scheduler_mut().take_due_tick();
        if due && feed.tick() {
            let pass = feed.render(&items);
            println!(
                "t={}ms off={} rendered={} first={:?}",
                step * 5,
                pass.scroll_offset,
                pass.items.len(),
                pass.items.first().map(|p| &p.view)
            );

            // Pretend every odd row wrapped onto two lines.
            for p in &pass.items {
                if p.key % 2 == 1 {
                    feed.report_item_size(p.key, 160);
                }
            }
            if let Some(correction) = feed.after_paint() {
                println!("  host scrolls its container by {correction}");
            }
        }
    }

    feed.flush();
    println!("observed={}", feed.controller().provider().len());

    let to = feed.scroll_to_index(0, Align::Start);
    println!("scroll_to_index(0) -> {to:?}");
    feed.dispose();
}
