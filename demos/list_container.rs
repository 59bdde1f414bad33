//! Builds a vertical list of rows inside a list container, drags through it
//! and prints what each frame would put on screen.
//!
//! Run with `RUST_LOG=debug cargo run --example list_container` to see the
//! limit and clamp decisions.

use scrollbox::prelude::*;

const ROW_HEIGHT: i32 = 40;

fn print_frame(label: &str, ctx: &PaintContext) {
    println!("== {label}");
    for command in ctx.commands() {
        let rect = command.rect();
        println!(
            "  fill {:>4},{:>4} {:>4}x{:<4} a={:.1}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            command.color().a
        );
    }
    println!("  ({} fills culled)", ctx.culled());
}

fn main() {
    Gui::init_logging();

    let gui = Gui::new().width(240).height(160);
    let list = gui.protect(|tree| {
        let list = ListContainer::new()
            .mode(ScrollMode::Vertical)
            .create(tree, None, Rect::new(20, 10, 200, 140))
            .expect("top-level widgets always register");
        list_container::set_color(
            tree,
            list,
            ListContainerColor::Background,
            Color::from_hex(0x202030),
        );

        for row in 0..8 {
            let shade = if row % 2 == 0 { 0x5080C0 } else { 0x4070A0 };
            panel(Color::from_hex(shade))
                .create(tree, Some(list), Rect::new(0, row * ROW_HEIGHT, 194, ROW_HEIGHT))
                .expect("list containers accept children");
        }
        list
    });

    let mut ctx = PaintContext::with_capacity(16);
    gui.draw(&mut ctx);
    print_frame("initial", &ctx);

    // Drag upward by 100 pixels in small steps; content follows the pointer
    gui.touch_down(100, 120);
    for y in (20..=100).rev().step_by(20) {
        gui.touch_move(100, y);
    }
    gui.touch_up(100, 20);

    ctx.clear();
    gui.draw(&mut ctx);
    print_frame("after drag", &ctx);

    gui.protect(|tree| {
        println!(
            "offset {:?}, limits {:?}",
            list_container::scroll_offset(tree, list),
            list_container::max_scroll(tree, list)
        );
    });
}
