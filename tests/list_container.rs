use std::ops::Range;

use proptest::prelude::*;
use proptest::sample::Index;
use scrollbox::prelude::*;
use scrollbox::widgets::list_container::{
    apply_drag, max_scroll, recompute_limits, scroll_offset, scroll_to, set_mode, DEFAULT_PADDING,
};

/// List container whose content area is exactly `width` x `height`.
fn viewport(width: i32, height: i32) -> (Tree, WidgetId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = Tree::new();
    let rect = Rect::new(
        0,
        0,
        width + 2 * DEFAULT_PADDING,
        height + 2 * DEFAULT_PADDING,
    );
    let id = ListContainer::new().create(&mut tree, None, rect).unwrap();
    (tree, id)
}

fn child(tree: &mut Tree, parent: WidgetId, x: i32, y: i32, w: i32, h: i32) -> WidgetId {
    panel(Color::WHITE)
        .create(tree, Some(parent), Rect::new(x, y, w, h))
        .unwrap()
}

fn offset_in_range(tree: &Tree, id: WidgetId) -> bool {
    let offset = scroll_offset(tree, id);
    let limits = max_scroll(tree, id);
    (0..=limits.max_x).contains(&offset.x) && (0..=limits.max_y).contains(&offset.y)
}

fn any_rect(origin: Range<i32>, size: Range<i32>) -> impl Strategy<Value = Rect> {
    (origin.clone(), origin, size.clone(), size)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

fn any_mode() -> impl Strategy<Value = ScrollMode> {
    prop_oneof![
        Just(ScrollMode::None),
        Just(ScrollMode::Vertical),
        Just(ScrollMode::Horizontal),
        Just(ScrollMode::Both),
    ]
}

/// One step of a random editing session on a list container.
#[derive(Debug, Clone)]
enum Step {
    Add(Rect),
    Remove(Index),
    Resize(Index, i32, i32),
    SetMode(ScrollMode),
    Drag(i32, i32),
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => any_rect(0..400, 1..150).prop_map(Step::Add),
        1 => any::<Index>().prop_map(Step::Remove),
        1 => (any::<Index>(), 0..250i32, 0..250i32).prop_map(|(i, w, h)| Step::Resize(i, w, h)),
        1 => any_mode().prop_map(Step::SetMode),
        6 => (-120..=120i32, -120..=120i32).prop_map(|(dx, dy)| Step::Drag(dx, dy)),
    ]
}

#[test]
fn test_wide_child_scrolls_horizontally_only() {
    let (mut tree, list) = viewport(100, 100);
    child(&mut tree, list, 0, 0, 150, 60);

    assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::new(50, 0));

    apply_drag(&mut tree, list, 20, 5);
    // Vertical is enabled, but there is nothing to scroll on that axis
    assert_eq!(scroll_offset(&tree, list), ScrollOffset::new(20, 0));
}

#[test]
fn test_fitting_child_never_scrolls() {
    let (mut tree, list) = viewport(100, 100);
    child(&mut tree, list, 0, 0, 50, 50);

    assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::default());
    for (dx, dy) in [(10, 10), (-30, 70), (1000, -1000), (0, 0)] {
        apply_drag(&mut tree, list, dx, dy);
        assert_eq!(scroll_offset(&tree, list), ScrollOffset::default());
    }
}

#[test]
fn test_zero_drag_still_runs_limit_pass() {
    let (mut tree, list) = viewport(100, 100);
    let wide = child(&mut tree, list, 0, 0, 150, 60);
    apply_drag(&mut tree, list, 40, 0);
    assert_eq!(scroll_offset(&tree, list), ScrollOffset::new(40, 0));

    tree.unregister(wide);
    apply_drag(&mut tree, list, 0, 0);

    assert_eq!(scroll_offset(&tree, list), ScrollOffset::default());
    assert_eq!(max_scroll(&tree, list), ScrollLimits::default());
}

#[test]
fn test_removing_child_reclamps_offset() {
    let (mut tree, list) = viewport(100, 100);
    let wide = child(&mut tree, list, 0, 0, 150, 60);
    apply_drag(&mut tree, list, 40, 0);
    assert_eq!(scroll_offset(&tree, list), ScrollOffset::new(40, 0));
    assert_eq!(max_scroll(&tree, list).max_x, 50);

    tree.unregister(wide);
    // The stored limits are stale until the next pass
    assert_eq!(scroll_offset(&tree, list), ScrollOffset::new(40, 0));

    assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::default());
    assert_eq!(scroll_offset(&tree, list), ScrollOffset::default());
}

#[test]
fn test_mode_none_ignores_all_drags() {
    let (mut tree, list) = viewport(100, 100);
    child(&mut tree, list, 0, 0, 1000, 1000);
    set_mode(&mut tree, list, ScrollMode::None);

    for (dx, dy) in [(10, 10), (500, 500), (-5, 3), (i32::MAX, i32::MAX)] {
        apply_drag(&mut tree, list, dx, dy);
        assert_eq!(scroll_offset(&tree, list), ScrollOffset::default());
    }
}

#[test]
fn test_shrinking_child_reclamps_on_draw() {
    let gui = Gui::new().width(300).height(300);
    let (list, item) = gui.protect(|tree| {
        let list = ListContainer::new()
            .create(tree, None, Rect::new(0, 0, 106, 106))
            .unwrap();
        let item = child(tree, list, 0, 0, 100, 500);
        (list, item)
    });

    gui.protect(|tree| scroll_to(tree, list, ScrollOffset::new(0, 350)));
    gui.protect(|tree| tree.set_size(item, 100, 150));

    let mut ctx = PaintContext::new();
    gui.draw(&mut ctx);

    gui.protect(|tree| {
        assert_eq!(max_scroll(tree, list), ScrollLimits::new(0, 50));
        assert_eq!(scroll_offset(tree, list), ScrollOffset::new(0, 50));
    });
}

#[test]
fn test_limit_pass_is_idempotent() {
    let (mut tree, list) = viewport(100, 100);
    child(&mut tree, list, 10, 20, 240, 90);
    child(&mut tree, list, 0, 130, 20, 20);
    apply_drag(&mut tree, list, 500, 500);

    let first = (recompute_limits(&mut tree, list), scroll_offset(&tree, list));
    tree.take_dirty();
    let second = (recompute_limits(&mut tree, list), scroll_offset(&tree, list));

    assert_eq!(first, second);
    assert_eq!(first, (ScrollLimits::new(150, 50), ScrollOffset::new(150, 50)));
    assert!(!tree.is_dirty(list), "a no-op pass must not request a redraw");
}

#[test]
fn test_offscreen_child_counts_toward_extent() {
    let (mut tree, list) = viewport(100, 100);
    child(&mut tree, list, 0, 0, 10, 10);
    child(&mut tree, list, 0, 900, 10, 10);
    assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::new(0, 810));
}

#[test]
fn test_zero_size_viewport() {
    let mut tree = Tree::new();
    // Smaller than its own padding, so the content area is empty
    let list = ListContainer::new()
        .create(&mut tree, None, Rect::new(0, 0, 4, 4))
        .unwrap();
    child(&mut tree, list, 0, 0, 30, 40);
    assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::new(30, 40));
}

#[test]
fn test_nested_list_containers_scroll_independently() {
    let gui = Gui::new().width(400).height(400);
    let (outer, inner) = gui.protect(|tree| {
        let outer = ListContainer::new()
            .mode(ScrollMode::Vertical)
            .create(tree, None, Rect::new(0, 0, 206, 206))
            .unwrap();
        let inner = ListContainer::new()
            .mode(ScrollMode::Horizontal)
            .create(tree, Some(outer), Rect::new(0, 0, 106, 306))
            .unwrap();
        child(tree, inner, 0, 0, 500, 50);
        (outer, inner)
    });

    let mut ctx = PaintContext::new();
    gui.draw(&mut ctx);

    // Press inside the inner container: it owns the whole gesture
    assert_eq!(gui.touch_down(50, 50), EventResponse::Handled);
    assert_eq!(gui.touch_owner(), Some(inner));
    gui.touch_move(20, 10);
    gui.touch_up(20, 10);

    gui.protect(|tree| {
        assert_eq!(scroll_offset(tree, inner), ScrollOffset::new(30, 0));
        assert_eq!(scroll_offset(tree, outer), ScrollOffset::default());
    });
}

proptest! {
    #[test]
    fn prop_limits_follow_formula(
        inner_w in 0..=200i32,
        inner_h in 0..=200i32,
        rects in prop::collection::vec(any_rect(-50..300, 0..200), 0..6),
    ) {
        let (mut tree, list) = viewport(inner_w, inner_h);
        let mut far = (0, 0);
        for rect in &rects {
            far = (far.0.max(rect.right()), far.1.max(rect.bottom()));
            child(&mut tree, list, rect.x, rect.y, rect.width, rect.height);
        }

        let limits = recompute_limits(&mut tree, list);
        prop_assert_eq!(limits.max_x, (far.0 - inner_w).max(0));
        prop_assert_eq!(limits.max_y, (far.1 - inner_h).max(0));
    }

    #[test]
    fn prop_adding_children_never_shrinks_limits(
        rects in prop::collection::vec(any_rect(0..200, 1..120), 1..50),
    ) {
        let (mut tree, list) = viewport(80, 60);
        let mut previous = recompute_limits(&mut tree, list);

        for rect in &rects {
            child(&mut tree, list, rect.x, rect.y, rect.width, rect.height);
            let limits = recompute_limits(&mut tree, list);
            prop_assert!(limits.max_x >= previous.max_x);
            prop_assert!(limits.max_y >= previous.max_y);
            previous = limits;
        }

        for id in tree.children(list).to_vec() {
            tree.unregister(id);
        }
        prop_assert_eq!(recompute_limits(&mut tree, list), ScrollLimits::default());
    }

    #[test]
    fn prop_offset_stays_in_range_under_drags_and_edits(
        steps in prop::collection::vec(any_step(), 1..200),
    ) {
        let (mut tree, list) = viewport(100, 100);
        let mut children = vec![child(&mut tree, list, 0, 0, 300, 300)];

        for step in steps {
            match step {
                Step::Add(rect) => children.push(child(
                    &mut tree,
                    list,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                )),
                Step::Remove(index) if !children.is_empty() => {
                    tree.unregister(children.swap_remove(index.index(children.len())));
                }
                Step::Resize(index, width, height) if !children.is_empty() => {
                    tree.set_size(children[index.index(children.len())], width, height);
                }
                Step::SetMode(mode) => set_mode(&mut tree, list, mode),
                Step::Drag(dx, dy) => apply_drag(&mut tree, list, dx, dy),
                Step::Remove(_) | Step::Resize(..) => {}
            }

            recompute_limits(&mut tree, list);
            prop_assert!(
                offset_in_range(&tree, list),
                "offset {:?} escaped limits {:?}",
                scroll_offset(&tree, list),
                max_scroll(&tree, list)
            );
        }
    }

    #[test]
    fn prop_vertical_mode_never_moves_x(
        drags in prop::collection::vec((-1000..=1000i32, -50..=50i32), 1..200),
    ) {
        let (mut tree, list) = viewport(100, 100);
        child(&mut tree, list, 0, 0, 900, 900);
        set_mode(&mut tree, list, ScrollMode::Vertical);

        for (dx, dy) in drags {
            apply_drag(&mut tree, list, dx, dy);
            prop_assert_eq!(scroll_offset(&tree, list).x, 0);
        }
    }

    #[test]
    fn prop_horizontal_mode_never_moves_y(
        drags in prop::collection::vec((-50..=50i32, -1000..=1000i32), 1..200),
    ) {
        let (mut tree, list) = viewport(100, 100);
        child(&mut tree, list, 0, 0, 900, 900);
        set_mode(&mut tree, list, ScrollMode::Horizontal);

        for (dx, dy) in drags {
            apply_drag(&mut tree, list, dx, dy);
            prop_assert_eq!(scroll_offset(&tree, list).y, 0);
        }
    }

    #[test]
    fn prop_mode_none_ignores_drags(
        mode_before in any_mode(),
        drags in prop::collection::vec((any::<i32>(), any::<i32>()), 1..50),
    ) {
        let (mut tree, list) = viewport(100, 100);
        child(&mut tree, list, 0, 0, 1000, 1000);
        set_mode(&mut tree, list, mode_before);
        apply_drag(&mut tree, list, 30, 30);
        let start = scroll_offset(&tree, list);

        set_mode(&mut tree, list, ScrollMode::None);
        for (dx, dy) in drags {
            apply_drag(&mut tree, list, dx, dy);
            prop_assert_eq!(scroll_offset(&tree, list), start);
        }
    }
}
