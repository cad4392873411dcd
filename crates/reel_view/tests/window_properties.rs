//! Property tests for index mapping, window coverage, pool conservation
//! and shortest-path snapping

use proptest::prelude::*;
use reel_core::{Axis, Margin, Vec2};
use reel_view::headless::{HeadlessPresenter, SlotId};
use reel_view::{
    closest_line_delta, loop_index, GridLayout, ItemTemplate, ListConfig, RenderCallback,
    VirtualWindow,
};

const VIEW: Vec2 = Vec2::new(300.0, 200.0);

fn build(grid: &GridLayout) -> (VirtualWindow<SlotId>, HeadlessPresenter) {
    let mut presenter = HeadlessPresenter::new();
    let mut window = VirtualWindow::new();
    window.set_max_init(grid.max_init(VIEW));
    window.grow(
        grid.pool_target(VIEW),
        &ItemTemplate::new(1, grid.item_size),
        &mut presenter,
    );
    (window, presenter)
}

/// Lines whose extent overlaps the viewport at scroll distance `distance`
fn visible_lines(grid: &GridLayout, distance: f32) -> Vec<i64> {
    let cell = grid.cell_size();
    let item = grid.item_size.along(grid.axis);
    let lead = if grid.looping {
        0.0
    } else {
        grid.margin.leading(grid.axis)
    };
    let view = VIEW.along(grid.axis);
    let first = ((distance - lead - item) / cell).floor() as i64 - 1;
    let last = ((distance + view - lead) / cell).ceil() as i64 + 1;

    (first..=last)
        .filter(|&k| {
            let start = lead + k as f32 * cell;
            let end = start + item;
            start < distance + view - 0.05 && end > distance + 0.05
        })
        .filter(|&k| grid.looping || (0..grid.total_lines() as i64).contains(&k))
        .collect()
}

fn grid_strategy() -> impl Strategy<Value = GridLayout> {
    (
        prop_oneof![Just(Axis::Vertical), Just(Axis::Horizontal)],
        1usize..5_000,
        1u32..4,
        10.0f32..120.0,
        0.0f32..20.0,
        0.0f32..30.0,
        any::<bool>(),
    )
        .prop_map(|(axis, num_items, fixed, item, spacing, margin, looping)| {
            let config = ListConfig::default()
                .motion(axis)
                .num_items(num_items)
                .fixed_count(fixed)
                .spacing(Vec2::splat(spacing))
                .margin(Margin::uniform(margin))
                .looping(looping);
            GridLayout::new(&config, Vec2::splat(item))
        })
}

proptest! {
    #[test]
    fn prop_loop_index_in_range(v in -1_000_000i64..1_000_000, n in 1usize..10_000) {
        let actual = loop_index(v, n);
        prop_assert!(actual < n);
        if v >= 0 {
            prop_assert_eq!(actual as i64, v % n as i64);
        } else {
            prop_assert_eq!(actual as i64, (n as i64 - 1) + (v + 1) % n as i64);
        }
    }

    #[test]
    fn prop_window_covers_visible_lines(grid in grid_strategy(), distance in -500.0f32..20_000.0) {
        let (mut window, mut presenter) = build(&grid);
        let position = grid.position_at_distance(Vec2::ZERO, distance);
        let line = grid.line_at(position);
        let update = window.update(line, false, &grid, &mut presenter, None).unwrap();

        let fixed = grid.fixed_count as i64;
        for k in visible_lines(&grid, distance) {
            for v in k * fixed..(k + 1) * fixed {
                if !grid.looping && v >= grid.num_items as i64 {
                    continue;
                }
                prop_assert!(
                    update.range().contains(&v),
                    "index {} of visible line {} outside window {:?}",
                    v, k, update.range()
                );
            }
        }
        let window_lines = (update.end - update.start + fixed - 1) / fixed;
        let view_lines = (VIEW.along(grid.axis) / grid.cell_size()).ceil() as i64;
        prop_assert!(window_lines <= view_lines + 1);
    }

    #[test]
    fn prop_pool_is_conserved(
        grid in grid_strategy(),
        distances in proptest::collection::vec(-2_000.0f32..50_000.0, 1..40),
    ) {
        let (mut window, mut presenter) = build(&grid);
        let pool = window.len();
        let max_init = window.max_init();
        for distance in distances {
            let line = grid.line_at(grid.position_at_distance(Vec2::ZERO, distance));
            window.update(line, false, &grid, &mut presenter, None);
            prop_assert!(window.active_count() <= max_init);
            prop_assert_eq!(window.len(), pool);
            prop_assert_eq!(presenter.instantiated(), pool);
            prop_assert!(window.active_slots().all(|slot| slot.actual_index < grid.num_items));
        }
    }

    #[test]
    fn prop_renders_bounded_by_entering_slots(
        grid in grid_strategy(),
        from in -2_000.0f32..50_000.0,
        to in -2_000.0f32..50_000.0,
    ) {
        let (mut window, mut presenter) = build(&grid);
        let mut calls = 0usize;
        {
            let counter = std::rc::Rc::new(std::cell::Cell::new(0usize));
            let sink = counter.clone();
            let mut render: RenderCallback<SlotId> =
                Box::new(move |_: usize, _: &SlotId| sink.set(sink.get() + 1));
            let line_from = grid.line_at(grid.position_at_distance(Vec2::ZERO, from));
            let line_to = grid.line_at(grid.position_at_distance(Vec2::ZERO, to));
            window.update(line_from, false, &grid, &mut presenter, Some(&mut render));
            let before = window.range();
            counter.set(0);
            if let Some(update) = window.update(line_to, false, &grid, &mut presenter, Some(&mut render)) {
                let entering = update.range().filter(|v| !before.contains(v)).count();
                calls = counter.get();
                prop_assert!(calls <= entering);
            }
        }
        prop_assert!(calls <= window.max_init());
    }

    #[test]
    fn prop_closest_delta_is_short(current in -10_000i64..10_000, target in 0i64..1_000, n in 1usize..1_000) {
        let target = target % n as i64;
        let delta = closest_line_delta(current, target, n);
        prop_assert!(delta.abs() * 2 <= n as i64);
        prop_assert_eq!((current + delta - target).rem_euclid(n as i64), 0);
    }
}

#[test]
fn test_shortest_path_example() {
    assert_eq!(closest_line_delta(1, 9, 10), -2);
}
