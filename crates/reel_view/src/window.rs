//! Virtual window manager
//!
//! Maps the leading line to a range of virtual indices and reassigns a
//! fixed pool of slots to that range. Slots already showing an index in
//! the new range are kept untouched; only slots that left the window are
//! recycled, so reassignment cost is bounded by the pool size and never by
//! the dataset size.
//!
//! # Example
//!
//! ```rust
//! use reel_core::Vec2;
//! use reel_view::headless::HeadlessPresenter;
//! use reel_view::{GridLayout, ItemTemplate, ListConfig, VirtualWindow};
//!
//! let grid = GridLayout::new(&ListConfig::default().num_items(100), Vec2::new(100.0, 40.0));
//! let template = ItemTemplate::new(1, Vec2::new(100.0, 40.0));
//! let mut presenter = HeadlessPresenter::new();
//! let mut window = VirtualWindow::new();
//!
//! window.set_max_init(grid.max_init(Vec2::new(100.0, 200.0)));
//! window.grow(grid.pool_target(Vec2::new(100.0, 200.0)), &template, &mut presenter);
//!
//! let update = window.update(0, false, &grid, &mut presenter, None).unwrap();
//! assert_eq!(update.range(), 0..6);
//! assert_eq!(window.active_count(), 6);
//! ```

use std::collections::VecDeque;
use std::ops::Range;

use reel_core::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::grid::GridLayout;
use crate::host::{ItemTemplate, RenderCallback, SlotPresenter};

/// Resolve a virtual index into `[0, len)` with wraparound
///
/// Returns 0 for an empty dataset.
pub fn loop_index(virtual_index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    virtual_index.rem_euclid(len as i64) as usize
}

// ============================================================================
// Item Slot
// ============================================================================

/// A pooled visual instance and the index it currently represents
#[derive(Debug, Clone)]
pub struct ItemSlot<H> {
    pub handle: H,
    /// Unresolved index, None while idle in the pool
    pub virtual_index: Option<i64>,
    /// Dataset index, always within `[0, num_items)` (0 for empty datasets)
    pub actual_index: usize,
    /// Should be visible
    pub active: bool,
    /// Needs a render callback this pass
    pub renderable: bool,
    /// Centre in content-local space
    pub position: Vec2,
    /// Visibility last pushed to the presenter
    shown: Option<bool>,
}

impl<H> ItemSlot<H> {
    fn new(handle: H) -> Self {
        Self {
            handle,
            virtual_index: None,
            actual_index: 0,
            active: false,
            renderable: false,
            position: Vec2::ZERO,
            shown: None,
        }
    }

    fn release(&mut self) {
        self.virtual_index = None;
        self.active = false;
        self.renderable = false;
    }
}

/// Outcome of one reassignment pass
#[derive(Debug, Clone, PartialEq)]
pub struct WindowUpdate {
    pub line: i64,
    pub start: i64,
    pub end: i64,
    /// Actual indices that received a render callback, in slot order
    pub rendered: SmallVec<[usize; 16]>,
    /// Slots that left the window
    pub recycled: usize,
}

impl WindowUpdate {
    pub fn range(&self) -> Range<i64> {
        self.start..self.end
    }
}

// ============================================================================
// Virtual Window
// ============================================================================

/// Owner of the slot pool and of every index assignment
#[derive(Debug)]
pub struct VirtualWindow<H> {
    slots: Vec<ItemSlot<H>>,
    current_line: Option<i64>,
    start: i64,
    end: i64,
    max_init: usize,
    assigned: FxHashMap<i64, usize>,
    recycle: VecDeque<usize>,
}

impl<H> Default for VirtualWindow<H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            current_line: None,
            start: 0,
            end: 0,
            max_init: 0,
            assigned: FxHashMap::default(),
            recycle: VecDeque::new(),
        }
    }
}

impl<H: Clone + PartialEq + std::fmt::Debug> VirtualWindow<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[ItemSlot<H>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn active_slots(&self) -> impl Iterator<Item = &ItemSlot<H>> {
        self.slots.iter().filter(|slot| slot.active)
    }

    /// Active slot showing a dataset index
    pub fn slot_for(&self, actual_index: usize) -> Option<&ItemSlot<H>> {
        self.active_slots()
            .find(|slot| slot.actual_index == actual_index)
    }

    pub fn current_line(&self) -> Option<i64> {
        self.current_line
    }

    /// Virtual index range of the last pass
    pub fn range(&self) -> Range<i64> {
        self.start..self.end
    }

    pub fn max_init(&self) -> usize {
        self.max_init
    }

    pub fn set_max_init(&mut self, max_init: usize) {
        self.max_init = max_init;
    }

    /// Force the next [`update`](Self::update) to run even if the line is unchanged
    pub fn invalidate(&mut self) {
        self.current_line = None;
    }

    /// Instantiate slots until the pool holds `target`; never shrinks
    ///
    /// Returns the number of slots created.
    pub fn grow<P>(&mut self, target: usize, template: &ItemTemplate, presenter: &mut P) -> usize
    where
        P: SlotPresenter<Handle = H>,
    {
        let before = self.slots.len();
        while self.slots.len() < target {
            let Some(handle) = presenter.instantiate(template) else {
                tracing::warn!(
                    "presenter refused to instantiate template {}, pool stays at {}",
                    template.id,
                    self.slots.len()
                );
                break;
            };
            presenter.set_active(&handle, false);
            let mut slot = ItemSlot::new(handle);
            slot.shown = Some(false);
            self.slots.push(slot);
        }

        let created = self.slots.len() - before;
        if created > 0 {
            tracing::debug!("slot pool grew {} -> {}", before, self.slots.len());
        }
        created
    }

    /// Destroy every slot
    pub fn clear<P>(&mut self, presenter: &mut P)
    where
        P: SlotPresenter<Handle = H>,
    {
        let count = self.slots.len();
        for slot in self.slots.drain(..) {
            presenter.destroy(slot.handle);
        }
        self.assigned.clear();
        self.recycle.clear();
        self.current_line = None;
        self.start = 0;
        self.end = 0;
        if count > 0 {
            tracing::debug!("destroyed {} pooled slots", count);
        }
    }

    /// Reassign slots for a new leading line
    ///
    /// Runs only if `line` differs from the last pass or `force` is set;
    /// returns None when skipped. A forced pass re-renders every slot in
    /// the window.
    pub fn update<P>(
        &mut self,
        line: i64,
        force: bool,
        grid: &GridLayout,
        presenter: &mut P,
        mut render: Option<&mut RenderCallback<H>>,
    ) -> Option<WindowUpdate>
    where
        P: SlotPresenter<Handle = H>,
    {
        if !force && self.current_line == Some(line) {
            return None;
        }
        self.current_line = Some(line);

        let num_items = grid.num_items;
        let (start, end) = if num_items == 0 {
            (0, 0)
        } else if grid.looping {
            let start = line * grid.fixed_count as i64;
            (start, start + self.max_init as i64)
        } else {
            let start = (line * grid.fixed_count as i64).clamp(0, num_items as i64);
            (start, (start + self.max_init as i64).min(num_items as i64))
        };
        self.start = start;
        self.end = end;

        let resolve = |virtual_index: i64| {
            if grid.looping {
                loop_index(virtual_index, num_items)
            } else {
                virtual_index as usize
            }
        };

        // Keep slots still inside the window, free the rest
        self.assigned.clear();
        self.recycle.clear();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            match slot.virtual_index {
                Some(v) if (start..end).contains(&v) && !self.assigned.contains_key(&v) => {
                    self.assigned.insert(v, i);
                    slot.active = true;
                    if force {
                        slot.actual_index = resolve(v);
                        slot.position = grid.item_position(v);
                        slot.renderable = true;
                    }
                }
                _ => {
                    slot.release();
                    self.recycle.push_back(i);
                }
            }
        }
        let recycled = self
            .recycle
            .iter()
            .filter(|&&i| self.slots[i].shown == Some(true))
            .count();

        // Fill indices without a slot
        for v in start..end {
            if self.assigned.contains_key(&v) {
                continue;
            }
            let Some(i) = self.recycle.pop_front() else {
                tracing::warn!("slot pool exhausted at virtual index {}", v);
                break;
            };
            let slot = &mut self.slots[i];
            slot.virtual_index = Some(v);
            slot.actual_index = resolve(v);
            slot.position = grid.item_position(v);
            slot.active = true;
            slot.renderable = true;
            self.assigned.insert(v, i);
        }

        // Sync visibility, then render
        let mut rendered = SmallVec::new();
        for slot in &mut self.slots {
            if slot.shown != Some(slot.active) {
                presenter.set_active(&slot.handle, slot.active);
                slot.shown = Some(slot.active);
            }
            if slot.renderable {
                presenter.set_position(&slot.handle, slot.position);
                if let Some(callback) = render.as_deref_mut() {
                    callback(slot.actual_index, &slot.handle);
                    rendered.push(slot.actual_index);
                }
            }
            slot.renderable = false;
        }

        tracing::trace!(
            "window line {} -> [{}, {}), {} rendered, {} recycled",
            line,
            start,
            end,
            rendered.len(),
            recycled
        );

        Some(WindowUpdate {
            line,
            start,
            end,
            rendered,
            recycled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListConfig;
    use crate::headless::{HeadlessPresenter, SlotId};
    use std::cell::RefCell;
    use std::rc::Rc;

    const VIEW: Vec2 = Vec2::new(100.0, 200.0);

    struct Fixture {
        grid: GridLayout,
        presenter: HeadlessPresenter,
        window: VirtualWindow<SlotId>,
        calls: Rc<RefCell<Vec<usize>>>,
        render: RenderCallback<SlotId>,
    }

    fn fixture(num_items: usize, looping: bool) -> Fixture {
        let config = ListConfig::default().num_items(num_items).looping(looping);
        let grid = GridLayout::new(&config, Vec2::new(100.0, 40.0));
        let mut presenter = HeadlessPresenter::new();
        let mut window = VirtualWindow::new();
        window.set_max_init(grid.max_init(VIEW));
        window.grow(
            grid.pool_target(VIEW),
            &ItemTemplate::new(1, Vec2::new(100.0, 40.0)),
            &mut presenter,
        );
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        Fixture {
            grid,
            presenter,
            window,
            calls,
            render: Box::new(move |index: usize, _: &SlotId| sink.borrow_mut().push(index)),
        }
    }

    impl Fixture {
        fn update(&mut self, line: i64, force: bool) -> Option<WindowUpdate> {
            self.window.update(
                line,
                force,
                &self.grid,
                &mut self.presenter,
                Some(&mut self.render),
            )
        }

        fn take_calls(&self) -> Vec<usize> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    #[test]
    fn test_loop_index_matches_wraparound_formula() {
        let n = 7i64;
        for v in -30..30 {
            let expected = if v < 0 {
                (n - 1) + (v + 1) % n
            } else {
                v % n
            };
            assert_eq!(loop_index(v, n as usize) as i64, expected, "v = {}", v);
        }
        assert_eq!(loop_index(-1, 5), 4);
        assert_eq!(loop_index(12, 0), 0);
    }

    #[test]
    fn test_initial_window() {
        let mut f = fixture(100, false);
        let update = f.update(0, false).unwrap();
        assert_eq!(update.range(), 0..6);
        assert_eq!(f.take_calls(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(f.window.active_count(), 6);
        assert_eq!(f.presenter.active_count(), 6);
    }

    #[test]
    fn test_same_line_is_skipped() {
        let mut f = fixture(100, false);
        f.update(0, false);
        f.take_calls();
        assert!(f.update(0, false).is_none());
        assert!(f.take_calls().is_empty());
    }

    #[test]
    fn test_one_line_step_renders_one_slot() {
        let mut f = fixture(100, false);
        f.update(0, false);
        f.take_calls();
        let update = f.update(1, false).unwrap();
        assert_eq!(update.recycled, 1);
        assert_eq!(f.take_calls(), vec![6]);
        let slot = f.window.slot_for(6).unwrap();
        assert_eq!(slot.position, Vec2::new(50.0, -260.0));
    }

    #[test]
    fn test_jump_reassigns_every_slot() {
        let mut f = fixture(100, false);
        f.update(0, false);
        f.take_calls();
        f.update(50, false);
        let mut calls = f.take_calls();
        calls.sort_unstable();
        assert_eq!(calls, vec![50, 51, 52, 53, 54, 55]);
        assert_eq!(f.presenter.instantiated(), 6);
    }

    #[test]
    fn test_last_window_is_short_when_not_looping() {
        let mut f = fixture(8, false);
        let update = f.update(5, false).unwrap();
        assert_eq!(update.range(), 5..8);
        assert_eq!(f.window.active_count(), 3);
        assert_eq!(f.take_calls(), vec![5, 6, 7]);
    }

    #[test]
    fn test_looping_wraps_negative_indices() {
        let mut f = fixture(5, true);
        assert_eq!(f.window.len(), 6);
        f.update(-1, false);
        let slot = f
            .window
            .active_slots()
            .find(|slot| slot.virtual_index == Some(-1))
            .unwrap();
        assert_eq!(slot.actual_index, 4);
        assert!(f.window.active_slots().all(|slot| slot.actual_index < 5));
    }

    #[test]
    fn test_forced_refresh_is_idempotent() {
        let mut f = fixture(100, false);
        f.update(3, false);
        f.take_calls();

        f.update(3, true);
        let first: Vec<_> = f.window.slots().iter().map(|s| s.virtual_index).collect();
        let first_calls = f.take_calls();
        f.update(3, true);
        let second: Vec<_> = f.window.slots().iter().map(|s| s.virtual_index).collect();
        let second_calls = f.take_calls();

        assert_eq!(first, second);
        assert_eq!(first_calls, second_calls);
        assert_eq!(second_calls.len(), 6);
    }

    #[test]
    fn test_empty_dataset_idles_every_slot() {
        let mut f = fixture(5, true);
        f.update(0, false);
        f.take_calls();
        f.grid.num_items = 0;
        let update = f.update(0, true).unwrap();
        assert!(update.range().is_empty());
        assert_eq!(f.window.active_count(), 0);
        assert_eq!(f.presenter.active_count(), 0);
        assert!(f.take_calls().is_empty());
    }

    #[test]
    fn test_shrinking_dataset_idles_out_of_range_slots() {
        let mut f = fixture(100, false);
        f.update(0, false);
        f.take_calls();
        f.grid.num_items = 2;
        f.update(0, true);
        assert_eq!(f.window.active_count(), 2);
        assert_eq!(f.take_calls(), vec![0, 1]);
    }

    #[test]
    fn test_clear_destroys_pool() {
        let mut f = fixture(100, false);
        f.update(0, false);
        f.window.clear(&mut f.presenter);
        assert!(f.window.is_empty());
        assert_eq!(f.presenter.live(), 0);
        assert_eq!(f.window.current_line(), None);
    }

    #[test]
    fn test_render_flags_cleared_without_callback() {
        let mut f = fixture(100, false);
        f.window
            .update(0, false, &f.grid, &mut f.presenter, None)
            .unwrap();
        assert!(f.window.slots().iter().all(|slot| !slot.renderable));
        assert!(f.take_calls().is_empty());
    }
}
