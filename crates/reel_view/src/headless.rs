//! In-memory host for tests, benchmarks and simulation
//!
//! Nothing here draws. The presenter keeps slot state in a slotmap, the
//! layout host stores rectangles and counts layout requests, and the
//! scrollbar records what it was told. Layout and scrollbar handles are
//! cheap clones sharing state, so a test can keep one handle while the
//! view owns another.

use std::cell::RefCell;
use std::rc::Rc;

use reel_core::{Rect, Vec2};
use slotmap::SlotMap;

use crate::bounds::ContentRect;
use crate::host::{ItemTemplate, LayoutHost, ScrollbarWidget, SlotPresenter};

slotmap::new_key_type! {
    /// Handle of a headless slot
    pub struct SlotId;
}

// ============================================================================
// Presenter
// ============================================================================

/// State of one headless visual instance
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSlot {
    pub template: u64,
    pub active: bool,
    pub position: Vec2,
    pub scale: f32,
}

#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    slots: SlotMap<SlotId, HeadlessSlot>,
    instantiated: usize,
    destroyed: usize,
    capacity: Option<usize>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presenter that refuses to hold more than `capacity` live slots
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Default::default()
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&HeadlessSlot> {
        self.slots.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &HeadlessSlot)> {
        self.slots.iter()
    }

    /// Slots currently alive
    pub fn live(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.active).count()
    }

    /// Total slots ever created
    pub fn instantiated(&self) -> usize {
        self.instantiated
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }
}

impl SlotPresenter for HeadlessPresenter {
    type Handle = SlotId;

    fn instantiate(&mut self, template: &ItemTemplate) -> Option<SlotId> {
        if self.capacity.is_some_and(|cap| self.slots.len() >= cap) {
            return None;
        }
        self.instantiated += 1;
        Some(self.slots.insert(HeadlessSlot {
            template: template.id,
            active: true,
            position: Vec2::ZERO,
            scale: 1.0,
        }))
    }

    fn destroy(&mut self, handle: SlotId) {
        if self.slots.remove(handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn set_active(&mut self, handle: &SlotId, active: bool) {
        if let Some(slot) = self.slots.get_mut(*handle) {
            slot.active = active;
        }
    }

    fn set_position(&mut self, handle: &SlotId, position: Vec2) {
        if let Some(slot) = self.slots.get_mut(*handle) {
            slot.position = position;
        }
    }

    fn set_scale(&mut self, handle: &SlotId, scale: f32) {
        if let Some(slot) = self.slots.get_mut(*handle) {
            slot.scale = scale;
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Default)]
struct LayoutState {
    viewport: Option<Rect>,
    content: Option<ContentRect>,
    /// Screen position of the viewport-local origin
    origin: Vec2,
    dirty_marks: usize,
    rebuilds: usize,
}

/// Shared-state layout host
///
/// Screen space is viewport-local space shifted by `origin`, y up.
#[derive(Debug, Clone, Default)]
pub struct HeadlessLayout {
    state: Rc<RefCell<LayoutState>>,
}

impl HeadlessLayout {
    /// Viewport of `size` with its top-left at the local origin and an
    /// empty content rectangle
    pub fn new(viewport_size: Vec2) -> Self {
        let layout = Self::unbound();
        {
            let mut state = layout.state.borrow_mut();
            state.viewport = Some(Rect::from_top_left(viewport_size));
            state.content = Some(ContentRect::default());
        }
        layout
    }

    /// Host with neither viewport nor content
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn set_viewport(&self, viewport: Option<Rect>) {
        self.state.borrow_mut().viewport = viewport;
    }

    pub fn set_origin(&self, origin: Vec2) {
        self.state.borrow_mut().origin = origin;
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.state.borrow().viewport
    }

    pub fn content_rect(&self) -> Option<ContentRect> {
        self.state.borrow().content
    }

    pub fn set_content_rect(&self, content: Option<ContentRect>) {
        self.state.borrow_mut().content = content;
    }

    pub fn dirty_marks(&self) -> usize {
        self.state.borrow().dirty_marks
    }

    pub fn rebuilds(&self) -> usize {
        self.state.borrow().rebuilds
    }
}

impl LayoutHost for HeadlessLayout {
    fn viewport_rect(&self) -> Option<Rect> {
        self.viewport()
    }

    fn content(&self) -> Option<ContentRect> {
        self.content_rect()
    }

    fn set_content(&mut self, content: ContentRect) {
        self.state.borrow_mut().content = Some(content);
    }

    fn screen_to_local(&self, screen: Vec2) -> Option<Vec2> {
        let state = self.state.borrow();
        state.viewport.map(|_| screen - state.origin)
    }

    fn mark_layout_dirty(&mut self) {
        self.state.borrow_mut().dirty_marks += 1;
    }

    fn force_layout_rebuild(&mut self) {
        self.state.borrow_mut().rebuilds += 1;
    }
}

// ============================================================================
// Scrollbar
// ============================================================================

#[derive(Debug)]
struct ScrollbarState {
    value: f32,
    size: f32,
    visible: bool,
    thickness: f32,
    value_writes: usize,
}

/// Scrollbar recording the last value, size and visibility it received
#[derive(Debug, Clone)]
pub struct RecordingScrollbar {
    state: Rc<RefCell<ScrollbarState>>,
}

impl RecordingScrollbar {
    /// Visible scrollbar of the given thickness
    pub fn new(thickness: f32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrollbarState {
                value: 0.0,
                size: 1.0,
                visible: true,
                thickness,
                value_writes: 0,
            })),
        }
    }

    pub fn value(&self) -> f32 {
        self.state.borrow().value
    }

    pub fn size(&self) -> f32 {
        self.state.borrow().size
    }

    /// Number of `set_value` calls received
    pub fn value_writes(&self) -> usize {
        self.state.borrow().value_writes
    }
}

impl ScrollbarWidget for RecordingScrollbar {
    fn set_value(&mut self, value: f32) {
        let mut state = self.state.borrow_mut();
        state.value = value;
        state.value_writes += 1;
    }

    fn set_size(&mut self, size: f32) {
        self.state.borrow_mut().size = size;
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    fn thickness(&self) -> f32 {
        self.state.borrow().thickness
    }
}
