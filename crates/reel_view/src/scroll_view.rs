//! Recyclable list view
//!
//! `ScrollView` wires the motion model, bounds tracker, virtual window,
//! snap controller and scrollbar sync to injected host collaborators. The
//! host drives it with [`ScrollView::tick`] once per frame and feeds input
//! through [`ScrollView::handle_input`].
//!
//! # Example
//!
//! ```rust
//! use reel_animation::ManualClock;
//! use reel_core::Vec2;
//! use reel_view::headless::{HeadlessLayout, HeadlessPresenter};
//! use reel_view::{ItemTemplate, ListConfig, ScrollView};
//!
//! let clock = ManualClock::new();
//! let mut view = ScrollView::new(
//!     ListConfig::default().num_items(1_000),
//!     HeadlessPresenter::new(),
//!     HeadlessLayout::new(Vec2::new(320.0, 480.0)),
//!     clock.clone(),
//! );
//! view.set_template(Some(ItemTemplate::new(1, Vec2::new(320.0, 48.0))));
//! view.on_render(|index, _slot| println!("render item {index}"));
//!
//! // One frame to observe layout, one more to build the pool
//! for _ in 0..2 {
//!     clock.advance(1.0 / 60.0);
//!     view.tick();
//! }
//! assert!(view.is_ready());
//! assert_eq!(view.window().len(), 11);
//! ```

use reel_animation::{Clock, Curve, Easing};
use reel_core::fsm::send;
use reel_core::{Axis, InputEvent, Margin, Rect, Vec2};

use crate::bounds::{BoundsTracker, ContentRect};
use crate::config::{AttachSnap, ListConfig, MovementType};
use crate::grid::GridLayout;
use crate::host::{
    ItemTemplate, LayoutHost, RenderCallback, ScrollbarWidget, SlotPresenter, ValueChangedCallback,
};
use crate::lifecycle::{lifecycle_events, InitState};
use crate::motion::{Coast, MotionModel, MotionPhase};
use crate::scrollbar::ScrollbarSync;
use crate::snap::{resolve_target, AutoScroll, ScrollTarget};
use crate::window::{VirtualWindow, WindowUpdate};

/// Content pivot used once the list is built (top-left corner)
const CONTENT_PIVOT: Vec2 = Vec2::new(0.0, 1.0);

pub struct ScrollView<P: SlotPresenter> {
    config: ListConfig,
    template: Option<ItemTemplate>,
    /// Configured item size with zero components taken from the template
    item_size: Vec2,

    presenter: P,
    layout: Box<dyn LayoutHost>,
    clock: Box<dyn Clock>,
    scrollbars: ScrollbarSync,

    bounds: BoundsTracker,
    motion: MotionModel,
    auto_scroll: Option<AutoScroll>,
    window: VirtualWindow<P::Handle>,

    init: InitState,
    has_rebuilt_layout: bool,

    on_render: Option<RenderCallback<P::Handle>>,
    on_value_changed: Option<ValueChangedCallback>,
}

impl<P: SlotPresenter> ScrollView<P> {
    pub fn new(
        config: ListConfig,
        presenter: P,
        layout: impl LayoutHost + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            item_size: config.item_size,
            config,
            template: None,
            presenter,
            layout: Box::new(layout),
            clock: Box::new(clock),
            scrollbars: ScrollbarSync::new(),
            bounds: BoundsTracker::new(),
            motion: MotionModel::new(),
            auto_scroll: None,
            window: VirtualWindow::new(),
            init: InitState::Uninitialized,
            has_rebuilt_layout: false,
            on_render: None,
            on_value_changed: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn template(&self) -> Option<&ItemTemplate> {
        self.template.as_ref()
    }

    /// Resolved item size
    pub fn item_size(&self) -> Vec2 {
        self.item_size
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn window(&self) -> &VirtualWindow<P::Handle> {
        &self.window
    }

    pub fn bounds(&self) -> &BoundsTracker {
        &self.bounds
    }

    pub fn init_state(&self) -> InitState {
        self.init
    }

    pub fn is_ready(&self) -> bool {
        self.init.is_ready()
    }

    /// Geometry for the current configuration
    pub fn grid(&self) -> GridLayout {
        GridLayout::new(&self.config, self.item_size)
    }

    pub fn num_items(&self) -> usize {
        self.config.num_items
    }

    /// Leading line of the last window pass
    pub fn current_line(&self) -> Option<i64> {
        self.window.current_line()
    }

    /// Content position relative to its anchor
    pub fn content_position(&self) -> Vec2 {
        self.layout
            .content()
            .map(|content| content.position)
            .unwrap_or_default()
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity()
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.motion.set_velocity(velocity);
    }

    pub fn is_dragging(&self) -> bool {
        self.motion.is_dragging()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_some()
    }

    pub fn motion_phase(&self) -> MotionPhase {
        let offset =
            self.bounds
                .calculate_offset(Vec2::ZERO, self.config.motion, self.config.movement);
        self.motion
            .phase(self.auto_scroll.is_some(), !offset.is_zero())
    }

    pub fn normalized_position(&self) -> Vec2 {
        self.bounds.normalized_position()
    }

    /// Viewport room taken by visible expand-viewport scrollbars
    pub fn viewport_inset(&self) -> Vec2 {
        self.scrollbars.viewport_inset(&self.config)
    }

    // =========================================================================
    // Callbacks and collaborators
    // =========================================================================

    /// Called with `(actual_index, handle)` whenever a slot needs content
    pub fn on_render<F>(&mut self, callback: F)
    where
        F: FnMut(usize, &P::Handle) + 'static,
    {
        self.on_render = Some(Box::new(callback));
    }

    /// Called with the normalized position when bounds or position changed
    pub fn on_value_changed<F>(&mut self, callback: F)
    where
        F: FnMut(Vec2) + 'static,
    {
        self.on_value_changed = Some(Box::new(callback));
    }

    pub fn set_scrollbar(&mut self, axis: Axis, scrollbar: Option<Box<dyn ScrollbarWidget>>) {
        self.scrollbars.set(axis, scrollbar);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Host notification that a layout pass finished
    pub fn on_layout_complete(&mut self) {
        let has_area = self
            .layout
            .viewport_rect()
            .is_some_and(|view| view.has_area());
        if has_area {
            send(&mut self.init, lifecycle_events::LAYOUT_COMPLETE);
        }
    }

    /// Host notification after layout positioned the view
    pub fn on_post_layout(&mut self) {
        self.update_bounds();
        self.scrollbars.update(&self.bounds, Vec2::ZERO);
        let position = self.content_position();
        self.bounds.commit(position);
        self.has_rebuilt_layout = true;
        self.on_layout_complete();
    }

    /// Ask the host for an immediate layout pass if none has happened yet
    pub fn ensure_layout_rebuilt(&mut self) {
        if !self.has_rebuilt_layout {
            self.layout.force_layout_rebuild();
            self.on_post_layout();
        }
    }

    /// Re-run the two-phase initialization; the pool is kept
    pub fn reset_list(&mut self) {
        send(&mut self.init, lifecycle_events::RESET);
        self.window.invalidate();
    }

    /// Destroy the pool and return to `Uninitialized`
    pub fn teardown(&mut self) {
        self.window.clear(&mut self.presenter);
        self.auto_scroll = None;
        self.motion = MotionModel::new();
        self.has_rebuilt_layout = false;
        send(&mut self.init, lifecycle_events::TEARDOWN);
    }

    fn rebuild_list(&mut self) {
        let (Some(_), Some(mut content), Some(_)) = (
            self.layout.viewport_rect(),
            self.layout.content(),
            self.template,
        ) else {
            tracing::warn!("list cannot be built: viewport, content or item template is missing");
            return;
        };

        if content.pivot != CONTENT_PIVOT {
            content.pivot = CONTENT_PIVOT;
            self.layout.set_content(content);
        }
        tracing::debug!("building list for {} items", self.config.num_items);
        self.rebuild_geometry();
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.init == InitState::AwaitingLayout
            && send(&mut self.init, lifecycle_events::FRAME_END)
        {
            self.rebuild_list();
        }
        if self.layout.content().is_none() {
            return;
        }

        self.ensure_layout_rebuilt();
        self.scrollbars.update_visibility(&self.bounds, &self.config);
        self.update_bounds();

        let dt = self.clock.delta_time();
        let offset =
            self.bounds
                .calculate_offset(Vec2::ZERO, self.config.motion, self.config.movement);

        if let Some(scroll) = self.auto_scroll {
            let (position, arrived) = scroll.sample(self.clock.time(), self.config.motion);
            self.set_content_position(position);
            if arrived {
                tracing::debug!("auto-scroll arrived at {:?}", scroll.to);
                self.auto_scroll = None;
            }
        } else {
            let position = self.content_position();
            match self
                .motion
                .coast(dt, position, offset, &self.bounds, &self.config)
            {
                Coast::Hold => {}
                Coast::MoveTo(next) => self.set_content_position(next),
                Coast::Snap => {
                    self.scroll_to_target(ScrollTarget::Nearest, self.config.attach_snap.duration)
                }
            }
        }

        if self.config.inertia {
            self.motion.track_drag_velocity(
                self.content_position(),
                self.bounds.previous_position(),
                dt,
            );
        }

        let position = self.content_position();
        if self.bounds.changed(position) {
            self.scrollbars.update(&self.bounds, offset);
            let normalized = self.bounds.normalized_position();
            if let Some(callback) = self.on_value_changed.as_mut() {
                callback(normalized);
            }
            self.bounds.commit(position);
            self.update_position(false);
            self.apply_scale_curve();
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Single entry point for pointer and wheel input
    ///
    /// Any input cancels an in-flight auto-scroll. Non-primary buttons are
    /// ignored.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !event.is_primary() {
            tracing::trace!("ignoring {:?}", event);
            return;
        }
        if self.layout.content().is_none() {
            return;
        }
        if self.auto_scroll.take().is_some() {
            tracing::debug!("auto-scroll cancelled by input");
        }

        match event {
            InputEvent::Begin { position, .. } => {
                self.motion.stop();
                self.update_bounds();
                if let Some(local) = self.layout.screen_to_local(position) {
                    let content = self.content_position();
                    self.motion.begin_drag(local, content);
                }
            }
            InputEvent::Drag { position, .. } => {
                if !self.motion.is_dragging() {
                    return;
                }
                let Some(local) = self.layout.screen_to_local(position) else {
                    return;
                };
                self.update_bounds();
                let target = self.motion.drag_target(
                    local,
                    self.content_position(),
                    &self.bounds,
                    &self.config,
                );
                self.set_content_position(target);
            }
            InputEvent::End { .. } => {
                self.motion.end_drag();
            }
            InputEvent::Scroll { delta } => {
                self.ensure_layout_rebuilt();
                self.update_bounds();
                let target = self.motion.wheel_target(
                    delta,
                    self.content_position(),
                    &self.bounds,
                    &self.config,
                );
                self.set_content_position(target);
            }
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Ease to the line holding `index` over `duration` seconds
    pub fn scroll_to(&mut self, index: usize, duration: f32) {
        self.scroll_to_target(ScrollTarget::Index(index), duration);
    }

    /// Jump to the first item
    pub fn back_top(&mut self) {
        self.scroll_to(0, 0.0);
    }

    pub fn scroll_to_target(&mut self, target: ScrollTarget, duration: f32) {
        self.motion.stop();
        if !self.is_ready() {
            tracing::debug!("scroll to {:?} ignored, list not ready", target);
            return;
        }
        self.update_bounds();

        let axis = self.config.motion;
        let from = self.content_position();
        let to = resolve_target(
            target,
            &self.grid(),
            from,
            self.bounds.content().size.along(axis),
            self.bounds.view().size.along(axis),
        );
        tracing::debug!("auto-scroll to {:?}: {:?} -> {:?} in {}s", target, from, to, duration);
        self.auto_scroll = Some(AutoScroll::new(
            from,
            to,
            self.clock.time(),
            duration,
            self.config.snap_easing,
        ));
    }

    pub fn stop_movement(&mut self) {
        self.motion.stop();
    }

    pub fn set_normalized_position(&mut self, position: Vec2) {
        self.set_normalized(Axis::Horizontal, position.x);
        self.set_normalized(Axis::Vertical, position.y);
    }

    pub fn set_horizontal_normalized_position(&mut self, value: f32) {
        self.set_normalized(Axis::Horizontal, value);
    }

    pub fn set_vertical_normalized_position(&mut self, value: f32) {
        self.set_normalized(Axis::Vertical, value);
    }

    /// Scrollbar drag on `axis`
    pub fn on_scrollbar_value_changed(&mut self, axis: Axis, value: f32) {
        self.set_normalized(axis, value);
    }

    fn set_normalized(&mut self, axis: Axis, value: f32) {
        self.ensure_layout_rebuilt();
        self.update_bounds();
        let current = self.content_position();
        if let Some(position) = self.bounds.position_for_normalized(axis, value, current) {
            self.write_position(position);
            self.motion.stop_axis(axis);
        }
    }

    // =========================================================================
    // Dataset and configuration
    // =========================================================================

    /// Force a full reposition and render pass
    pub fn refresh_list(&mut self) {
        self.update_position(true);
    }

    pub fn set_num_items(&mut self, num_items: usize) {
        self.config.num_items = num_items;
        if self.is_ready() {
            self.apply_num_items();
        }
    }

    /// Swap the item template; the pool is destroyed and rebuilt
    pub fn set_template(&mut self, template: Option<ItemTemplate>) {
        self.window.clear(&mut self.presenter);
        self.auto_scroll = None;
        self.motion.stop();
        self.template = template;
        self.item_size = self.resolve_item_size();
        if self.is_ready() {
            self.rebuild_geometry();
        }
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.config.looping = looping;
        if !self.is_ready() {
            return;
        }
        if looping {
            if let (Some(view), Some(template)) = (self.layout.viewport_rect(), self.template) {
                let max_init = self.grid().max_init(view.size);
                self.window.grow(max_init, &template, &mut self.presenter);
            }
        }
        self.refresh_list();
    }

    pub fn set_fixed_count(&mut self, fixed_count: u32) {
        self.config.fixed_count = fixed_count.max(1);
        self.geometry_changed();
    }

    pub fn set_item_size(&mut self, item_size: Vec2) {
        self.config.item_size = item_size;
        self.geometry_changed();
    }

    pub fn set_spacing(&mut self, spacing: Vec2) {
        self.config.spacing = spacing;
        self.geometry_changed();
    }

    pub fn set_margin(&mut self, margin: Margin) {
        self.config.margin = margin;
        self.geometry_changed();
    }

    pub fn set_motion(&mut self, axis: Axis) {
        self.config.motion = axis;
        self.geometry_changed();
    }

    pub fn set_movement(&mut self, movement: MovementType) {
        self.config.movement = movement;
    }

    pub fn set_elasticity(&mut self, elasticity: f32) {
        self.config.elasticity = elasticity;
    }

    pub fn set_inertia(&mut self, inertia: bool) {
        self.config.inertia = inertia;
    }

    pub fn set_deceleration_rate(&mut self, rate: f32) {
        self.config.deceleration_rate = rate;
    }

    pub fn set_scroll_sensitivity(&mut self, sensitivity: f32) {
        self.config.scroll_sensitivity = sensitivity;
    }

    /// Enable snapping with `snap`, or disable it with None
    pub fn set_auto_attach(&mut self, snap: Option<AttachSnap>) {
        self.config.auto_attach = snap.is_some();
        if let Some(snap) = snap {
            self.config.attach_snap = snap;
        }
    }

    pub fn set_snap_easing(&mut self, easing: Easing) {
        self.config.snap_easing = easing;
    }

    pub fn set_scale_curve(&mut self, curve: Option<Curve>) {
        self.config.scale_curve = curve;
        if self.config.scale_curve.is_none() {
            for slot in self.window.slots() {
                self.presenter.set_scale(&slot.handle, 1.0);
            }
        } else {
            self.apply_scale_curve();
        }
    }

    /// Replace the whole configuration and rebuild geometry
    pub fn apply_config(&mut self, config: ListConfig) {
        self.config = config;
        self.geometry_changed();
    }

    fn geometry_changed(&mut self) {
        self.item_size = self.resolve_item_size();
        if self.is_ready() {
            self.rebuild_geometry();
        }
    }

    fn resolve_item_size(&self) -> Vec2 {
        let natural = self.template.map(|t| t.size).unwrap_or_default();
        let configured = self.config.item_size;
        Vec2::new(
            if configured.x > 0.0 { configured.x } else { natural.x },
            if configured.y > 0.0 { configured.y } else { natural.y },
        )
    }

    /// Recompute pool size and content size, then reposition every slot
    fn rebuild_geometry(&mut self) {
        self.item_size = self.resolve_item_size();
        let Some(view) = self.layout.viewport_rect() else {
            return;
        };
        let max_init = self.grid().max_init(view.size);
        self.window.set_max_init(max_init);
        self.apply_num_items();
    }

    fn apply_num_items(&mut self) {
        let (Some(view), Some(template)) = (self.layout.viewport_rect(), self.template) else {
            return;
        };
        let grid = self.grid();
        self.window
            .grow(grid.pool_target(view.size), &template, &mut self.presenter);
        self.set_content_size(grid.content_size(view.size));
        self.refresh_list();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn update_bounds(&mut self) {
        if let (Some(view), Some(content)) = (self.layout.viewport_rect(), self.layout.content()) {
            self.bounds.update(view, &content);
        }
    }

    fn set_content_size(&mut self, size: Vec2) {
        let Some(mut content) = self.layout.content() else {
            return;
        };
        if content.size != size {
            content.size = size;
            self.layout.set_content(content);
            self.layout.mark_layout_dirty();
            self.update_bounds();
        }
    }

    /// Move the content along the motion axis only
    fn set_content_position(&mut self, position: Vec2) {
        let current = self.content_position();
        let axis = self.config.motion;
        self.write_position(current.with_along(axis, position.along(axis)));
    }

    fn write_position(&mut self, position: Vec2) {
        let Some(mut content) = self.layout.content() else {
            return;
        };
        if content.position != position {
            tracing::trace!("content {:?} -> {:?}", content.position, position);
            content.position = position;
            self.layout.set_content(content);
            self.update_bounds();
        }
    }

    fn update_position(&mut self, force: bool) -> Option<WindowUpdate> {
        if !self.is_ready() {
            return None;
        }
        let grid = self.grid();
        let line = grid.line_at(self.content_position());
        let update = self.window.update(
            line,
            force,
            &grid,
            &mut self.presenter,
            self.on_render.as_mut(),
        )?;
        if force {
            self.apply_scale_curve();
        }
        Some(update)
    }

    fn apply_scale_curve(&mut self) {
        let Some(curve) = self.config.scale_curve.as_ref() else {
            return;
        };
        let (Some(view), Some(content)) = (self.layout.viewport_rect(), self.layout.content())
        else {
            return;
        };
        let axis = self.config.motion;
        let view_len = view.size.along(axis);
        if view_len <= 0.0 {
            return;
        }

        let top_left = content_top_left(view, &content);
        let center = view.center().along(axis);
        for slot in self.window.active_slots() {
            let item_center = (top_left + slot.position).along(axis);
            let ratio = (item_center - center).abs() / view_len;
            self.presenter.set_scale(&slot.handle, curve.evaluate(ratio));
        }
    }
}

/// Content top-left corner in viewport-local space
fn content_top_left(view: Rect, content: &ContentRect) -> Vec2 {
    let bounds = content.bounds_in(view);
    Vec2::new(bounds.min().x, bounds.max().y)
}

impl<P: SlotPresenter> std::fmt::Debug for ScrollView<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("init", &self.init)
            .field("num_items", &self.config.num_items)
            .field("pool", &self.window.len())
            .field("line", &self.window.current_line())
            .field("position", &self.content_position())
            .field("velocity", &self.motion.velocity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessLayout, HeadlessPresenter, RecordingScrollbar, SlotId};
    use reel_animation::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    struct Harness {
        view: ScrollView<HeadlessPresenter>,
        layout: HeadlessLayout,
        clock: ManualClock,
        rendered: Rc<RefCell<Vec<usize>>>,
    }

    impl Harness {
        fn new(config: ListConfig) -> Self {
            let layout = HeadlessLayout::new(Vec2::new(100.0, 200.0));
            let clock = ManualClock::new();
            let mut view = ScrollView::new(config, HeadlessPresenter::new(), layout.clone(), clock.clone());
            view.set_template(Some(ItemTemplate::new(1, Vec2::new(100.0, 40.0))));
            let rendered = Rc::new(RefCell::new(Vec::new()));
            let sink = rendered.clone();
            view.on_render(move |index, _: &SlotId| sink.borrow_mut().push(index));
            Self {
                view,
                layout,
                clock,
                rendered,
            }
        }

        fn ready(config: ListConfig) -> Self {
            let mut harness = Self::new(config);
            harness.frames(2);
            harness
        }

        fn frames(&mut self, n: usize) {
            for _ in 0..n {
                self.clock.advance(DT);
                self.view.tick();
            }
        }

        fn take_rendered(&self) -> Vec<usize> {
            std::mem::take(&mut *self.rendered.borrow_mut())
        }
    }

    #[test]
    fn test_init_deferred_one_frame() {
        let mut h = Harness::new(ListConfig::default().num_items(100));
        assert_eq!(h.view.init_state(), InitState::Uninitialized);
        h.frames(1);
        assert_eq!(h.view.init_state(), InitState::AwaitingLayout);
        assert!(h.view.window().is_empty());
        h.frames(1);
        assert!(h.view.is_ready());
        assert_eq!(h.view.window().len(), 6);
        assert_eq!(h.take_rendered(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(h.layout.rebuilds(), 1);
        let content = h.layout.content_rect().unwrap();
        assert_eq!(content.size, Vec2::new(100.0, 4000.0));
        assert_eq!(content.pivot, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_missing_template_is_soft() {
        let layout = HeadlessLayout::new(Vec2::new(100.0, 200.0));
        let clock = ManualClock::new();
        let mut view = ScrollView::new(
            ListConfig::default().num_items(10),
            HeadlessPresenter::new(),
            layout,
            clock.clone(),
        );
        for _ in 0..3 {
            clock.advance(DT);
            view.tick();
        }
        assert!(view.is_ready());
        assert!(view.window().is_empty());
        view.scroll_to(5, 0.2);
        view.refresh_list();
    }

    #[test]
    fn test_unbound_layout_is_noop() {
        let clock = ManualClock::new();
        let mut view = ScrollView::new(
            ListConfig::default().num_items(10),
            HeadlessPresenter::new(),
            HeadlessLayout::unbound(),
            clock.clone(),
        );
        view.set_template(Some(ItemTemplate::new(1, Vec2::splat(10.0))));
        clock.advance(DT);
        view.tick();
        view.handle_input(InputEvent::Scroll {
            delta: Vec2::new(0.0, -1.0),
        });
        assert_eq!(view.init_state(), InitState::Uninitialized);
        assert!(view.window().is_empty());
    }

    #[test]
    fn test_drag_scrolls_and_recycles() {
        let mut h = Harness::ready(ListConfig::default().num_items(100).inertia(false));
        h.take_rendered();

        h.view.handle_input(InputEvent::Begin {
            position: Vec2::new(50.0, -100.0),
            button: Default::default(),
        });
        h.view.handle_input(InputEvent::Drag {
            position: Vec2::new(70.0, -20.0),
            button: Default::default(),
        });
        assert_eq!(h.view.content_position(), Vec2::new(0.0, 80.0));
        h.frames(1);
        assert_eq!(h.view.current_line(), Some(2));
        assert_eq!(h.take_rendered(), vec![6, 7]);

        h.view.handle_input(InputEvent::End {
            button: Default::default(),
        });
        h.frames(3);
        assert_eq!(h.view.content_position(), Vec2::new(0.0, 80.0));
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.handle_input(InputEvent::Begin {
            position: Vec2::ZERO,
            button: reel_core::PointerButton::Secondary,
        });
        assert!(!h.view.is_dragging());
    }

    #[test]
    fn test_fling_coasts_then_stops() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.set_velocity(Vec2::new(0.0, 600.0));
        h.frames(1);
        assert_eq!(h.view.motion_phase(), MotionPhase::Coasting);
        h.frames(600);
        assert_eq!(h.view.velocity(), Vec2::ZERO);
        assert_eq!(h.view.motion_phase(), MotionPhase::Idle);
        assert!(h.view.content_position().y > 100.0);
    }

    #[test]
    fn test_elastic_springs_back_from_top() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.handle_input(InputEvent::Scroll {
            delta: Vec2::new(0.0, 50.0),
        });
        assert_eq!(h.view.content_position().y, -50.0);
        h.frames(1);
        assert_eq!(h.view.motion_phase(), MotionPhase::Returning);
        h.frames(120);
        assert!(h.view.content_position().y.abs() < 0.5);
    }

    #[test]
    fn test_clamped_shrink_pulls_content_back() {
        let mut h = Harness::ready(
            ListConfig::default()
                .num_items(100)
                .movement(MovementType::Clamped),
        );
        h.view.set_vertical_normalized_position(0.0);
        h.frames(1);
        assert_eq!(h.view.content_position().y, 3800.0);

        // 10 rows of 40 in a 200 viewport: max scroll 200
        h.view.set_num_items(10);
        h.frames(1);
        assert_eq!(h.view.content_position().y, 200.0);
        assert_eq!(h.view.current_line(), Some(5));
        assert_eq!(h.view.window().active_count(), 5);
        h.frames(10);
        assert_eq!(h.view.content_position().y, 200.0);
        assert_eq!(h.view.motion_phase(), MotionPhase::Idle);
    }

    #[test]
    fn test_clamped_fling_stops_at_edge() {
        let mut h = Harness::ready(
            ListConfig::default()
                .num_items(100)
                .movement(MovementType::Clamped),
        );
        h.view.set_vertical_normalized_position(0.1);
        h.view.set_velocity(Vec2::new(0.0, 3000.0));
        for _ in 0..300 {
            h.frames(1);
            assert!(h.view.content_position().y <= 3800.01);
        }
        assert!((h.view.content_position().y - 3800.0).abs() < 0.01);
        assert_eq!(h.view.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_elastic_return_settles_exactly() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.set_vertical_normalized_position(0.0);
        h.view.handle_input(InputEvent::Scroll {
            delta: Vec2::new(0.0, -50.0),
        });
        assert_eq!(h.view.content_position().y, 3850.0);

        h.frames(300);
        assert!((h.view.content_position().y - 3800.0).abs() < 1e-3);
        assert_eq!(h.view.velocity(), Vec2::ZERO);
        assert_eq!(h.view.motion_phase(), MotionPhase::Idle);
    }

    #[test]
    fn test_scroll_to_eases_and_arrives() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.take_rendered();
        h.view.scroll_to(50, 0.5);
        assert!(h.view.is_auto_scrolling());
        h.frames(10);
        let y = h.view.content_position().y;
        assert!(y > 0.0 && y < 2000.0);
        h.frames(30);
        assert!(!h.view.is_auto_scrolling());
        assert_eq!(h.view.content_position(), Vec2::new(0.0, 2000.0));
        assert_eq!(h.view.current_line(), Some(50));
        assert!(h.view.window().slot_for(50).is_some());
    }

    #[test]
    fn test_input_cancels_auto_scroll() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.scroll_to(50, 1.0);
        h.frames(5);
        h.view.handle_input(InputEvent::Begin {
            position: Vec2::ZERO,
            button: Default::default(),
        });
        assert!(!h.view.is_auto_scrolling());
        assert_eq!(h.view.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_back_top_jumps() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.set_vertical_normalized_position(0.0);
        assert_eq!(h.view.content_position().y, 3800.0);
        h.view.back_top();
        h.frames(1);
        assert_eq!(h.view.content_position().y, 0.0);
    }

    #[test]
    fn test_normalized_setter_zeroes_axis_velocity() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.set_velocity(Vec2::new(3.0, 500.0));
        h.view.on_scrollbar_value_changed(Axis::Vertical, 0.5);
        assert_eq!(h.view.content_position().y, 1900.0);
        assert_eq!(h.view.velocity(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_value_changed_only_on_change() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        h.view.on_value_changed(move |v| sink.borrow_mut().push(v));
        h.frames(3);
        assert!(values.borrow().is_empty());

        h.view.handle_input(InputEvent::Scroll {
            delta: Vec2::new(0.0, -40.0),
        });
        h.frames(1);
        assert_eq!(values.borrow().len(), 1);
        h.frames(3);
        assert_eq!(values.borrow().len(), 1);
    }

    #[test]
    fn test_auto_attach_snaps_to_line() {
        let mut h = Harness::ready(
            ListConfig::default()
                .num_items(100)
                .auto_attach(AttachSnap::default()),
        );
        h.view.handle_input(InputEvent::Scroll {
            delta: Vec2::new(0.0, -65.0),
        });
        h.view.set_velocity(Vec2::new(0.0, 1.0));
        h.frames(60);
        assert_eq!(h.view.content_position().y, 80.0);
    }

    #[test]
    fn test_template_change_rebuilds_pool() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.scroll_to(40, 1.0);
        h.view
            .set_template(Some(ItemTemplate::new(2, Vec2::new(100.0, 100.0))));
        assert!(!h.view.is_auto_scrolling());
        assert_eq!(h.view.presenter().destroyed(), 6);
        assert_eq!(h.view.window().len(), 3);
        assert!(h
            .view
            .presenter()
            .iter()
            .all(|(_, slot)| slot.template == 2));
    }

    #[test]
    fn test_set_num_items_grows_pool_and_content() {
        let mut h = Harness::ready(ListConfig::default().num_items(2));
        assert_eq!(h.view.window().len(), 2);
        h.view.set_num_items(50);
        assert_eq!(h.view.window().len(), 6);
        assert_eq!(h.layout.content_rect().unwrap().size.y, 2000.0);
        h.view.set_num_items(1);
        assert_eq!(h.view.window().len(), 6);
        assert_eq!(h.view.window().active_count(), 1);
    }

    #[test]
    fn test_set_loop_grows_pool() {
        let mut h = Harness::ready(ListConfig::default().num_items(3));
        assert_eq!(h.view.window().len(), 3);
        h.take_rendered();
        h.view.set_loop(true);
        assert_eq!(h.view.window().len(), 6);
        assert_eq!(h.take_rendered(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_fixed_count_change_repositions() {
        let mut h = Harness::ready(ListConfig::default().num_items(10));
        h.take_rendered();
        h.view.set_item_size(Vec2::new(50.0, 40.0));
        h.view.set_fixed_count(2);
        assert_eq!(h.view.window().max_init(), 12);
        assert_eq!(h.view.window().len(), 10);
        assert_eq!(h.layout.content_rect().unwrap().size, Vec2::new(100.0, 200.0));
        let slot = h.view.window().slot_for(3).unwrap();
        assert_eq!(slot.position, Vec2::new(75.0, -60.0));
    }

    #[test]
    fn test_scale_curve_applied() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.set_scale_curve(Some(Curve::linear(1.0, 0.0)));
        let slot = h.view.window().slot_for(0).unwrap().handle;
        let scale = h.view.presenter().get(slot).unwrap().scale;
        // Item 0 centre sits 80 above the viewport centre
        assert!((scale - 0.6).abs() < 1e-5);

        h.view.set_scale_curve(None);
        assert_eq!(h.view.presenter().get(slot).unwrap().scale, 1.0);
    }

    #[test]
    fn test_auto_hide_scrollbar_and_inset() {
        let mut config = ListConfig::default().num_items(2);
        config.vertical_scrollbar.visibility =
            crate::config::ScrollbarVisibility::AutoHideAndExpandViewport;
        let mut h = Harness::new(config);
        let bar = RecordingScrollbar::new(6.0);
        h.view.set_scrollbar(Axis::Vertical, Some(Box::new(bar.clone())));
        h.frames(3);
        assert!(!bar.is_visible());
        assert_eq!(h.view.viewport_inset(), Vec2::ZERO);

        h.view.set_num_items(100);
        h.frames(1);
        assert!(bar.is_visible());
        assert_eq!(h.view.viewport_inset(), Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_reset_keeps_pool() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.take_rendered();
        h.view.reset_list();
        assert_eq!(h.view.init_state(), InitState::AwaitingLayout);
        h.frames(1);
        assert!(h.view.is_ready());
        assert_eq!(h.view.presenter().instantiated(), 6);
        assert_eq!(h.take_rendered().len(), 6);
    }

    #[test]
    fn test_teardown_destroys_pool() {
        let mut h = Harness::ready(ListConfig::default().num_items(100));
        h.view.teardown();
        assert_eq!(h.view.init_state(), InitState::Uninitialized);
        assert_eq!(h.view.presenter().live(), 0);
    }
}
