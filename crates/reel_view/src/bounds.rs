//! Viewport and content bounds tracking
//!
//! Bounds are recomputed every tick from the layout host. Previous
//! snapshots gate observable work (scrollbars, value-changed callback,
//! window updates) so nothing fires when nothing moved.

use reel_core::{Axis, Bounds, Rect, Vec2};

use crate::config::MovementType;

/// Content below this excess over the viewport is not considered scrollable
const SCROLL_EPSILON: f32 = 0.01;

// ============================================================================
// Content Rect
// ============================================================================

/// The content rectangle, anchored at the viewport's top-left corner
///
/// `position` is the offset of the content's pivot from that anchor. With
/// the default pivot `(0, 1)` the pivot is the content's top-left corner,
/// so scrolling a vertical list down increases `position.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRect {
    pub position: Vec2,
    pub size: Vec2,
    pub pivot: Vec2,
}

impl Default for ContentRect {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            pivot: Vec2::new(0.0, 1.0),
        }
    }
}

impl ContentRect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Default::default()
        }
    }

    /// Content bounds in viewport-local space
    pub fn bounds_in(&self, view: Rect) -> Bounds {
        let anchor = Vec2::new(view.min.x, view.max().y);
        let min = Vec2::new(
            anchor.x + self.position.x - self.pivot.x * self.size.x,
            anchor.y + self.position.y - self.pivot.y * self.size.y,
        );
        Bounds::from_corners(min, min + self.size)
    }
}

// ============================================================================
// Bounds Tracker
// ============================================================================

/// Current and previous viewport/content bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsTracker {
    view: Bounds,
    content: Bounds,
    prev_view: Bounds,
    prev_content: Bounds,
    prev_position: Vec2,
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Bounds {
        self.view
    }

    pub fn content(&self) -> Bounds {
        self.content
    }

    /// Recompute bounds from the host rectangles
    ///
    /// Content smaller than the viewport is treated as viewport-sized,
    /// positioned according to its pivot.
    pub fn update(&mut self, view: Rect, content: &ContentRect) {
        self.view = Bounds::from(view);
        let mut bounds = content.bounds_in(view);

        let excess = self.view.size - bounds.size;
        if excess.x > 0.0 {
            bounds.center.x -= excess.x * (content.pivot.x - 0.5);
            bounds.size.x = self.view.size.x;
        }
        if excess.y > 0.0 {
            bounds.center.y -= excess.y * (content.pivot.y - 0.5);
            bounds.size.y = self.view.size.y;
        }
        self.content = bounds;
    }

    /// Distance the content must move along `axis` to sit inside the
    /// viewport after being moved by `delta`
    pub fn calculate_offset(&self, delta: Vec2, axis: Axis, movement: MovementType) -> Vec2 {
        let mut offset = Vec2::ZERO;
        if movement == MovementType::Unrestricted {
            return offset;
        }

        let min = self.content.min() + delta;
        let max = self.content.max() + delta;
        let view_min = self.view.min();
        let view_max = self.view.max();

        match axis {
            Axis::Horizontal => {
                if min.x > view_min.x {
                    offset.x = view_min.x - min.x;
                } else if max.x < view_max.x {
                    offset.x = view_max.x - max.x;
                }
            }
            Axis::Vertical => {
                if max.y < view_max.y {
                    offset.y = view_max.y - max.y;
                } else if min.y > view_min.y {
                    offset.y = view_min.y - min.y;
                }
            }
        }
        offset
    }

    /// Normalized scroll position along an axis
    ///
    /// Horizontal 0 is the left edge; vertical 1 is the top edge.
    pub fn normalized(&self, axis: Axis) -> f32 {
        let a = axis.index();
        let view_min = self.view.min()[a];
        let content_min = self.content.min()[a];
        let hidden = self.content.size[a] - self.view.size[a];
        if hidden <= 0.0 {
            return if view_min > content_min { 1.0 } else { 0.0 };
        }
        (view_min - content_min) / hidden
    }

    pub fn normalized_position(&self) -> Vec2 {
        Vec2::new(
            self.normalized(Axis::Horizontal),
            self.normalized(Axis::Vertical),
        )
    }

    /// Content position that puts the view at `value` along `axis`
    ///
    /// Returns None when the change would be below 0.01 units.
    pub fn position_for_normalized(&self, axis: Axis, value: f32, position: Vec2) -> Option<Vec2> {
        let a = axis.index();
        let hidden = self.content.size[a] - self.view.size[a];
        let target_min = self.view.min()[a] - value * hidden;
        let target = position[a] + target_min - self.content.min()[a];
        if (position[a] - target).abs() > SCROLL_EPSILON {
            let mut moved = position;
            moved[a] = target;
            Some(moved)
        } else {
            None
        }
    }

    /// Content exceeds the viewport along `axis`
    pub fn scrolling_needed(&self, axis: Axis) -> bool {
        let a = axis.index();
        self.content.size[a] > self.view.size[a] + SCROLL_EPSILON
    }

    /// Scrollbar handle size along `axis`, shrinking while overscrolled
    pub fn scrollbar_size(&self, axis: Axis, offset: Vec2) -> f32 {
        let a = axis.index();
        if self.content.size[a] > 0.0 {
            ((self.view.size[a] - offset[a].abs()) / self.content.size[a]).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Anything observable moved since the last [`commit`](Self::commit)
    pub fn changed(&self, position: Vec2) -> bool {
        self.view != self.prev_view
            || self.content != self.prev_content
            || position != self.prev_position
    }

    /// Snapshot the current state
    pub fn commit(&mut self, position: Vec2) {
        self.prev_view = self.view;
        self.prev_content = self.content;
        self.prev_position = position;
    }

    pub fn previous_position(&self) -> Vec2 {
        self.prev_position
    }
}
