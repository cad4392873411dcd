//! Line/column geometry of the list
//!
//! A list is a sequence of lines along the motion axis, each holding
//! `fixed_count` items across it. Positions are item centres in
//! content-local space, measured from the content's top-left corner.

use reel_core::{Axis, Margin, Vec2};

use crate::config::ListConfig;

/// Resolved geometry for the current configuration and dataset size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub axis: Axis,
    pub item_size: Vec2,
    pub spacing: Vec2,
    pub margin: Margin,
    pub fixed_count: usize,
    pub num_items: usize,
    pub looping: bool,
}

impl GridLayout {
    /// Geometry for `config` with the item size already resolved
    pub fn new(config: &ListConfig, item_size: Vec2) -> Self {
        Self {
            axis: config.motion,
            item_size,
            spacing: config.spacing,
            margin: config.margin,
            fixed_count: config.fixed_count.max(1) as usize,
            num_items: config.num_items,
            looping: config.looping,
        }
    }

    /// Item extent plus spacing along the motion axis
    pub fn cell_size(&self) -> f32 {
        self.item_size.along(self.axis) + self.spacing.along(self.axis)
    }

    pub fn total_lines(&self) -> usize {
        self.num_items.div_ceil(self.fixed_count)
    }

    /// Margin before the first line; looping lists have no leading edge
    fn lead(&self) -> f32 {
        if self.looping {
            0.0
        } else {
            self.margin.leading(self.axis)
        }
    }

    /// Slots needed to cover one viewport plus one overscan line
    pub fn max_init(&self, view_size: Vec2) -> usize {
        let cell = self.cell_size();
        if cell <= 0.0 {
            tracing::warn!("list cell size is {}, no slots can be laid out", cell);
            return 0;
        }
        let lines = (view_size.along(self.axis) / cell).ceil().max(0.0) as usize + 1;
        lines * self.fixed_count
    }

    /// Pool size for the current loop flag and dataset size
    pub fn pool_target(&self, view_size: Vec2) -> usize {
        let max_init = self.max_init(view_size);
        if self.looping {
            max_init
        } else {
            self.num_items.min(max_init)
        }
    }

    /// Distance scrolled into the list for a content position
    pub fn scroll_distance(&self, position: Vec2) -> f32 {
        match self.axis {
            Axis::Vertical => position.y,
            Axis::Horizontal => -position.x,
        }
    }

    /// Content position at a scroll distance, keeping the cross axis
    pub fn position_at_distance(&self, position: Vec2, distance: f32) -> Vec2 {
        match self.axis {
            Axis::Vertical => position.with_along(Axis::Vertical, distance),
            Axis::Horizontal => position.with_along(Axis::Horizontal, -distance),
        }
    }

    /// Leading line for a content position
    pub fn line_at(&self, position: Vec2) -> i64 {
        self.line_for_distance(self.scroll_distance(position))
    }

    /// Line whose leading edge is closest to a content position
    pub fn nearest_line(&self, position: Vec2) -> i64 {
        self.line_for_distance(self.scroll_distance(position) + self.cell_size() * 0.5)
    }

    fn line_for_distance(&self, distance: f32) -> i64 {
        let cell = self.cell_size();
        if cell <= 0.0 {
            return 0;
        }
        if self.looping {
            return (distance / cell).floor() as i64;
        }
        let total = self.total_lines() as i64;
        if total == 0 {
            return 0;
        }
        let line = ((distance - self.lead()).max(0.0) / cell).floor() as i64;
        line.clamp(0, total - 1)
    }

    /// Centre of the item at a virtual index, in content-local space
    pub fn item_position(&self, virtual_index: i64) -> Vec2 {
        let fixed = self.fixed_count as i64;
        let line = virtual_index.div_euclid(fixed) as f32;
        let column = virtual_index.rem_euclid(fixed) as f32;
        let lead = self.lead();
        let item = self.item_size;
        let space = self.spacing;

        match self.axis {
            Axis::Vertical => Vec2::new(
                self.margin.left + (column + 0.5) * item.x + column * space.x,
                -(lead + (line + 0.5) * item.y + line * space.y),
            ),
            Axis::Horizontal => Vec2::new(
                lead + (line + 0.5) * item.x + line * space.x,
                -(self.margin.top + (column + 0.5) * item.y + column * space.y),
            ),
        }
    }

    /// Content size holding every line, at least viewport-wide across the motion axis
    pub fn content_size(&self, view_size: Vec2) -> Vec2 {
        let lines = self.total_lines() as f32;
        let fixed = self.fixed_count as f32;
        let along = self.axis;
        let across = self.axis.cross();

        let length = self.margin.total(along)
            + self.item_size.along(along) * lines
            + self.spacing.along(along) * (lines - 1.0).max(0.0);
        let breadth = (self.margin.total(across)
            + self.item_size.along(across) * fixed
            + self.spacing.along(across) * (fixed - 1.0))
            .max(view_size.along(across));

        Vec2::ZERO
            .with_along(along, length)
            .with_along(across, breadth)
    }

    /// Content position that puts `line` at the leading edge of the viewport
    ///
    /// Non-looping targets are clamped to the scrollable range.
    pub fn line_position(&self, line: i64, current: Vec2, content_len: f32, view_len: f32) -> Vec2 {
        let mut distance = line as f32 * self.cell_size() + self.lead();
        if !self.looping {
            let max = (content_len - view_len).max(0.0);
            distance = distance.clamp(0.0, max);
        }
        self.position_at_distance(current, distance)
    }
}
