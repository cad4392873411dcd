//! Snap and programmatic scroll
//!
//! An [`AutoScroll`] eases the content from where it was when the scroll
//! was requested to a target position. Targets are resolved from a line or
//! item index; in looping lists the shortest way around the loop is taken.

use reel_animation::Easing;
use reel_core::{Axis, Vec2};

use crate::grid::GridLayout;

/// Distance along the motion axis at which an auto-scroll completes
const ARRIVAL_DISTANCE: f32 = 1.0;

/// Where an auto-scroll should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Closest line boundary to the current position
    Nearest,
    /// Line holding a dataset index
    Index(usize),
}

/// One in-flight programmatic scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroll {
    pub from: Vec2,
    pub to: Vec2,
    pub start_time: f64,
    pub duration: f32,
    pub easing: Easing,
}

impl AutoScroll {
    pub fn new(from: Vec2, to: Vec2, start_time: f64, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
            easing,
        }
    }

    /// Position at time `now`, and whether the scroll has arrived
    pub fn sample(&self, now: f64, axis: Axis) -> (Vec2, bool) {
        let elapsed = (now - self.start_time) as f32;
        let progress = if self.duration > 0.0 {
            elapsed / self.duration
        } else {
            1.0
        };
        let a = axis.index();
        let along = self.easing.interpolate(self.from[a], self.to[a], progress);
        if (self.to[a] - along).abs() <= ARRIVAL_DISTANCE {
            return (self.to, true);
        }
        let mut position = self.from;
        position[a] = along;
        (position, false)
    }
}

/// Shortest signed line step from `current` to `target` in a loop of `len` lines
///
/// Differences beyond half the loop wrap the other way around.
pub fn closest_line_delta(current: i64, target: i64, len: usize) -> i64 {
    if len == 0 {
        return target - current;
    }
    let len = len as i64;
    let diff = (target - current).rem_euclid(len);
    if diff * 2 > len {
        diff - len
    } else {
        diff
    }
}

/// Content position a scroll toward `target` should end at
pub fn resolve_target(
    target: ScrollTarget,
    grid: &GridLayout,
    position: Vec2,
    content_len: f32,
    view_len: f32,
) -> Vec2 {
    let line = match target {
        ScrollTarget::Nearest => grid.nearest_line(position),
        ScrollTarget::Index(index) if grid.looping => {
            let total = grid.total_lines();
            let current = grid.nearest_line(position);
            let target_line = (index % grid.num_items.max(1) / grid.fixed_count) as i64;
            current + closest_line_delta(current, target_line, total)
        }
        ScrollTarget::Index(index) => {
            let index = index.min(grid.num_items.saturating_sub(1));
            (index / grid.fixed_count) as i64
        }
    };
    grid.line_position(line, position, content_len, view_len)
}
