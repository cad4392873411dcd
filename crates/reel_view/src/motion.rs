//! Scroll motion model
//!
//! Turns drag, wheel and elapsed time into content positions. The model
//! owns velocity and drag state; it never writes the content itself, it
//! returns the position the view should apply.
//!
//! # Movement
//!
//! - **Unrestricted**: no edges, no boundary force
//! - **Elastic**: overscroll is rubber-banded while dragging and springs
//!   back with a critically damped approach once released
//! - **Clamped**: positions are pushed back inside the content every time

use reel_animation::smooth_damp;
use reel_core::{Axis, Vec2};

use crate::bounds::BoundsTracker;
use crate::config::{ListConfig, MovementType};

/// Squared speed below which coasting stops
const REST_SPEED_SQ: f32 = 10.0;

/// Overscroll below which an elastic return lands exactly on the edge
const EDGE_SETTLE_DISTANCE: f32 = 0.01;

/// Blend rate of the drag velocity estimate, per second
const VELOCITY_BLEND_RATE: f32 = 10.0;

/// Compressed overscroll for a raw overscroll of `overstretch`
///
/// Strictly increasing in `|overstretch|` and bounded by `view_size`.
pub fn rubber_delta(overstretch: f32, view_size: f32) -> f32 {
    if view_size <= 0.0 {
        return 0.0;
    }
    (1.0 - 1.0 / (overstretch.abs() * 0.55 / view_size + 1.0)) * view_size * overstretch.signum()
}

// ============================================================================
// Motion Phase
// ============================================================================

/// Observable motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionPhase {
    #[default]
    Idle,
    Dragging,
    /// Moving under inertia
    Coasting,
    /// Springing back from overscroll
    Returning,
    /// Programmatic or snap scroll in flight
    AutoScrolling,
}

/// What a coasting step decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coast {
    /// Leave the content where it is
    Hold,
    /// Move the content here
    MoveTo(Vec2),
    /// Start a snap to the nearest line
    Snap,
}

// ============================================================================
// Motion Model
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct MotionModel {
    velocity: Vec2,
    dragging: bool,
    pointer_start: Vec2,
    content_start: Vec2,
}

impl MotionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn stop_axis(&mut self, axis: Axis) {
        self.velocity[axis.index()] = 0.0;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Record the drag origin
    pub fn begin_drag(&mut self, pointer_local: Vec2, content_position: Vec2) {
        self.pointer_start = pointer_local;
        self.content_start = content_position;
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Content position for the pointer at `pointer_local`
    ///
    /// Only the motion axis moves. Overscroll is clamped or rubber-banded
    /// per the movement policy.
    pub fn drag_target(
        &self,
        pointer_local: Vec2,
        position: Vec2,
        bounds: &BoundsTracker,
        config: &ListConfig,
    ) -> Vec2 {
        let axis = config.motion;
        let a = axis.index();
        let mut target = self.content_start + (pointer_local - self.pointer_start);

        let offset = bounds.calculate_offset(target - position, axis, config.movement);
        target += offset;
        if config.movement == MovementType::Elastic && offset[a] != 0.0 {
            target[a] -= rubber_delta(offset[a], bounds.view().size[a]);
        }
        position.with_along(axis, target[a])
    }

    /// Content position after a wheel step
    ///
    /// `delta` is in device convention (positive y is wheel up). The
    /// dominant component is applied along the motion axis.
    pub fn wheel_target(
        &self,
        delta: Vec2,
        position: Vec2,
        bounds: &BoundsTracker,
        config: &ListConfig,
    ) -> Vec2 {
        let delta = Vec2::new(delta.x, -delta.y);
        let step = if delta.x.abs() > delta.y.abs() {
            delta.x
        } else {
            delta.y
        };
        let axis = config.motion;
        let mut target = position;
        target[axis.index()] += step * config.scroll_sensitivity;
        if config.movement == MovementType::Clamped {
            target += bounds.calculate_offset(target - position, axis, config.movement);
        }
        target
    }

    /// One released-motion step
    ///
    /// `offset` is the current overscroll correction (zero when inside).
    pub fn coast(
        &mut self,
        dt: f32,
        position: Vec2,
        offset: Vec2,
        bounds: &BoundsTracker,
        config: &ListConfig,
    ) -> Coast {
        if self.dragging || (offset.is_zero() && self.velocity.is_zero()) {
            return Coast::Hold;
        }
        let axis = config.motion;
        let a = axis.index();

        if config.movement == MovementType::Elastic && !offset.is_zero() {
            if config.auto_attach {
                return Coast::Snap;
            }
            if offset[a].abs() < EDGE_SETTLE_DISTANCE {
                self.velocity[a] = 0.0;
                return Coast::MoveTo(position + offset);
            }
            let mut speed = self.velocity[a];
            let along = smooth_damp(
                position[a],
                position[a] + offset[a],
                &mut speed,
                config.elasticity,
                f32::INFINITY,
                dt,
            );
            self.velocity[a] = speed;
            tracing::trace!("elastic return {:.2} -> {:.2}", position[a], along);
            return Coast::MoveTo(position.with_along(axis, along));
        }

        // Clamped content never stays past an edge, moving or not
        if config.movement == MovementType::Clamped && !offset.is_zero() {
            self.velocity[a] = 0.0;
            return Coast::MoveTo(position + offset);
        }

        if !config.inertia {
            self.velocity = Vec2::ZERO;
            return Coast::Hold;
        }

        self.velocity = self.velocity * config.deceleration_rate.powf(dt);
        if self.velocity.length_squared() < REST_SPEED_SQ {
            self.velocity = Vec2::ZERO;
        }
        if config.auto_attach && self.velocity.length() < config.attach_snap.velocity_threshold {
            self.velocity = Vec2::ZERO;
            return Coast::Snap;
        }
        if self.velocity.is_zero() {
            return Coast::Hold;
        }

        let mut target = position.with_along(axis, position[a] + self.velocity[a] * dt);
        if config.movement == MovementType::Clamped {
            target += bounds.calculate_offset(target - position, axis, config.movement);
        }
        Coast::MoveTo(target)
    }

    /// Blend the drag velocity toward the frame's displacement rate
    pub fn track_drag_velocity(&mut self, position: Vec2, previous: Vec2, dt: f32) {
        if !self.dragging || dt <= 0.0 {
            return;
        }
        let instant = (position - previous) * (1.0 / dt);
        self.velocity = self.velocity.lerp(instant, dt * VELOCITY_BLEND_RATE);
    }

    /// Phase for the current state
    pub fn phase(&self, auto_scrolling: bool, overscrolled: bool) -> MotionPhase {
        if auto_scrolling {
            MotionPhase::AutoScrolling
        } else if self.dragging {
            MotionPhase::Dragging
        } else if overscrolled {
            MotionPhase::Returning
        } else if !self.velocity.is_zero() {
            MotionPhase::Coasting
        } else {
            MotionPhase::Idle
        }
    }
}
