//! Reel Core
//!
//! Foundational primitives shared by the Reel crates:
//!
//! - **Geometry**: `Vec2`, `Rect`, `Bounds`, `Margin` and the motion `Axis`
//! - **Input**: a single `InputEvent` tagged union for drag and wheel input
//! - **State Machines**: flat `StateTransitions` enums for lifecycle states

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{EventType, InputEvent, PointerButton};
pub use fsm::StateTransitions;
pub use geometry::{Axis, Bounds, Margin, Rect, Vec2};
