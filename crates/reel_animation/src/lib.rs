//! Reel Animation
//!
//! Motion primitives for frame-driven widgets.
//!
//! # Features
//!
//! - **Easing**: cubic and quadratic easing for timed transitions
//! - **Smoothing**: critically damped `smooth_damp` for elastic snap-back
//! - **Curves**: keyframe curves sampled by position (item scale falloff)
//! - **Clocks**: injectable frame time sources, including a manual clock

pub mod clock;
pub mod curve;
pub mod easing;
pub mod smooth_damp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use curve::{Curve, CurveKey};
pub use easing::Easing;
pub use smooth_damp::smooth_damp;
