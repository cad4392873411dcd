//! Easing functions for timed transitions

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    /// Symmetric cubic, continuous at the midpoint (default for auto-scroll)
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Progress outside `[0, 1]` is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                let s = t * 2.0;
                if s < 1.0 {
                    0.5 * s * s * s
                } else {
                    let s = s - 2.0;
                    0.5 * (s * s * s + 2.0)
                }
            }
        }
    }

    /// Interpolate from `start` to `end` at eased progress `t`
    pub fn interpolate(&self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.apply(t)
    }
}
