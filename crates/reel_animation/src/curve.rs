//! Keyframe curves sampled by position rather than by time
//!
//! A [`Curve`] maps an input in any range to a value by interpolating
//! between its two surrounding keys. Inputs before the first key or after
//! the last one hold the edge value.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// A single curve key
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Input position
    pub time: f32,
    /// Value at this key
    pub value: f32,
    /// Easing used when interpolating TO this key
    #[serde(default = "linear")]
    pub easing: Easing,
}

fn linear() -> Easing {
    Easing::Linear
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// A piecewise curve over sorted keys
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Create a curve; keys are sorted by time
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line from `(0, from)` to `(1, to)`
    pub fn linear(from: f32, to: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, from), CurveKey::new(1.0, to)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Sample the curve at `t`
    ///
    /// An empty curve evaluates to 1.0 (identity scale).
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; always exists and is > 0 here
        let next_idx = self.keys.partition_point(|k| k.time <= t);
        let prev = &self.keys[next_idx - 1];
        let next = &self.keys[next_idx];

        let span = next.time - prev.time;
        if span.abs() < f32::EPSILON {
            return prev.value;
        }
        let local = (t - prev.time) / span;
        next.easing.interpolate(prev.value, next.value, local)
    }
}

impl Default for Curve {
    /// Full size at the centre, half size one viewport away
    fn default() -> Self {
        Curve::linear(1.0, 0.5)
    }
}

impl From<Vec<CurveKey>> for Curve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Curve::new(keys)
    }
}

impl From<Curve> for Vec<CurveKey> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}
