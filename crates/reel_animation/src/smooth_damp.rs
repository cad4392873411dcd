//! Critically damped smoothing toward a moving target
//!
//! Used for elastic snap-back: the content position approaches the nearest
//! valid position without overshoot, carrying velocity between frames.

/// Smallest smoothing time accepted
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Move `current` toward `target` over roughly `smooth_time` seconds
///
/// `velocity` is read and updated in place so successive calls continue the
/// same motion. `max_speed` caps the approach speed (`f32::INFINITY` for no
/// cap). Never overshoots `target`.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;

    // Pade approximation of exp(-omega * dt)
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = clamped_target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}
