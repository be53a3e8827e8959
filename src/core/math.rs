// Math utilities and helper functions

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` with a single-pole exponential filter.
///
/// `rate` is the smoothing rate in 1/s. The blend factor `rate * dt` is
/// clamped to 1 so a long frame lands on the target instead of overshooting.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    lerp(current, target, t)
}
