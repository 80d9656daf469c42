pub use band::*;

mod band;

/// Test if the value lies within the closed interval `[min, max]`.
///
/// Returns false for NaN values or bounds.
#[inline]
pub fn within(value: f32, min: f32, max: f32) -> bool {
    value >= min && value <= max
}

/// Contain the value in the interval `[min, max]`.
///
/// Unlike `f32::clamp` this never panics. The lower bound is checked first,
/// so inverted bounds resolve to `min` for values below `min` and to `max`
/// for values above `max`. NaN values pass through unchanged.
#[inline]
pub fn contain(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
