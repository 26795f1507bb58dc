//! Scalar helpers for mapping a sensor reading onto drawing parameters.

use std::f64::consts::TAU;

/// Clamp a reading into `[0.0, 1.0]`. NaN maps to `0.0`.
#[must_use]
pub fn clamp_proportion(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Mouth colour channel for a reading: `floor(lerp(0, 255, clamp(p)))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn mouth_channel(p: f64) -> u8 {
    // In [0, 255] after clamping, so the cast is exact.
    lerp(0.0, 255.0, clamp_proportion(p)).floor() as u8
}

/// Indicator angle in radians for a reading: `lerp(0, 2π, clamp(p))`.
#[must_use]
pub fn indicator_angle(p: f64) -> f64 {
    lerp(0.0, TAU, clamp_proportion(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_proportion() {
        assert!((clamp_proportion(-0.5)).abs() < f64::EPSILON);
        assert!((clamp_proportion(1.5) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_proportion(0.4) - 0.4).abs() < f64::EPSILON);
        assert!((clamp_proportion(f64::NAN)).abs() < f64::EPSILON);
        assert!((clamp_proportion(f64::INFINITY) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mouth_channel_endpoints() {
        assert_eq!(mouth_channel(0.0), 0);
        assert_eq!(mouth_channel(1.0), 255);
        assert_eq!(mouth_channel(0.5), 127);
    }

    #[test]
    fn test_mouth_channel_out_of_range() {
        assert_eq!(mouth_channel(-3.0), 0);
        assert_eq!(mouth_channel(7.0), 255);
        assert_eq!(mouth_channel(f64::NAN), 0);
    }

    #[test]
    fn test_mouth_channel_is_monotonic() {
        let samples = [0.0, 0.25, 0.5, 0.75, 1.0];
        let channels: Vec<u8> = samples.iter().map(|p| mouth_channel(*p)).collect();
        assert!(channels.windows(2).all(|w| w[0] <= w[1]), "{channels:?}");
    }

    #[test]
    fn test_indicator_angle() {
        assert!(indicator_angle(0.0).abs() < f64::EPSILON);
        assert!((indicator_angle(1.0) - TAU).abs() < 1e-12);
        assert!((indicator_angle(0.5) - std::f64::consts::PI).abs() < 1e-12);
    }
}
