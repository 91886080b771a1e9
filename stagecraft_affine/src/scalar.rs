// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar helpers: angle normalization, clamping, distance.

use kurbo::Point;

/// Normalize an angle in degrees to the half-open range `[-180, 180)`.
///
/// Values already in range are returned unchanged, which makes the function exactly
/// idempotent. Otherwise the remainder of `degrees + 180` is shifted into `[0, 360)` and
/// re-centered; a remainder that rounds up to a full turn maps to `-180`.
///
/// ```
/// use stagecraft_affine::normalize_angle;
///
/// assert_eq!(normalize_angle(190.0), -170.0);
/// assert_eq!(normalize_angle(-190.0), 170.0);
/// assert_eq!(normalize_angle(180.0), -180.0);
/// ```
#[inline]
pub fn normalize_angle(degrees: f64) -> f64 {
    if (-180.0..180.0).contains(&degrees) {
        return degrees;
    }
    let mut turn = (degrees + 180.0) % 360.0;
    if turn < 0.0 {
        turn += 360.0;
    }
    let centered = turn - 180.0;
    if centered >= 180.0 { -180.0 } else { centered }
}

/// Clamp `value` to `[min, max]`.
///
/// `min <= max` is a precondition. Unlike [`f64::clamp`] this does not panic
/// in release builds when it is violated; `min` wins.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max, "clamp range must satisfy min <= max");
    let upper = if value > max { max } else { value };
    if upper < min { min } else { upper }
}

/// Straight-line distance between `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    Point::new(x1, y1).distance(Point::new(x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // All values are exactly representable, so the arithmetic is exact.
    const SAMPLES: [f64; 12] = [
        0.0, 45.5, 179.75, 180.0, -180.0, 359.25, 360.0, 540.0, -540.5, -725.25, 1_000_000.5,
        -1_000_000.5,
    ];

    #[test]
    fn normalized_range_is_half_open() {
        for a in SAMPLES {
            let n = normalize_angle(a);
            assert!((-180.0..180.0).contains(&n), "{a} normalized to {n}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for a in SAMPLES {
            let once = normalize_angle(a);
            assert_eq!(normalize_angle(once), once, "not idempotent for {a}");
        }
    }

    // None of these survive the arithmetic exactly.
    const INEXACT: [f64; 10] = [
        -1e-15,
        -180.0 - 1e-13,
        0.1 * 3.0,
        1e300,
        f64::MAX,
        -f64::MAX,
        -f64::MIN_POSITIVE,
        -376.767_369_940_105_65,
        -224.975_170_129_849_12,
        179.999_999_999_999_97,
    ];

    #[test]
    fn rounding_stays_in_range_and_idempotent() {
        for a in INEXACT {
            let once = normalize_angle(a);
            assert!((-180.0..180.0).contains(&once), "{a} normalized to {once}");
            assert_eq!(normalize_angle(once), once, "not idempotent for {a}");
        }
        // Tiny negatives must not wrap to the top of the range.
        assert_eq!(normalize_angle(-1e-15), -1e-15);
        assert_eq!(normalize_angle(-180.0 - 1e-13), 179.999_999_999_999_9);
        assert_eq!(normalize_angle(f64::MAX), -52.0);
    }

    #[test]
    fn negative_inputs_wrap_forward() {
        assert_eq!(normalize_angle(-10.0), -10.0);
        assert_eq!(normalize_angle(-181.0), 179.0);
        assert_eq!(normalize_angle(-540.5), 179.5);
        assert_eq!(normalize_angle(-725.25), -5.25);
    }

    #[test]
    fn clamp_behaves_like_a_range_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 3.0, 3.0), 3.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_abs_diff_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(distance(-1.0, -1.0, -1.0, -1.0), 0.0);
        assert_abs_diff_eq!(
            distance(1.0, 2.0, 4.0, 6.0),
            distance(4.0, 6.0, 1.0, 2.0),
            epsilon = 1e-12
        );
    }
}
