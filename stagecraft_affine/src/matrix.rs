// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Homogeneous 3×3 matrices and vectors for 2D affine transforms.

use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};

use crate::scalar::normalize_angle;

/// A homogeneous 3-component vector.
///
/// Points carry `w = 1` and are affected by translation, directions carry
/// `w = 0` and are not.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Homogeneous component.
    pub w: f64,
}

impl Vec3 {
    /// Create a vector from its three components.
    pub const fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    /// A point at `(x, y)`.
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0)
    }

    /// A direction `(x, y)`, unaffected by translation.
    pub const fn direction(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Drop the homogeneous component.
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Vec3 {
    fn from(p: Point) -> Self {
        Self::point(p.x, p.y)
    }
}

/// A row-major 3×3 matrix.
///
/// Only the affine subset is produced by this crate (last row `[0, 0, 1]`),
/// but products are computed in full.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3([[f64; 3]; 3]);

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Build a matrix from rows.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(rows)
    }

    /// The rows of this matrix.
    pub const fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Element at `row`, `col`. Panics when either is out of range.
    pub const fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row][col]
    }

    /// Translation by `(dx, dy)`.
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self([[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation by `degrees`.
    ///
    /// The angle is normalized first, so whole turns produce the exact identity.
    pub fn rotation(degrees: f64) -> Self {
        let Vec2 { x: cos, y: sin } = Vec2::from_angle(normalize_angle(degrees).to_radians());
        Self([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Uniform scale on both axes.
    pub const fn scale(factor: f64) -> Self {
        Self([[factor, 0.0, 0.0], [0.0, factor, 0.0], [0.0, 0.0, 1.0]])
    }

    /// `T * R * S`: scale first, then rotate, then translate.
    pub fn trs(translation: Vec2, degrees: f64, scale: f64) -> Self {
        Self::translation(translation.x, translation.y) * Self::rotation(degrees) * Self::scale(scale)
    }

    /// `S⁻¹ * R(-θ) * T(-t)`, the exact inverse of [`Mat3::trs`].
    ///
    /// Returns `None` when `1 / scale` is not finite.
    pub fn inverse_trs(translation: Vec2, degrees: f64, scale: f64) -> Option<Self> {
        let inv_scale = scale.recip();
        if !inv_scale.is_finite() {
            return None;
        }
        Some(
            Self::scale(inv_scale)
                * Self::rotation(-degrees)
                * Self::translation(-translation.x, -translation.y),
        )
    }

    /// The translation column.
    pub const fn translation_part(&self) -> Vec2 {
        Vec2::new(self.0[0][2], self.0[1][2])
    }

    /// Rotation of the upper-left block in degrees, normalized to `[-180, 180)`.
    pub fn rotation_degrees(&self) -> f64 {
        normalize_angle(Vec2::new(self.0[0][0], self.0[1][0]).atan2().to_degrees())
    }

    /// Length of the first basis column.
    ///
    /// For `T * R * S` products this recovers the uniform scale factor.
    pub fn uniform_scale(&self) -> f64 {
        let xy = Vec2::new(self.0[0][0], self.0[1][0]).hypot();
        Vec2::new(xy, self.0[2][0]).hypot()
    }

    /// Transform a point (`w = 1`).
    pub fn transform_point(&self, p: Point) -> Point {
        (*self * Vec3::from(p)).to_point()
    }

    /// True when every element differs from `other` by at most `epsilon`.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| {
                let d = a - b;
                d <= epsilon && -d <= epsilon
            })
    }

    /// Convert to a Kurbo affine, dropping the projective row.
    pub fn to_affine(&self) -> Affine {
        let m = &self.0;
        Affine::new([m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2]])
    }
}

impl From<Affine> for Mat3 {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self([[a, c, e], [b, d, f], [0.0, 0.0, 1.0]])
    }
}

impl From<Mat3> for Affine {
    fn from(m: Mat3) -> Self {
        m.to_affine()
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        Self(out)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let row = |i: usize| self.0[i][0] * v.x + self.0[i][1] * v.y + self.0[i][2] * v.w;
        Vec3::new(row(0), row(1), row(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    #[test]
    fn whole_turns_are_identity() {
        assert_eq!(Mat3::rotation(0.0), Mat3::IDENTITY);
        assert_eq!(Mat3::rotation(360.0), Mat3::IDENTITY);
        assert_eq!(Mat3::rotation(-720.0), Mat3::IDENTITY);
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let p = Mat3::rotation(90.0).transform_point(Point::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = EPS);
    }

    #[test]
    fn composition_order_matters() {
        let t = Mat3::translation(10.0, 0.0);
        let r = Mat3::rotation(90.0);
        let tr = (t * r).transform_point(Point::new(1.0, 0.0));
        let rt = (r * t).transform_point(Point::new(1.0, 0.0));
        assert_abs_diff_eq!(tr.x, 10.0, epsilon = EPS);
        assert_abs_diff_eq!(tr.y, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(rt.x, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(rt.y, 11.0, epsilon = EPS);
    }

    #[test]
    fn product_is_associative() {
        let a = Mat3::translation(3.0, -2.0);
        let b = Mat3::rotation(33.0);
        let c = Mat3::scale(1.5);
        assert!(((a * b) * c).abs_diff_eq(&(a * (b * c)), EPS), "(ab)c != a(bc)");
    }

    #[test]
    fn directions_ignore_translation() {
        let v = Mat3::translation(5.0, 5.0) * Vec3::direction(1.0, 2.0);
        assert_eq!(v, Vec3::direction(1.0, 2.0));
    }

    #[test]
    fn inverse_trs_undoes_trs() {
        let cases = [
            (Vec2::new(0.0, 0.0), 0.0, 1.0),
            (Vec2::new(10.0, -4.0), 30.0, 2.0),
            (Vec2::new(-7.5, 3.25), -135.0, 0.25),
            (Vec2::new(100.0, 100.0), 179.0, -3.0),
        ];
        for (t, deg, s) in cases {
            let m = Mat3::trs(t, deg, s);
            let inv = Mat3::inverse_trs(t, deg, s).expect("non-zero scale is invertible");
            assert!((inv * m).abs_diff_eq(&Mat3::IDENTITY, EPS), "inv * m for {t:?} {deg} {s}");
            assert!((m * inv).abs_diff_eq(&Mat3::IDENTITY, EPS), "m * inv for {t:?} {deg} {s}");
        }
    }

    #[test]
    fn zero_scale_has_no_inverse() {
        assert!(Mat3::inverse_trs(Vec2::ZERO, 0.0, 0.0).is_none());
    }

    #[test]
    fn decomposition_recovers_trs() {
        let m = Mat3::trs(Vec2::new(4.0, -2.0), -60.0, 3.0);
        let t = m.translation_part();
        assert_abs_diff_eq!(t.x, 4.0, epsilon = EPS);
        assert_abs_diff_eq!(t.y, -2.0, epsilon = EPS);
        assert_abs_diff_eq!(m.rotation_degrees(), -60.0, epsilon = EPS);
        assert_abs_diff_eq!(m.uniform_scale(), 3.0, epsilon = EPS);
    }

    #[test]
    fn kurbo_conversion_agrees_on_points() {
        let m = Mat3::trs(Vec2::new(1.0, 2.0), 45.0, 2.0);
        let affine = m.to_affine();
        let p = Point::new(3.0, -1.0);
        let a = affine * p;
        let b = m.transform_point(p);
        assert_abs_diff_eq!(a.x, b.x, epsilon = EPS);
        assert_abs_diff_eq!(a.y, b.y, epsilon = EPS);
        assert_eq!(Mat3::from(affine), m);
    }
}
