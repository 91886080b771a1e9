// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local translate/rotate/uniform-scale state of a node.

use kurbo::{Affine, Vec2};
use stagecraft_affine::{Mat3, normalize_angle};

/// A node's pose relative to its parent.
///
/// The rotation is kept normalized to `[-180, 180)` degrees by every mutator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec2,
    rotation: f64,
    scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };

    /// Create a transform. `degrees` is normalized.
    pub fn new(translation: Vec2, degrees: f64, scale: f64) -> Self {
        Self {
            translation,
            rotation: normalize_angle(degrees),
            scale,
        }
    }

    /// Translation in the parent's frame.
    pub const fn position(&self) -> Vec2 {
        self.translation
    }

    /// Rotation in degrees, in `[-180, 180)`.
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Uniform scale factor.
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) -> &mut Self {
        self.rotation = normalize_angle(degrees);
        self
    }

    /// Rotate by `degrees`.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.rotation = normalize_angle(self.rotation + degrees);
        self
    }

    /// Set the scale.
    ///
    /// Zero is accepted here; operations needing an inverse reject it later.
    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Multiply the scale by `factor`.
    pub fn scale_by(&mut self, factor: f64) -> &mut Self {
        self.scale *= factor;
        self
    }

    /// Set the translation.
    pub fn set_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.translation = Vec2::new(x, y);
        self
    }

    /// Offset the translation by `(dx, dy)` in the parent's frame.
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.translation += Vec2::new(dx, dy);
        self
    }

    /// `T * R * S`.
    pub fn matrix(&self) -> Mat3 {
        Mat3::trs(self.translation, self.rotation, self.scale)
    }

    /// `S⁻¹ * R(-θ) * T(-t)`, or `None` when the scale is zero.
    ///
    /// [`SceneTree::inverse_local_matrix`](crate::SceneTree::inverse_local_matrix) applies the
    /// tree's configured tolerance on top of this.
    pub fn inverse_matrix(&self) -> Option<Mat3> {
        Mat3::inverse_trs(self.translation, self.rotation, self.scale)
    }

    /// The same transform as a Kurbo affine.
    pub fn to_affine(&self) -> Affine {
        self.matrix().to_affine()
    }
}
