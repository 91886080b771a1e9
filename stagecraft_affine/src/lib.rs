// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagecraft Affine: homogeneous 3×3 matrices for 2D scene transforms.
//!
//! This crate is the math layer under [`stagecraft_scene`](https://docs.rs/stagecraft_scene).
//! It covers the subset of 2D affine transforms a scene graph composes: translation,
//! counter-clockwise rotation in degrees, and uniform scale.
//!
//! - [`Mat3`]: row-major 3×3 matrix with constructors, products, and decomposition.
//! - [`Vec3`]: homogeneous vector (`w = 1` for points, `w = 0` for directions).
//! - [`normalize_angle`], [`clamp`], [`distance`]: scalar helpers.
//!
//! ## Composition order
//!
//! A local pose is `T * R * S`: scale first, then rotate, then translate.
//! Its inverse is `S⁻¹ * R(-θ) * T(-t)`, each factor inverted in reverse order.
//! Products are associative but not commutative, so the order of `*` encodes the order
//! in which transforms apply.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use stagecraft_affine::Mat3;
//!
//! let local = Mat3::trs(Vec2::new(10.0, 0.0), 90.0, 2.0);
//! let p = local.transform_point(Point::new(1.0, 0.0));
//! assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 2.0).abs() < 1e-9);
//!
//! let inverse = Mat3::inverse_trs(Vec2::new(10.0, 0.0), 90.0, 2.0).unwrap();
//! assert!((inverse * local).abs_diff_eq(&Mat3::IDENTITY, 1e-9));
//! ```
//!
//! Angles are in degrees and normalized to `[-180, 180)` wherever they are produced.
//!
//! This crate is `no_std`. Trigonometry is routed through Kurbo, so pick its backend with
//! either the `std` (default) or `libm` feature.

#![no_std]

mod matrix;
mod scalar;

pub use matrix::{Mat3, Vec3};
pub use scalar::{clamp, distance, normalize_angle};
