// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability hooks implemented by node kinds.
//!
//! A [`SceneTree<B>`](crate::SceneTree) stores one `B` per node. Applications usually
//! make `B` an enum of their node kinds and implement the hooks with a `match`.
//! Each traversal only requires the capability it dispatches, so a kind that never
//! collides does not need a [`Collide`] impl unless [`SceneTree::collide`](crate::SceneTree::collide)
//! is called.
//!
//! `()` implements every hook as a no-op, which makes `SceneTree<()>` a plain transform hierarchy.

use kurbo::Point;

use crate::render::RenderContext;

/// Per-frame simulation hook.
pub trait Update {
    /// Advance by `dt` seconds.
    fn update(&mut self, dt: f64);
}

/// Draws the node itself, not its descendants.
///
/// The context's current transform already includes this node's local transform
/// and those of all its drawn ancestors.
pub trait Draw<C: RenderContext + ?Sized> {
    /// Issue this node's draw primitives.
    fn draw_self(&self, ctx: &mut C);
}

/// Point collision hook.
pub trait Collide {
    /// Whether `point` hits this node.
    fn collision(&self, point: Point) -> bool;
}

impl Update for () {
    fn update(&mut self, _dt: f64) {}
}

impl<C: RenderContext + ?Sized> Draw<C> for () {
    fn draw_self(&self, _ctx: &mut C) {}
}

impl Collide for () {
    fn collision(&self, _point: Point) -> bool {
        false
    }
}
