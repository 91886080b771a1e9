// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render context seam and a recording implementation.

use alloc::vec::Vec;

use kurbo::{Affine, Vec2};

/// The transform-stack surface a rendering backend exposes to [`SceneTree::draw`](crate::SceneTree::draw).
///
/// This mirrors an immediate-mode matrix stack: each call to `translate`, `rotate` or `scale`
/// post-multiplies the current transform, and `pop_transform` restores the transform saved
/// by the matching `push_transform`.
pub trait RenderContext {
    /// Save the current transform.
    fn push_transform(&mut self);
    /// Post-multiply a translation.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Post-multiply a counter-clockwise rotation in degrees.
    fn rotate(&mut self, degrees: f64);
    /// Post-multiply a uniform scale.
    fn scale(&mut self, factor: f64);
    /// Restore the transform saved by the matching [`push_transform`](Self::push_transform).
    fn pop_transform(&mut self);
}

/// One primitive captured by a [`RecordingContext`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall<T> {
    /// Cumulative transform at the time the primitive was issued.
    pub transform: Affine,
    /// Caller-supplied payload identifying the primitive.
    pub item: T,
}

/// A [`RenderContext`] that keeps a Kurbo transform stack and records primitives.
///
/// Node kinds call [`RecordingContext::record`] from their [`Draw`](crate::Draw) impl.
/// Useful as a display list, and for inspecting what a frame would draw.
#[derive(Clone, Debug)]
pub struct RecordingContext<T> {
    current: Affine,
    stack: Vec<Affine>,
    calls: Vec<DrawCall<T>>,
}

impl<T> Default for RecordingContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordingContext<T> {
    /// Create a context with an identity transform and no recorded calls.
    pub fn new() -> Self {
        Self {
            current: Affine::IDENTITY,
            stack: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Record a primitive at the current transform.
    pub fn record(&mut self, item: T) {
        self.calls.push(DrawCall {
            transform: self.current,
            item,
        });
    }

    /// The current cumulative transform.
    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Number of saved transforms not yet restored.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Recorded primitives, in issue order.
    pub fn calls(&self) -> &[DrawCall<T>] {
        &self.calls
    }

    /// Take the recorded primitives, leaving the transform stack untouched.
    pub fn take_calls(&mut self) -> Vec<DrawCall<T>> {
        core::mem::take(&mut self.calls)
    }
}

impl<T> RenderContext for RecordingContext<T> {
    fn push_transform(&mut self) {
        self.stack.push(self.current);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.current *= Affine::translate(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.current *= Affine::rotate(degrees.to_radians());
    }

    fn scale(&mut self, factor: f64) {
        self.current *= Affine::scale(factor);
    }

    fn pop_transform(&mut self) {
        debug_assert!(!self.stack.is_empty(), "pop_transform without matching push");
        self.current = self.stack.pop().unwrap_or(Affine::IDENTITY);
    }
}
