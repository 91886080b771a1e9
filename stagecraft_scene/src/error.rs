// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by scene tree operations.

use crate::types::NodeId;

/// Why a parent/child relation was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentViolation {
    /// The root has no parent to detach from and cannot be destroyed.
    DestroyRoot,
    /// The root must stay parentless.
    ReparentRoot,
    /// A node cannot be its own parent.
    SelfParent,
    /// The requested parent is a descendant of the node.
    Cycle,
}

impl core::fmt::Display for ParentViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::DestroyRoot => "the root cannot be destroyed",
            Self::ReparentRoot => "the root cannot be reparented",
            Self::SelfParent => "a node cannot be its own parent",
            Self::Cycle => "the new parent is a descendant of the node",
        })
    }
}

/// Error type for [`SceneTree`](crate::SceneTree) operations.
///
/// All variants are precondition violations detected before the tree is touched;
/// an operation that returns an error has not mutated anything.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// An inverse transform was needed but the scale is zero or numerically indistinguishable from it.
    #[error("node {node:?} has degenerate scale {scale}")]
    DegenerateTransform {
        /// Node whose transform cannot be inverted.
        node: NodeId,
        /// The offending scale.
        scale: f64,
    },
    /// The operation would detach the root or create a cycle.
    #[error("invalid parent for node {node:?}: {reason}")]
    InvalidParent {
        /// Node the operation was applied to.
        node: NodeId,
        /// What was violated.
        reason: ParentViolation,
    },
    /// The handle refers to a node that has been destroyed.
    #[error("node {0:?} is not alive")]
    DanglingReference(NodeId),
}
