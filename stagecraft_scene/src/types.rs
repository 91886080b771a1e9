// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, and configuration.

/// Identifier for a node in a [`SceneTree`](crate::SceneTree).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the node is destroyed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On destroy, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
/// - A slot freed at generation `u32::MAX` is never reused.
///
/// Stale handles never alias a different live node because the generation must match.
/// Use [`SceneTree::is_alive`](crate::SceneTree::is_alive) to check liveness; every other
/// operation reports a stale handle as [`SceneError::DanglingReference`](crate::SceneError::DanglingReference).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Node flags controlling traversal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are drawn. Clearing it hides the whole subtree
        /// without touching the descendants' own flags.
        const VISIBLE    = 0b0000_0001;
        /// Node participates in [`SceneTree::collide`](crate::SceneTree::collide).
        const COLLIDABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::COLLIDABLE
    }
}

/// How global poses are composed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PoseMode {
    /// Compose the node's local matrix with its immediate parent's local matrix only.
    ///
    /// This matches a flat "object inside a group" model and is exact for trees
    /// that are at most two levels below the root.
    #[default]
    ParentOnly,
    /// Compose local matrices along the whole ancestor chain up to the root.
    FullChain,
}

/// Run-time configuration of a [`SceneTree`](crate::SceneTree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Composition used by the global pose queries and by reparenting.
    pub pose: PoseMode,
    /// Scales whose magnitude is at or below this are treated as zero when an
    /// inverse is required.
    pub degenerate_scale: f64,
}

impl SceneConfig {
    /// Default threshold for [`SceneConfig::degenerate_scale`].
    pub const DEFAULT_DEGENERATE_SCALE: f64 = 1e-12;

    pub(crate) fn is_degenerate(&self, scale: f64) -> bool {
        !scale.is_finite() || (scale <= self.degenerate_scale && -scale <= self.degenerate_scale)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pose: PoseMode::default(),
            degenerate_scale: Self::DEFAULT_DEGENERATE_SCALE,
        }
    }
}
