// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, registry, transform queries, reparenting.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;
use stagecraft_affine::Mat3;

use crate::error::{ParentViolation, SceneError};
use crate::transform::Transform;
use crate::types::{NodeFlags, NodeId, PoseMode, SceneConfig};

/// A node stored in a [`SceneTree`].
#[derive(Clone, Debug)]
pub struct SceneNode<B> {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) transform: Transform,
    pub(crate) flags: NodeFlags,
    pub(crate) behavior: B,
}

impl<B> SceneNode<B> {
    fn new(generation: u32, parent: Option<NodeId>, transform: Transform, behavior: B) -> Self {
        Self {
            generation,
            parent,
            children: Vec::new(),
            transform,
            flags: NodeFlags::default(),
            behavior,
        }
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transform relative to the parent.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Traversal flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// This node's own visibility flag.
    ///
    /// A node with the flag set is still skipped when an ancestor is hidden.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// The node kind payload.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }
}

/// A rooted hierarchy of transformed nodes.
///
/// The tree owns every node in an arena and hands out generational [`NodeId`]s.
/// It always contains a root created at construction: identity transform, visible, parentless.
/// The set of live nodes is exactly the root plus everything reachable from it.
///
/// `B` is the per-node kind payload; see [`crate::behavior`] for the hooks it can implement.
pub struct SceneTree<B = ()> {
    nodes: Vec<Option<SceneNode<B>>>, // slots
    generations: Vec<u32>,            // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    live: usize,
    root: NodeId,
    config: SceneConfig,
}

impl<B> core::fmt::Debug for SceneTree<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneTree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.live)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<B: Default> Default for SceneTree<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Default> SceneTree<B> {
    /// Create a tree holding only a root, with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a tree holding only a root.
    pub fn with_config(config: SceneConfig) -> Self {
        Self::with_root(config, B::default())
    }

    /// Insert a node with a default payload. See [`SceneTree::insert`].
    pub fn create(&mut self, parent: NodeId) -> Result<NodeId, SceneError> {
        self.insert(parent, B::default())
    }
}

impl<B> SceneTree<B> {
    /// Create a tree whose root carries `behavior`.
    pub fn with_root(config: SceneConfig, behavior: B) -> Self {
        let root = NodeId::new(0, 1);
        Self {
            nodes: vec![Some(SceneNode::new(
                root.generation(),
                None,
                Transform::IDENTITY,
                behavior,
            ))],
            generations: vec![root.generation()],
            free_list: Vec::new(),
            live: 1,
            root,
            config,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Number of live nodes, the root included.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Iterate live nodes in slot order.
    pub fn live_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let idx = i as u32;
            n.as_ref().map(|n| NodeId::new(idx, n.generation))
        })
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot is occupied and the generation matches.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode<B>, SceneError> {
        self.nodes
            .get(id.idx())
            .and_then(Option::as_ref)
            .filter(|n| n.generation == id.generation())
            .ok_or(SceneError::DanglingReference(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode<B>, SceneError> {
        self.nodes
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|n| n.generation == id.generation())
            .ok_or(SceneError::DanglingReference(id))
    }

    /// Insert a node under `parent`.
    ///
    /// The new node starts with a copy of the parent's local transform.
    pub fn insert(&mut self, parent: NodeId, behavior: B) -> Result<NodeId, SceneError> {
        let transform = self.node(parent)?.transform;
        self.insert_with_transform(parent, transform, behavior)
    }

    /// Insert a node under `parent` with an explicit local transform.
    pub fn insert_with_transform(
        &mut self,
        parent: NodeId,
        transform: Transform,
        behavior: B,
    ) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.nodes[idx] = Some(SceneNode::new(generation, Some(parent), transform, behavior));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(SceneNode::new(generation, Some(parent), transform, behavior)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        self.node_mut(parent)?.children.push(id);
        self.live += 1;
        log::debug!("inserted {id:?} under {parent:?}");
        Ok(id)
    }

    /// Destroy `id` and its whole subtree. Returns the number of nodes removed.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize, SceneError> {
        let parent = self.node(id).map_err(reject)?.parent;
        let Some(parent) = parent else {
            return Err(reject(SceneError::InvalidParent {
                node: id,
                reason: ParentViolation::DestroyRoot,
            }));
        };
        let doomed = self.subtree(id);
        self.node_mut(parent)?.children.retain(|c| *c != id);
        // Descendants go first so no freed slot is ever referenced by a live parent.
        for n in doomed.iter().rev() {
            self.nodes[n.idx()] = None;
            // A slot whose generation cannot grow any further is retired.
            if self.generations[n.idx()] < u32::MAX {
                self.free_list.push(n.idx());
            }
        }
        self.live -= doomed.len();
        log::debug!("destroyed {id:?} ({} nodes)", doomed.len());
        Ok(doomed.len())
    }

    /// `id` followed by all its descendants, pre-order. `id` must be live.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            if let Some(node) = self.nodes[n.idx()].as_ref() {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// The parent of `id`, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id` in traversal order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(&self.node(id)?.children)
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.node(node).ok().and_then(|n| n.parent);
        // Bounded walk: a well-formed tree is never deeper than its live count.
        for _ in 0..self.live {
            match cur {
                Some(p) if p == ancestor => return true,
                Some(p) => cur = self.node(p).ok().and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// Local transform of `id`.
    pub fn transform(&self, id: NodeId) -> Result<&Transform, SceneError> {
        Ok(&self.node(id)?.transform)
    }

    /// Mutable local transform of `id`.
    ///
    /// ```
    /// use stagecraft_scene::SceneTree;
    ///
    /// let mut tree = SceneTree::<()>::new();
    /// let root = tree.root();
    /// let node = tree.create(root).unwrap();
    /// tree.transform_mut(node)?.translate(4.0, 0.0).rotate(30.0);
    /// assert_eq!(tree.transform(node)?.rotation(), 30.0);
    /// # Ok::<(), stagecraft_scene::SceneError>(())
    /// ```
    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        Ok(&mut self.node_mut(id)?.transform)
    }

    /// The payload of `id`.
    pub fn behavior(&self, id: NodeId) -> Result<&B, SceneError> {
        Ok(&self.node(id)?.behavior)
    }

    /// Mutable payload of `id`.
    pub fn behavior_mut(&mut self, id: NodeId) -> Result<&mut B, SceneError> {
        Ok(&mut self.node_mut(id)?.behavior)
    }

    /// Set or clear this node's own visibility flag.
    pub fn show(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.flags.set(NodeFlags::VISIBLE, visible);
        Ok(())
    }

    /// This node's own visibility flag.
    pub fn is_visible(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(id)?.is_visible())
    }

    /// Replace the flags of `id`.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), SceneError> {
        self.node_mut(id)?.flags = flags;
        Ok(())
    }

    /// `T * R * S` of `id`.
    pub fn local_matrix(&self, id: NodeId) -> Result<Mat3, SceneError> {
        Ok(self.node(id)?.transform.matrix())
    }

    /// Inverse local matrix of `id`.
    ///
    /// Fails with [`SceneError::DegenerateTransform`] when the scale is within
    /// [`SceneConfig::degenerate_scale`] of zero.
    pub fn inverse_local_matrix(&self, id: NodeId) -> Result<Mat3, SceneError> {
        let transform = &self.node(id)?.transform;
        let degenerate = SceneError::DegenerateTransform {
            node: id,
            scale: transform.scale(),
        };
        if self.config.is_degenerate(transform.scale()) {
            return Err(degenerate);
        }
        transform.inverse_matrix().ok_or(degenerate)
    }

    /// Matrix taking `id`'s local coordinates to global coordinates.
    ///
    /// With [`PoseMode::ParentOnly`] only the immediate parent's local matrix is composed.
    pub fn global_matrix(&self, id: NodeId) -> Result<Mat3, SceneError> {
        let node = self.node(id)?;
        let mut m = node.transform.matrix();
        let mut cur = node.parent;
        while let Some(p) = cur {
            let parent = self.node(p)?;
            m = parent.transform.matrix() * m;
            cur = match self.config.pose {
                PoseMode::ParentOnly => None,
                PoseMode::FullChain => parent.parent,
            };
        }
        Ok(m)
    }

    /// Inverse of [`SceneTree::global_matrix`].
    fn inverse_global_matrix(&self, id: NodeId) -> Result<Mat3, SceneError> {
        let mut inv = self.inverse_local_matrix(id)?;
        let mut cur = self.node(id)?.parent;
        while let Some(p) = cur {
            inv = inv * self.inverse_local_matrix(p)?;
            cur = match self.config.pose {
                PoseMode::ParentOnly => None,
                PoseMode::FullChain => self.node(p)?.parent,
            };
        }
        Ok(inv)
    }

    /// Global position of `id`'s origin.
    pub fn global_position(&self, id: NodeId) -> Result<Point, SceneError> {
        Ok(self.global_matrix(id)?.translation_part().to_point())
    }

    /// Global rotation of `id` in degrees, in `[-180, 180)`.
    pub fn global_rotation(&self, id: NodeId) -> Result<f64, SceneError> {
        Ok(self.global_matrix(id)?.rotation_degrees())
    }

    /// Global scale of `id`.
    pub fn global_scale(&self, id: NodeId) -> Result<f64, SceneError> {
        Ok(self.global_matrix(id)?.uniform_scale())
    }

    /// Move `id` under `new_parent` without changing its global pose.
    ///
    /// The node's local transform is rewritten so that composing it with the new
    /// parent's frame reproduces the current global position, rotation and scale.
    /// The node is appended to the end of `new_parent`'s children.
    ///
    /// Nothing is modified when this returns an error.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        self.check_reparent(id, new_parent).map_err(reject)?;
        let transform = self.reparented_transform(id, new_parent).map_err(reject)?;

        let node = self.node_mut(id)?;
        let old_parent = node.parent.replace(new_parent);
        node.transform = transform;
        if let Some(old) = old_parent {
            self.node_mut(old)?.children.retain(|c| *c != id);
        }
        self.node_mut(new_parent)?.children.push(id);
        log::debug!("reparented {id:?} from {old_parent:?} to {new_parent:?}");
        Ok(())
    }

    fn check_reparent(&self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        self.node(id)?;
        self.node(new_parent)?;
        let reason = if id == self.root {
            ParentViolation::ReparentRoot
        } else if id == new_parent {
            ParentViolation::SelfParent
        } else if self.is_ancestor(id, new_parent) {
            ParentViolation::Cycle
        } else {
            return Ok(());
        };
        Err(SceneError::InvalidParent { node: id, reason })
    }

    /// Local transform `id` needs under `new_parent` to keep its global pose.
    fn reparented_transform(&self, id: NodeId, new_parent: NodeId) -> Result<Transform, SceneError> {
        let global = self.global_matrix(id)?;
        let global_scale = global.uniform_scale();
        if self.config.is_degenerate(global_scale) {
            return Err(SceneError::DegenerateTransform {
                node: id,
                scale: global_scale,
            });
        }

        // The frame the node's new local transform is composed with.
        let (frame, frame_inverse) = match self.config.pose {
            PoseMode::ParentOnly => (
                self.local_matrix(new_parent)?,
                self.inverse_local_matrix(new_parent)?,
            ),
            PoseMode::FullChain => (
                self.global_matrix(new_parent)?,
                self.inverse_global_matrix(new_parent)?,
            ),
        };

        let position = frame_inverse.transform_point(global.translation_part().to_point());
        Ok(Transform::new(
            position.to_vec2(),
            global.rotation_degrees() - frame.rotation_degrees(),
            global_scale / frame.uniform_scale(),
        ))
    }
}

fn reject(err: SceneError) -> SceneError {
    log::warn!("rejected scene operation: {err}");
    err
}
