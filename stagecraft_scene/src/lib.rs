// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagecraft Scene: an arena-backed 2D scene graph.
//!
//! Stagecraft Scene keeps a hierarchy of translated, rotated and uniformly scaled nodes and
//! answers two questions per frame: *where* each node is, and *in what order* nodes are visited.
//! It does not decide what to draw or when frames advance.
//!
//! - Each node stores a local [`Transform`] relative to its parent (`T * R * S`, degrees).
//! - [`SceneTree::draw`] walks the tree depth-first and drives a [`RenderContext`]'s
//!   transform stack, so each node draws in the cumulative frame of its ancestors.
//! - [`SceneTree::set_parent`] moves a node without changing its global pose.
//!
//! ## Ownership model
//!
//! A [`SceneTree`] owns all of its nodes in an arena and hands out generational [`NodeId`]s.
//! Parents list their children; children hold their parent's handle. A tree always has a root
//! (identity transform, visible, parentless) that cannot be destroyed or reparented.
//! There is no global state: independent trees can coexist.
//!
//! ## Node kinds
//!
//! The tree is generic over a per-node payload `B`. Traversals dispatch to the capability hooks
//! in [`behavior`]: [`Update`], [`Draw`] and [`Collide`]. A closed set of node kinds is usually
//! an enum implementing those hooks with a `match`. `SceneTree<()>` is a plain transform hierarchy.
//!
//! ## Global poses
//!
//! [`SceneConfig::pose`] selects how global poses are composed. [`PoseMode::ParentOnly`] (the
//! default) composes a node's local transform with its immediate parent's only;
//! [`PoseMode::FullChain`] composes the whole ancestor chain. Reparenting uses the same
//! convention as the queries, so the pose it preserves is the pose the queries report.
//!
//! ## Errors
//!
//! Fallible operations return [`SceneError`]. Checks run before any mutation, so a failed
//! [`SceneTree::set_parent`] or [`SceneTree::destroy`] leaves the tree untouched.
//!
//! ## Logging
//!
//! Structural changes are logged through the [`log`] facade at `debug` level, traversals at
//! `trace`, and rejected operations at `warn`. Install any logger in the application to see them.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use stagecraft_scene::{RecordingContext, SceneTree, Transform};
//!
//! let mut tree = SceneTree::<()>::new();
//! let root = tree.root();
//!
//! let a = tree.insert_with_transform(root, Transform::new(Vec2::new(10.0, 0.0), 0.0, 1.0), ())?;
//! let b = tree.insert_with_transform(a, Transform::new(Vec2::new(5.0, 0.0), 0.0, 1.0), ())?;
//! assert_eq!(tree.global_position(b)?, Point::new(15.0, 0.0));
//!
//! // Move B to the root; its global position is preserved.
//! tree.set_parent(b, root)?;
//! assert_eq!(tree.global_position(b)?, Point::new(15.0, 0.0));
//! assert_eq!(tree.children(root)?, &[a, b]);
//!
//! // Draw the frame into a recording context.
//! let mut ctx = RecordingContext::<()>::new();
//! tree.draw(&mut ctx);
//! assert_eq!(ctx.depth(), 0);
//! # Ok::<(), stagecraft_scene::SceneError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod behavior;
mod error;
mod render;
mod transform;
mod traverse;
mod tree;
mod types;

pub use behavior::{Collide, Draw, Update};
pub use error::{ParentViolation, SceneError};
pub use render::{DrawCall, RecordingContext, RenderContext};
pub use transform::Transform;
pub use tree::{SceneNode, SceneTree};
pub use types::{NodeFlags, NodeId, PoseMode, SceneConfig};
