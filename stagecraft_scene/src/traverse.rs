// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame traversals: draw, update, collide.
//!
//! All traversals are depth-first pre-order with siblings in children order, and use
//! an explicit work stack so tree depth is not limited by the call stack.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::behavior::{Collide, Draw, Update};
use crate::error::SceneError;
use crate::render::RenderContext;
use crate::tree::SceneTree;
use crate::types::{NodeFlags, NodeId};

enum Step {
    Enter(NodeId),
    Exit,
}

impl<B> SceneTree<B> {
    /// Draw the whole tree.
    pub fn draw<C>(&self, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
        B: Draw<C>,
    {
        self.draw_walk(self.root(), ctx);
    }

    /// Draw `id` and its descendants.
    ///
    /// Only the subtree's own local transforms are applied; ancestors above `id` are not.
    pub fn draw_subtree<C>(&self, id: NodeId, ctx: &mut C) -> Result<(), SceneError>
    where
        C: RenderContext + ?Sized,
        B: Draw<C>,
    {
        self.node(id)?;
        self.draw_walk(id, ctx);
        Ok(())
    }

    fn draw_walk<C>(&self, start: NodeId, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
        B: Draw<C>,
    {
        log::trace!("draw from {start:?}");
        let mut stack = vec![Step::Enter(start)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Exit => {
                    ctx.pop_transform();
                    continue;
                }
                Step::Enter(id) => id,
            };
            let Ok(node) = self.node(id) else {
                continue;
            };
            // A hidden node prunes its subtree; descendants' own flags are never consulted.
            if !node.is_visible() {
                continue;
            }
            let t = node.transform();
            ctx.push_transform();
            ctx.translate(t.position().x, t.position().y);
            ctx.rotate(t.rotation());
            ctx.scale(t.scale());
            node.behavior().draw_self(ctx);
            stack.push(Step::Exit);
            stack.extend(node.children().iter().rev().map(|&c| Step::Enter(c)));
        }
    }

    /// Advance every live node by `dt` seconds, hidden ones included.
    pub fn update(&mut self, dt: f64)
    where
        B: Update,
    {
        log::trace!("update dt={dt}");
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.node_mut(id) else {
                continue;
            };
            node.behavior.update(dt);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Nodes whose [`Collide`] hook reports a hit at `point`, in traversal order.
    ///
    /// Hidden subtrees are skipped. Nodes without [`NodeFlags::COLLIDABLE`] are not
    /// tested but their children still are. `point` is passed to the hook unchanged.
    pub fn collide(&self, point: Point) -> Vec<NodeId>
    where
        B: Collide,
    {
        let mut hits = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.node(id) else {
                continue;
            };
            if !node.is_visible() {
                continue;
            }
            if node.flags().contains(NodeFlags::COLLIDABLE) && node.behavior().collision(point) {
                hits.push(id);
            }
            stack.extend(node.children().iter().rev());
        }
        hits
    }
}
