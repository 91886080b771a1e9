// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene tree basics.
//!
//! Build a two-level tree, query global poses, reparent a node without moving it,
//! and see the errors for invalid requests.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p stagecraft_demos --example scene_basics`

use kurbo::Vec2;
use stagecraft_scene::{SceneError, SceneTree, Transform};

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let mut tree = SceneTree::<()>::new();
    let root = tree.root();
    let a = tree.insert_with_transform(root, Transform::new(Vec2::new(10.0, 0.0), 30.0, 2.0), ())?;
    let b = tree.insert_with_transform(a, Transform::new(Vec2::new(5.0, 0.0), 15.0, 0.5), ())?;

    let report = |tree: &SceneTree, label: &str| -> Result<(), SceneError> {
        println!(
            "{label}: local {:?}, global position {:?}, rotation {:.3}, scale {:.3}",
            tree.transform(b)?,
            tree.global_position(b)?,
            tree.global_rotation(b)?,
            tree.global_scale(b)?,
        );
        Ok(())
    };

    report(&tree, "under a")?;
    tree.set_parent(b, root)?;
    report(&tree, "under root")?;
    assert!(!tree.children(a)?.contains(&b), "b should have left a");

    // Invalid requests are rejected and leave the tree as it was.
    println!("destroy root: {:?}", tree.destroy(root));
    println!("a under itself: {:?}", tree.set_parent(a, a));
    tree.transform_mut(a)?.set_scale(0.0);
    println!("b under zero-scale a: {:?}", tree.set_parent(b, a));

    let removed = tree.destroy(a)?;
    println!("destroyed {removed} node(s); {} live", tree.live_count());
    println!("stale handle: {:?}", tree.global_position(a));
    Ok(())
}
