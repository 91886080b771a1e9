// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Vec2;
use stagecraft_scene::{NodeId, PoseMode, RecordingContext, SceneConfig, SceneTree, Transform};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn transform(&mut self) -> Transform {
        Transform::new(
            Vec2::new(self.next_f64() * 100.0, self.next_f64() * 100.0),
            self.next_f64() * 360.0,
            0.5 + self.next_f64(),
        )
    }
}

/// A tree where every node has `fanout` children, `depth` levels below the root.
fn gen_balanced(config: SceneConfig, fanout: usize, depth: usize) -> (SceneTree, Vec<NodeId>) {
    let mut tree = SceneTree::with_config(config);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut all = Vec::new();
    let mut level = vec![tree.root()];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for _ in 0..fanout {
                let id = tree
                    .insert_with_transform(parent, rng.transform(), ())
                    .unwrap();
                next.push(id);
            }
        }
        all.extend_from_slice(&next);
        level = next;
    }
    (tree, all)
}

/// A single chain `depth` nodes deep.
fn gen_chain(depth: usize) -> (SceneTree, NodeId) {
    let mut tree = SceneTree::new();
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut tip = tree.root();
    for _ in 0..depth {
        tip = tree.insert_with_transform(tip, rng.transform(), ()).unwrap();
    }
    (tree, tip)
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    for &(fanout, depth) in &[(4usize, 4usize), (8, 4), (16, 3)] {
        let (tree, all) = gen_balanced(SceneConfig::default(), fanout, depth);
        group.throughput(Throughput::Elements(all.len() as u64 + 1));
        group.bench_function(format!("balanced_f{fanout}_d{depth}"), |b| {
            b.iter(|| {
                let mut ctx = RecordingContext::<()>::new();
                tree.draw(&mut ctx);
                black_box(ctx.current_transform());
            });
        });
    }
    let (tree, _) = gen_chain(10_000);
    group.bench_function("chain_10000", |b| {
        b.iter(|| {
            let mut ctx = RecordingContext::<()>::new();
            tree.draw(&mut ctx);
            black_box(ctx.depth());
        });
    });
    group.finish();
}

fn bench_global_pose(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_pose");
    for (name, pose) in [
        ("parent_only", PoseMode::ParentOnly),
        ("full_chain", PoseMode::FullChain),
    ] {
        let config = SceneConfig {
            pose,
            ..SceneConfig::default()
        };
        let (tree, all) = gen_balanced(config, 8, 4);
        group.throughput(Throughput::Elements(all.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                for &id in &all {
                    black_box(tree.global_position(id).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_reparent_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");
    group.bench_function("reparent_leaves_to_root", |b| {
        b.iter_batched(
            || gen_balanced(SceneConfig::default(), 8, 3),
            |(mut tree, all)| {
                let root = tree.root();
                for &id in all.iter().rev().take(256) {
                    tree.set_parent(id, root).unwrap();
                }
                black_box(tree.live_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("destroy_subtrees", |b| {
        b.iter_batched(
            || gen_balanced(SceneConfig::default(), 8, 4),
            |(mut tree, _)| {
                let root = tree.root();
                let children = tree.children(root).unwrap().to_vec();
                for id in children {
                    black_box(tree.destroy(id).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_draw, bench_global_pose, bench_reparent_destroy);
criterion_main!(benches);
