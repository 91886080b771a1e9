// Copyright 2025 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small orrery: node kinds as an enum, per-frame update and draw.
//!
//! Each body spins with its own angular speed; moons inherit their planet's spin,
//! so their drawn positions trace the combined motion.
//!
//! Run:
//! - `cargo run -p stagecraft_demos --example orrery`

use kurbo::{Point, Vec2};
use stagecraft_affine::distance;
use stagecraft_scene::{Collide, Draw, RecordingContext, SceneTree, Transform, Update};

#[derive(Debug, Default)]
enum Body {
    #[default]
    Pivot,
    Planet {
        name: &'static str,
        radius: f64,
        /// Degrees per second.
        spin: f64,
        angle: f64,
    },
}

impl Update for Body {
    fn update(&mut self, dt: f64) {
        if let Self::Planet { spin, angle, .. } = self {
            *angle += *spin * dt;
        }
    }
}

impl Draw<RecordingContext<&'static str>> for Body {
    fn draw_self(&self, ctx: &mut RecordingContext<&'static str>) {
        if let Self::Planet { name, .. } = self {
            ctx.record(*name);
        }
    }
}

impl Collide for Body {
    fn collision(&self, point: Point) -> bool {
        match self {
            Self::Pivot => false,
            Self::Planet { radius, .. } => distance(0.0, 0.0, point.x, point.y) <= *radius,
        }
    }
}

fn planet(name: &'static str, radius: f64, spin: f64) -> Body {
    Body::Planet {
        name,
        radius,
        spin,
        angle: 0.0,
    }
}

fn main() -> Result<(), stagecraft_scene::SceneError> {
    env_logger::init();

    let mut tree = SceneTree::<Body>::new();
    let root = tree.root();
    let sun = tree.insert(root, planet("sun", 5.0, 10.0))?;
    let earth = tree.insert_with_transform(
        sun,
        Transform::new(Vec2::new(40.0, 0.0), 0.0, 0.5),
        planet("earth", 2.0, 90.0),
    )?;
    let moon = tree.insert_with_transform(
        earth,
        Transform::new(Vec2::new(8.0, 0.0), 0.0, 0.5),
        planet("moon", 1.0, 0.0),
    )?;
    let mars = tree.insert_with_transform(
        sun,
        Transform::new(Vec2::new(70.0, 0.0), 0.0, 0.4),
        planet("mars", 1.5, 45.0),
    )?;

    let bodies = [sun, earth, moon, mars];
    for frame in 0..4 {
        tree.update(0.5);
        // Apply each body's accumulated spin to its transform.
        for id in bodies {
            let angle = match tree.behavior(id)? {
                Body::Planet { angle, .. } => *angle,
                Body::Pivot => continue,
            };
            tree.transform_mut(id)?.set_rotation(angle);
        }
        if frame == 2 {
            tree.show(earth, false)?;
        }

        let mut ctx = RecordingContext::<&'static str>::new();
        tree.draw(&mut ctx);
        println!("frame {frame}:");
        for call in ctx.calls() {
            println!("  {:>5} at {:?}", call.item, call.transform * Point::ORIGIN);
        }
    }

    println!("bodies at the sun's center: {:?}", tree.collide(Point::ORIGIN));
    println!("destroyed earth system: {} node(s)", tree.destroy(earth)?);
    println!("{} live node(s) remain", tree.live_count());
    Ok(())
}
