//! Scene hierarchies — solar system lookup demo.
//!
//! Builds a small scene, then walks it: ancestors of a moon, the root below
//! the scene, and every `Orbit` script under the sun (disabled or inactive
//! ones only show up with `include_inactive`).
//!
//! Run with: `RUST_LOG=debug cargo run -p scion --example scene_hierarchy`

use scion::diag::log_hierarchy;
use scion::prelude::*;

// ── Scripts ──────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Orbit {
    speed: f32,
}

#[derive(Debug)]
struct Star;

fn main() -> scion::Result<()> {
    env_logger::init();

    let mut tree = SceneTree::new();
    let scene = tree.spawn_scene("SolarSystem");

    let sun = tree.spawn_child(scene, "Sun");
    tree.attach_script(sun, Star);

    let earth = tree.spawn_child(sun, "Earth");
    tree.attach_script(earth, Orbit { speed: 1.0 });
    let moon = tree.spawn_child(earth, "Moon");
    tree.attach_script(moon, Orbit { speed: 13.4 });

    let mars = tree.spawn_child(sun, "Mars");
    tree.attach_script(mars, Orbit { speed: 0.53 });
    let phobos = tree.spawn_child(mars, "Phobos");
    tree.attach_script(phobos, Orbit { speed: 1100.0 });
    tree.set_active(phobos, false);

    log_hierarchy(&tree, scene);

    log::info!("Moon ancestors: {:?}", names(&tree, &ancestors(&tree, moon, false)?));
    log::info!(
        "Moon ancestors with scene: {:?}",
        names(&tree, &ancestors(&tree, moon, true)?)
    );
    if let Some(top) = root(&tree, moon, false)? {
        log::info!("Moon root: {:?}", tree.name(top));
    }

    for found in scripts_in_children::<Orbit, _>(&tree, sun, false) {
        log::info!(
            "active orbit on {:?}, speed {}",
            tree.name(found.actor),
            found.script.speed
        );
    }
    let all = scripts_in_children::<Orbit, _>(&tree, sun, true);
    log::info!("{} orbits including inactive", all.len());

    if let Some(star) = script_in_parent::<Star, _>(&tree, moon)? {
        log::info!("Moon circles star {:?}", tree.name(star.actor));
    }

    // The sun sits directly under the scene, so it has no root below it.
    log::info!("Sun root: {:?}", root(&tree, sun, false)?);
    Ok(())
}

fn names<'t>(tree: &'t SceneTree, actors: &[Actor]) -> Vec<&'t str> {
    actors.iter().filter_map(|&a| tree.name(a)).collect()
}
