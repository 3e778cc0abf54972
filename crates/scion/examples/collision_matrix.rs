//! Layer masks and the collision matrix.
//!
//! Edits a mask, toggles a few matrix entries, and saves the physics
//! settings as JSON. Pass a path to choose where they are written.
//!
//! Run with: `cargo run -p scion --example collision_matrix -- physics.json`

use scion::prelude::*;

const PLAYER: i32 = 1;
const ENEMY: i32 = 2;
const BULLET: i32 = 3;

fn main() -> scion::Result<()> {
    init_logger();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "physics_settings.json".to_string());

    let mask = LayersMask::NONE.add_layers(&[PLAYER, ENEMY])?;
    log::info!("player+enemy mask: {mask}");

    if let Err(e) = mask.add_layers(&[BULLET, 40]) {
        log::warn!("rejected batch, mask still {mask}: {e}");
    }

    let mut store = JsonSettingsFile::new(path);

    // Bullets ignore each other, and enemies ignore enemy bullets.
    set_matrix_collision_layer(&mut store, BULLET, BULLET, true)?;
    store.load_physics_settings()?.layer_masks.set_collision_pair(ENEMY, BULLET, false)?;

    let matrix = &store.load_physics_settings()?.layer_masks;
    for row in [PLAYER, ENEMY, BULLET] {
        log::info!("row {row}: {}", matrix.row(row)?);
    }
    let bullet_row = matrix.rows()[BULLET as usize];
    log::info!(
        "bullet hits player: {}",
        valid_collision_layer(PLAYER, bullet_row)?
    );

    store.save()?;
    Ok(())
}
