//! # Physics Settings — The Layer Collision Matrix
//!
//! [`CollisionMatrix`] is the 32×32 table saying which layers may collide:
//! bit `l` of row `m` is set when layer `m` collides with layer `l`. It lives
//! inside [`PhysicsSettings`], which the host loads and saves.
//!
//! Edits go through an injected [`PhysicsSettingsSource`] rather than a
//! global, so callers (and tests) choose where the settings come from:
//!
//! ```ignore
//! let mut store = JsonSettingsFile::new("settings/physics.json");
//! set_matrix_collision_layer(&mut store, 5, 10, false)?;
//! store.save()?; // persisting is always an explicit step
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layers::{LAYER_COUNT, LayersMask, check_layer};

// ── CollisionMatrix ──────────────────────────────────────────────────────

/// Which layer pairs may collide. Indexed `[row][layer]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMatrix {
    rows: [u32; LAYER_COUNT],
}

impl Default for CollisionMatrix {
    /// Every layer collides with every layer.
    fn default() -> Self {
        Self {
            rows: [u32::MAX; LAYER_COUNT],
        }
    }
}

impl CollisionMatrix {
    pub fn from_rows(rows: [u32; LAYER_COUNT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[u32; LAYER_COUNT] {
        &self.rows
    }

    /// Row `row` as a mask of the layers it collides with.
    pub fn row(&self, row: i32) -> Result<LayersMask> {
        let row = check_layer(row)?;
        Ok(LayersMask::new(self.rows[row as usize]))
    }

    /// Whether bit `layer` is set in row `row`.
    pub fn collides(&self, row: i32, layer: i32) -> Result<bool> {
        let row = check_layer(row)?;
        valid_collision_layer(layer, self.rows[row as usize])
    }

    /// Set or clear bit `layer` of row `row`. Only that one entry changes.
    pub fn set_collision(&mut self, row: i32, layer: i32, collide: bool) -> Result<()> {
        let row = check_layer(row)? as usize;
        let bit = 1u32 << check_layer(layer)?;
        if collide {
            self.rows[row] |= bit;
        } else {
            self.rows[row] &= !bit;
        }
        Ok(())
    }

    /// Edit both `[a][b]` and `[b][a]`, keeping the pair symmetric.
    pub fn set_collision_pair(&mut self, a: i32, b: i32, collide: bool) -> Result<()> {
        check_layer(a)?;
        check_layer(b)?;
        self.set_collision(a, b, collide)?;
        self.set_collision(b, a, collide)
    }
}

/// Test bit `layer` of a raw matrix row mask.
///
/// `row_mask` is the row's bits, not a row index; use
/// [`CollisionMatrix::collides`] to query by row index.
pub fn valid_collision_layer(layer: i32, row_mask: u32) -> Result<bool> {
    let bit = check_layer(layer)?;
    Ok(row_mask & (1 << bit) != 0)
}

// ── Settings ─────────────────────────────────────────────────────────────

/// Persisted physics configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Per-layer collision rows.
    pub layer_masks: CollisionMatrix,
}

/// Hands out a mutable, already-loaded [`PhysicsSettings`].
///
/// Implementations load on demand but never save on their own.
pub trait PhysicsSettingsSource {
    fn load_physics_settings(&mut self) -> Result<&mut PhysicsSettings>;
}

/// Settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    pub settings: PhysicsSettings,
}

impl InMemorySettings {
    pub fn new(settings: PhysicsSettings) -> Self {
        Self { settings }
    }
}

impl PhysicsSettingsSource for InMemorySettings {
    fn load_physics_settings(&mut self) -> Result<&mut PhysicsSettings> {
        Ok(&mut self.settings)
    }
}

/// Settings backed by a JSON file.
///
/// The file is read on the first [`load_physics_settings`] and cached after
/// that. A missing file loads as [`PhysicsSettings::default`]. Changes reach
/// disk only through [`save`](Self::save).
///
/// [`load_physics_settings`]: PhysicsSettingsSource::load_physics_settings
#[derive(Debug)]
pub struct JsonSettingsFile {
    path: PathBuf,
    cached: Option<PhysicsSettings>,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached copy and read the file again.
    pub fn reload(&mut self) -> Result<&mut PhysicsSettings> {
        self.cached = None;
        self.load_physics_settings()
    }

    /// Write the current settings as pretty JSON, loading them first if
    /// nothing was loaded yet.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&*self.load_physics_settings()?)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, json)?;
        log::info!("Physics settings saved to {}", self.path.display());
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<PhysicsSettings> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No physics settings at {}, using defaults", path.display());
            Ok(PhysicsSettings::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl PhysicsSettingsSource for JsonSettingsFile {
    fn load_physics_settings(&mut self) -> Result<&mut PhysicsSettings> {
        let settings = match self.cached.take() {
            Some(settings) => settings,
            None => read_settings(&self.path)?,
        };
        Ok(self.cached.insert(settings))
    }
}

// ── Matrix edits ─────────────────────────────────────────────────────────

/// Set (`ignore == false`) or clear (`ignore == true`) bit `layer` of row
/// `matrix_row` in the loaded settings.
///
/// Both indices are checked before the settings are loaded. The loaded
/// settings are edited in place and not saved.
pub fn set_matrix_collision_layer<S: PhysicsSettingsSource + ?Sized>(
    source: &mut S,
    matrix_row: i32,
    layer: i32,
    ignore: bool,
) -> Result<()> {
    check_layer(matrix_row)?;
    check_layer(layer)?;
    let settings = source.load_physics_settings()?;
    settings.layer_masks.set_collision(matrix_row, layer, !ignore)?;
    log::debug!(
        "collision matrix [{matrix_row}][{layer}] {}",
        if ignore { "cleared" } else { "set" }
    );
    Ok(())
}
