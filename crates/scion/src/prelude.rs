//! Common imports: `use scion::prelude::*`.

pub use crate::ecs::hierarchy::{ancestors, depth, descendants, is_ancestor_of, root};
pub use crate::ecs::script::{
    ancestor_where, ancestors_where, script_in_child, script_in_parent, scripts_in_children,
    scripts_in_parents,
};
pub use crate::ecs::{Actor, ActorKind, SceneGraph, SceneTree, ScriptHost, ScriptRef};
pub use crate::error::{Error, Result};
pub use crate::layers::{LayersMask, MAX_LAYER};
pub use crate::physics::{
    CollisionMatrix, InMemorySettings, JsonSettingsFile, PhysicsSettings, PhysicsSettingsSource,
    set_matrix_collision_layer, valid_collision_layer,
};

#[cfg(feature = "diagnostics")]
pub use crate::diag::init_logger;
