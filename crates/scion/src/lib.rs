//! # Scion — Scene-Graph Extension Utilities
//!
//! Small helpers layered over a host scene graph:
//!
//! - [`ecs::hierarchy`]: ancestor/root/descendant walks that survive
//!   malformed (cyclic or diamond-shaped) graphs
//! - [`ecs::script`]: find typed scripts among descendants or ancestors
//! - [`layers`]: 32-bit [`LayersMask`](layers::LayersMask) editing
//! - [`physics`]: the layer collision matrix and its settings store
//!
//! Any engine can plug in by implementing [`SceneGraph`](ecs::SceneGraph)
//! and [`ScriptHost`](ecs::ScriptHost); [`SceneTree`](ecs::SceneTree) is a
//! ready-made host.
//!
//! Start with `use scion::prelude::*`.

pub mod ecs;
pub mod error;
pub mod layers;
pub mod physics;
pub mod prelude;

#[cfg(feature = "diagnostics")]
pub mod diag;

pub use error::{Error, Result};
