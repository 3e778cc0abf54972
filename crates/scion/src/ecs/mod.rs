//! # Scene Graph Support
//!
//! - [`entity`]: generational [`Actor`] handles
//! - [`hierarchy`]: the [`SceneGraph`] trait and ancestor/descendant walks
//! - [`script`]: typed script lookups over a [`ScriptHost`]
//! - [`scene`]: [`SceneTree`], a small host graph implementing both traits

pub mod entity;
pub mod hierarchy;
pub mod scene;
pub mod script;

pub use entity::Actor;
pub use hierarchy::{Ancestors, Descendants, SceneGraph, ancestors, descendants, root};
pub use scene::{ActorKind, SceneTree};
pub use script::{ScriptHost, ScriptRef};
