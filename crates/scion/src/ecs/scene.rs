//! # SceneTree — A Minimal Host Scene Graph
//!
//! [`SceneTree`] owns actors, their parent/child wiring, activity flags,
//! and attached scripts. It implements [`SceneGraph`] and [`ScriptHost`],
//! so every walker and lookup in this crate runs against it directly.
//! Hosts with their own engine implement those traits on their own types
//! instead.
//!
//! ## Layout
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │ SceneTree                                          │
//! │                                                    │
//! │  allocator: generational Actor handles             │
//! │  slots:     Vec<Option<ActorData>>  (by index)     │
//! │    ActorData { name, kind, active, parent,         │
//! │                children, scripts }                 │
//! │  names:     HashMap<String, Actor>                 │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Scripts are stored type-erased per actor, keyed by `TypeId`, so an actor
//! holds at most one script of each type.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::{Actor, ActorAllocator};
use super::hierarchy::{SceneGraph, is_ancestor_of};
use super::script::{ScriptHost, ScriptRef};

/// Distinguishes scene-boundary actors from ordinary ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// A top-level scene. Counts as a container root.
    Scene,
    Actor,
}

struct ScriptSlot {
    enabled: bool,
    value: Box<dyn Any + Send + Sync>,
}

struct ActorData {
    name: String,
    kind: ActorKind,
    active: bool,
    parent: Option<Actor>,
    children: Vec<Actor>,
    scripts: HashMap<TypeId, ScriptSlot>,
}

impl ActorData {
    fn new(name: &str, kind: ActorKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            active: true,
            parent: None,
            children: Vec::new(),
            scripts: HashMap::new(),
        }
    }
}

/// An arena of actors wired into parent/child trees.
#[derive(Default)]
pub struct SceneTree {
    allocator: ActorAllocator,
    slots: Vec<Option<ActorData>>,
    names: HashMap<String, Actor>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Spawn / Despawn ──────────────────────────────────────────────

    /// Spawn a top-level scene actor.
    pub fn spawn_scene(&mut self, name: &str) -> Actor {
        self.insert(ActorData::new(name, ActorKind::Scene))
    }

    /// Spawn a detached ordinary actor.
    pub fn spawn(&mut self, name: &str) -> Actor {
        self.insert(ActorData::new(name, ActorKind::Actor))
    }

    /// Spawn an ordinary actor under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not alive.
    pub fn spawn_child(&mut self, parent: Actor, name: &str) -> Actor {
        assert!(
            self.is_alive(parent),
            "Cannot spawn child on dead parent {:?}",
            parent
        );
        let child = self.spawn(name);
        self.link_unchecked(parent, child);
        child
    }

    fn insert(&mut self, data: ActorData) -> Actor {
        let actor = self.allocator.allocate();
        let idx = actor.index as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        if !data.name.is_empty() {
            self.names.entry(data.name.clone()).or_insert(actor);
        }
        self.slots[idx] = Some(data);
        actor
    }

    /// Despawn an actor and everything below it, detaching it from its
    /// parent first.
    ///
    /// Returns `false` if the actor was already dead.
    pub fn despawn_recursive(&mut self, actor: Actor) -> bool {
        if !self.is_alive(actor) {
            return false;
        }
        self.detach(actor);
        let doomed = self.descendants_iter(actor, true).collect::<Vec<_>>();
        for a in doomed {
            if let Some(data) = self.slots[a.index as usize].take() {
                if self.names.get(&data.name) == Some(&a) {
                    self.names.remove(&data.name);
                }
            }
            self.allocator.deallocate(a);
        }
        true
    }

    // ── Wiring ───────────────────────────────────────────────────────

    /// Move `child` under `parent`, or detach it when `parent` is `None`.
    ///
    /// Returns `false` and leaves the tree untouched if either actor is dead
    /// or the move would make `child` its own ancestor.
    pub fn set_parent(&mut self, child: Actor, parent: Option<Actor>) -> bool {
        if !self.is_alive(child) {
            return false;
        }
        if let Some(p) = parent {
            if !self.is_alive(p) || p == child || is_ancestor_of(&*self, child, p) {
                return false;
            }
        }
        self.detach(child);
        if let Some(p) = parent {
            self.link_unchecked(p, child);
        }
        true
    }

    /// Point `child` at `parent` and append it to `parent`'s children,
    /// without removing it from any previous parent's list or checking for
    /// cycles. Tests use it directly to build malformed graphs.
    pub(crate) fn link_unchecked(&mut self, parent: Actor, child: Actor) {
        if let Some(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.data_mut(parent) {
            data.children.push(child);
        }
    }

    fn detach(&mut self, child: Actor) {
        let Some(parent) = self.data(child).and_then(|d| d.parent) else {
            return;
        };
        if let Some(data) = self.data_mut(parent) {
            data.children.retain(|&c| c != child);
        }
        if let Some(data) = self.data_mut(child) {
            data.parent = None;
        }
    }

    // ── Flags & Names ────────────────────────────────────────────────

    pub fn set_active(&mut self, actor: Actor, active: bool) {
        if let Some(data) = self.data_mut(actor) {
            data.active = active;
        }
    }

    pub fn kind(&self, actor: Actor) -> Option<ActorKind> {
        self.data(actor).map(|d| d.kind)
    }

    pub fn name(&self, actor: Actor) -> Option<&str> {
        self.data(actor).map(|d| d.name.as_str())
    }

    /// The actor that first claimed `name`, while it is alive.
    pub fn named(&self, name: &str) -> Option<Actor> {
        self.names.get(name).copied()
    }

    pub fn is_alive(&self, actor: Actor) -> bool {
        self.allocator.is_alive(actor)
    }

    pub fn actor_count(&self) -> usize {
        self.allocator.alive_count()
    }

    // ── Scripts ──────────────────────────────────────────────────────

    /// Attach `script` to `actor`, enabled. Returns the script of the same
    /// type it replaced, if any.
    pub fn attach_script<T: Send + Sync + 'static>(&mut self, actor: Actor, script: T) -> Option<T> {
        let data = self.data_mut(actor)?;
        let old = data.scripts.insert(
            TypeId::of::<T>(),
            ScriptSlot {
                enabled: true,
                value: Box::new(script),
            },
        )?;
        old.value.downcast::<T>().ok().map(|b| *b)
    }

    pub fn detach_script<T: Send + Sync + 'static>(&mut self, actor: Actor) -> Option<T> {
        let slot = self.data_mut(actor)?.scripts.remove(&TypeId::of::<T>())?;
        slot.value.downcast::<T>().ok().map(|b| *b)
    }

    /// Enable or disable the `T` script on `actor`. Returns `false` if there
    /// is no such script.
    pub fn set_script_enabled<T: 'static>(&mut self, actor: Actor, enabled: bool) -> bool {
        match self
            .data_mut(actor)
            .and_then(|d| d.scripts.get_mut(&TypeId::of::<T>()))
        {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn script_mut<T: 'static>(&mut self, actor: Actor) -> Option<&mut T> {
        self.data_mut(actor)?
            .scripts
            .get_mut(&TypeId::of::<T>())?
            .value
            .downcast_mut::<T>()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn data(&self, actor: Actor) -> Option<&ActorData> {
        if !self.is_alive(actor) {
            return None;
        }
        self.slots.get(actor.index as usize)?.as_ref()
    }

    fn data_mut(&mut self, actor: Actor) -> Option<&mut ActorData> {
        if !self.is_alive(actor) {
            return None;
        }
        self.slots.get_mut(actor.index as usize)?.as_mut()
    }
}

impl SceneGraph for SceneTree {
    type Node = Actor;

    fn parent(&self, node: Actor) -> Option<Actor> {
        self.data(node)?.parent
    }

    fn children(&self, node: Actor) -> &[Actor] {
        self.data(node).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    fn is_active(&self, node: Actor) -> bool {
        self.data(node).is_some_and(|d| d.active)
    }

    fn is_container_root(&self, node: Actor) -> bool {
        self.kind(node) == Some(ActorKind::Scene)
    }
}

impl ScriptHost for SceneTree {
    fn script<T: 'static>(&self, node: Actor) -> Option<ScriptRef<'_, Actor, T>> {
        let slot = self.data(node)?.scripts.get(&TypeId::of::<T>())?;
        Some(ScriptRef {
            actor: node,
            script: slot.value.downcast_ref::<T>()?,
            enabled: slot.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::hierarchy::{ancestors, descendants};

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    #[test]
    fn spawn_child_wires_both_directions() {
        let mut tree = SceneTree::new();
        let scene = tree.spawn_scene("Main");
        let ship = tree.spawn_child(scene, "Ship");
        assert_eq!(tree.parent(ship), Some(scene));
        assert_eq!(tree.children(scene), &[ship]);
        assert!(tree.has_children(scene));
        assert!(tree.is_container_root(scene));
        assert!(!tree.is_container_root(ship));
    }

    #[test]
    #[should_panic(expected = "dead parent")]
    fn spawn_child_on_dead_parent_panics() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("a");
        tree.despawn_recursive(a);
        tree.spawn_child(a, "b");
    }

    #[test]
    fn despawn_recursive_removes_subtree() {
        let mut tree = SceneTree::new();
        let scene = tree.spawn_scene("Main");
        let a = tree.spawn_child(scene, "a");
        let b = tree.spawn_child(a, "b");
        let _c = tree.spawn_child(scene, "c");
        assert_eq!(tree.actor_count(), 4);

        assert!(tree.despawn_recursive(a));
        assert_eq!(tree.actor_count(), 2);
        assert!(!tree.is_alive(b));
        assert_eq!(tree.children(scene).len(), 1);
        assert_eq!(tree.named("a"), None);
        assert!(!tree.despawn_recursive(a));
    }

    #[test]
    fn set_parent_moves_and_rejects_cycles() {
        let mut tree = SceneTree::new();
        let scene = tree.spawn_scene("Main");
        let a = tree.spawn_child(scene, "a");
        let b = tree.spawn_child(a, "b");
        let c = tree.spawn_child(scene, "c");

        assert!(tree.set_parent(b, Some(c)));
        assert_eq!(tree.children(a), &[] as &[Actor]);
        assert_eq!(ancestors(&tree, b, true).unwrap(), vec![c, scene]);

        assert!(!tree.set_parent(scene, Some(b)));
        assert!(!tree.set_parent(b, Some(b)));

        assert!(tree.set_parent(c, None));
        assert_eq!(tree.parent(c), None);
        assert_eq!(descendants(&tree, scene, false), vec![a]);
    }

    #[test]
    fn scripts_are_one_per_type() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("a");
        assert_eq!(tree.attach_script(a, Health(3)), None);
        assert_eq!(tree.attach_script(a, Health(5)), Some(Health(3)));

        let found = tree.script::<Health>(a).unwrap();
        assert_eq!(found.script, &Health(5));
        assert!(found.enabled);

        tree.script_mut::<Health>(a).unwrap().0 = 9;
        assert!(tree.set_script_enabled::<Health>(a, false));
        assert!(!tree.script::<Health>(a).unwrap().enabled);
        assert!(!tree.set_script_enabled::<String>(a, false));

        assert_eq!(tree.detach_script::<Health>(a), Some(Health(9)));
        assert!(tree.script::<Health>(a).is_none());
    }

    #[test]
    fn stale_handles_read_as_empty() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("a");
        tree.set_active(a, false);
        assert!(!tree.is_active(a));
        tree.despawn_recursive(a);
        let reused = tree.spawn("fresh");
        assert_eq!(reused.index(), a.index());
        assert_eq!(tree.name(a), None);
        assert_eq!(tree.name(reused), Some("fresh"));
        assert!(tree.is_active(reused));
    }
}
