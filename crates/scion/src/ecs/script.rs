//! # Script Lookups
//!
//! Find scripts of a given type on a node's descendants or ancestors.
//!
//! A host exposes attached scripts through [`ScriptHost::script`]. Each hit
//! comes back as a [`ScriptRef`]: the owning node, a borrow of the script,
//! and the script's enabled flag. A node holds at most one script per type,
//! so the owning node doubles as the script's identity.
//!
//! ## Filtering
//!
//! Unless `include_inactive` is set, a candidate is skipped when its script
//! is disabled **or** its owning node is inactive, and the scan moves on to
//! the next node. The same rule applies to every lookup below.

use std::collections::HashSet;
use std::fmt;

use super::hierarchy::SceneGraph;
use crate::error::Result;

/// A scene graph whose nodes carry typed scripts.
pub trait ScriptHost: SceneGraph {
    /// The `T` script attached to `node`, if any.
    fn script<T: 'static>(&self, node: Self::Node) -> Option<ScriptRef<'_, Self::Node, T>>;
}

/// A script found on a node.
pub struct ScriptRef<'a, N, T> {
    /// Node the script is attached to.
    pub actor: N,
    pub script: &'a T,
    pub enabled: bool,
}

impl<N: Copy, T> Clone for ScriptRef<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Copy, T> Copy for ScriptRef<'_, N, T> {}

impl<N: fmt::Debug, T: fmt::Debug> fmt::Debug for ScriptRef<'_, N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRef")
            .field("actor", &self.actor)
            .field("script", self.script)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn qualifies<H: ScriptHost + ?Sized, T>(
    host: &H,
    found: &ScriptRef<'_, H::Node, T>,
    include_inactive: bool,
) -> bool {
    include_inactive || (found.enabled && host.is_active(found.actor))
}

fn first_qualifying<'h, H, T, I>(host: &'h H, nodes: I, include_inactive: bool) -> Option<ScriptRef<'h, H::Node, T>>
where
    H: ScriptHost + ?Sized,
    T: 'static,
    I: IntoIterator<Item = H::Node>,
{
    nodes
        .into_iter()
        .filter_map(|n| host.script::<T>(n))
        .find(|found| qualifies(host, found, include_inactive))
}

fn all_qualifying<'h, H, T, I>(host: &'h H, nodes: I, include_inactive: bool) -> Vec<ScriptRef<'h, H::Node, T>>
where
    H: ScriptHost + ?Sized,
    T: 'static,
    I: IntoIterator<Item = H::Node>,
{
    let mut owners = HashSet::new();
    nodes
        .into_iter()
        .filter_map(|n| host.script::<T>(n))
        .filter(|found| qualifies(host, found, include_inactive))
        .filter(|found| owners.insert(found.actor))
        .collect()
}

// ── Descendants ──────────────────────────────────────────────────────

/// First qualifying `T` script below `start`, in breadth-first order.
/// `start` itself is not searched.
pub fn script_in_child<'h, T: 'static, H: ScriptHost + ?Sized>(
    host: &'h H,
    start: H::Node,
    include_inactive: bool,
) -> Option<ScriptRef<'h, H::Node, T>> {
    first_qualifying(host, host.descendants_iter(start, false), include_inactive)
}

/// Every qualifying `T` script below `start`, in discovery order.
pub fn scripts_in_children<'h, T: 'static, H: ScriptHost + ?Sized>(
    host: &'h H,
    start: H::Node,
    include_inactive: bool,
) -> Vec<ScriptRef<'h, H::Node, T>> {
    all_qualifying(host, host.descendants_iter(start, false), include_inactive)
}

// ── Ancestors ────────────────────────────────────────────────────────

/// Nearest enabled `T` script on an active ancestor of `start`, stopping
/// below the scene.
///
/// Fails with [`Error::InvalidNode`](crate::Error::InvalidNode) if `start`
/// has no parent.
pub fn script_in_parent<'h, T: 'static, H: ScriptHost + ?Sized>(
    host: &'h H,
    start: H::Node,
) -> Result<Option<ScriptRef<'h, H::Node, T>>> {
    Ok(first_qualifying(host, host.ancestors_iter(start, false)?, false))
}

/// Every qualifying `T` script on the ancestors of `start`, nearest first,
/// stopping below the scene.
pub fn scripts_in_parents<'h, T: 'static, H: ScriptHost + ?Sized>(
    host: &'h H,
    start: H::Node,
    include_inactive: bool,
) -> Result<Vec<ScriptRef<'h, H::Node, T>>> {
    Ok(all_qualifying(host, host.ancestors_iter(start, false)?, include_inactive))
}

/// Nearest ancestor of `start` (below the scene) that matches `pred`.
pub fn ancestor_where<G, F>(graph: &G, start: G::Node, mut pred: F) -> Result<Option<G::Node>>
where
    G: SceneGraph + ?Sized,
    F: FnMut(G::Node) -> bool,
{
    Ok(graph.ancestors_iter(start, false)?.find(|&n| pred(n)))
}

/// All ancestors of `start` (below the scene) that match `pred`, nearest
/// first.
pub fn ancestors_where<G, F>(graph: &G, start: G::Node, mut pred: F) -> Result<Vec<G::Node>>
where
    G: SceneGraph + ?Sized,
    F: FnMut(G::Node) -> bool,
{
    Ok(graph.ancestors_iter(start, false)?.filter(|&n| pred(n)).collect())
}
