//! # Hierarchy Walks — Ancestors, Roots, and Descendants
//!
//! The walkers here run over any host scene graph that implements
//! [`SceneGraph`]. The host owns the nodes and their parent/child wiring;
//! this module only reads it.
//!
//! ## Usage
//!
//! ```ignore
//! let scene = tree.spawn_scene("Level");
//! let ship = tree.spawn_child(scene, "Ship");
//! let turret = tree.spawn_child(ship, "Turret");
//!
//! // Nearest first, stopping below the scene.
//! assert_eq!(ancestors(&tree, turret, false)?, vec![ship]);
//! assert_eq!(root(&tree, turret, false)?, Some(ship));
//! assert_eq!(root(&tree, turret, true)?, Some(scene));
//! ```
//!
//! ## Malformed graphs
//!
//! Host graphs are live and mutable, so a parent chain can briefly loop
//! back on itself. Both walkers keep a visited set: ancestors stop before
//! the first repeated ancestor, and descendants yield each node at most
//! once even when it is reachable through several child lists. The start
//! node is only part of that set once it has been yielded, so a loop back
//! to it reports it a single time.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Read access to a host scene graph.
///
/// Nodes form a rooted tree with at most one parent each. A node may be
/// flagged as a *container root* (a scene), which ancestor walks can
/// optionally stop below.
pub trait SceneGraph {
    /// Opaque, stable node identity.
    type Node: Copy + Eq + Hash + fmt::Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children only.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    fn has_children(&self, node: Self::Node) -> bool {
        !self.children(node).is_empty()
    }

    fn is_active(&self, node: Self::Node) -> bool;

    /// Whether `node` is a scene-boundary node.
    fn is_container_root(&self, node: Self::Node) -> bool;

    /// Lazily walk the parent chain of `node`, nearest first.
    ///
    /// Fails with [`Error::InvalidNode`] if `node` has no parent.
    fn ancestors_iter(
        &self,
        node: Self::Node,
        include_container_root: bool,
    ) -> Result<Ancestors<'_, Self>> {
        Ancestors::new(self, node, include_container_root)
    }

    /// Lazily walk everything below `node`, breadth-first.
    fn descendants_iter(&self, node: Self::Node, include_start: bool) -> Descendants<'_, Self> {
        Descendants::new(self, node, include_start)
    }
}

/// Iterator over a node's ancestors. See [`SceneGraph::ancestors_iter`].
pub struct Ancestors<'g, G: SceneGraph + ?Sized> {
    graph: &'g G,
    next: Option<G::Node>,
    visited: HashSet<G::Node>,
    include_container_root: bool,
}

impl<'g, G: SceneGraph + ?Sized> Ancestors<'g, G> {
    pub fn new(graph: &'g G, start: G::Node, include_container_root: bool) -> Result<Self> {
        let Some(parent) = graph.parent(start) else {
            return Err(Error::invalid_node(start));
        };
        Ok(Self {
            graph,
            next: Some(parent),
            visited: HashSet::new(),
            include_container_root,
        })
    }
}

impl<G: SceneGraph + ?Sized> Iterator for Ancestors<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        let node = self.next.take()?;
        if !self.visited.insert(node) {
            log::trace!("ancestor walk hit a parent cycle at {node:?}");
            return None;
        }
        if !self.include_container_root && self.graph.is_container_root(node) {
            return None;
        }
        self.next = self.graph.parent(node);
        Some(node)
    }
}

impl<G: SceneGraph + ?Sized> std::iter::FusedIterator for Ancestors<'_, G> {}

/// Iterator over a node's descendants. See [`SceneGraph::descendants_iter`].
///
/// Nodes come out in discovery order: a node's children are queued when
/// the node itself is yielded.
pub struct Descendants<'g, G: SceneGraph + ?Sized> {
    graph: &'g G,
    queue: VecDeque<G::Node>,
    seen: HashSet<G::Node>,
}

impl<'g, G: SceneGraph + ?Sized> Descendants<'g, G> {
    pub fn new(graph: &'g G, start: G::Node, include_start: bool) -> Self {
        let mut walk = Self {
            graph,
            queue: VecDeque::new(),
            seen: HashSet::new(),
        };
        if include_start {
            walk.seen.insert(start);
            walk.queue.push_back(start);
        } else {
            walk.enqueue_children(start);
        }
        walk
    }

    fn enqueue_children(&mut self, node: G::Node) {
        if !self.graph.has_children(node) {
            return;
        }
        for &child in self.graph.children(node) {
            if self.seen.insert(child) {
                self.queue.push_back(child);
            }
        }
    }
}

impl<G: SceneGraph + ?Sized> Iterator for Descendants<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        let node = self.queue.pop_front()?;
        self.enqueue_children(node);
        Some(node)
    }
}

impl<G: SceneGraph + ?Sized> std::iter::FusedIterator for Descendants<'_, G> {}

/// All ancestors of `start`, nearest first.
///
/// - Stops before any node already visited in this walk.
/// - With `include_container_root == false`, stops before the first
///   container root, so a node sitting directly under a scene gets an
///   empty list.
///
/// Fails with [`Error::InvalidNode`] if `start` has no parent.
pub fn ancestors<G: SceneGraph + ?Sized>(
    graph: &G,
    start: G::Node,
    include_container_root: bool,
) -> Result<Vec<G::Node>> {
    Ok(graph.ancestors_iter(start, include_container_root)?.collect())
}

/// The farthest ancestor reached by [`ancestors`], or `None` if that walk
/// is empty.
pub fn root<G: SceneGraph + ?Sized>(
    graph: &G,
    start: G::Node,
    include_container_root: bool,
) -> Result<Option<G::Node>> {
    Ok(graph.ancestors_iter(start, include_container_root)?.last())
}

/// Every node reachable from `start` through child links, each once.
///
/// With `include_start`, `start` is the first element.
pub fn descendants<G: SceneGraph + ?Sized>(
    graph: &G,
    start: G::Node,
    include_start: bool,
) -> Vec<G::Node> {
    graph.descendants_iter(start, include_start).collect()
}

/// Number of ancestors above `node`, container roots included. Detached
/// nodes have depth 0.
pub fn depth<G: SceneGraph + ?Sized>(graph: &G, node: G::Node) -> usize {
    graph
        .ancestors_iter(node, true)
        .map(|walk| walk.count())
        .unwrap_or(0)
}

/// Whether `ancestor` appears on `node`'s parent chain.
pub fn is_ancestor_of<G: SceneGraph + ?Sized>(graph: &G, ancestor: G::Node, node: G::Node) -> bool {
    match graph.ancestors_iter(node, true) {
        Ok(mut walk) => walk.any(|n| n == ancestor),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::scene::SceneTree;

    /// Scene → a → b → c, plus a sibling branch a → d.
    fn level() -> (SceneTree, [crate::ecs::Actor; 5]) {
        let mut tree = SceneTree::new();
        let scene = tree.spawn_scene("Level");
        let a = tree.spawn_child(scene, "a");
        let b = tree.spawn_child(a, "b");
        let c = tree.spawn_child(b, "c");
        let d = tree.spawn_child(a, "d");
        (tree, [scene, a, b, c, d])
    }

    #[test]
    fn ancestors_nearest_first_stopping_below_scene() {
        let (tree, [_, a, b, c, _]) = level();
        assert_eq!(ancestors(&tree, c, false).unwrap(), vec![b, a]);
    }

    #[test]
    fn ancestors_with_scene_end_at_top_level() {
        let (tree, [scene, a, b, c, _]) = level();
        let chain = ancestors(&tree, c, true).unwrap();
        assert_eq!(chain, vec![b, a, scene]);
        assert_eq!(chain.last(), Some(&scene));
    }

    #[test]
    fn ancestors_without_scene_never_contain_scene() {
        let (tree, nodes) = level();
        for &n in &nodes[1..] {
            let chain = ancestors(&tree, n, false).unwrap();
            assert!(chain.iter().all(|&x| !tree.is_container_root(x)));
        }
    }

    #[test]
    fn direct_child_of_scene_has_no_ancestors() {
        let (tree, [scene, a, ..]) = level();
        assert!(ancestors(&tree, a, false).unwrap().is_empty());
        assert_eq!(root(&tree, a, false).unwrap(), None);
        assert_eq!(root(&tree, a, true).unwrap(), Some(scene));
    }

    #[test]
    fn root_is_farthest_ancestor() {
        let (tree, [_, a, _, c, _]) = level();
        assert_eq!(root(&tree, c, false).unwrap(), Some(a));
    }

    #[test]
    fn detached_node_is_invalid_for_ancestor_walks() {
        let (mut tree, [scene, ..]) = level();
        let loose = tree.spawn("loose");
        assert!(matches!(ancestors(&tree, scene, true), Err(Error::InvalidNode { .. })));
        assert!(matches!(root(&tree, loose, false), Err(Error::InvalidNode { .. })));
    }

    #[test]
    fn parent_cycle_terminates_without_repeats() {
        let (mut tree, [_, a, b, c, _]) = level();
        // a's parent becomes c: c → b → a → c → ...
        tree.link_unchecked(c, a);
        let chain = ancestors(&tree, c, true).unwrap();
        assert_eq!(chain, vec![b, a, c]);
        assert_eq!(root(&tree, c, true).unwrap(), Some(c));
        let unique: HashSet<_> = chain.iter().collect();
        assert_eq!(unique.len(), chain.len());
    }

    #[test]
    fn self_parent_cycle_yields_node_once() {
        let (mut tree, [.., d]) = level();
        tree.link_unchecked(d, d);
        assert_eq!(ancestors(&tree, d, true).unwrap(), vec![d]);
        assert_eq!(root(&tree, d, true).unwrap(), Some(d));
        assert_eq!(root(&tree, d, false).unwrap(), Some(d));
    }

    #[test]
    fn descendants_breadth_first() {
        let (tree, [scene, a, b, c, d]) = level();
        assert_eq!(descendants(&tree, scene, false), vec![a, b, d, c]);
        assert_eq!(descendants(&tree, a, true), vec![a, b, d, c]);
        assert!(descendants(&tree, c, false).is_empty());
    }

    #[test]
    fn descendants_deduplicate_diamonds() {
        let (mut tree, [scene, a, _, c, d]) = level();
        // c is now listed under both b and d.
        tree.link_unchecked(d, c);
        let all = descendants(&tree, scene, false);
        assert_eq!(all.iter().filter(|&&n| n == c).count(), 1);
        assert_eq!(all.len(), 4);
        assert!(all.contains(&a));
    }

    #[test]
    fn descendants_ignore_links_back_to_start() {
        let (mut tree, [_, a, b, ..]) = level();
        tree.link_unchecked(b, a);
        let all = descendants(&tree, a, true);
        assert_eq!(all.iter().filter(|&&n| n == a).count(), 1);
    }

    #[test]
    fn descendants_without_start_report_loop_back_once() {
        let (mut tree, [_, a, b, c, d]) = level();
        tree.link_unchecked(b, a);
        assert_eq!(descendants(&tree, a, false), vec![b, d, c, a]);
    }

    #[test]
    fn depth_and_ancestry() {
        let (mut tree, [scene, a, _, c, d]) = level();
        assert_eq!(depth(&tree, scene), 0);
        assert_eq!(depth(&tree, c), 3);
        assert!(is_ancestor_of(&tree, a, c));
        assert!(is_ancestor_of(&tree, scene, c));
        assert!(!is_ancestor_of(&tree, d, c));
        let loose = tree.spawn("loose");
        assert!(!is_ancestor_of(&tree, scene, loose));
    }
}
