//! # Diagnostics — Logging Setup and Hierarchy Dumps
//!
//! [`init_logger`] wires the `log` facade to env_logger, honouring
//! `RUST_LOG` and defaulting to `info`. [`hierarchy_outline`] renders a
//! subtree as indented text for debug output.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::ecs::SceneGraph;

/// Install env_logger as the global logger.
///
/// Call this once, early. A second call (or another logger already being
/// installed) only prints a warning.
pub fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();
    if builder.try_init().is_err() {
        eprintln!("[scion] Warning: a logger is already set.");
    }
}

/// Render `start` and everything below it, one node per line, indented two
/// spaces per level. `label` formats each node.
///
/// Nodes reachable more than once are printed at their first position only.
pub fn hierarchy_outline<G, F>(graph: &G, start: G::Node, mut label: F) -> String
where
    G: SceneGraph + ?Sized,
    F: FnMut(G::Node) -> String,
{
    let mut out = String::new();
    let mut seen = HashSet::new();
    let mut stack = vec![(start, 0usize)];
    while let Some((node, level)) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        let _ = writeln!(out, "{:indent$}{}", "", label(node), indent = level * 2);
        for &child in graph.children(node).iter().rev() {
            stack.push((child, level + 1));
        }
    }
    out
}

/// Log [`hierarchy_outline`] at debug level using each node's `Debug` form.
pub fn log_hierarchy<G: SceneGraph + ?Sized>(graph: &G, start: G::Node) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "hierarchy below {start:?}:\n{}",
            hierarchy_outline(graph, start, |n| format!("{n:?}"))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::SceneTree;

    #[test]
    fn outline_is_depth_first_and_indented() {
        let mut tree = SceneTree::new();
        let scene = tree.spawn_scene("Level");
        let ship = tree.spawn_child(scene, "Ship");
        tree.spawn_child(ship, "Turret");
        tree.spawn_child(scene, "Rock");

        let text = hierarchy_outline(&tree, scene, |n| tree.name(n).unwrap_or("?").to_string());
        assert_eq!(text, "Level\n  Ship\n    Turret\n  Rock\n");
    }

    #[test]
    fn outline_survives_cycles() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("a");
        let b = tree.spawn_child(a, "b");
        tree.link_unchecked(b, a);
        let text = hierarchy_outline(&tree, a, |n| tree.name(n).unwrap_or("?").to_string());
        assert_eq!(text, "a\n  b\n");
    }

    #[test]
    fn init_logger_twice_is_harmless() {
        init_logger();
        init_logger();
        let mut tree = SceneTree::new();
        let a = tree.spawn("x");
        log_hierarchy(&tree, a);
    }
}
