//! # Actor Handles
//!
//! An [`Actor`] is an opaque handle into a [`SceneTree`](super::scene::SceneTree).
//! Handles pair a slot index with a generation counter so that a handle kept
//! after its actor was despawned can be told apart from a new actor that
//! reuses the slot:
//!
//! ```text
//! Actor { index: 3, generation: 0 }  ← spawned
//! Actor { index: 3, generation: 1 }  ← slot reused after despawn
//! ```
//!
//! Handles are `Copy + Eq + Hash`, which is all the hierarchy walkers need
//! for their visited sets.

use std::fmt;

/// A lightweight handle to an actor in a [`SceneTree`](super::scene::SceneTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Actor {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Actor {
    /// Raw slot index.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out [`Actor`] handles and recycles despawned slots.
#[derive(Debug, Default)]
pub(crate) struct ActorAllocator {
    /// Current generation per slot.
    generations: Vec<u32>,
    /// Despawned slots waiting for reuse.
    free_list: Vec<u32>,
}

impl ActorAllocator {
    pub fn allocate(&mut self) -> Actor {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index as usize];
            Actor { index, generation }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Actor {
                index,
                generation: 0,
            }
        }
    }

    /// Returns `false` when the handle was already stale.
    pub fn deallocate(&mut self, actor: Actor) -> bool {
        if !self.is_alive(actor) {
            return false;
        }
        self.generations[actor.index as usize] += 1;
        self.free_list.push(actor.index);
        true
    }

    pub fn is_alive(&self, actor: Actor) -> bool {
        self.generations
            .get(actor.index as usize)
            .is_some_and(|&g| g == actor.generation)
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential() {
        let mut alloc = ActorAllocator::default();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!((a.index, b.index), (0, 1));
        assert_eq!((a.generation, b.generation), (0, 0));
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut alloc = ActorAllocator::default();
        let a = alloc.allocate();
        assert!(alloc.deallocate(a));
        let reused = alloc.allocate();
        assert_eq!(reused.index, a.index);
        assert_eq!(reused.generation, 1);
        assert_ne!(reused, a);
    }

    #[test]
    fn stale_handle_is_dead() {
        let mut alloc = ActorAllocator::default();
        let a = alloc.allocate();
        alloc.deallocate(a);
        assert!(!alloc.is_alive(a));
        assert!(!alloc.deallocate(a));
    }

    #[test]
    fn alive_count_tracks_frees() {
        let mut alloc = ActorAllocator::default();
        let a = alloc.allocate();
        let _b = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        alloc.deallocate(a);
        assert_eq!(alloc.alive_count(), 1);
    }
}
