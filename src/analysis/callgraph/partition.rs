//! Equivalence-class partition over procedure identities.
//!
//! A disjoint-set forest with path compression. Unlike a rank-balanced
//! union-find, merging is directional: [`union_into`](Partition::union_into)
//! always keeps the designated leader as the class representative, because
//! leader selection (first body-bearing member in pop order) is a semantic
//! choice the collapser depends on, not a balancing detail.

use std::collections::{BTreeMap, HashMap};

use crate::program::ProcId;

/// A disjoint-set partition of procedures into recursion classes.
///
/// Initially every inserted procedure is its own class. After SCC
/// construction, every class has one designated leader and
/// [`leader`](Partition::leader) yields the canonical representative for any
/// member.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Parent pointers; a root maps to itself.
    parent: HashMap<ProcId, ProcId>,
    /// Class sizes, tracked at roots only.
    size: HashMap<ProcId, usize>,
}

impl Partition {
    /// Creates an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a procedure is present, as a singleton class if new.
    pub fn insert(&mut self, proc: ProcId) {
        if !self.parent.contains_key(&proc) {
            self.parent.insert(proc, proc);
            self.size.insert(proc, 1);
        }
    }

    /// Returns the class leader of a procedure, inserting it as a singleton
    /// if it was unknown.
    ///
    /// Performs path compression, so repeated lookups flatten the forest.
    pub fn leader(&mut self, proc: ProcId) -> ProcId {
        self.insert(proc);

        let mut root = proc;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }

        let mut current = proc;
        while current != root {
            let next = self.parent[&current];
            self.parent.insert(current, root);
            current = next;
        }

        root
    }

    /// Merges `member`'s class into `leader`'s class, keeping `leader`'s
    /// representative.
    ///
    /// Both procedures are inserted if unknown. Merging a procedure into its
    /// own class is a no-op.
    pub fn union_into(&mut self, leader: ProcId, member: ProcId) {
        let leader_root = self.leader(leader);
        let member_root = self.leader(member);
        if leader_root == member_root {
            return;
        }

        self.parent.insert(member_root, leader_root);
        let merged = self.size.remove(&member_root).unwrap_or(1);
        *self.size.entry(leader_root).or_insert(1) += merged;
    }

    /// Returns the number of members in a procedure's class.
    pub fn class_size(&mut self, proc: ProcId) -> usize {
        let root = self.leader(proc);
        self.size[&root]
    }

    /// Returns `true` if the procedure's class has exactly one member.
    pub fn is_singleton(&mut self, proc: ProcId) -> bool {
        self.class_size(proc) == 1
    }

    /// Returns `true` if the procedure has been inserted.
    #[must_use]
    pub fn contains(&self, proc: ProcId) -> bool {
        self.parent.contains_key(&proc)
    }

    /// Returns the number of known procedures across all classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if no procedure has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Resolves the partition into an ordered member → leader map.
    ///
    /// The result is the immutable lookup the built call graph carries; it no
    /// longer needs compression or mutation.
    #[must_use]
    pub fn resolve(&self) -> BTreeMap<ProcId, ProcId> {
        let mut resolved = BTreeMap::new();
        for &member in self.parent.keys() {
            let mut root = member;
            while self.parent[&root] != root {
                root = self.parent[&root];
            }
            resolved.insert(member, root);
        }
        resolved
    }
}
