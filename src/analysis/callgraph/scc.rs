//! Strongly connected component detection over the call graph store.
//!
//! Tarjan's algorithm: a single depth-first pass assigning each node a
//! discovery index and a low-link value, with an explicit visitation stack.
//! When a node's low-link equals its own index it roots a component, and the
//! stack is popped down to it.
//!
//! The variation here is what happens to a closed component: instead of
//! returning component vectors, members are registered in an equivalence-class
//! [`Partition`], and for multi-member components a leader is chosen — the
//! first popped member that is not declaration-only. Declarations have no
//! bodies to analyze, so a class that swallowed body-bearing procedures must
//! not be represented by one.
//!
//! # Recursion depth
//!
//! The visit is recursive, like the store traversals it mirrors; depth is
//! bounded by the longest simple call chain before a component closes. Hosts
//! analyzing pathologically deep programs should run the build on a thread
//! with a generous stack; the algorithm itself does not depend on native
//! recursion, only its depth bound does.

use std::collections::{HashMap, HashSet};

use crate::{
    analysis::callgraph::{partition::Partition, store::CallGraphStore},
    program::{ProcId, ProgramView},
    Error, Result,
};

/// Runs SCC detection over every node of the store and returns the resulting
/// class partition.
///
/// Every key of the simple map ends up in exactly one class, singletons
/// included. The driver re-checks "not yet visited" before each new search,
/// so nodes first reached through a callee edge are not searched twice.
///
/// # Errors
///
/// Returns [`Error::NoLeader`] if a multi-member component contains no
/// body-bearing procedure.
pub(crate) fn build_partition<P: ProgramView>(
    program: &P,
    store: &CallGraphStore,
) -> Result<Partition> {
    let mut search = Search {
        program,
        store,
        partition: Partition::new(),
        index: HashMap::new(),
        stack: Vec::new(),
        on_stack: HashSet::new(),
        next_index: 0,
    };

    let keys: Vec<ProcId> = store.callers().collect();
    for func in keys {
        if !search.index.contains_key(&func) {
            search.visit(func)?;
        }
    }

    debug_assert!(search.stack.is_empty());
    Ok(search.partition)
}

/// Mutable state of one full Tarjan pass.
struct Search<'a, P: ProgramView> {
    program: &'a P,
    store: &'a CallGraphStore,
    partition: Partition,
    /// Discovery index per visited node.
    index: HashMap<ProcId, u32>,
    /// Nodes discovered but not yet closed into a component.
    stack: Vec<ProcId>,
    on_stack: HashSet<ProcId>,
    next_index: u32,
}

impl<P: ProgramView> Search<'_, P> {
    /// Visits one node, returning its low-link value.
    fn visit(&mut self, func: ProcId) -> Result<u32> {
        debug_assert!(!self.index.contains_key(&func), "node visited twice");

        let my_index = self.next_index;
        self.next_index += 1;
        self.index.insert(func, my_index);
        self.stack.push(func);
        self.on_stack.insert(func);

        let mut low = my_index;
        let store = self.store;
        for callee in store.callees_of(func) {
            let reachable = if !self.index.contains_key(&callee) {
                // Not yet visited: recurse.
                self.visit(callee)?
            } else if self.on_stack.contains(&callee) {
                // Part of the current exploration.
                self.index[&callee]
            } else {
                // Closed into an earlier, disjoint component.
                low
            };
            low = low.min(reachable);
        }

        debug_assert_eq!(self.index[&func], my_index);
        if low != my_index {
            // Part of a larger component; the root will pop us.
            return Ok(low);
        }

        if self.stack.last() == Some(&func) {
            // Singleton component; still registered as its own class.
            self.stack.pop();
            self.on_stack.remove(&func);
            self.partition.insert(func);
        } else {
            self.close_component(func)?;
        }

        Ok(my_index)
    }

    /// Pops a multi-member component rooted at `root` and unions it into one
    /// class behind the first popped body-bearing member.
    fn close_component(&mut self, root: ProcId) -> Result<()> {
        let mut members = Vec::new();
        let mut leader = None;
        loop {
            let member = self.stack.pop().expect("component root left the stack");
            self.on_stack.remove(&member);
            if leader.is_none() && !self.program.is_declaration(member) {
                leader = Some(member);
            }
            members.push(member);
            if member == root {
                break;
            }
        }

        let leader = leader.ok_or(Error::NoLeader {
            size: members.len(),
        })?;

        self.partition.insert(leader);
        for member in members {
            self.partition.union_into(leader, member);
        }
        Ok(())
    }
}
