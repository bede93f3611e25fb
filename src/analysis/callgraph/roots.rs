//! Root derivation: procedures that call but are never called.

use std::collections::BTreeSet;

use crate::{analysis::callgraph::store::CallGraphStore, program::ProcId};

/// Computes the root set of the store, as ingested.
///
/// A root is a node that appears in no callee set — a candidate program
/// entry point under the host's call-site observations. Being called by a
/// mutual-recursion partner counts as being called, so this runs over the
/// edges as recorded, before collapsing erases intra-class edges; every
/// survivor is necessarily a singleton class and thus its own leader.
/// Computed as a set difference over the whole store; nothing incremental.
///
/// An empty result is legitimate: a program where every procedure is
/// somebody's callee simply has no discoverable entry point.
pub(crate) fn compute_roots(store: &CallGraphStore) -> BTreeSet<ProcId> {
    let mut known_callees = BTreeSet::new();
    for caller in store.callers() {
        known_callees.extend(store.callees_of(caller));
    }

    store
        .callers()
        .filter(|caller| !known_callees.contains(caller))
        .collect()
}
