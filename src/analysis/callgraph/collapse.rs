//! Rewrites the store so downstream consumers see only class leaders.
//!
//! After the partition is complete the edge maps still speak in terms of
//! original procedures. Collapsing folds every merged procedure into its
//! leader: non-leader caller entries are merged away, callee sets are
//! remapped to leaders, and the self-loops that merging a cycle into one
//! node would otherwise introduce are dropped. The result is acyclic at
//! leader granularity.

use std::collections::BTreeSet;

use crate::{
    analysis::callgraph::{partition::Partition, store::CallGraphStore},
    program::{ProcId, ProgramView},
    Error, Result,
};

/// Collapses the store in place onto the partition's leaders.
///
/// Three passes, in order:
///
/// 1. every non-leader caller entry is merged into its leader's entry and
///    removed (merges commute, so traversal order does not matter);
/// 2. every remaining callee is replaced by its leader, deduplicating, and a
///    multi-member leader is removed from its own callee set — an edge that
///    exists only because a cycle was folded into its representative is not a
///    meaningful edge. A singleton keeping itself as a callee is genuine
///    self-recursion and survives;
/// 3. every actual-map target is replaced by its leader. Site keys are never
///    merged: sites stay distinct even when their enclosing caller is not a
///    leader.
///
/// # Errors
///
/// Returns [`Error::DeclarationLeader`] if a declaration-only procedure is
/// found leading a multi-member class — leader selection exists to prevent
/// exactly that, so seeing it here means the partition is corrupt.
pub(crate) fn collapse<P: ProgramView>(
    program: &P,
    store: &mut CallGraphStore,
    partition: &mut Partition,
) -> Result<()> {
    // Pass 1: fold non-leader caller entries into their leader's entry.
    let callers: Vec<ProcId> = store.callers().collect();
    for caller in callers {
        let leader = partition.leader(caller);
        if leader != caller {
            let callees = store.remove_caller(caller);
            store.merge_into(leader, callees);
        }
    }

    // Pass 2: remap callees to leaders and drop collapse-artifact self loops.
    let leaders: Vec<ProcId> = store.callers().collect();
    for leader in leaders {
        let merged = !partition.is_singleton(leader);
        if merged && program.is_declaration(leader) {
            return Err(Error::DeclarationLeader { leader });
        }

        let mut remapped: BTreeSet<ProcId> = store
            .callees_of(leader)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|callee| partition.leader(callee))
            .collect();
        if merged {
            remapped.remove(&leader);
        }
        store.replace_callees(leader, remapped);
    }

    // Pass 3: remap the per-site targets; sites are never merged.
    let sites: Vec<_> = store.sites().collect();
    for site in sites {
        let remapped: BTreeSet<ProcId> = store
            .site_targets(site)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|target| partition.leader(target))
            .collect();
        store.replace_site_targets(site, remapped);
    }

    Ok(())
}
