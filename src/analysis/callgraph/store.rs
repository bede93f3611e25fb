//! Edge storage for the call graph.
//!
//! Two maps with different granularity back the analysis. The *simple* map
//! (caller procedure → callee set) is the view SCC computation and root
//! derivation traverse; the *actual* map (call site → possible-callee set) is
//! finer grained and lets pointer-sensitive clients distinguish which call
//! site reaches which targets.
//!
//! Both maps use ordered containers, so every iteration the analysis performs
//! — and in particular the DFS visit order that decides class leaders — is a
//! pure function of the recorded edges.

use std::collections::{BTreeMap, BTreeSet};

use crate::program::{ProcId, SiteId};

/// Caller-to-callees and site-to-targets edge maps.
///
/// Insertion is idempotent: sets deduplicate, and recording the same edge
/// twice leaves the store unchanged.
///
/// # Node universe
///
/// Every procedure ever seen as a caller or as a resolved callee gets an
/// entry in the simple map, possibly with an empty callee set. This "touch on
/// insert" rule is what lets SCC computation enumerate all nodes from the map
/// keys alone, without a separate node registry.
#[derive(Debug, Clone, Default)]
pub struct CallGraphStore {
    /// Caller procedure → statically-determinable callees.
    simple: BTreeMap<ProcId, BTreeSet<ProcId>>,
    /// Call site → possible callees.
    actual: BTreeMap<SiteId, BTreeSet<ProcId>>,
}

impl CallGraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed call site.
    ///
    /// The caller is always touched into the simple map, so a procedure whose
    /// every call is unresolvable still becomes a node. When `callee` is
    /// present it is added to both the site's target set and the caller's
    /// simple-callee set, and the callee is touched as a node of its own.
    /// When `callee` is `None` the site still gets an (empty) actual-map
    /// entry: "resolved to nothing" is a legitimate under-approximation that
    /// clients can observe, never a defect.
    ///
    /// # Arguments
    ///
    /// * `site` - The call instruction being recorded
    /// * `caller` - The procedure enclosing `site`
    /// * `callee` - The statically-resolved target, if any
    pub fn record_call(&mut self, site: SiteId, caller: ProcId, callee: Option<ProcId>) {
        self.simple.entry(caller).or_default();
        let targets = self.actual.entry(site).or_default();
        if let Some(callee) = callee {
            targets.insert(callee);
            self.simple.entry(caller).or_default().insert(callee);
            self.simple.entry(callee).or_default();
        }
    }

    /// Ensures a procedure exists as a node, without adding any edge.
    ///
    /// Used to register procedures that are never observed as callers (e.g.
    /// library entry points or address-taken declarations) so they are not
    /// silently excluded from the node universe.
    pub fn ensure_node(&mut self, proc: ProcId) {
        self.simple.entry(proc).or_default();
    }

    /// Returns `true` if the procedure is a known node.
    #[must_use]
    pub fn contains(&self, proc: ProcId) -> bool {
        self.simple.contains_key(&proc)
    }

    /// Iterates all known caller keys, in handle order.
    ///
    /// Together with [`callees_of`](CallGraphStore::callees_of) this is
    /// exactly the view SCC computation traverses.
    pub fn callers(&self) -> impl Iterator<Item = ProcId> + '_ {
        self.simple.keys().copied()
    }

    /// Iterates the simple callees of one caller, in handle order.
    ///
    /// Unknown callers yield an empty iterator.
    pub fn callees_of(&self, caller: ProcId) -> impl Iterator<Item = ProcId> + '_ {
        self.simple
            .get(&caller)
            .into_iter()
            .flat_map(|callees| callees.iter().copied())
    }

    /// Iterates all recorded call sites, in handle order.
    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.actual.keys().copied()
    }

    /// Iterates the possible targets of one call site, in handle order.
    ///
    /// Unknown sites yield an empty iterator; a recorded-but-unresolved site
    /// yields an empty iterator from a present entry (distinguish the two
    /// with [`has_site`](CallGraphStore::has_site)).
    pub fn site_targets(&self, site: SiteId) -> impl Iterator<Item = ProcId> + '_ {
        self.actual
            .get(&site)
            .into_iter()
            .flat_map(|targets| targets.iter().copied())
    }

    /// Returns `true` if the call site has been recorded.
    #[must_use]
    pub fn has_site(&self, site: SiteId) -> bool {
        self.actual.contains_key(&site)
    }

    /// Returns the number of known procedure nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.simple.len()
    }

    /// Returns the total number of simple call edges.
    ///
    /// Duplicate calls from the same caller to the same callee count once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.simple.values().map(BTreeSet::len).sum()
    }

    /// Returns the number of recorded call sites.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.actual.len()
    }

    /// Removes a caller's entry and returns its callee set.
    pub(crate) fn remove_caller(&mut self, caller: ProcId) -> BTreeSet<ProcId> {
        self.simple.remove(&caller).unwrap_or_default()
    }

    /// Merges a callee set into a caller's entry, creating it if absent.
    pub(crate) fn merge_into(&mut self, caller: ProcId, callees: BTreeSet<ProcId>) {
        self.simple.entry(caller).or_default().extend(callees);
    }

    /// Replaces a caller's callee set wholesale.
    pub(crate) fn replace_callees(&mut self, caller: ProcId, callees: BTreeSet<ProcId>) {
        self.simple.insert(caller, callees);
    }

    /// Replaces a site's target set wholesale.
    pub(crate) fn replace_site_targets(&mut self, site: SiteId, targets: BTreeSet<ProcId>) {
        self.actual.insert(site, targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(value: u32) -> ProcId {
        ProcId::new(value)
    }

    fn s(value: u32) -> SiteId {
        SiteId::new(value)
    }

    #[test]
    fn test_record_call_touches_caller() {
        let mut store = CallGraphStore::new();
        store.record_call(s(1), p(1), None);

        assert!(store.contains(p(1)));
        assert_eq!(store.callees_of(p(1)).count(), 0);
        assert!(store.has_site(s(1)));
        assert_eq!(store.site_targets(s(1)).count(), 0);
    }

    #[test]
    fn test_record_call_touches_callee_as_node() {
        let mut store = CallGraphStore::new();
        store.record_call(s(1), p(1), Some(p(2)));

        // The callee becomes a known node with an empty callee set.
        assert!(store.contains(p(2)));
        assert_eq!(store.callees_of(p(2)).count(), 0);
        assert_eq!(store.callees_of(p(1)).collect::<Vec<_>>(), vec![p(2)]);
        assert_eq!(store.site_targets(s(1)).collect::<Vec<_>>(), vec![p(2)]);
    }

    #[test]
    fn test_record_call_idempotent() {
        let mut store = CallGraphStore::new();
        store.record_call(s(1), p(1), Some(p(2)));
        store.record_call(s(1), p(1), Some(p(2)));

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.site_count(), 1);
        assert_eq!(store.site_targets(s(1)).count(), 1);
    }

    #[test]
    fn test_multiple_targets_per_site() {
        // An indirect site the host resolved to two possible targets.
        let mut store = CallGraphStore::new();
        store.record_call(s(1), p(1), Some(p(2)));
        store.record_call(s(1), p(1), Some(p(3)));

        assert_eq!(store.site_targets(s(1)).collect::<Vec<_>>(), vec![p(2), p(3)]);
        assert_eq!(store.callees_of(p(1)).collect::<Vec<_>>(), vec![p(2), p(3)]);
    }

    #[test]
    fn test_ensure_node() {
        let mut store = CallGraphStore::new();
        store.ensure_node(p(7));

        assert!(store.contains(p(7)));
        assert_eq!(store.edge_count(), 0);

        // Touching an existing caller does not disturb its edges.
        store.record_call(s(1), p(7), Some(p(8)));
        store.ensure_node(p(7));
        assert_eq!(store.callees_of(p(7)).count(), 1);
    }

    #[test]
    fn test_iteration_order_is_handle_order() {
        let mut store = CallGraphStore::new();
        store.record_call(s(1), p(5), Some(p(9)));
        store.record_call(s(2), p(5), Some(p(3)));
        store.record_call(s(3), p(2), None);

        assert_eq!(store.callers().collect::<Vec<_>>(), vec![p(2), p(3), p(5), p(9)]);
        assert_eq!(store.callees_of(p(5)).collect::<Vec<_>>(), vec![p(3), p(9)]);
    }
}
