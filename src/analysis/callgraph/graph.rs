//! Call graph construction and the condensed, built artifact.
//!
//! [`CallGraphBuilder`] is the ingestion surface the host drives while it
//! walks the program; [`CallGraph`] is the one-shot result: both edge maps
//! rewritten to leader granularity, the equivalence-class partition, and the
//! root set. The two-phase split keeps the built graph free of interior
//! mutability, so it can be shared across any number of concurrent readers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::{
    analysis::callgraph::{collapse, roots, scc, store::CallGraphStore},
    program::{ProcId, ProgramView, SiteId},
    Result,
};

/// Accumulates call-site observations before the one-shot build.
///
/// The host reports each call site once during a single forward pass over the
/// program; recording is idempotent, so replayed observations are harmless.
///
/// # Example
///
/// ```rust
/// use callscope::analysis::callgraph::CallGraphBuilder;
/// use callscope::program::{ProcId, SiteId};
/// # use callscope::program::{ProcSignature, ProgramView, TypeSig};
/// # struct Program;
/// # impl ProgramView for Program {
/// #     fn is_declaration(&self, _: ProcId) -> bool { false }
/// #     fn signature(&self, _: ProcId) -> ProcSignature { ProcSignature::default() }
/// #     fn static_callee(&self, _: SiteId) -> Option<ProcId> { None }
/// #     fn callee_type(&self, _: SiteId) -> TypeSig { TypeSig::Unknown }
/// # }
///
/// let main = ProcId::new(1);
/// let helper = ProcId::new(2);
///
/// let mut builder = CallGraphBuilder::new();
/// builder.record_call(SiteId::new(1), main, Some(helper));
///
/// let graph = builder.build(&Program)?;
/// assert!(graph.is_root(main));
/// assert_eq!(graph.callees_of(main).collect::<Vec<_>>(), vec![helper]);
/// # Ok::<(), callscope::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallGraphBuilder {
    store: CallGraphStore,
}

impl CallGraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed call site.
    ///
    /// Pass `None` as the callee for a call whose target could not be
    /// statically resolved: the caller still becomes a node and the site is
    /// still registered, contributing no outgoing edge.
    ///
    /// # Arguments
    ///
    /// * `site` - The call instruction being recorded
    /// * `caller` - The procedure enclosing `site`
    /// * `callee` - The statically-resolved target, if any
    pub fn record_call(&mut self, site: SiteId, caller: ProcId, callee: Option<ProcId>) {
        self.store.record_call(site, caller, callee);
    }

    /// Registers a procedure as a node even if it is never seen calling.
    pub fn ensure_node(&mut self, proc: ProcId) {
        self.store.ensure_node(proc);
    }

    /// Returns the store accumulated so far.
    #[must_use]
    pub fn store(&self) -> &CallGraphStore {
        &self.store
    }

    /// Runs the one-shot build: SCC detection, root derivation, collapsing.
    ///
    /// Consumes the builder; the pipeline either completes fully or fails
    /// without yielding a partial artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLeader`](crate::Error::NoLeader) if a recursion
    /// class has no body-bearing member, or
    /// [`Error::DeclarationLeader`](crate::Error::DeclarationLeader) if the
    /// collapsed store violates the leader invariant.
    pub fn build<P: ProgramView>(self, program: &P) -> Result<CallGraph> {
        let mut store = self.store;

        let mut partition = scc::build_partition(program, &store)?;
        // Roots come from the edges as recorded: a mutual-recursion partner
        // counts as a caller, even though collapsing erases the edge.
        let root_set = roots::compute_roots(&store);
        collapse::collapse(program, &mut store, &mut partition)?;

        Ok(CallGraph {
            store,
            leaders: partition.resolve(),
            roots: root_set,
        })
    }
}

/// The condensed interprocedural call graph.
///
/// Built once by [`CallGraphBuilder::build`] and immutable afterwards. Both
/// edge maps are defined purely over class leaders, the graph is acyclic at
/// leader granularity, and every registered procedure resolves to exactly one
/// leader through [`leader_of`](CallGraph::leader_of).
///
/// Downstream analyses schedule work over this graph bottom-up: process a
/// leader after all of its callees (see
/// [`topological_order`](CallGraph::topological_order)).
#[derive(Debug, Clone)]
pub struct CallGraph {
    /// Leader-keyed edge maps.
    store: CallGraphStore,
    /// Every registered procedure → its class leader.
    leaders: BTreeMap<ProcId, ProcId>,
    /// Leaders that appear in no callee set.
    roots: BTreeSet<ProcId>,
}

impl CallGraph {
    /// Returns the class leader of a procedure, or `None` if the procedure
    /// was never registered.
    #[must_use]
    pub fn leader_of(&self, proc: ProcId) -> Option<ProcId> {
        self.leaders.get(&proc).copied()
    }

    /// Iterates all class leaders, in handle order.
    pub fn leaders(&self) -> impl Iterator<Item = ProcId> + '_ {
        self.store.callers()
    }

    /// Iterates the callees of a leader, in handle order.
    pub fn callees_of(&self, leader: ProcId) -> impl Iterator<Item = ProcId> + '_ {
        self.store.callees_of(leader)
    }

    /// Iterates all recorded call sites.
    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.store.sites()
    }

    /// Iterates the possible targets of a call site, at leader granularity.
    pub fn site_targets(&self, site: SiteId) -> impl Iterator<Item = ProcId> + '_ {
        self.store.site_targets(site)
    }

    /// Returns the members of a leader's equivalence class, leader included.
    ///
    /// Passing a non-leader yields an empty vector.
    #[must_use]
    pub fn class_of(&self, leader: ProcId) -> Vec<ProcId> {
        self.leaders
            .iter()
            .filter(|&(_, &class_leader)| class_leader == leader)
            .map(|(&member, _)| member)
            .collect()
    }

    /// Returns the root set: procedures that were nobody's callee.
    ///
    /// Computed over the recorded edges, so members of a recursion class are
    /// not roots even though collapsing removed their incoming edges; every
    /// root is a singleton class and its own leader. May be empty — a
    /// program where every procedure is somebody's callee has no
    /// discoverable entry point, which is a valid outcome.
    #[must_use]
    pub fn roots(&self) -> &BTreeSet<ProcId> {
        &self.roots
    }

    /// Returns `true` if the leader is a root.
    #[must_use]
    pub fn is_root(&self, leader: ProcId) -> bool {
        self.roots.contains(&leader)
    }

    /// Returns the number of registered procedures, across all classes.
    #[must_use]
    pub fn procedure_count(&self) -> usize {
        self.leaders.len()
    }

    /// Returns the number of equivalence classes (condensed nodes).
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.store.node_count()
    }

    /// Returns the underlying leader-keyed store.
    #[must_use]
    pub fn store(&self) -> &CallGraphStore {
        &self.store
    }

    /// Returns leaders in bottom-up order: every leader appears after all of
    /// its callees.
    ///
    /// This is the scheduling order for analyses that must process callees
    /// before callers; it is total because the condensed graph is acyclic.
    #[must_use]
    pub fn topological_order(&self) -> Vec<ProcId> {
        fn visit(
            store: &CallGraphStore,
            node: ProcId,
            seen: &mut BTreeSet<ProcId>,
            order: &mut Vec<ProcId>,
        ) {
            if !seen.insert(node) {
                return;
            }
            for callee in store.callees_of(node) {
                visit(store, callee, seen, order);
            }
            order.push(node);
        }

        let mut seen = BTreeSet::new();
        let mut order = Vec::with_capacity(self.class_count());
        for leader in self.store.callers() {
            visit(&self.store, leader, &mut seen, &mut order);
        }
        order
    }

    /// Returns aggregate metrics about the condensed graph.
    #[must_use]
    pub fn stats(&self) -> CallGraphStats {
        CallGraphStats {
            procedure_count: self.procedure_count(),
            class_count: self.class_count(),
            merged_count: self.procedure_count() - self.class_count(),
            edge_count: self.store.edge_count(),
            site_count: self.store.site_count(),
            root_count: self.roots.len(),
        }
    }

    /// Renders a human-readable listing of the graph, one leader per line,
    /// followed by the root set.
    ///
    /// A debugging aid; the format is not a compatibility surface.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();

        for leader in self.store.callers() {
            let _ = write!(out, "CallGraph[{leader}]");
            for callee in self.store.callees_of(leader) {
                let _ = write!(out, " {callee}");
            }
            out.push('\n');
        }

        out.push_str("Roots:");
        for root in &self.roots {
            let _ = write!(out, " {root}");
        }
        out.push('\n');
        out
    }

    /// Generates a DOT format representation of the condensed graph.
    ///
    /// Roots are highlighted in green. The output can be rendered with
    /// Graphviz tools like `dot`.
    ///
    /// # Arguments
    ///
    /// * `title` - Optional title for the graph
    #[must_use]
    pub fn to_dot(&self, title: Option<&str>) -> String {
        let mut dot = String::new();

        dot.push_str("digraph CallGraph {\n");
        let _ = writeln!(dot, "    label=\"{}\";", title.unwrap_or("Call Graph"));
        dot.push_str("    labelloc=t;\n");
        dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n");
        dot.push_str("    rankdir=TB;\n\n");

        for leader in self.store.callers() {
            let style = if self.roots.contains(&leader) {
                ", style=filled, fillcolor=lightgreen"
            } else {
                ""
            };
            let _ = writeln!(dot, "    \"{leader}\" [label=\"{leader}\"{style}];");
        }

        dot.push('\n');

        for leader in self.store.callers() {
            for callee in self.store.callees_of(leader) {
                let _ = writeln!(dot, "    \"{leader}\" -> \"{callee}\";");
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Statistics about a condensed call graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraphStats {
    /// Number of registered procedures, across all classes.
    pub procedure_count: usize,
    /// Number of equivalence classes (nodes of the condensate).
    pub class_count: usize,
    /// Number of procedures folded into another procedure's class.
    pub merged_count: usize,
    /// Number of leader-to-leader call edges.
    pub edge_count: usize,
    /// Number of recorded call sites.
    pub site_count: usize,
    /// Number of roots.
    pub root_count: usize,
}
