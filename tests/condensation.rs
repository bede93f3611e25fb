//! End-to-end tests of call graph construction, condensation, and root
//! derivation through the public API.

use std::collections::{BTreeSet, HashMap, HashSet};

use callscope::prelude::*;

/// Minimal in-memory host program.
#[derive(Debug, Default)]
struct Host {
    declarations: HashSet<ProcId>,
    signatures: HashMap<ProcId, ProcSignature>,
    static_callees: HashMap<SiteId, ProcId>,
    callee_types: HashMap<SiteId, TypeSig>,
}

impl Host {
    fn declare(&mut self, proc: ProcId) {
        self.declarations.insert(proc);
    }
}

impl ProgramView for Host {
    fn is_declaration(&self, proc: ProcId) -> bool {
        self.declarations.contains(&proc)
    }

    fn signature(&self, proc: ProcId) -> ProcSignature {
        self.signatures.get(&proc).cloned().unwrap_or_default()
    }

    fn static_callee(&self, site: SiteId) -> Option<ProcId> {
        self.static_callees.get(&site).copied()
    }

    fn callee_type(&self, site: SiteId) -> TypeSig {
        self.callee_types.get(&site).cloned().unwrap_or_default()
    }
}

fn p(value: u32) -> ProcId {
    ProcId::new(value)
}

fn s(value: u32) -> SiteId {
    SiteId::new(value)
}

/// Records a batch of `(site, caller, callee)` edges.
fn builder_of(edges: &[(u32, u32, Option<u32>)]) -> CallGraphBuilder {
    let mut builder = CallGraphBuilder::new();
    for &(site, caller, callee) in edges {
        builder.record_call(s(site), p(caller), callee.map(p));
    }
    builder
}

/// True if `to` is reachable from `from` through one or more edges.
fn reaches(graph: &CallGraph, from: ProcId, to: ProcId) -> bool {
    let mut worklist: Vec<ProcId> = graph.callees_of(from).collect();
    let mut seen = BTreeSet::new();
    while let Some(node) = worklist.pop() {
        if node == to {
            return true;
        }
        if seen.insert(node) {
            worklist.extend(graph.callees_of(node));
        }
    }
    false
}

#[test]
fn scenario_single_edge() {
    // main -> foo: two singleton classes, root set {main}.
    let (main, foo) = (p(1), p(2));
    let graph = builder_of(&[(1, 1, Some(2))]).build(&Host::default()).unwrap();

    assert_eq!(graph.procedure_count(), 2);
    assert_eq!(graph.class_count(), 2);
    assert_eq!(graph.leader_of(main), Some(main));
    assert_eq!(graph.leader_of(foo), Some(foo));
    assert_eq!(graph.roots().iter().copied().collect::<Vec<_>>(), vec![main]);
}

#[test]
fn scenario_mutual_recursion_with_declaration() {
    // a <-> b, b declaration-only: one class led by a, self-loop removed,
    // empty root set.
    let (a, b) = (p(1), p(2));
    let mut host = Host::default();
    host.declare(b);

    let graph = builder_of(&[(1, 1, Some(2)), (2, 2, Some(1))])
        .build(&host)
        .unwrap();

    assert_eq!(graph.leader_of(a), Some(a));
    assert_eq!(graph.leader_of(b), Some(a));
    assert_eq!(graph.callees_of(a).count(), 0);
    assert!(graph.roots().is_empty());

    // An external registration calling into the class creates a root again.
    let mut builder = builder_of(&[(1, 1, Some(2)), (2, 2, Some(1))]);
    builder.record_call(s(3), p(9), Some(a));
    let graph = builder.build(&host).unwrap();
    assert_eq!(graph.roots().iter().copied().collect::<Vec<_>>(), vec![p(9)]);
}

#[test]
fn scenario_unresolved_indirect_call() {
    // f has one unresolved site: f is a node with no callees, the site has an
    // empty target set, and f is a root.
    let f = p(1);
    let graph = builder_of(&[(1, 1, None)]).build(&Host::default()).unwrap();

    assert_eq!(graph.leader_of(f), Some(f));
    assert_eq!(graph.callees_of(f).count(), 0);
    assert_eq!(graph.sites().collect::<Vec<_>>(), vec![s(1)]);
    assert_eq!(graph.site_targets(s(1)).count(), 0);
    assert!(graph.is_root(f));
}

#[test]
fn partition_totality() {
    let mut builder = builder_of(&[
        (1, 1, Some(2)),
        (2, 2, Some(3)),
        (3, 3, Some(1)),
        (4, 3, Some(4)),
        (5, 5, None),
    ]);
    builder.ensure_node(p(6));

    let graph = builder.build(&Host::default()).unwrap();

    // Every registered procedure belongs to exactly one class.
    for proc in [p(1), p(2), p(3), p(4), p(5), p(6)] {
        let leader = graph.leader_of(proc).expect("registered procedure has a class");
        assert!(graph.class_of(leader).contains(&proc));
    }
    assert_eq!(graph.procedure_count(), 6);
}

#[test]
fn leaders_of_merged_classes_have_bodies() {
    // Two classes: {1, 2} with 1 declared, {3, 4} with 4 declared.
    let mut host = Host::default();
    host.declare(p(1));
    host.declare(p(4));

    let graph = builder_of(&[
        (1, 1, Some(2)),
        (2, 2, Some(1)),
        (3, 3, Some(4)),
        (4, 4, Some(3)),
    ])
    .build(&host)
    .unwrap();

    for leader in graph.leaders() {
        if graph.class_of(leader).len() >= 2 {
            assert!(!host.is_declaration(leader));
        }
    }
    assert_eq!(graph.leader_of(p(1)), Some(p(2)));
    assert_eq!(graph.leader_of(p(4)), Some(p(3)));
}

#[test]
fn condensate_is_acyclic() {
    // Two interlocking cycles plus cross edges; after collapsing, no leader
    // reaches itself.
    let graph = builder_of(&[
        (1, 1, Some(2)),
        (2, 2, Some(1)),
        (3, 2, Some(3)),
        (4, 3, Some(4)),
        (5, 4, Some(3)),
        (6, 4, Some(5)),
        (7, 1, Some(5)),
    ])
    .build(&Host::default())
    .unwrap();

    for leader in graph.leaders() {
        assert!(
            !reaches(&graph, leader, leader),
            "leader {leader} reaches itself"
        );
    }
}

#[test]
fn self_loop_suppression_and_exception() {
    // 1 <-> 2 with 2 -> 2: all intra-class edges vanish.
    let merged = builder_of(&[(1, 1, Some(2)), (2, 2, Some(1)), (3, 2, Some(2))])
        .build(&Host::default())
        .unwrap();
    let leader = merged.leader_of(p(1)).unwrap();
    assert_eq!(merged.callees_of(leader).count(), 0);

    // A lone procedure calling itself keeps its self-edge.
    let recursive = builder_of(&[(1, 7, Some(7))]).build(&Host::default()).unwrap();
    assert_eq!(recursive.callees_of(p(7)).collect::<Vec<_>>(), vec![p(7)]);
    assert!(!recursive.is_root(p(7)));
}

#[test]
fn root_correctness() {
    let graph = builder_of(&[
        (1, 1, Some(3)),
        (2, 2, Some(3)),
        (3, 3, Some(4)),
        (4, 5, None),
    ])
    .build(&Host::default())
    .unwrap();

    // A leader is a root iff no callee set contains it.
    let all_callees: BTreeSet<ProcId> = graph
        .leaders()
        .flat_map(|leader| graph.callees_of(leader).collect::<Vec<_>>())
        .collect();
    for leader in graph.leaders() {
        assert_eq!(graph.is_root(leader), !all_callees.contains(&leader));
    }
    assert_eq!(
        graph.roots().iter().copied().collect::<Vec<_>>(),
        vec![p(1), p(2), p(5)]
    );
}

#[test]
fn recording_is_idempotent() {
    let once = builder_of(&[(1, 1, Some(2))]).build(&Host::default()).unwrap();
    let twice = builder_of(&[(1, 1, Some(2)), (1, 1, Some(2))])
        .build(&Host::default())
        .unwrap();

    assert_eq!(once.dump(), twice.dump());
    assert_eq!(once.stats(), twice.stats());
}

#[test]
fn leader_selection_is_deterministic() {
    // A three-member cycle, all body-bearing: leader choice is fixed by the
    // recorded edges, not by construction order.
    let edges = [(1, 20, Some(10)), (2, 10, Some(30)), (3, 30, Some(20))];

    let first = builder_of(&edges).build(&Host::default()).unwrap();
    let reversed: Vec<_> = edges.iter().rev().copied().collect();
    let second = builder_of(&reversed).build(&Host::default()).unwrap();

    assert_eq!(first.leader_of(p(10)), second.leader_of(p(10)));
    assert_eq!(first.dump(), second.dump());
}

#[test]
fn all_declaration_cycle_fails_construction() {
    let mut host = Host::default();
    host.declare(p(1));
    host.declare(p(2));

    let result = builder_of(&[(1, 1, Some(2)), (2, 2, Some(1))]).build(&host);
    assert!(matches!(result, Err(Error::NoLeader { size: 2 })));
}

#[test]
fn deep_chain_into_shared_cycle() {
    // A chain 1 -> 2 -> 3 feeding a cycle {4, 5} that calls leaf 6; the
    // condensate schedules the leaf first and the chain head last.
    let graph = builder_of(&[
        (1, 1, Some(2)),
        (2, 2, Some(3)),
        (3, 3, Some(4)),
        (4, 4, Some(5)),
        (5, 5, Some(4)),
        (6, 5, Some(6)),
    ])
    .build(&Host::default())
    .unwrap();

    let cycle_leader = graph.leader_of(p(4)).unwrap();
    assert_eq!(graph.leader_of(p(5)), Some(cycle_leader));

    let order = graph.topological_order();
    let position = |proc: ProcId| order.iter().position(|&x| x == proc).unwrap();
    assert!(position(p(6)) < position(cycle_leader));
    assert!(position(cycle_leader) < position(p(3)));
    assert!(position(p(3)) < position(p(2)));
    assert!(position(p(2)) < position(p(1)));
}

#[test]
fn site_targets_survive_at_leader_granularity() {
    // Two sites resolving to different members of one cycle end up with the
    // same leader target, and distinct sites stay distinct.
    let graph = builder_of(&[
        (1, 1, Some(2)),
        (2, 1, Some(3)),
        (3, 2, Some(3)),
        (4, 3, Some(2)),
    ])
    .build(&Host::default())
    .unwrap();

    let leader = graph.leader_of(p(2)).unwrap();
    assert_eq!(graph.site_targets(s(1)).collect::<Vec<_>>(), vec![leader]);
    assert_eq!(graph.site_targets(s(2)).collect::<Vec<_>>(), vec![leader]);
    assert_eq!(graph.sites().count(), 4);
}

#[test]
fn classifier_over_host_signatures() {
    let callee = p(2);
    let mut host = Host::default();
    host.signatures.insert(
        callee,
        ProcSignature {
            vararg: false,
            return_type: TypeSig::Ptr(Box::new(TypeSig::Scalar)),
            params: vec![],
        },
    );
    host.static_callees.insert(s(1), callee);
    host.callee_types.insert(
        s(2),
        TypeSig::Ptr(Box::new(TypeSig::FnPtr(Box::new(ProcSignature::default())))),
    );
    host.callee_types.insert(s(3), TypeSig::Scalar);

    // Direct call: declared signature decides.
    assert!(site_has_pointers(&host, s(1)).unwrap());
    // Indirect call through a pointer-to-function: the referent decides.
    assert!(!site_has_pointers(&host, s(2)).unwrap());
    // Indirect call through a non-callable value: host defect, loud failure.
    assert!(matches!(
        site_has_pointers(&host, s(3)),
        Err(Error::NotCallable { .. })
    ));
}

#[test]
fn empty_program_builds_empty_graph() {
    let graph = CallGraphBuilder::new().build(&Host::default()).unwrap();
    assert_eq!(graph.stats(), CallGraphStats::default());
    assert_eq!(graph.dump(), "Roots:\n");
}
