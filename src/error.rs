use thiserror::Error;

use crate::program::{ProcId, SiteId};

/// The generic Error type, which provides coverage for all errors this library
/// can potentially return.
///
/// Every variant is fatal to graph construction: each one indicates either a
/// defect in the host program representation or a violated invariant of the
/// analysis itself, and `build()` aborts rather than produce a silently-wrong
/// graph. Conditions that are *not* errors — an indirect call that resolves to
/// nothing, or an empty root set — are represented in the graph itself, not
/// here.
///
/// Construction is a deterministic function of the recorded edges, so there is
/// no retry policy: re-running with the same inputs fails identically.
///
/// # Examples
///
/// ```rust
/// use callscope::{Error, analysis::callgraph::CallGraphBuilder};
/// # use callscope::program::{ProcId, ProcSignature, SiteId, TypeSig, ProgramView};
/// # struct Externs;
/// # impl ProgramView for Externs {
/// #     fn is_declaration(&self, _: ProcId) -> bool { true }
/// #     fn signature(&self, _: ProcId) -> ProcSignature { ProcSignature::default() }
/// #     fn static_callee(&self, _: SiteId) -> Option<ProcId> { None }
/// #     fn callee_type(&self, _: SiteId) -> TypeSig { TypeSig::Unknown }
/// # }
///
/// // Two declaration-only procedures cannot legitimately form a cycle.
/// let mut builder = CallGraphBuilder::new();
/// builder.record_call(SiteId::new(1), ProcId::new(1), Some(ProcId::new(2)));
/// builder.record_call(SiteId::new(2), ProcId::new(2), Some(ProcId::new(1)));
///
/// match builder.build(&Externs) {
///     Err(Error::NoLeader { size }) => assert_eq!(size, 2),
///     other => panic!("expected NoLeader, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An indirect call site targets a value whose static type is not a
    /// callable signature.
    ///
    /// The classifier resolves an indirect callee by stripping at most one
    /// level of pointer indirection and expecting a function type underneath.
    /// Anything else is a defect in the host representation, not a condition
    /// this analysis can interpret.
    #[error("call site {site} targets a value with no callable signature")]
    NotCallable {
        /// The offending call site.
        site: SiteId,
    },

    /// A multi-member recursion class contains no body-bearing procedure.
    ///
    /// Declaration-only procedures have no outgoing edges, so a cycle made
    /// entirely of declarations cannot exist under the host contract; seeing
    /// one means the contract was violated or the graph is corrupt.
    #[error("recursive component of {size} procedures has no body-bearing member")]
    NoLeader {
        /// Number of procedures in the offending component.
        size: usize,
    },

    /// A declaration-only procedure ended up leading a collapsed multi-member
    /// class.
    ///
    /// Leader selection guarantees a body-bearing leader for every class with
    /// at least two members; this variant surfaces the postcondition check
    /// after collapsing.
    #[error("declaration-only procedure {leader} leads a collapsed component")]
    DeclarationLeader {
        /// The declaration-only class leader.
        leader: ProcId,
    },
}
