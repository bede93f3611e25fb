//! The read-only view of the host program consumed by the analysis.

use crate::program::{ProcId, ProcSignature, SiteId, TypeSig};

/// The minimal contract a host program representation must satisfy.
///
/// The analysis drives ingestion itself (the host pushes call sites into a
/// [`CallGraphBuilder`](crate::analysis::callgraph::CallGraphBuilder)); this
/// trait covers the facts that are instead pulled on demand: whether a
/// procedure has a body, its declared signature, and what a call site's
/// callee looks like statically.
///
/// All methods are queries; implementations must not mutate program state as
/// a side effect of being asked.
pub trait ProgramView {
    /// Returns `true` if the procedure is declaration-only (has no body
    /// available to analyze).
    ///
    /// Declaration-only procedures never contribute outgoing call edges and
    /// are never chosen as leaders of multi-member recursion classes.
    fn is_declaration(&self, proc: ProcId) -> bool;

    /// Returns the declared signature of a procedure.
    fn signature(&self, proc: ProcId) -> ProcSignature;

    /// Returns the statically-known callee of a call site, if the call is
    /// direct.
    ///
    /// Indirect calls (through function pointers or other computed values)
    /// yield `None`; their static type is exposed via [`callee_type`]
    /// instead.
    ///
    /// [`callee_type`]: ProgramView::callee_type
    fn static_callee(&self, site: SiteId) -> Option<ProcId>;

    /// Returns the static type of the callee expression at a call site.
    ///
    /// Only consulted for sites with no statically-known callee. For a
    /// well-formed program this is a function type, possibly behind one
    /// level of pointer indirection.
    fn callee_type(&self, site: SiteId) -> TypeSig;
}
