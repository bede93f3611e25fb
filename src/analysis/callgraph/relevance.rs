//! Pointer-relevance classification of signatures and call sites.
//!
//! Interprocedural pointer analyses only care about call edges that can move
//! pointer values across the call: variadic callees, pointer returns, or
//! pointer parameters. The two entry points here answer that question for a
//! declared signature and for a call site; both are pure queries.

use crate::{
    program::{ProcSignature, ProgramView, SiteId},
    Error, Result,
};

/// Returns `true` if the signature can pass or receive pointer values.
///
/// True iff the signature is variadic, its return type is a pointer, or any
/// parameter type is a pointer.
///
/// # Examples
///
/// ```rust
/// use callscope::analysis::callgraph::has_pointers;
/// use callscope::program::{ProcSignature, TypeSig};
///
/// let leaf = ProcSignature { vararg: false, return_type: TypeSig::Void, params: vec![] };
/// assert!(!has_pointers(&leaf));
///
/// let printf = ProcSignature {
///     vararg: true,
///     return_type: TypeSig::Scalar,
///     params: vec![TypeSig::Ptr(Box::new(TypeSig::Scalar))],
/// };
/// assert!(has_pointers(&printf));
/// ```
#[must_use]
pub fn has_pointers(signature: &ProcSignature) -> bool {
    if signature.vararg {
        return true;
    }
    if signature.return_type.is_pointer() {
        return true;
    }
    signature.params.iter().any(|param| param.is_pointer())
}

/// Returns `true` if the call at `site` can pass or receive pointer values.
///
/// Uses the declared signature of the statically-known callee when the call
/// is direct; otherwise inspects the static type of the indirect callee
/// expression (a function type, possibly behind one pointer level).
///
/// # Errors
///
/// Returns [`Error::NotCallable`] if an indirect callee's static type is not
/// recognizable as a callable signature — a defect in the host
/// representation, propagated rather than guessed around.
pub fn site_has_pointers<P: ProgramView>(program: &P, site: SiteId) -> Result<bool> {
    if let Some(callee) = program.static_callee(site) {
        return Ok(has_pointers(&program.signature(callee)));
    }

    let callee_type = program.callee_type(site);
    match callee_type.as_callable() {
        Some(signature) => Ok(has_pointers(signature)),
        None => Err(Error::NotCallable { site }),
    }
}
