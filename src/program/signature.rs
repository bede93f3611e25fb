//! Signature descriptions supplied by the host.
//!
//! The pointer-relevance classifier only needs to know three things about a
//! procedure's declared type: whether it is variadic, whether its return type
//! is a pointer, and which parameter types are pointers. [`TypeSig`] and
//! [`ProcSignature`] carry exactly that, as a reduced description the host
//! derives from its own richer type representation.

/// A parsed type as far as this analysis cares to distinguish it.
///
/// Anything that is not a pointer or a function is collapsed into
/// [`TypeSig::Scalar`]; integers, floats, and aggregates are all alike here.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSig {
    /// Not described by the host.
    #[default]
    Unknown,
    /// void
    Void,
    /// Any non-pointer, non-function value type.
    Scalar,
    /// A pointer to a type.
    Ptr(Box<TypeSig>),
    /// A function type (the referent of an indirect call).
    FnPtr(Box<ProcSignature>),
}

impl TypeSig {
    /// Returns `true` if this type is a pointer.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self, TypeSig::Ptr(_))
    }

    /// Returns the function signature behind this type, if it is callable.
    ///
    /// A bare function type is callable directly; a pointer to a function
    /// type is callable through one level of indirection. Anything else
    /// yields `None`.
    #[must_use]
    pub fn as_callable(&self) -> Option<&ProcSignature> {
        match self {
            TypeSig::FnPtr(signature) => Some(signature),
            TypeSig::Ptr(inner) => match inner.as_ref() {
                TypeSig::FnPtr(signature) => Some(signature),
                _ => None,
            },
            _ => None,
        }
    }
}

/// The declared signature of a procedure.
///
/// # Examples
///
/// ```rust
/// use callscope::program::{ProcSignature, TypeSig};
///
/// // int strlen(char*)
/// let strlen = ProcSignature {
///     vararg: false,
///     return_type: TypeSig::Scalar,
///     params: vec![TypeSig::Ptr(Box::new(TypeSig::Scalar))],
/// };
/// assert!(strlen.params[0].is_pointer());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcSignature {
    /// The procedure accepts a variable number of arguments.
    pub vararg: bool,
    /// The declared return type.
    pub return_type: TypeSig,
    /// The declared parameter types, in order.
    pub params: Vec<TypeSig>,
}
