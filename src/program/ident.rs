//! Opaque identities for host procedures and call sites.
//!
//! The analysis never owns or inspects host program state directly; it refers
//! to procedures and call instructions through the stable handles defined
//! here. Handles have value equality, hashing, and a total order, so they can
//! key ordered maps and produce reproducible iteration order.

use std::fmt;

/// A stable, opaque handle to a procedure in the host program.
///
/// The host assigns the underlying value (typically an arena index or a
/// metadata row number); this crate only compares, hashes, and orders it.
/// Two `ProcId`s are equal exactly when they denote the same host procedure.
///
/// # Examples
///
/// ```rust
/// use callscope::program::ProcId;
///
/// let main = ProcId::new(1);
/// assert_eq!(main.value(), 1);
/// assert_eq!(format!("{main}"), "p1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcId(pub u32);

impl ProcId {
    /// Creates a procedure handle from a raw host-assigned value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        ProcId(value)
    }

    /// Returns the raw host-assigned value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProcId {
    fn from(value: u32) -> Self {
        ProcId(value)
    }
}

impl From<ProcId> for u32 {
    fn from(proc: ProcId) -> Self {
        proc.0
    }
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A stable, opaque handle to one call instruction in the host program.
///
/// Every call site belongs to exactly one enclosing caller procedure; the
/// association is supplied by the host when the site is recorded and is not
/// derivable from the handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(pub u32);

impl SiteId {
    /// Creates a call-site handle from a raw host-assigned value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        SiteId(value)
    }

    /// Returns the raw host-assigned value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for SiteId {
    fn from(value: u32) -> Self {
        SiteId(value)
    }
}

impl From<SiteId> for u32 {
    fn from(site: SiteId) -> Self {
        site.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}
