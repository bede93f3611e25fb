//! Shared functionality which is used in unit-tests.

use std::collections::{HashMap, HashSet};

use crate::program::{ProcId, ProcSignature, ProgramView, SiteId, TypeSig};

/// An in-memory [`ProgramView`] with builder-style setup.
///
/// Every procedure is body-bearing with an empty scalar signature unless told
/// otherwise; every site is direct-unknown unless given a static callee or a
/// callee type.
#[derive(Debug, Default)]
pub(crate) struct FixtureProgram {
    declarations: HashSet<ProcId>,
    signatures: HashMap<ProcId, ProcSignature>,
    static_callees: HashMap<SiteId, ProcId>,
    callee_types: HashMap<SiteId, TypeSig>,
}

impl FixtureProgram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_declaration(mut self, proc: ProcId) -> Self {
        self.declarations.insert(proc);
        self
    }

    pub(crate) fn with_signature(mut self, proc: ProcId, signature: ProcSignature) -> Self {
        self.signatures.insert(proc, signature);
        self
    }

    pub(crate) fn with_static_callee(mut self, site: SiteId, callee: ProcId) -> Self {
        self.static_callees.insert(site, callee);
        self
    }

    pub(crate) fn with_callee_type(mut self, site: SiteId, callee_type: TypeSig) -> Self {
        self.callee_types.insert(site, callee_type);
        self
    }
}

impl ProgramView for FixtureProgram {
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
