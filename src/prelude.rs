//! Convenient re-exports of the most commonly used types and traits.
//!
//! # Example
//!
//! ```rust
//! use callscope::prelude::*;
//!
//! # struct Host;
//! # impl ProgramView for Host {
//! #     fn is_declaration(&self, _: ProcId) -> bool { false }
//! #     fn signature(&self, _: ProcId) -> ProcSignature { ProcSignature::default() }
//! #     fn static_callee(&self, _: SiteId) -> Option<ProcId> { None }
//! #     fn callee_type(&self, _: SiteId) -> TypeSig { TypeSig::Unknown }
//! # }
//! let mut builder = CallGraphBuilder::new();
//! builder.record_call(SiteId::new(1), ProcId::new(1), Some(ProcId::new(2)));
//! let graph = builder.build(&Host)?;
//! assert_eq!(graph.class_count(), 2);
//! # Ok::<(), callscope::Error>(())
//! ```

pub use crate::analysis::callgraph::{
    has_pointers, site_has_pointers, CallGraph, CallGraphBuilder, CallGraphStats, CallGraphStore,
    Partition,
};
pub use crate::program::{ProcId, ProcSignature, ProgramView, SiteId, TypeSig};
pub use crate::{Error, Result};
