//! Interprocedural call graph construction and condensation.
//!
//! This module builds a call graph from host-reported call sites and
//! collapses it into a condensation graph: every strongly-connected component
//! (a group of mutually, possibly indirectly, recursive procedures) becomes a
//! single canonical node. The collapsed, cycle-free structure is the
//! scheduling backbone for analyses that must process callees before callers.
//!
//! # Architecture
//!
//! Ingestion and consumption are separate phases. The host drives a
//! [`CallGraphBuilder`] while it walks the program, reporting each call site
//! with its enclosing caller and (when statically known) its target. The
//! one-shot `build` then runs SCC detection over the simple-callee view,
//! derives the root set from the recorded edges, folds every component into
//! its leader, and freezes the result as an immutable [`CallGraph`].
//!
//! # Components
//!
//! - [`CallGraphBuilder`] / [`CallGraph`]: ingestion surface and built artifact
//! - [`CallGraphStore`]: the caller-level and call-site-level edge maps
//! - [`Partition`]: equivalence classes of procedures, one per component
//! - [`has_pointers`] / [`site_has_pointers`]: pointer-relevance classifier
//!
//! # Example
//!
//! ```rust,ignore
//! use callscope::prelude::*;
//!
//! let mut builder = CallGraphBuilder::new();
//! for site in host.call_sites() {
//!     builder.record_call(site.id, site.caller, site.static_target);
//! }
//! let graph = builder.build(&host)?;
//!
//! // Schedule a bottom-up analysis over the condensate.
//! for leader in graph.topological_order() {
//!     process(leader, graph.callees_of(leader));
//! }
//! ```

mod collapse;
mod graph;
mod partition;
mod relevance;
mod roots;
mod scc;
mod store;

pub use graph::{CallGraph, CallGraphBuilder, CallGraphStats};
pub use partition::Partition;
pub use relevance::{has_pointers, site_has_pointers};
pub use store::CallGraphStore;
