//! Program analyses built on top of the host program model.
//!
//! Currently one analysis lives here: the [`callgraph`] module, which builds
//! the interprocedural call graph and its SCC condensation. The module
//! boundary exists so downstream analyses that consume the condensate
//! (points-to propagation, reachability, dead procedure detection) have an
//! obvious home alongside it.

pub mod callgraph;

pub use callgraph::{CallGraph, CallGraphBuilder, CallGraphStats};
