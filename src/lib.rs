// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # callscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/callscope.svg)](https://crates.io/crates/callscope)
//! [![Documentation](https://docs.rs/callscope/badge.svg)](https://docs.rs/callscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/callscope/blob/main/LICENSE-APACHE)
//!
//! Interprocedural call graph construction and SCC condensation, built as the
//! scheduling backbone for bottom-up whole-program analyses. `callscope`
//! ingests call sites from a host compiler or analysis pipeline, detects
//! strongly-connected components (mutual recursion), collapses each component
//! into a single canonical node, and derives the set of entry points — giving
//! clients a cycle-free graph they can process callees-before-callers.
//!
//! ## Features
//!
//! - **🧭 Opaque host identities** - procedures and call sites are referred to
//!   by stable handles; the host program is never owned or mutated
//! - **🔁 SCC condensation** - linear-time component detection with a
//!   deterministic, body-bearing leader per recursion class
//! - **🌱 Root derivation** - entry-point candidates computed from the
//!   collapsed graph
//! - **📌 Pointer-relevance classifier** - decide which call edges matter to
//!   pointer-sensitive clients
//! - **🛡️ Fail-loud invariants** - a corrupt partition aborts construction
//!   instead of producing a silently-wrong graph
//!
//! ## Quick Start
//!
//! Add `callscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! callscope = "0.1"
//! ```
//!
//! Implement [`program::ProgramView`] for your program representation, then
//! feed call sites into a builder:
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
//! let host = Host;
//! let (main, helper) = (ProcId::new(1), ProcId::new(2));
//!
//! let mut builder = CallGraphBuilder::new();
//! builder.record_call(SiteId::new(1), main, Some(helper));
//! builder.record_call(SiteId::new(2), helper, None); // unresolved indirect call
//!
//! let graph = builder.build(&host)?;
//! assert_eq!(graph.roots().iter().copied().collect::<Vec<_>>(), vec![main]);
//! # Ok::<(), callscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `callscope` is organized into two modules:
//!
//! - [`program`] - the host-facing model: [`program::ProcId`] /
//!   [`program::SiteId`] handles, reduced signature descriptions, and the
//!   [`program::ProgramView`] query trait
//! - [`analysis`] - the call graph itself: ingestion
//!   ([`analysis::callgraph::CallGraphBuilder`]), the condensed artifact
//!   ([`analysis::callgraph::CallGraph`]), and the pointer-relevance
//!   classifier
//!
//! ### Build Pipeline
//!
//! The build is one-shot and strictly ordered: ingest → SCC detection →
//! root derivation → collapse. Ingestion is serial (driven by a single
//! forward pass the host makes over its program); the built graph is
//! immutable and safe to share across concurrent readers.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Errors are reserved
//! for contract violations — an indirect call through a non-callable value, a
//! recursion class with no body-bearing member. An unresolvable call target
//! or an empty root set is ordinary data, not an error.

pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use callscope::prelude::*;
///
/// let mut builder = CallGraphBuilder::new();
/// builder.ensure_node(ProcId::new(1));
/// ```
pub mod prelude;

/// Host program model: opaque identities, signature descriptions, and the
/// [`program::ProgramView`] trait the analysis pulls facts through.
pub mod program;

/// Program analyses over the host model; home of the call graph and its
/// condensation.
pub mod analysis;

/// `callscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `callscope` Error type
///
/// The main error type for all operations in this crate. Every variant is a
/// fatal construction failure; see [`Error`] for the taxonomy.
pub use error::Error;
