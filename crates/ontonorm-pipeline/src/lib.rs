//! Ontology normalization pipeline.
//!
//! Merges one or more heterogeneous ontology documents (OWL/RDF, legacy
//! flat-file OBO) into one canonical target ontology enriched with derived
//! metadata:
//!
//! - ontology-level annotations grounded onto concrete subjects, with a
//!   format-independent version marker for locally sourced documents;
//! - recognized existential-restriction patterns rewritten into direct
//!   annotation facts;
//! - SKOS-style display notations per concrete class, with identityless
//!   classes purged;
//! - a display-hierarchy (`treeView`) overlay parallel to subsumption;
//! - spurious `owl:Thing` root edges pruned under policy;
//! - reasoner-inferred subclass axioms merged before pruning.
//!
//! Document parsing, reasoning internals and serialization codecs live
//! behind the capability traits of `ontonorm-store`; the pipeline sequences
//! them, accumulates one working axiom set, commits it once and reports
//! failures through a structured error sink instead of raising.

pub mod ground;
pub mod invocation;
pub mod master;
pub mod orchestrator;
pub mod prune;
pub mod skos;
pub mod strip;
pub mod translate;
pub mod treeview;

pub use invocation::{ErrorKind, ErrorSink, InvocationContext, RecordedError};
pub use orchestrator::{Pipeline, PipelineState};
