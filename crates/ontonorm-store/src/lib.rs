//! Ontology store, reasoner and discovery collaborators for Ontonorm.
//!
//! The normalization pipeline consumes three capabilities through traits and
//! never touches document syntax itself:
//!
//! - [`OntologyStore`] — load/parse a document (with its resolvable import
//!   closure), create the empty merge target, serialize the result;
//! - [`Reasoner`] — compute inferred subclass axioms over the target;
//! - [`DocumentDiscovery`] — enumerate candidate documents under a folder.
//!
//! This crate also ships the built-in collaborators: [`FileStore`] (OBO
//! flat files plus N-Triples / Turtle / RDF-XML via Sophia, and a minimal
//! RDF/XML writer), [`StructuralReasoner`] (told-subsumption transitive
//! closure) and [`SuffixDiscovery`] (deterministic `walkdir` walk).

pub mod discovery;
pub mod file;
pub mod obo;
pub mod rdf;
pub mod reasoner;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ontonorm_model::{Axiom, OntologySource, TargetOntology};
use thiserror::Error;

pub use discovery::SuffixDiscovery;
pub use file::FileStore;
pub use reasoner::StructuralReasoner;

/// A document could not be parsed.
#[derive(Debug, Error)]
#[error("failed to parse {path}: {message}")]
pub struct ParseError {
    pub path: PathBuf,
    pub message: String,
}

/// The empty target ontology could not be created.
#[derive(Debug, Error)]
#[error("failed to create target ontology: {0}")]
pub struct OntologyCreationError(pub String);

/// The target ontology could not be written out.
#[derive(Debug, Error)]
#[error("failed to store ontology at {path}: {message}")]
pub struct StorageError {
    pub path: PathBuf,
    pub message: String,
}

/// Serialization format accepted by [`OntologyStore::save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    RdfXml,
}

/// A loaded document: the requested source first, then its resolvable
/// import closure. Unresolvable imports degrade to warnings (silent
/// missing-import policy).
#[derive(Debug)]
pub struct LoadedDocument {
    pub sources: Vec<OntologySource>,
    pub warnings: Vec<String>,
}

/// A single parsed document before import resolution.
#[derive(Debug)]
pub struct ParsedDocument {
    pub source: OntologySource,
    /// Import IRIs (or relative paths for OBO) the document declares.
    pub imports: Vec<String>,
}

/// Load, create and save capability consumed by the pipeline.
pub trait OntologyStore {
    /// Parses the document at `path` together with the imports that resolve
    /// under `import_root` (auto-mapping an import IRI's last path segment
    /// into that folder).
    fn load(&self, path: &Path, import_root: Option<&Path>)
        -> Result<LoadedDocument, ParseError>;

    fn create_empty(&self) -> Result<TargetOntology, OntologyCreationError>;

    fn save(
        &self,
        target: &TargetOntology,
        format: OutputFormat,
        path: &Path,
    ) -> Result<(), StorageError>;
}

/// Inference capability: all subclass axioms entailed by the target.
pub trait Reasoner {
    fn infer_subclasses(&self, ontology: &TargetOntology) -> BTreeSet<Axiom>;
}

/// Discovery capability: candidate ontology documents under a folder.
pub trait DocumentDiscovery {
    fn candidates(&self, folder: &Path) -> Vec<PathBuf>;
}
