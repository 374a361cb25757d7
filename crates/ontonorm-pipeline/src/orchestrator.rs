//! Pipeline orchestration.
//!
//! One run owns one [`InvocationContext`], one working axiom set and one
//! target ontology; nothing is shared across runs. Stages advance an
//! explicit state machine and any failure lands in the error sink instead of
//! propagating past [`Pipeline::run`], which always returns a success flag
//! and flushes the sink exactly once.

use std::collections::BTreeSet;
use std::fs;
use std::panic::{self, AssertUnwindSafe};

use ontonorm_model::{vocab, AnnotationChange, Axiom, Iri, Literal};
use ontonorm_store::{DocumentDiscovery, OntologyStore, OutputFormat, Reasoner};
use tracing::{error, info};

use crate::invocation::{ErrorKind, InvocationContext};
use crate::{ground, master, prune, skos, strip, translate, treeview};

/// Progress of a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    SourcesDiscovered,
    MasterLoaded,
    AxiomsMerged,
    AnnotationsApplied,
    HierarchyProjected,
    ReasonerMerged,
    Pruned,
    Serialized,
    Done,
    Failed(ErrorKind),
}

struct PipelineFailure {
    kind: ErrorKind,
    message: String,
}

impl PipelineFailure {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One normalization run over one target ontology.
pub struct Pipeline<S, R, D> {
    store: S,
    reasoner: R,
    discovery: D,
    ctx: InvocationContext,
    state: PipelineState,
}

impl<S: OntologyStore, R: Reasoner, D: DocumentDiscovery> Pipeline<S, R, D> {
    pub fn new(ctx: InvocationContext, store: S, reasoner: R, discovery: D) -> Self {
        Self {
            store,
            reasoner,
            discovery,
            ctx,
            state: PipelineState::Init,
        }
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    #[must_use]
    pub fn context(&self) -> &InvocationContext {
        &self.ctx
    }

    #[must_use]
    pub fn into_context(self) -> InvocationContext {
        self.ctx
    }

    /// Public entry point. Never panics and never returns an error: every
    /// failure is recorded in the sink, which is flushed exactly once on
    /// every path.
    pub fn run(&mut self) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute()));
        let result = outcome.unwrap_or_else(|payload| {
            Err(PipelineFailure::new(ErrorKind::Unknown, panic_text(&payload)))
        });

        let succeeded = match result {
            Ok(()) => {
                self.state = PipelineState::Done;
                true
            }
            Err(failure) => {
                error!(kind = %failure.kind, message = %failure.message, "pipeline failed");
                self.ctx
                    .error_sink
                    .add_error(failure.kind, failure.message);
                self.state = PipelineState::Failed(failure.kind);
                false
            }
        };

        let report_path = self.ctx.report_path();
        self.ctx.error_sink.flush(&report_path);
        succeeded
    }

    fn execute(&mut self) -> Result<(), PipelineFailure> {
        self.ctx
            .validate()
            .map_err(|message| PipelineFailure::new(ErrorKind::Configuration, message))?;

        // Discovery.
        let candidates = master::discover_candidates(&mut self.ctx, &self.discovery);
        self.state = PipelineState::SourcesDiscovered;

        // Master resolution and load.
        let master_path = master::resolve_master(
            &candidates,
            self.ctx.input_repository_folder.as_deref(),
            &self.ctx.master_file_name,
        )
        .ok_or_else(|| {
            PipelineFailure::new(
                ErrorKind::MasterFileMissing,
                format!(
                    "cannot find {} in input folder",
                    self.ctx.master_file_name
                ),
            )
        })?;
        let loaded = self
            .store
            .load(&master_path, self.ctx.input_repository_folder.as_deref())
            .map_err(|err| PipelineFailure::new(ErrorKind::Parse, err.to_string()))?;
        for warning in loaded.warnings {
            self.ctx.error_sink.add_warning(warning);
        }
        let mut sources = loaded.sources;
        self.state = PipelineState::MasterLoaded;

        // Merge: one working set, committed once.
        let mut target = self
            .store
            .create_empty()
            .map_err(|err| PipelineFailure::new(ErrorKind::OntologyCreation, err.to_string()))?;
        let obo_origin = sources.iter().any(|s| s.format.is_obo());
        let mut working: BTreeSet<Axiom> = BTreeSet::new();
        let mut pending: BTreeSet<Iri> = BTreeSet::new();

        for source in &mut sources {
            info!(document = %source.document_iri, obo_origin, "inspecting source");
            ground::ground_metadata(source, &mut working);
            translate::translate_axioms(source, &mut working);
            if obo_origin {
                skos::synthesize_obo_notations(source, &mut working, &mut pending);
            } else if source.format.is_prefixed() {
                skos::synthesize_owl_notations(source, &target, &mut working);
            }
        }
        target.add_axioms(working);
        self.state = PipelineState::AxiomsMerged;

        // Ontology-level annotation carry-over.
        for source in &sources {
            for ann in &source.annotations {
                target.apply_annotation_change(AnnotationChange::Add(ann.clone()));
            }
        }
        self.state = PipelineState::AnnotationsApplied;

        // OBO extras: version marker and display hierarchy.
        if obo_origin {
            if let Some(version) = &self.ctx.obo_version {
                info!(version = %version, "attaching OBO data version");
                target.add_axiom(Axiom::annotation(
                    Iri::new_unchecked(vocab::OWL_VERSION_INFO),
                    Iri::new_unchecked(vocab::VERSION_SUBJECT),
                    Literal::plain(version.clone()),
                ));
            }
            treeview::project_tree_view(&mut target);
        }
        self.state = PipelineState::HierarchyProjected;

        // Reasoner merge.
        let inferred = self.reasoner.infer_subclasses(&target);
        info!(count = inferred.len(), "merging inferred subclass axioms");
        target.add_axioms(inferred);
        self.state = PipelineState::ReasonerMerged;

        // Pruning: roots, then classes without identity.
        prune::prune_roots(&mut target);
        strip::strip_unreferenced(&mut target, &pending);
        self.state = PipelineState::Pruned;

        // Serialization.
        let output = self.ctx.output_document_path();
        if let Err(err) = self.store.save(&target, OutputFormat::RdfXml, &output) {
            if output.exists() {
                let incomplete = output.with_file_name(format!(
                    "{}.incomplete",
                    output
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("owlapi.xrdf")
                ));
                if let Err(rename_err) = fs::rename(&output, &incomplete) {
                    error!(error = %rename_err, "could not preserve partial output");
                }
            }
            return Err(PipelineFailure::new(ErrorKind::Storage, err.to_string()));
        }
        self.state = PipelineState::Serialized;
        info!(output = %output.display(), "serialization done");
        Ok(())
    }
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unexpected fault".to_string()
    }
}
