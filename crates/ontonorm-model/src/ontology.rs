use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::axiom::Axiom;
use crate::format::DocumentFormat;
use crate::iri::Iri;
use crate::term::Annotation;

/// A parsed source document, as produced by an ontology store.
///
/// Axioms live in a `BTreeSet`: set semantics make re-grounding idempotent
/// and iteration deterministic. The only mutation after parse time is the
/// purge of axioms referencing classes whose identity could not be
/// established.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OntologySource {
    /// Where the document came from; a `file:` scheme marks a local source.
    pub document_iri: String,
    pub format: DocumentFormat,
    /// `None` for anonymous ontologies.
    pub ontology_iri: Option<Iri>,
    /// Ontology-level annotations (unattached to any subject).
    pub annotations: BTreeSet<Annotation>,
    pub axioms: BTreeSet<Axiom>,
    /// Classes the document declares.
    classes: BTreeSet<Iri>,
}

impl OntologySource {
    pub fn new(document_iri: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            document_iri: document_iri.into(),
            format,
            ontology_iri: None,
            annotations: BTreeSet::new(),
            axioms: BTreeSet::new(),
            classes: BTreeSet::new(),
        }
    }

    /// Whether the document was loaded from the local file system rather
    /// than a cached or remote location.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.document_iri.starts_with("file:")
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.ontology_iri.is_none()
    }

    pub fn declare_class(&mut self, class: Iri) {
        self.classes.insert(class);
    }

    #[must_use]
    pub fn classes_in_signature(&self) -> &BTreeSet<Iri> {
        &self.classes
    }

    /// Annotation assertions whose subject is `subject`.
    pub fn annotation_assertions_for(
        &self,
        subject: &Iri,
    ) -> impl Iterator<Item = &Axiom> + '_ {
        let subject = subject.clone();
        self.axioms.iter().filter(move |ax| {
            matches!(ax, Axiom::AnnotationAssertion { subject: s, .. } if *s == subject)
        })
    }

    /// Removes every axiom whose signature contains `class` and returns the
    /// removed set.
    pub fn purge_class(&mut self, class: &Iri) -> BTreeSet<Axiom> {
        let (purged, kept): (BTreeSet<_>, BTreeSet<_>) = std::mem::take(&mut self.axioms)
            .into_iter()
            .partition(|ax| ax.mentions(class));
        self.axioms = kept;
        purged
    }
}

/// An annotation change applied to the target's ontology-level annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationChange {
    Add(Annotation),
    Remove(Annotation),
}

/// The single mutable merge target of a pipeline run.
///
/// Axioms are added and removed as whole units, never edited in place.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TargetOntology {
    axioms: BTreeSet<Axiom>,
    annotations: BTreeSet<Annotation>,
}

impl TargetOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.axioms.insert(axiom);
    }

    pub fn add_axioms(&mut self, axioms: impl IntoIterator<Item = Axiom>) {
        self.axioms.extend(axioms);
    }

    pub fn remove_axioms(&mut self, axioms: &BTreeSet<Axiom>) {
        self.axioms.retain(|ax| !axioms.contains(ax));
    }

    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> + '_ {
        self.axioms.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    #[must_use]
    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    /// Whether any axiom mentions `iri`.
    #[must_use]
    pub fn mentions(&self, iri: &Iri) -> bool {
        self.axioms.iter().any(|ax| ax.mentions(iri))
    }

    /// Direct `SubClassOf(_, sup)` edges, cloned so the caller can remove
    /// them while iterating.
    #[must_use]
    pub fn subclass_axioms_for_super(&self, sup: &Iri) -> Vec<Axiom> {
        self.axioms
            .iter()
            .filter(|ax| {
                matches!(
                    ax,
                    Axiom::SubClassOf { sup: s, .. }
                        if s.as_named().is_some_and(|named| named == sup)
                )
            })
            .cloned()
            .collect()
    }

    /// Annotation assertions whose subject is `subject`.
    pub fn annotation_assertions_for(
        &self,
        subject: &Iri,
    ) -> impl Iterator<Item = &Axiom> + '_ {
        let subject = subject.clone();
        self.axioms.iter().filter(move |ax| {
            matches!(ax, Axiom::AnnotationAssertion { subject: s, .. } if *s == subject)
        })
    }

    pub fn apply_annotation_change(&mut self, change: AnnotationChange) {
        match change {
            AnnotationChange::Add(ann) => {
                self.annotations.insert(ann);
            }
            AnnotationChange::Remove(ann) => {
                self.annotations.remove(&ann);
            }
        }
    }

    #[must_use]
    pub fn ontology_annotations(&self) -> &BTreeSet<Annotation> {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::ClassExpression;
    use crate::term::{AnnotationValue, Literal};

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    #[test]
    fn purge_removes_every_mentioning_axiom() {
        let mut source = OntologySource::new("file:///tmp/a.owl", DocumentFormat::OtherRdf);
        let a = iri("http://example.org/A");
        let b = iri("http://example.org/B");
        let c = iri("http://example.org/C");
        source.axioms.insert(Axiom::named_sub_class_of(a.clone(), b.clone()));
        source.axioms.insert(Axiom::named_sub_class_of(b.clone(), c.clone()));
        source.axioms.insert(Axiom::annotation(
            iri("http://www.w3.org/2000/01/rdf-schema#label"),
            a.clone(),
            AnnotationValue::Literal(Literal::plain("A")),
        ));

        let purged = source.purge_class(&a);
        assert_eq!(purged.len(), 2);
        assert_eq!(source.axioms.len(), 1);
        assert!(!source.axioms.iter().any(|ax| ax.mentions(&a)));
    }

    #[test]
    fn duplicate_axioms_collapse() {
        let mut target = TargetOntology::new();
        let edge = Axiom::named_sub_class_of(iri("http://e.org/A"), iri("http://e.org/B"));
        target.add_axiom(edge.clone());
        target.add_axiom(edge);
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn subclass_lookup_ignores_restriction_superclasses() {
        let mut target = TargetOntology::new();
        let thing = iri("http://www.w3.org/2002/07/owl#Thing");
        target.add_axiom(Axiom::named_sub_class_of(iri("http://e.org/A"), thing.clone()));
        target.add_axiom(Axiom::SubClassOf {
            sub: ClassExpression::Named(iri("http://e.org/B")),
            sup: ClassExpression::SomeValuesFrom {
                property: iri("http://e.org/p"),
                filler: Box::new(ClassExpression::Named(thing.clone())),
            },
        });
        assert_eq!(target.subclass_axioms_for_super(&thing).len(), 1);
    }

    #[test]
    fn annotation_changes_are_set_operations() {
        let mut target = TargetOntology::new();
        let ann = Annotation::new(
            iri("http://www.w3.org/2002/07/owl#versionInfo"),
            AnnotationValue::Literal(Literal::plain("1.0")),
        );
        target.apply_annotation_change(AnnotationChange::Add(ann.clone()));
        target.apply_annotation_change(AnnotationChange::Add(ann.clone()));
        assert_eq!(target.ontology_annotations().len(), 1);
        target.apply_annotation_change(AnnotationChange::Remove(ann));
        assert!(target.ontology_annotations().is_empty());
    }
}
