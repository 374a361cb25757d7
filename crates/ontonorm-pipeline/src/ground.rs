//! Metadata grounding.
//!
//! Ontology-level annotations float on the document; grounding asserts each
//! one as an annotation axiom whose subject is the ontology's own IRI, so
//! the merged target keeps the metadata on a concrete subject. Locally
//! sourced version info additionally lands on a fixed, format-independent
//! version subject.

use std::collections::BTreeSet;

use ontonorm_model::{vocab, Axiom, Iri, OntologySource};

/// Grounds `source`'s ontology-level annotations into the working set.
///
/// Anonymous ontologies have no subject to ground onto and are skipped.
/// Set semantics make repeated grounding a no-op.
pub fn ground_metadata(source: &OntologySource, working: &mut BTreeSet<Axiom>) {
    let Some(subject) = source.ontology_iri.clone() else {
        return;
    };
    for ann in &source.annotations {
        working.insert(Axiom::AnnotationAssertion {
            property: ann.property.clone(),
            subject: subject.clone(),
            value: ann.value.clone(),
        });
        if source.is_local() && ann.property.as_str().contains("versionInfo") {
            working.insert(Axiom::AnnotationAssertion {
                property: Iri::new_unchecked(vocab::OWL_VERSION_INFO),
                subject: Iri::new_unchecked(vocab::VERSION_SUBJECT),
                value: ann.value.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontonorm_model::{Annotation, DocumentFormat, Literal};

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    fn source_with_version(document_iri: &str) -> OntologySource {
        let mut source = OntologySource::new(document_iri, DocumentFormat::OtherRdf);
        source.ontology_iri = Some(iri("http://example.org/onto"));
        source.annotations.insert(Annotation::new(
            iri(vocab::OWL_VERSION_INFO),
            Literal::plain("2021-03-01"),
        ));
        source
    }

    #[test]
    fn grounds_annotations_onto_the_ontology_iri() {
        let source = source_with_version("http://remote.example.org/onto.owl");
        let mut working = BTreeSet::new();
        ground_metadata(&source, &mut working);

        assert!(working.contains(&Axiom::annotation(
            iri(vocab::OWL_VERSION_INFO),
            iri("http://example.org/onto"),
            Literal::plain("2021-03-01"),
        )));
        // Remote source: no synthesized version subject.
        assert_eq!(working.len(), 1);
    }

    #[test]
    fn local_version_info_lands_on_the_version_subject() {
        let source = source_with_version("file:///repo/onto.owl");
        let mut working = BTreeSet::new();
        ground_metadata(&source, &mut working);

        assert!(working.contains(&Axiom::annotation(
            iri(vocab::OWL_VERSION_INFO),
            iri(vocab::VERSION_SUBJECT),
            Literal::plain("2021-03-01"),
        )));
        assert_eq!(working.len(), 2);
    }

    #[test]
    fn anonymous_sources_ground_nothing() {
        let mut source = source_with_version("file:///repo/onto.owl");
        source.ontology_iri = None;
        let mut working = BTreeSet::new();
        ground_metadata(&source, &mut working);
        assert!(working.is_empty());
    }

    #[test]
    fn regrounding_is_idempotent() {
        let source = source_with_version("file:///repo/onto.owl");
        let mut working = BTreeSet::new();
        ground_metadata(&source, &mut working);
        let first = working.clone();
        ground_metadata(&source, &mut working);
        assert_eq!(first, working);
    }
}
