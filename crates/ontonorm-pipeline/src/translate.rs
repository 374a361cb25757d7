//! Axiom translation.
//!
//! Every source axiom is carried into the working set verbatim. On top of
//! that, recognized existential-restriction subclass patterns over OBO
//! relations are rewritten into direct annotation facts:
//!
//! | relation                  | derived facts                                  |
//! |---------------------------|------------------------------------------------|
//! | `contains` / `ro_0001019` | `obo/contains` + `treeView`, direction inverted |
//! | `part_of` / `bfo_0000050` | `obo/part_of` + `treeView`                      |
//! | `develops_from` / `ro_0002202` | `obo/develops_from` + `treeView`          |
//! | other OBO relation        | the relation's own IRI as property             |
//!
//! Anonymous subjects or fillers skip derivation silently; the verbatim copy
//! still goes through.

use std::collections::BTreeSet;

use ontonorm_model::{vocab, AnnotationValue, Axiom, ClassExpression, Iri, OntologySource};

/// Direction of a derived relation annotation.
enum Emission {
    /// `AnnotationAssertion(prop, sub, filler)` plus a parallel tree edge.
    Forward(&'static str),
    /// `AnnotationAssertion(prop, filler, sub)` plus a parallel tree edge.
    Inverted(&'static str),
    /// Generic fallback: the relation's own IRI, subject to filler, no tree
    /// edge.
    Generic,
}

fn classify_relation(property_lower: &str) -> Option<Emission> {
    if !property_lower.contains("obo") {
        return None;
    }
    if property_lower.ends_with("contains") || property_lower.ends_with("ro_0001019") {
        return Some(Emission::Inverted(vocab::META_OBO_CONTAINS));
    }
    if property_lower.ends_with("part_of") || property_lower.ends_with("bfo_0000050") {
        return Some(Emission::Forward(vocab::META_OBO_PART_OF));
    }
    if property_lower.ends_with("develops_from") || property_lower.ends_with("ro_0002202") {
        return Some(Emission::Forward(vocab::META_OBO_DEVELOPS_FROM));
    }
    Some(Emission::Generic)
}

/// Copies `source`'s axioms into the working set and derives annotation
/// facts from recognized restriction patterns. Derivation only applies to
/// OBO-origin sources.
pub fn translate_axioms(source: &OntologySource, working: &mut BTreeSet<Axiom>) {
    let obo_origin = source.format.is_obo();
    for axiom in &source.axioms {
        working.insert(axiom.clone());
        if obo_origin {
            derive_relation_facts(axiom, working);
        }
    }
}

fn derive_relation_facts(axiom: &Axiom, working: &mut BTreeSet<Axiom>) {
    let Axiom::SubClassOf { sub, sup } = axiom else {
        return;
    };
    let Some(sub) = sub.as_named() else {
        return;
    };
    let ClassExpression::SomeValuesFrom { property, filler } = sup else {
        return;
    };
    let Some(filler) = filler.as_named() else {
        return;
    };

    let Some(emission) = classify_relation(&property.as_str().to_lowercase()) else {
        return;
    };
    match emission {
        Emission::Forward(derived) => {
            push_pair(working, derived, sub, filler);
        }
        Emission::Inverted(derived) => {
            push_pair(working, derived, filler, sub);
        }
        Emission::Generic => {
            working.insert(Axiom::annotation(
                property.clone(),
                sub.clone(),
                AnnotationValue::Iri(filler.clone()),
            ));
        }
    }
}

fn push_pair(working: &mut BTreeSet<Axiom>, derived: &str, subject: &Iri, object: &Iri) {
    working.insert(Axiom::annotation(
        Iri::new_unchecked(derived),
        subject.clone(),
        AnnotationValue::Iri(object.clone()),
    ));
    working.insert(Axiom::annotation(
        Iri::new_unchecked(vocab::META_TREE_VIEW),
        subject.clone(),
        AnnotationValue::Iri(object.clone()),
    ));
}
