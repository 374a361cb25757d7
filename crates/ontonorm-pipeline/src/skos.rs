//! SKOS notation synthesis.
//!
//! Every concrete class gets a short display code, by one of two
//! format-specific strategies:
//!
//! - **OBO mode** — the `#id` annotation the OBO parser attached becomes a
//!   `skos:notation`. A class with no `#id` has no stable identity; it joins
//!   the pending-removal set and its axioms are purged from the source on
//!   the spot.
//! - **Prefixed-OWL mode** — classes already holding a notation are left
//!   alone; an `oboInOwl#id` annotation is reused when present; otherwise
//!   the declared short form of the class IRI is emitted as a `prefixIRI`
//!   annotation, after undoing the `obo:XXXX_NNNN` conversion artifact left
//!   by legacy OBO-to-OWL tooling.

use std::collections::BTreeSet;

use ontonorm_model::{
    vocab, AnnotationValue, Axiom, Iri, Literal, OntologySource, TargetOntology,
};
use tracing::debug;

/// OBO mode: notation from `#id` annotations; identityless classes are
/// purged and collected into `pending`.
pub fn synthesize_obo_notations(
    source: &mut OntologySource,
    working: &mut BTreeSet<Axiom>,
    pending: &mut BTreeSet<Iri>,
) {
    let classes: Vec<Iri> = source.classes_in_signature().iter().cloned().collect();
    for class in classes {
        let id_value = source.annotation_assertions_for(&class).find_map(|ax| {
            match ax {
                Axiom::AnnotationAssertion { property, value, .. }
                    if property.as_str().contains("#id") =>
                {
                    Some(value.clone())
                }
                _ => None,
            }
        });
        match id_value {
            Some(value) => {
                working.insert(Axiom::annotation(
                    Iri::new_unchecked(vocab::SKOS_NOTATION),
                    class,
                    value,
                ));
            }
            None => {
                debug!(class = %class, "purging class without notation id");
                pending.insert(class.clone());
                source.purge_class(&class);
            }
        }
    }
}

/// Prefixed-OWL mode: notation reuse, then short-form derivation.
pub fn synthesize_owl_notations(
    source: &OntologySource,
    target: &TargetOntology,
    working: &mut BTreeSet<Axiom>,
) {
    for class in source.classes_in_signature() {
        if has_notation(target, working, class) {
            continue;
        }

        let obo_id = source.annotation_assertions_for(class).find_map(|ax| {
            match ax {
                Axiom::AnnotationAssertion { property, value, .. }
                    if property.as_str().contains(vocab::OBO_IN_OWL_ID) =>
                {
                    Some(value.clone())
                }
                _ => None,
            }
        });
        if let Some(value) = obo_id {
            working.insert(Axiom::annotation(
                Iri::new_unchecked(vocab::SKOS_NOTATION),
                class.clone(),
                value,
            ));
            continue;
        }

        if let Some(short_form) = source.format.prefix_iri(class) {
            let display = display_code(&short_form);
            working.insert(Axiom::annotation(
                Iri::new_unchecked(vocab::META_PREFIX_IRI),
                class.clone(),
                AnnotationValue::Literal(Literal::plain(display)),
            ));
        }
    }
}

fn has_notation(target: &TargetOntology, working: &BTreeSet<Axiom>, class: &Iri) -> bool {
    let is_notation = |ax: &Axiom| {
        matches!(
            ax,
            Axiom::AnnotationAssertion { property, subject, .. }
                if subject == class && property.as_str().contains(vocab::SKOS_NOTATION)
        )
    };
    target.annotation_assertions_for(class).any(|ax| is_notation(ax))
        || working.iter().any(is_notation)
}

/// Normalizes a declared short form into a display code.
///
/// A leading `:` (default prefix) is dropped. The rewrite of
/// `obo:XXXX_NNNN` into `XXXX:NNNN` undoes how legacy converters flattened
/// OBO identifiers; it fires only for the literal `obo:` token and only when
/// an underscore is present, with the last underscore becoming the colon.
fn display_code(short_form: &str) -> String {
    let short_form = short_form.strip_prefix(':').unwrap_or(short_form);
    if short_form.starts_with("obo:") && short_form.contains('_') {
        let flattened = &short_form["obo:".len()..];
        if let Some(idx) = flattened.rfind('_') {
            return format!("{}:{}", &flattened[..idx], &flattened[idx + 1..]);
        }
    }
    short_form.to_string()
}
