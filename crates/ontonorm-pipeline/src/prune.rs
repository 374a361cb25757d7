//! Root pruning.
//!
//! Legacy OBO conversions leave spurious direct edges under `owl:Thing`.
//! A root edge is removed when the subclass is deprecated, already placed in
//! the display hierarchy, or carries no label at all. Only classes whose IRI
//! mentions `obo` are policed; hand-authored OWL roots stay untouched.

use std::collections::BTreeSet;

use ontonorm_model::{vocab, Axiom, Iri, TargetOntology};
use tracing::debug;

#[derive(Default)]
struct RootProfile {
    has_label: bool,
    deprecated: bool,
    displayed: bool,
}

fn profile(target: &TargetOntology, class: &Iri) -> RootProfile {
    let mut profile = RootProfile::default();
    for axiom in target.annotation_assertions_for(class) {
        let Axiom::AnnotationAssertion {
            property, value, ..
        } = axiom
        else {
            continue;
        };
        let prop = property.as_str();
        if prop == vocab::RDFS_LABEL || prop == vocab::RDFS_LABEL_BARE {
            profile.has_label = true;
        }
        if prop == vocab::OWL_DEPRECATED && value.as_text().contains("true") {
            profile.deprecated = true;
        }
        if prop.contains("treeView") {
            profile.displayed = true;
        }
    }
    profile
}

/// Removes disqualified direct `SubClassOf(sub, owl:Thing)` edges.
pub fn prune_roots(target: &mut TargetOntology) {
    let thing = Iri::new_unchecked(vocab::OWL_THING);
    if !target.mentions(&thing) {
        return;
    }

    let mut doomed: BTreeSet<Axiom> = BTreeSet::new();
    for edge in target.subclass_axioms_for_super(&thing) {
        let Axiom::SubClassOf { sub, .. } = &edge else {
            continue;
        };
        let Some(sub) = sub.as_named() else {
            continue;
        };
        if !sub.as_str().to_lowercase().contains("obo") {
            continue;
        }

        let profile = profile(target, sub);
        if profile.deprecated || profile.displayed || !profile.has_label {
            debug!(
                root = %sub,
                deprecated = profile.deprecated,
                displayed = profile.displayed,
                unlabeled = !profile.has_label,
                "pruning root edge"
            );
            doomed.insert(edge);
        }
    }
    target.remove_axioms(&doomed);
}
