//! Unreferenced-class stripping.

use std::collections::BTreeSet;

use ontonorm_model::{Axiom, Iri, TargetOntology};
use tracing::debug;

/// Removes every target axiom whose signature contains a pending-removal
/// class. Runs after the reasoner merge so inferred axioms are covered too.
pub fn strip_unreferenced(target: &mut TargetOntology, pending: &BTreeSet<Iri>) {
    for class in pending {
        let doomed: BTreeSet<Axiom> = target
            .axioms()
            .filter(|ax| ax.mentions(class))
            .cloned()
            .collect();
        if !doomed.is_empty() {
            debug!(class = %class, count = doomed.len(), "stripping axioms of unidentified class");
            target.remove_axioms(&doomed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    #[test]
    fn no_final_axiom_references_a_pending_class() {
        let mut target = TargetOntology::new();
        let a = iri("http://e.org/A");
        let b = iri("http://e.org/B");
        let c = iri("http://e.org/C");
        target.add_axiom(Axiom::named_sub_class_of(a.clone(), b.clone()));
        target.add_axiom(Axiom::named_sub_class_of(b.clone(), c.clone()));
        target.add_axiom(Axiom::named_sub_class_of(a.clone(), c.clone()));

        let pending: BTreeSet<Iri> = [b.clone()].into_iter().collect();
        strip_unreferenced(&mut target, &pending);

        assert!(!target.mentions(&b));
        assert!(target.contains(&Axiom::named_sub_class_of(a, c)));
    }
}
