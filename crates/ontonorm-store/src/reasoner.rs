//! Built-in structural reasoner.

use std::collections::{BTreeMap, BTreeSet};

use ontonorm_model::{Axiom, Iri, TargetOntology};

use crate::Reasoner;

/// Told-subsumption reasoner: the transitive closure of asserted
/// concrete-to-concrete subclass edges, reflexive edges excluded.
///
/// Restriction superclasses carry no subsumption between named classes, so
/// they contribute nothing here. Callers wanting full DL classification plug
/// in their own [`Reasoner`].
#[derive(Debug, Default)]
pub struct StructuralReasoner;

impl StructuralReasoner {
    pub fn new() -> Self {
        Self
    }
}

impl Reasoner for StructuralReasoner {
    fn infer_subclasses(&self, ontology: &TargetOntology) -> BTreeSet<Axiom> {
        let mut direct: BTreeMap<&Iri, BTreeSet<&Iri>> = BTreeMap::new();
        for axiom in ontology.axioms() {
            if let Axiom::SubClassOf { sub, sup } = axiom {
                if let (Some(sub), Some(sup)) = (sub.as_named(), sup.as_named()) {
                    direct.entry(sub).or_default().insert(sup);
                }
            }
        }

        let mut inferred = BTreeSet::new();
        for (&start, supers) in &direct {
            let mut stack: Vec<&Iri> = supers.iter().copied().collect();
            let mut seen: BTreeSet<&Iri> = BTreeSet::new();
            while let Some(next) = stack.pop() {
                if !seen.insert(next) {
                    continue;
                }
                if next != start {
                    inferred.insert(Axiom::named_sub_class_of(start.clone(), next.clone()));
                }
                if let Some(more) = direct.get(next) {
                    stack.extend(more.iter().copied());
                }
            }
        }
        inferred
    }
}
