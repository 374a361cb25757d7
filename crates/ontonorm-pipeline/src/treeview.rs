//! Display-hierarchy projection.

use std::collections::BTreeSet;

use ontonorm_model::{vocab, AnnotationValue, Axiom, Iri, TargetOntology};

/// Mirrors every concrete-to-concrete subclass edge in the target as a
/// parallel `treeView` annotation edge. Applied only for OBO-origin runs;
/// edges already emitted by the translator simply collapse under set
/// semantics.
pub fn project_tree_view(target: &mut TargetOntology) {
    let mut edges: BTreeSet<Axiom> = BTreeSet::new();
    for axiom in target.axioms() {
        if let Axiom::SubClassOf { sub, sup } = axiom {
            if let (Some(sub), Some(sup)) = (sub.as_named(), sup.as_named()) {
                edges.insert(Axiom::annotation(
                    Iri::new_unchecked(vocab::META_TREE_VIEW),
                    sub.clone(),
                    AnnotationValue::Iri(sup.clone()),
                ));
            }
        }
    }
    target.add_axioms(edges);
}
