use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::iri::Iri;
use crate::term::AnnotationValue;

/// A class expression, closed over the shapes the pipeline distinguishes.
///
/// `Named` is the only concrete shape; everything the translator cannot
/// decompose further lands in `Other` with its rendering preserved.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassExpression {
    Named(Iri),
    SomeValuesFrom {
        property: Iri,
        filler: Box<ClassExpression>,
    },
    Other(String),
}

impl ClassExpression {
    /// Try-as-named accessor: `Some` iff the expression is a concrete class.
    #[must_use]
    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            ClassExpression::Named(iri) => Some(iri),
            ClassExpression::SomeValuesFrom { .. } | ClassExpression::Other(_) => None,
        }
    }

    fn collect_signature(&self, out: &mut BTreeSet<Iri>) {
        match self {
            ClassExpression::Named(iri) => {
                out.insert(iri.clone());
            }
            ClassExpression::SomeValuesFrom { property, filler } => {
                out.insert(property.clone());
                filler.collect_signature(out);
            }
            ClassExpression::Other(_) => {}
        }
    }
}

/// An atomic ontology fact.
///
/// Exactly two shapes matter to the pipeline; `Other` carries everything
/// else as an opaque rendering plus the entity signature the source parser
/// established (so signature-based purging still reaches it).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axiom {
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    AnnotationAssertion {
        property: Iri,
        subject: Iri,
        value: AnnotationValue,
    },
    Other {
        rendering: String,
        signature: BTreeSet<Iri>,
    },
}

impl Axiom {
    pub fn sub_class_of(sub: ClassExpression, sup: ClassExpression) -> Self {
        Axiom::SubClassOf { sub, sup }
    }

    /// Concrete-to-concrete subclass edge.
    pub fn named_sub_class_of(sub: Iri, sup: Iri) -> Self {
        Axiom::SubClassOf {
            sub: ClassExpression::Named(sub),
            sup: ClassExpression::Named(sup),
        }
    }

    pub fn annotation(property: Iri, subject: Iri, value: impl Into<AnnotationValue>) -> Self {
        Axiom::AnnotationAssertion {
            property,
            subject,
            value: value.into(),
        }
    }

    /// Every IRI the axiom mentions.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Iri> {
        let mut out = BTreeSet::new();
        match self {
            Axiom::SubClassOf { sub, sup } => {
                sub.collect_signature(&mut out);
                sup.collect_signature(&mut out);
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                out.insert(property.clone());
                out.insert(subject.clone());
                if let AnnotationValue::Iri(iri) = value {
                    out.insert(iri.clone());
                }
            }
            Axiom::Other { signature, .. } => {
                out.extend(signature.iter().cloned());
            }
        }
        out
    }

    /// Whether the axiom's signature contains `iri`.
    #[must_use]
    pub fn mentions(&self, iri: &Iri) -> bool {
        match self {
            Axiom::Other { signature, .. } => signature.contains(iri),
            _ => self.signature().contains(iri),
        }
    }
}
