use serde::{Deserialize, Serialize};

use crate::iri::Iri;

/// An RDF literal: lexical form plus optional datatype or language tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype),
            language: None,
        }
    }

    pub fn tagged(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// The value slot of an annotation: a concrete IRI or a literal.
///
/// Anonymous individuals never reach this type; sources that carry them drop
/// the annotation at parse time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationValue {
    Iri(Iri),
    Literal(Literal),
}

impl AnnotationValue {
    /// Textual rendering used by substring policies (deprecation check,
    /// version propagation).
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            AnnotationValue::Iri(iri) => iri.as_str(),
            AnnotationValue::Literal(lit) => &lit.lexical,
        }
    }
}

impl From<Iri> for AnnotationValue {
    fn from(iri: Iri) -> Self {
        AnnotationValue::Iri(iri)
    }
}

impl From<Literal> for AnnotationValue {
    fn from(lit: Literal) -> Self {
        AnnotationValue::Literal(lit)
    }
}

/// An ontology-level annotation (property + value, no subject).
///
/// The metadata grounder projects these onto the ontology's own IRI; until
/// then they float on the document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    pub property: Iri,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(property: Iri, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}
