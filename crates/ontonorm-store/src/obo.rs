//! Legacy flat-file OBO parsing.
//!
//! Line-oriented and forgiving: unrecognized tags are skipped, malformed
//! identifiers drop the enclosing stanza with a warning. Term identifiers
//! translate to OBO Foundry IRIs (`HP:0000118` →
//! `http://purl.obolibrary.org/obo/HP_0000118`) and the original short id is
//! kept as an `oboInOwl#id` annotation, which is what the SKOS synthesizer
//! later keys on.

use ontonorm_model::{vocab, Annotation, Axiom, ClassExpression, DocumentFormat, Iri, Literal};
use ontonorm_model::OntologySource;
use tracing::warn;

use crate::ParsedDocument;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stanza {
    Header,
    Term,
    Typedef,
    Other,
}

/// Parses OBO flat-file text into a source document.
pub fn parse_obo(text: &str, document_iri: &str) -> ParsedDocument {
    let mut source = OntologySource::new(document_iri, DocumentFormat::Obo);
    let mut imports = Vec::new();

    let mut stanza = Stanza::Header;
    let mut subject: Option<Iri> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        match line {
            "[Term]" => {
                stanza = Stanza::Term;
                subject = None;
                continue;
            }
            "[Typedef]" => {
                stanza = Stanza::Typedef;
                subject = None;
                continue;
            }
            _ if line.starts_with('[') => {
                stanza = Stanza::Other;
                subject = None;
                continue;
            }
            _ => {}
        }

        let Some((tag, value)) = line.split_once(':') else {
            continue;
        };
        let value = strip_comment(value.trim());
        if value.is_empty() {
            continue;
        }

        match stanza {
            Stanza::Header => header_tag(&mut source, &mut imports, tag, value),
            Stanza::Term => term_tag(&mut source, &mut subject, tag, value),
            Stanza::Typedef => typedef_tag(&mut source, &mut subject, tag, value),
            Stanza::Other => {}
        }
    }

    ParsedDocument { source, imports }
}

fn header_tag(source: &mut OntologySource, imports: &mut Vec<String>, tag: &str, value: &str) {
    match tag {
        "ontology" => {
            source.ontology_iri = Some(Iri::new_unchecked(format!(
                "{}{}.owl",
                vocab::OBO_PURL_NS,
                value
            )));
        }
        "data-version" => {
            source.annotations.insert(Annotation::new(
                Iri::new_unchecked(vocab::OWL_VERSION_INFO),
                Literal::plain(value),
            ));
        }
        "remark" => {
            source.annotations.insert(Annotation::new(
                Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment"),
                Literal::plain(value),
            ));
        }
        "import" => imports.push(value.to_string()),
        _ => {}
    }
}

fn term_tag(source: &mut OntologySource, subject: &mut Option<Iri>, tag: &str, value: &str) {
    if tag == "id" {
        match entity_iri(value) {
            Some(iri) => {
                source.declare_class(iri.clone());
                source.axioms.insert(Axiom::annotation(
                    Iri::new_unchecked(vocab::OBO_IN_OWL_ID),
                    iri.clone(),
                    Literal::plain(value),
                ));
                *subject = Some(iri);
            }
            None => {
                warn!(id = value, "skipping term with malformed id");
                *subject = None;
            }
        }
        return;
    }
    let Some(term) = subject.clone() else {
        return;
    };
    match tag {
        "name" => {
            source.axioms.insert(Axiom::annotation(
                Iri::new_unchecked(vocab::RDFS_LABEL),
                term,
                Literal::plain(value),
            ));
        }
        "is_a" => {
            let Some(id) = value.split_whitespace().next() else {
                return;
            };
            if let Some(sup) = entity_iri(id) {
                source.declare_class(sup.clone());
                source.axioms.insert(Axiom::named_sub_class_of(term, sup));
            }
        }
        "relationship" => {
            let mut parts = value.split_whitespace();
            let (Some(rel), Some(id)) = (parts.next(), parts.next()) else {
                return;
            };
            let (Some(property), Some(filler)) = (relation_iri(rel), entity_iri(id)) else {
                return;
            };
            source.declare_class(filler.clone());
            source.axioms.insert(Axiom::SubClassOf {
                sub: ClassExpression::Named(term),
                sup: ClassExpression::SomeValuesFrom {
                    property,
                    filler: Box::new(ClassExpression::Named(filler)),
                },
            });
        }
        "is_obsolete" if value == "true" => {
            source.axioms.insert(Axiom::annotation(
                Iri::new_unchecked(vocab::OWL_DEPRECATED),
                term,
                Literal::plain("true"),
            ));
        }
        "def" | "comment" => {
            // `def` values are quoted and may trail xref lists.
            let text = value.split('"').nth(1).unwrap_or(value);
            source.axioms.insert(Axiom::annotation(
                Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment"),
                term,
                Literal::plain(text),
            ));
        }
        _ => {}
    }
}

fn typedef_tag(source: &mut OntologySource, subject: &mut Option<Iri>, tag: &str, value: &str) {
    match tag {
        "id" => {
            *subject = relation_iri(value);
        }
        "name" => {
            if let Some(rel) = subject.clone() {
                source.axioms.insert(Axiom::annotation(
                    Iri::new_unchecked(vocab::RDFS_LABEL),
                    rel,
                    Literal::plain(value),
                ));
            }
        }
        _ => {}
    }
}

/// Trailing `! …` comments are part of the OBO line grammar.
fn strip_comment(value: &str) -> &str {
    match value.find(" !") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

/// `HP:0000118` → `http://purl.obolibrary.org/obo/HP_0000118`.
fn entity_iri(id: &str) -> Option<Iri> {
    Iri::new(format!("{}{}", vocab::OBO_PURL_NS, id.replace(':', "_"))).ok()
}

/// Relation names stay verbatim under the OBO namespace, so downstream
/// matching sees `…/obo/part_of`.
fn relation_iri(rel: &str) -> Option<Iri> {
    Iri::new(format!("{}{}", vocab::OBO_PURL_NS, rel)).ok()
}
