//! RDF document parsing (N-Triples, Turtle, RDF/XML via Sophia).
//!
//! Triples are collected first, then assembled into the axiom shapes the
//! pipeline distinguishes: named subclass edges, existential-restriction
//! superclasses decoded from `owl:Restriction` blank nodes, annotation
//! assertions, ontology-level annotations and `owl:imports` declarations.
//! Everything else is preserved as an opaque axiom with its signature.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use ontonorm_model::{
    vocab, Annotation, AnnotationValue, Axiom, ClassExpression, DocumentFormat, Iri, Literal,
    OntologySource,
};
use regex::Regex;
use sophia::api::prelude::*;
use sophia::api::source::TripleSource;
use tracing::debug;

use crate::ParsedDocument;

/// Concrete RDF serializations the store reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RdfSyntax {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfSyntax {
    /// Syntax by file extension; `None` for unrecognized extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "nt" | "ntriples" => Some(RdfSyntax::NTriples),
            "ttl" | "turtle" => Some(RdfSyntax::Turtle),
            "rdf" | "owl" | "xml" | "xrdf" => Some(RdfSyntax::RdfXml),
            _ => None,
        }
    }
}

// ============================================================================
// Statement model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum RdfNode {
    Iri(String),
    BlankNode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RdfLiteral {
    lexical: String,
    datatype: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RdfTerm {
    Node(RdfNode),
    Literal(RdfLiteral),
}

#[derive(Debug, Clone)]
struct RdfStatement {
    subject: RdfNode,
    predicate: String,
    object: RdfTerm,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct TripleSinkError {
    message: String,
}

// ============================================================================
// Term parsing (display form)
// ============================================================================

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn escape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Renders a Sophia term in the N-Triples display form that [`parse_term`]
/// consumes (`<iri>`, `_:bnode`, `"lexical"@lang` / `"lexical"^^<dt>`).
fn term_to_nt<T: Term>(term: T) -> String {
    if let Some(iri) = term.iri() {
        format!("<{iri}>")
    } else if let Some(bnode) = term.bnode_id() {
        format!("_:{}", bnode.as_str())
    } else if let Some(lexical) = term.lexical_form() {
        let escaped = escape_rdf_string(&lexical);
        if let Some(lang) = term.language_tag() {
            format!("\"{escaped}\"@{}", lang.as_str())
        } else if let Some(datatype) = term.datatype() {
            format!("\"{escaped}\"^^<{datatype}>")
        } else {
            format!("\"{escaped}\"")
        }
    } else {
        String::new()
    }
}

fn parse_term(term: &str) -> Result<RdfTerm, TripleSinkError> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(RdfTerm::Node(RdfNode::Iri(rest.to_string())));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(RdfTerm::Node(RdfNode::BlankNode(rest.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut prev_was_escape = false;
        for (i, ch) in s.char_indices().skip(1) {
            if ch == '"' && !prev_was_escape {
                end_quote = Some(i);
                break;
            }
            prev_was_escape = ch == '\\' && !prev_was_escape;
            if ch != '\\' {
                prev_was_escape = false;
            }
        }
        let Some(end) = end_quote else {
            return Err(TripleSinkError {
                message: format!("invalid literal term (missing closing quote): {s}"),
            });
        };

        let lexical = unescape_rdf_string(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = rest.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            if let Some(dt_iri) = dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                datatype = Some(dt_iri.to_string());
            } else if !dt.is_empty() {
                datatype = Some(dt.to_string());
            }
        }

        return Ok(RdfTerm::Literal(RdfLiteral {
            lexical,
            datatype,
            language,
        }));
    }

    Err(TripleSinkError {
        message: format!("unsupported RDF term form: {s}"),
    })
}

fn parse_node(term: &str) -> Result<RdfNode, TripleSinkError> {
    match parse_term(term)? {
        RdfTerm::Node(node) => Ok(node),
        RdfTerm::Literal(_) => Err(TripleSinkError {
            message: format!("expected IRI or blank node, got literal: {term}"),
        }),
    }
}

// ============================================================================
// Triple collection
// ============================================================================

fn collect_triples<S: TripleSource>(mut parser: S) -> Result<Vec<RdfStatement>, String> {
    let mut out: Vec<RdfStatement> = Vec::new();
    parser
        .try_for_each_triple(|t| -> Result<(), TripleSinkError> {
            let subject = parse_node(&term_to_nt(t.s()))?;
            let RdfNode::Iri(predicate) = parse_node(&term_to_nt(t.p()))? else {
                return Ok(());
            };
            let object = parse_term(&term_to_nt(t.o()))?;
            out.push(RdfStatement {
                subject,
                predicate,
                object,
            });
            Ok(())
        })
        .map_err(|e| e.to_string())?;
    Ok(out)
}

fn statements(text: &str, syntax: RdfSyntax) -> Result<Vec<RdfStatement>, String> {
    let cursor = std::io::Cursor::new(text.as_bytes().to_vec());
    let reader = std::io::BufReader::new(cursor);
    match syntax {
        RdfSyntax::NTriples => collect_triples(sophia::turtle::parser::nt::parse_bufread(reader)),
        RdfSyntax::Turtle => collect_triples(sophia::turtle::parser::turtle::parse_bufread(reader)),
        RdfSyntax::RdfXml => collect_triples(sophia::xml::parser::parse_bufread(reader)),
    }
}

// ============================================================================
// Prefix recovery
// ============================================================================

fn turtle_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^\s*@?prefix\s+([A-Za-z][\w.-]*)?:\s*<([^>]*)>")
            .expect("static prefix pattern")
    })
}

fn xmlns_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"xmlns(?::([A-Za-z][\w.-]*))?\s*=\s*"([^"]*)""#)
            .expect("static xmlns pattern")
    })
}

/// Prefix declarations the document text makes, keyed by prefix name
/// (empty string for the default prefix).
fn declared_prefixes(text: &str, syntax: RdfSyntax) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let re = match syntax {
        RdfSyntax::NTriples => return out,
        RdfSyntax::Turtle => turtle_prefix_re(),
        RdfSyntax::RdfXml => xmlns_re(),
    };
    for caps in re.captures_iter(text) {
        let prefix = caps.get(1).map_or("", |m| m.as_str()).to_string();
        if let Some(namespace) = caps.get(2) {
            out.insert(prefix, namespace.as_str().to_string());
        }
    }
    out
}

// ============================================================================
// Axiom assembly
// ============================================================================

#[derive(Default)]
struct RestrictionParts {
    is_restriction: bool,
    on_property: Option<String>,
    some_values_from: Option<RdfNode>,
}

/// Parses RDF text into a source document.
pub fn parse_rdf(
    text: &str,
    syntax: RdfSyntax,
    document_iri: &str,
) -> Result<ParsedDocument, String> {
    let statements = statements(text, syntax)?;
    let prefixes = declared_prefixes(text, syntax);
    let format = if prefixes.is_empty() {
        DocumentFormat::OtherRdf
    } else {
        DocumentFormat::PrefixedOwl { prefixes }
    };

    let mut source = OntologySource::new(document_iri, format);
    let mut imports: Vec<String> = Vec::new();

    // First pass: ontology node and restriction scaffolding.
    let mut ontology_node: Option<RdfNode> = None;
    let mut restrictions: HashMap<String, RestrictionParts> = HashMap::new();
    for stmt in &statements {
        match (&stmt.predicate, &stmt.object) {
            (p, RdfTerm::Node(node)) if p == vocab::RDF_TYPE => {
                if let RdfNode::Iri(type_iri) = node {
                    if type_iri == vocab::OWL_ONTOLOGY && ontology_node.is_none() {
                        ontology_node = Some(stmt.subject.clone());
                    }
                    if type_iri == vocab::OWL_RESTRICTION {
                        if let RdfNode::BlankNode(bn) = &stmt.subject {
                            restrictions.entry(bn.clone()).or_default().is_restriction = true;
                        }
                    }
                }
            }
            (p, RdfTerm::Node(RdfNode::Iri(prop))) if p == vocab::OWL_ON_PROPERTY => {
                if let RdfNode::BlankNode(bn) = &stmt.subject {
                    restrictions.entry(bn.clone()).or_default().on_property = Some(prop.clone());
                }
            }
            (p, RdfTerm::Node(node)) if p == vocab::OWL_SOME_VALUES_FROM => {
                if let RdfNode::BlankNode(bn) = &stmt.subject {
                    restrictions.entry(bn.clone()).or_default().some_values_from =
                        Some(node.clone());
                }
            }
            _ => {}
        }
    }

    if let Some(RdfNode::Iri(iri)) = &ontology_node {
        source.ontology_iri = Iri::new(iri.clone()).ok();
    }

    // Second pass: axioms and ontology-level annotations.
    for stmt in &statements {
        if Some(&stmt.subject) == ontology_node.as_ref() {
            assemble_ontology_level(&mut source, &mut imports, stmt);
            continue;
        }
        let RdfNode::Iri(subject) = &stmt.subject else {
            // Blank-node subjects are expression scaffolding consumed above.
            continue;
        };
        let Ok(subject) = Iri::new(subject.clone()) else {
            debug!(subject = %subject, "dropping statement with unparseable subject IRI");
            continue;
        };
        assemble_statement(&mut source, &restrictions, subject, stmt);
    }

    Ok(ParsedDocument { source, imports })
}

fn assemble_ontology_level(
    source: &mut OntologySource,
    imports: &mut Vec<String>,
    stmt: &RdfStatement,
) {
    if stmt.predicate == vocab::OWL_IMPORTS {
        if let RdfTerm::Node(RdfNode::Iri(target)) = &stmt.object {
            imports.push(target.clone());
        }
        return;
    }
    if stmt.predicate == vocab::RDF_TYPE {
        return;
    }
    let Ok(property) = Iri::new(stmt.predicate.clone()) else {
        return;
    };
    match &stmt.object {
        RdfTerm::Literal(lit) => {
            source
                .annotations
                .insert(Annotation::new(property, model_literal(lit)));
        }
        RdfTerm::Node(RdfNode::Iri(iri)) => {
            if let Ok(value) = Iri::new(iri.clone()) {
                source.annotations.insert(Annotation::new(property, value));
            }
        }
        RdfTerm::Node(RdfNode::BlankNode(_)) => {}
    }
}

fn assemble_statement(
    source: &mut OntologySource,
    restrictions: &HashMap<String, RestrictionParts>,
    subject: Iri,
    stmt: &RdfStatement,
) {
    if stmt.predicate == vocab::RDF_TYPE {
        if let RdfTerm::Node(RdfNode::Iri(type_iri)) = &stmt.object {
            if type_iri == vocab::OWL_CLASS {
                source.declare_class(subject);
            } else if !type_iri.starts_with("http://www.w3.org/") {
                if let Ok(class) = Iri::new(type_iri.clone()) {
                    source.axioms.insert(Axiom::Other {
                        rendering: format!("ClassAssertion(<{class}> <{subject}>)"),
                        signature: [subject, class].into_iter().collect(),
                    });
                }
            }
        }
        return;
    }

    if stmt.predicate == vocab::RDFS_SUBCLASS_OF {
        let sup = match &stmt.object {
            RdfTerm::Node(RdfNode::Iri(sup_iri)) => match Iri::new(sup_iri.clone()) {
                Ok(sup) => ClassExpression::Named(sup),
                Err(_) => return,
            },
            RdfTerm::Node(RdfNode::BlankNode(bn)) => decode_restriction(restrictions, bn),
            RdfTerm::Literal(_) => return,
        };
        if let ClassExpression::Named(named) = &sup {
            source.declare_class(named.clone());
        }
        source.declare_class(subject.clone());
        source.axioms.insert(Axiom::SubClassOf {
            sub: ClassExpression::Named(subject),
            sup,
        });
        return;
    }

    let Ok(property) = Iri::new(stmt.predicate.clone()) else {
        return;
    };
    match &stmt.object {
        RdfTerm::Literal(lit) => {
            source
                .axioms
                .insert(Axiom::annotation(property, subject, model_literal(lit)));
        }
        RdfTerm::Node(RdfNode::Iri(iri)) => {
            if let Ok(value) = Iri::new(iri.clone()) {
                source.axioms.insert(Axiom::annotation(
                    property,
                    subject,
                    AnnotationValue::Iri(value),
                ));
            }
        }
        RdfTerm::Node(RdfNode::BlankNode(_)) => {}
    }
}

fn decode_restriction(
    restrictions: &HashMap<String, RestrictionParts>,
    bnode: &str,
) -> ClassExpression {
    let Some(parts) = restrictions.get(bnode) else {
        return ClassExpression::Other(format!("_:{bnode}"));
    };
    let (true, Some(property), Some(filler)) = (
        parts.is_restriction,
        parts.on_property.as_ref(),
        parts.some_values_from.as_ref(),
    ) else {
        return ClassExpression::Other(format!("_:{bnode}"));
    };
    let Ok(property) = Iri::new(property.clone()) else {
        return ClassExpression::Other(format!("_:{bnode}"));
    };
    let filler = match filler {
        RdfNode::Iri(iri) => match Iri::new(iri.clone()) {
            Ok(named) => ClassExpression::Named(named),
            Err(_) => ClassExpression::Other(iri.clone()),
        },
        RdfNode::BlankNode(inner) => ClassExpression::Other(format!("_:{inner}")),
    };
    ClassExpression::SomeValuesFrom {
        property,
        filler: Box::new(filler),
    }
}

/// Simple literals and `xsd:string` literals are the same value in RDF 1.1;
/// normalizing here keeps set semantics stable across serializations.
const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

fn model_literal(lit: &RdfLiteral) -> Literal {
    let datatype = match &lit.datatype {
        Some(dt) if dt != XSD_STRING => Iri::new(dt.clone()).ok(),
        _ => None,
    };
    Literal {
        lexical: lit.lexical.clone(),
        datatype,
        language: lit.language.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TTL: &str = r#"
@prefix : <http://example.org/onto#> .
@prefix obo: <http://purl.obolibrary.org/obo/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/onto> a owl:Ontology ;
    owl:versionInfo "2021-03-01" ;
    owl:imports <http://example.org/imports/upper.owl> .

obo:HP_0000118 a owl:Class ;
    rdfs:label "Phenotypic abnormality" ;
    rdfs:subClassOf obo:HP_0000001 ;
    rdfs:subClassOf [
        a owl:Restriction ;
        owl:onProperty obo:part_of ;
        owl:someValuesFrom obo:HP_0000001
    ] .
"#;

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    #[test]
    fn recovers_ontology_identity_annotations_and_imports() {
        let doc = parse_rdf(SAMPLE_TTL, RdfSyntax::Turtle, "file:///repo/onto.ttl")
            .expect("parse turtle");
        assert_eq!(
            doc.source.ontology_iri,
            Some(iri("http://example.org/onto"))
        );
        assert!(doc.source.annotations.iter().any(|ann| {
            ann.property.as_str() == vocab::OWL_VERSION_INFO && ann.value.as_text() == "2021-03-01"
        }));
        assert_eq!(doc.imports, vec!["http://example.org/imports/upper.owl"]);
    }

    #[test]
    fn assembles_named_and_existential_superclasses() {
        let doc = parse_rdf(SAMPLE_TTL, RdfSyntax::Turtle, "file:///repo/onto.ttl")
            .expect("parse turtle");
        let sub = iri("http://purl.obolibrary.org/obo/HP_0000118");
        let sup = iri("http://purl.obolibrary.org/obo/HP_0000001");
        assert!(doc
            .source
            .axioms
            .contains(&Axiom::named_sub_class_of(sub.clone(), sup.clone())));
        assert!(doc.source.axioms.contains(&Axiom::SubClassOf {
            sub: ClassExpression::Named(sub),
            sup: ClassExpression::SomeValuesFrom {
                property: iri("http://purl.obolibrary.org/obo/part_of"),
                filler: Box::new(ClassExpression::Named(sup)),
            },
        }));
    }

    #[test]
    fn declared_prefixes_select_the_prefixed_format() {
        let doc = parse_rdf(SAMPLE_TTL, RdfSyntax::Turtle, "file:///repo/onto.ttl")
            .expect("parse turtle");
        let short = doc
            .source
            .format
            .prefix_iri(&iri("http://purl.obolibrary.org/obo/HP_0000118"));
        assert_eq!(short.as_deref(), Some("obo:HP_0000118"));
    }

    #[test]
    fn ntriples_has_no_prefixes() {
        let nt = r#"<http://example.org/A> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/B> .
"#;
        let doc =
            parse_rdf(nt, RdfSyntax::NTriples, "file:///repo/a.nt").expect("parse ntriples");
        assert!(matches!(doc.source.format, DocumentFormat::OtherRdf));
        assert_eq!(doc.source.axioms.len(), 1);
    }
}
