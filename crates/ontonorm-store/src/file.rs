//! File-system backed ontology store.
//!
//! Dispatches on suffix (OBO flat files vs. RDF serializations), loads the
//! resolvable import closure of a document, and serializes the merge target
//! as RDF/XML. Import IRIs are auto-mapped by their last path segment into
//! the input repository folder; imports that resolve nowhere become
//! warnings, never failures.

use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use ontonorm_model::{
    vocab, AnnotationValue, Axiom, ClassExpression, Iri, Literal, TargetOntology,
};
use tracing::info;

use crate::rdf::RdfSyntax;
use crate::{
    obo, rdf, LoadedDocument, OntologyCreationError, OntologyStore, OutputFormat, ParseError,
    ParsedDocument, StorageError,
};

#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn parse_document(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
        let text = fs::read_to_string(path).map_err(|e| ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let document_iri = document_iri_for(path);
        info!(document = %document_iri, "parsing ontology document");

        if has_extension(path, "obo") {
            return Ok(obo::parse_obo(&text, &document_iri));
        }
        let Some(syntax) = RdfSyntax::from_path(path) else {
            return Err(ParseError {
                path: path.to_path_buf(),
                message: "unsupported document suffix".to_string(),
            });
        };
        rdf::parse_rdf(&text, syntax, &document_iri).map_err(|message| ParseError {
            path: path.to_path_buf(),
            message,
        })
    }
}

impl OntologyStore for FileStore {
    fn load(
        &self,
        path: &Path,
        import_root: Option<&Path>,
    ) -> Result<LoadedDocument, ParseError> {
        let mut sources = Vec::new();
        let mut warnings = Vec::new();
        let mut visited: BTreeSet<PathBuf> = BTreeSet::new();
        let mut queue: VecDeque<PathBuf> = VecDeque::from([path.to_path_buf()]);
        let mut is_master = true;

        while let Some(next) = queue.pop_front() {
            let key = next.canonicalize().unwrap_or_else(|_| next.clone());
            if !visited.insert(key) {
                continue;
            }
            let parsed = match self.parse_document(&next) {
                Ok(parsed) => parsed,
                Err(err) if is_master => return Err(err),
                Err(err) => {
                    warnings.push(format!("unparseable import {}: {}", next.display(), err));
                    continue;
                }
            };
            is_master = false;
            for import in &parsed.imports {
                match resolve_import(import, import_root, next.parent()) {
                    Some(found) => queue.push_back(found),
                    None => warnings.push(format!("missing import {import}")),
                }
            }
            sources.push(parsed.source);
        }

        Ok(LoadedDocument { sources, warnings })
    }

    fn create_empty(&self) -> Result<TargetOntology, OntologyCreationError> {
        Ok(TargetOntology::new())
    }

    fn save(
        &self,
        target: &TargetOntology,
        format: OutputFormat,
        path: &Path,
    ) -> Result<(), StorageError> {
        let OutputFormat::RdfXml = format;
        let document = render_rdf_xml(target);
        fs::write(path, document).map_err(|e| StorageError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn document_iri_for(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Locations an import may resolve to: an explicit `file:` path, a path
/// relative to the importing document, or its last IRI segment auto-mapped
/// into the input repository folder.
fn resolve_import(
    import: &str,
    import_root: Option<&Path>,
    base_dir: Option<&Path>,
) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(stripped) = import.strip_prefix("file://") {
        candidates.push(PathBuf::from(stripped));
    }
    if !import.contains("://") {
        if let Some(base) = base_dir {
            candidates.push(base.join(import));
        }
    }
    if let Some(root) = import_root {
        let last = import.rsplit('/').next().unwrap_or(import);
        if !last.is_empty() {
            candidates.push(root.join(last));
        }
    }
    candidates.into_iter().find(|p| p.is_file())
}

// ============================================================================
// RDF/XML rendering
// ============================================================================

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

fn render_rdf_xml(target: &TargetOntology) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<rdf:RDF xmlns:rdf=\"{RDF_NS}\"\n         xmlns:rdfs=\"{RDFS_NS}\"\n         xmlns:owl=\"{OWL_NS}\">\n"
    ));

    out.push_str("  <owl:Ontology>\n");
    for ann in target.ontology_annotations() {
        push_property_element(&mut out, "    ", &ann.property, &ann.value);
    }
    out.push_str("  </owl:Ontology>\n");

    for axiom in target.axioms() {
        match axiom {
            Axiom::SubClassOf { sub, sup } => push_subclass(&mut out, sub, sup),
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                out.push_str(&format!(
                    "  <rdf:Description rdf:about=\"{}\">\n",
                    xml_escape(subject.as_str())
                ));
                push_property_element(&mut out, "    ", property, value);
                out.push_str("  </rdf:Description>\n");
            }
            Axiom::Other { rendering, .. } => push_comment(&mut out, rendering),
        }
    }

    out.push_str("</rdf:RDF>\n");
    out
}

fn push_subclass(out: &mut String, sub: &ClassExpression, sup: &ClassExpression) {
    let Some(sub) = sub.as_named() else {
        push_comment(out, "SubClassOf with anonymous subclass");
        return;
    };
    match sup {
        ClassExpression::Named(sup) => {
            out.push_str(&format!(
                "  <rdf:Description rdf:about=\"{}\">\n    <rdfs:subClassOf rdf:resource=\"{}\"/>\n  </rdf:Description>\n",
                xml_escape(sub.as_str()),
                xml_escape(sup.as_str())
            ));
        }
        ClassExpression::SomeValuesFrom { property, filler } => {
            let Some(filler) = filler.as_named() else {
                push_comment(out, "SubClassOf restriction with anonymous filler");
                return;
            };
            out.push_str(&format!(
                concat!(
                    "  <rdf:Description rdf:about=\"{}\">\n",
                    "    <rdfs:subClassOf>\n",
                    "      <owl:Restriction>\n",
                    "        <owl:onProperty rdf:resource=\"{}\"/>\n",
                    "        <owl:someValuesFrom rdf:resource=\"{}\"/>\n",
                    "      </owl:Restriction>\n",
                    "    </rdfs:subClassOf>\n",
                    "  </rdf:Description>\n"
                ),
                xml_escape(sub.as_str()),
                xml_escape(property.as_str()),
                xml_escape(filler.as_str())
            ));
        }
        ClassExpression::Other(rendering) => push_comment(out, rendering),
    }
}

fn push_property_element(out: &mut String, indent: &str, property: &Iri, value: &AnnotationValue) {
    let Some((qname, xmlns)) = qualified_name(property.as_str()) else {
        push_comment(out, &format!("unserializable property {property}"));
        return;
    };
    let xmlns = xmlns.unwrap_or_default();
    match value {
        AnnotationValue::Iri(iri) => {
            out.push_str(&format!(
                "{indent}<{qname}{xmlns} rdf:resource=\"{}\"/>\n",
                xml_escape(iri.as_str())
            ));
        }
        AnnotationValue::Literal(Literal {
            lexical,
            datatype,
            language,
        }) => {
            let mut attrs = String::new();
            if let Some(dt) = datatype {
                attrs.push_str(&format!(" rdf:datatype=\"{}\"", xml_escape(dt.as_str())));
            }
            if let Some(lang) = language {
                attrs.push_str(&format!(" xml:lang=\"{}\"", xml_escape(lang)));
            }
            out.push_str(&format!(
                "{indent}<{qname}{xmlns}{attrs}>{}</{qname}>\n",
                xml_escape(lexical)
            ));
        }
    }
}

/// Splits an IRI into a namespace + XML-safe local part, reusing the fixed
/// prefixes for the RDF core namespaces and an inline `xmlns` otherwise.
fn qualified_name(iri: &str) -> Option<(String, Option<String>)> {
    let idx = iri.rfind(['#', '/'])?;
    let (namespace, local) = iri.split_at(idx + 1);
    let mut chars = local.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')) {
        return None;
    }
    match namespace {
        RDF_NS => Some((format!("rdf:{local}"), None)),
        RDFS_NS => Some((format!("rdfs:{local}"), None)),
        OWL_NS => Some((format!("owl:{local}"), None)),
        _ => Some((
            format!("ns1:{local}"),
            Some(format!(" xmlns:ns1=\"{}\"", xml_escape(namespace))),
        )),
    }
}

fn push_comment(out: &mut String, text: &str) {
    out.push_str(&format!("  <!-- {} -->\n", text.replace("--", "-\u{2010}")));
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontonorm_model::DocumentFormat;
    use std::fs;

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    #[test]
    fn loads_obo_and_rdf_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let obo_path = dir.path().join("hp.obo");
        fs::write(&obo_path, "ontology: hp\n\n[Term]\nid: HP:0000001\nname: All\n")
            .expect("write obo");

        let store = FileStore::new();
        let loaded = store.load(&obo_path, None).expect("load obo");
        assert_eq!(loaded.sources.len(), 1);
        assert!(loaded.sources[0].is_local());
        assert!(matches!(loaded.sources[0].format, DocumentFormat::Obo));
    }

    #[test]
    fn missing_imports_become_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("master.ttl");
        fs::write(
            &path,
            r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
<http://example.org/m> a owl:Ontology ;
    owl:imports <http://example.org/absent/upper.owl> .
"#,
        )
        .expect("write ttl");

        let store = FileStore::new();
        let loaded = store.load(&path, Some(dir.path())).expect("load");
        assert_eq!(loaded.sources.len(), 1);
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("missing import"));
    }

    #[test]
    fn imports_auto_map_into_the_repository_folder() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("upper.owl"),
            r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://example.org/upper#Root"/>
</rdf:RDF>
"#,
        )
        .expect("write import");
        let master = dir.path().join("master.ttl");
        fs::write(
            &master,
            r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
<http://example.org/m> a owl:Ontology ;
    owl:imports <http://example.org/things/upper.owl> .
"#,
        )
        .expect("write master");

        let store = FileStore::new();
        let loaded = store.load(&master, Some(dir.path())).expect("load");
        assert_eq!(loaded.sources.len(), 2);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn saved_target_reparses_to_the_same_examined_shapes() {
        let mut target = TargetOntology::new();
        let sub = iri("http://example.org/A");
        let sup = iri("http://example.org/B");
        target.add_axiom(Axiom::named_sub_class_of(sub.clone(), sup.clone()));
        target.add_axiom(Axiom::SubClassOf {
            sub: ClassExpression::Named(sub.clone()),
            sup: ClassExpression::SomeValuesFrom {
                property: iri("http://purl.obolibrary.org/obo/part_of"),
                filler: Box::new(ClassExpression::Named(sup.clone())),
            },
        });
        target.add_axiom(Axiom::annotation(
            iri("http://www.w3.org/2004/02/skos/core#notation"),
            sub.clone(),
            Literal::plain("HP:0001 <escaped & checked>"),
        ));

        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("owlapi.xrdf");
        let store = FileStore::new();
        store
            .save(&target, OutputFormat::RdfXml, &out)
            .expect("save");

        let loaded = store.load(&out, None).expect("reload");
        let reparsed = &loaded.sources[0];
        assert!(reparsed
            .axioms
            .contains(&Axiom::named_sub_class_of(sub.clone(), sup.clone())));
        assert!(reparsed.axioms.contains(&Axiom::SubClassOf {
            sub: ClassExpression::Named(sub.clone()),
            sup: ClassExpression::SomeValuesFrom {
                property: iri("http://purl.obolibrary.org/obo/part_of"),
                filler: Box::new(ClassExpression::Named(sup)),
            },
        }));
        assert!(reparsed.axioms.contains(&Axiom::annotation(
            iri("http://www.w3.org/2004/02/skos/core#notation"),
            sub,
            Literal::plain("HP:0001 <escaped & checked>"),
        )));
    }
}
