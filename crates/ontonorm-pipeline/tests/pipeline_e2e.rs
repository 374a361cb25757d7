//! End-to-end pipeline runs over real temp-dir repositories.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ontonorm_model::{vocab, Axiom, Iri, Literal};
use ontonorm_pipeline::{ErrorKind, InvocationContext, Pipeline, PipelineState};
use ontonorm_store::{FileStore, OntologyStore, StructuralReasoner, SuffixDiscovery};

fn iri(s: &str) -> Iri {
    Iri::new_unchecked(s)
}

fn run_pipeline(ctx: InvocationContext) -> (bool, Pipeline<FileStore, StructuralReasoner, SuffixDiscovery>) {
    let mut pipeline = Pipeline::new(
        ctx,
        FileStore::new(),
        StructuralReasoner::new(),
        SuffixDiscovery::new(),
    );
    let ok = pipeline.run();
    (ok, pipeline)
}

fn reload_output(output_dir: &Path) -> BTreeSet<Axiom> {
    let store = FileStore::new();
    let loaded = store
        .load(&output_dir.join("owlapi.xrdf"), None)
        .expect("reload output document");
    loaded.sources.into_iter().next().expect("one source").axioms
}

const HP_OBO: &str = r#"format-version: 1.2
data-version: 2021-03-01
ontology: hp

[Term]
id: HP:0000001
name: All

[Term]
id: HP:0000118
name: Phenotypic abnormality
is_a: HP:0000001
relationship: part_of HP:0000001

[Term]
id: HP:0000119
name: Dangles
is_a: HP:9999999
"#;

#[test]
fn obo_repository_normalizes_end_to_end() {
    let input = tempfile::tempdir().expect("input dir");
    let output = tempfile::tempdir().expect("output dir");
    fs::write(input.path().join("hp.obo"), HP_OBO).expect("write master");

    let ctx = InvocationContext::new("hp.obo", output.path())
        .with_input_repository(input.path());
    let (ok, pipeline) = run_pipeline(ctx);
    assert!(ok);
    assert_eq!(pipeline.state(), PipelineState::Done);

    let axioms = reload_output(output.path());
    let hp118 = iri("http://purl.obolibrary.org/obo/HP_0000118");
    let hp1 = iri("http://purl.obolibrary.org/obo/HP_0000001");

    // SKOS notation from the OBO id.
    assert!(axioms.contains(&Axiom::annotation(
        iri(vocab::SKOS_NOTATION),
        hp118.clone(),
        Literal::plain("HP:0000118"),
    )));

    // Version marker scanned from the data-version line.
    assert!(axioms.contains(&Axiom::annotation(
        iri(vocab::OWL_VERSION_INFO),
        iri(vocab::VERSION_SUBJECT),
        Literal::plain("2021-03-01"),
    )));

    // part_of rewrite plus the display edge, both directions preserved.
    assert!(axioms.contains(&Axiom::annotation(
        iri(vocab::META_OBO_PART_OF),
        hp118.clone(),
        iri(hp1.as_str()),
    )));
    // The asserted hierarchy is mirrored as a display edge (the translator
    // and the projector agree on it).
    assert!(axioms.contains(&Axiom::annotation(
        iri(vocab::META_TREE_VIEW),
        hp118,
        iri(hp1.as_str()),
    )));

    // The dangling superclass had no id: nothing in the final target may
    // reference it.
    let dangling = iri("http://purl.obolibrary.org/obo/HP_9999999");
    assert!(!axioms.iter().any(|ax| ax.mentions(&dangling)));
}

#[test]
fn missing_master_aborts_without_output() {
    let input = tempfile::tempdir().expect("input dir");
    let output = tempfile::tempdir().expect("output dir");
    fs::write(input.path().join("other.obo"), HP_OBO).expect("write other");

    let ctx = InvocationContext::new("hp.obo", output.path())
        .with_input_repository(input.path());
    let (ok, pipeline) = run_pipeline(ctx);
    assert!(!ok);
    assert_eq!(
        pipeline.state(),
        PipelineState::Failed(ErrorKind::MasterFileMissing)
    );
    assert!(!output.path().join("owlapi.xrdf").exists());

    let report = fs::read_to_string(output.path().join("parsing.log.json"))
        .expect("report flushed");
    assert!(report.contains("MasterFileMissing"));
    let ctx = pipeline.into_context();
    assert!(ctx.error_sink.is_flushed());
}

#[test]
fn prefixed_owl_master_derives_prefix_notations() {
    let dir = tempfile::tempdir().expect("dir");
    let output = tempfile::tempdir().expect("output dir");
    let master = dir.path().join("onto.ttl");
    fs::write(
        &master,
        r#"@prefix obo: <http://purl.obolibrary.org/obo/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/onto> a owl:Ontology .

obo:HP_0000118 a owl:Class ;
    rdfs:label "Phenotypic abnormality" .
"#,
    )
    .expect("write master");

    let ctx = InvocationContext::new(master.to_string_lossy(), output.path());
    let (ok, _) = run_pipeline(ctx);
    assert!(ok);

    let axioms = reload_output(output.path());
    assert!(axioms.contains(&Axiom::annotation(
        iri(vocab::META_PREFIX_IRI),
        iri("http://purl.obolibrary.org/obo/HP_0000118"),
        Literal::plain("HP:0000118"),
    )));
}

#[test]
fn unlabeled_obo_roots_disappear_labeled_ones_stay() {
    let dir = tempfile::tempdir().expect("dir");
    let output = tempfile::tempdir().expect("output dir");
    let master = dir.path().join("roots.ttl");
    fs::write(
        &master,
        r#"@prefix obo: <http://purl.obolibrary.org/obo/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/roots> a owl:Ontology .

obo:HP_0000001 a owl:Class ;
    rdfs:label "Genuine root" ;
    rdfs:subClassOf owl:Thing .

obo:HP_0000002 a owl:Class ;
    rdfs:subClassOf owl:Thing .
"#,
    )
    .expect("write master");

    let ctx = InvocationContext::new(master.to_string_lossy(), output.path());
    let (ok, _) = run_pipeline(ctx);
    assert!(ok);

    let axioms = reload_output(output.path());
    let thing = iri(vocab::OWL_THING);
    assert!(axioms.contains(&Axiom::named_sub_class_of(
        iri("http://purl.obolibrary.org/obo/HP_0000001"),
        thing.clone(),
    )));
    assert!(!axioms.contains(&Axiom::named_sub_class_of(
        iri("http://purl.obolibrary.org/obo/HP_0000002"),
        thing,
    )));
}

#[test]
fn missing_imports_warn_but_the_run_completes() {
    let dir = tempfile::tempdir().expect("dir");
    let output = tempfile::tempdir().expect("output dir");
    let master = dir.path().join("onto.ttl");
    fs::write(
        &master,
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
<http://example.org/onto> a owl:Ontology ;
    owl:imports <http://example.org/absent/upper.owl> .
"#,
    )
    .expect("write master");

    let ctx = InvocationContext::new(master.to_string_lossy(), output.path());
    let (ok, pipeline) = run_pipeline(ctx);
    assert!(ok);
    assert!(output.path().join("owlapi.xrdf").exists());

    let ctx = pipeline.into_context();
    assert_eq!(ctx.error_sink.warnings().len(), 1);
    assert!(ctx.error_sink.warnings()[0].contains("missing import"));
    assert!(!ctx.error_sink.has_errors());
}

#[test]
fn inferred_subclass_axioms_reach_the_output() {
    let dir = tempfile::tempdir().expect("dir");
    let output = tempfile::tempdir().expect("output dir");
    let master = dir.path().join("chain.ttl");
    fs::write(
        &master,
        r#"@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/chain> a owl:Ontology .

ex:A a owl:Class ;
    rdfs:label "A" ;
    rdfs:subClassOf ex:B .
ex:B a owl:Class ;
    rdfs:label "B" ;
    rdfs:subClassOf ex:C .
ex:C a owl:Class ;
    rdfs:label "C" .
"#,
    )
    .expect("write master");

    let ctx = InvocationContext::new(master.to_string_lossy(), output.path());
    let (ok, _) = run_pipeline(ctx);
    assert!(ok);

    let axioms = reload_output(output.path());
    assert!(axioms.contains(&Axiom::named_sub_class_of(
        iri("http://example.org/A"),
        iri("http://example.org/C"),
    )));
}
