//! Well-known vocabulary IRIs the pipeline matches against or emits.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
/// Bare prefixed form some legacy documents carry instead of the full IRI.
pub const RDFS_LABEL_BARE: &str = "rdfs:label";

pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
pub const OWL_DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";

pub const SKOS_NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";

/// Property OBO-to-OWL converters attach the original short id with.
pub const OBO_IN_OWL_ID: &str = "http://www.geneontology.org/formats/oboInOwl#id";

/// Namespace OBO Foundry terms and relations live under.
pub const OBO_PURL_NS: &str = "http://purl.obolibrary.org/obo/";

/// Namespace for metadata the pipeline derives.
pub const META_NS: &str = "https://ontonorm.org/metadata/";
pub const META_TREE_VIEW: &str = "https://ontonorm.org/metadata/treeView";
pub const META_PREFIX_IRI: &str = "https://ontonorm.org/metadata/prefixIRI";
pub const META_OBO_PART_OF: &str = "https://ontonorm.org/metadata/obo/part_of";
pub const META_OBO_CONTAINS: &str = "https://ontonorm.org/metadata/obo/contains";
pub const META_OBO_DEVELOPS_FROM: &str = "https://ontonorm.org/metadata/obo/develops_from";

/// Fixed subject the format-independent version marker is asserted on.
pub const VERSION_SUBJECT: &str = "https://ontonorm.org/ontologies/versionSubject";
