use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated IRI naming a concrete entity.
///
/// Every derived annotation the pipeline emits uses `Iri` subjects and
/// objects, so validation happens once at the boundary and the rest of the
/// code can treat IRIs as plain ordered strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`].
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Constructs an [`Iri`] without validation.
    ///
    /// Reserved for vocabulary constants and identifiers assembled from
    /// already-validated parts.
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The identifier after the last `#` or `/`, used for relation-vocabulary
    /// matching and import auto-mapping.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.value
            .rsplit(['#', '/'])
            .next()
            .unwrap_or(&self.value)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.value
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

#[cfg(test)]
mod tests {
    use super::Iri;

    #[test]
    fn accepts_valid_iri() {
        let iri = Iri::new("http://purl.obolibrary.org/obo/HP_0000118").expect("valid IRI");
        assert_eq!(iri.local_name(), "HP_0000118");
    }

    #[test]
    fn rejects_invalid_iri() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn serde_round_trip_revalidates() {
        let iri = Iri::new_unchecked("http://example.org/A");
        let json = serde_json::to_string(&iri).expect("serialize");
        assert_eq!(json, "\"http://example.org/A\"");
        let back: Iri = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, iri);
        assert!(serde_json::from_str::<Iri>("\"not an iri\"").is_err());
    }

    #[test]
    fn local_name_splits_on_hash_and_slash() {
        let hash = Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
        assert_eq!(hash.local_name(), "label");
        let slash = Iri::new_unchecked("https://ontonorm.org/metadata/treeView");
        assert_eq!(slash.local_name(), "treeView");
    }
}
