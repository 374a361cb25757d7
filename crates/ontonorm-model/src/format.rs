use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::iri::Iri;

/// Format tag of a parsed source document.
///
/// `PrefixedOwl` carries the prefix declarations the document made; the SKOS
/// synthesizer derives display codes from them. Prefix names are stored
/// without the trailing colon; the default prefix is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Obo,
    PrefixedOwl { prefixes: BTreeMap<String, String> },
    OtherRdf,
}

impl DocumentFormat {
    #[must_use]
    pub fn is_obo(&self) -> bool {
        matches!(self, DocumentFormat::Obo)
    }

    #[must_use]
    pub fn is_prefixed(&self) -> bool {
        matches!(self, DocumentFormat::PrefixedOwl { .. })
    }

    /// Declared short form of `iri`, if any prefix namespace covers it.
    ///
    /// The longest declared namespace wins, so nested namespaces resolve to
    /// the most specific prefix. The default prefix renders as `:local`.
    #[must_use]
    pub fn prefix_iri(&self, iri: &Iri) -> Option<String> {
        let DocumentFormat::PrefixedOwl { prefixes } = self else {
            return None;
        };
        let mut best: Option<(&str, &str)> = None;
        for (prefix, namespace) in prefixes {
            if let Some(rest) = iri.as_str().strip_prefix(namespace.as_str()) {
                if rest.is_empty() {
                    continue;
                }
                match best {
                    Some((_, held)) if held.len() >= namespace.len() => {}
                    _ => best = Some((prefix, namespace)),
                }
            }
        }
        best.map(|(prefix, namespace)| {
            let local = &iri.as_str()[namespace.len()..];
            format!("{prefix}:{local}")
        })
    }
}
