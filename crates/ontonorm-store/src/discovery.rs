//! Candidate document discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::DocumentDiscovery;

/// Suffixes recognized as ontology documents.
const DEFAULT_SUFFIXES: &[&str] = &["obo", "owl", "rdf", "xrdf", "xml", "ttl", "nt"];

/// Recursive suffix-filtered walk over an input repository folder.
///
/// Results are sorted so discovery order (and therefore master fallback
/// selection) is deterministic across platforms.
pub struct SuffixDiscovery {
    suffixes: Vec<String>,
}

impl Default for SuffixDiscovery {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SuffixDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffixes(suffixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            suffixes: suffixes.into_iter().collect(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|ext| self.suffixes.iter().any(|s| *s == ext))
    }
}

impl DocumentDiscovery for SuffixDiscovery {
    fn candidates(&self, folder: &Path) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = WalkDir::new(folder)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.matches(path))
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_only_recognized_suffixes_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.owl"), "").expect("write");
        fs::write(dir.path().join("a.obo"), "").expect("write");
        fs::write(dir.path().join("notes.txt"), "").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("nested/c.ttl"), "").expect("write");

        let found = SuffixDiscovery::new().candidates(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().and_then(|n| n.to_str()).unwrap_or(""))
            .collect();
        assert_eq!(names, vec!["a.obo", "b.owl", "c.ttl"]);
    }
}
