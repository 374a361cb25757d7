//! Master document resolution.
//!
//! Candidates come from the discovery collaborator when an input repository
//! folder is configured; otherwise the master file name is taken as a direct
//! path. Selection prefers the exact path `folder + masterFileName`, then
//! falls back to the first candidate with the same bare filename.

use std::fs;
use std::path::{Path, PathBuf};

use ontonorm_store::DocumentDiscovery;
use tracing::{debug, info};

use crate::invocation::InvocationContext;

/// Enumerates candidate documents and records the OBO data version of any
/// `.obo` candidate on the invocation.
pub fn discover_candidates(
    ctx: &mut InvocationContext,
    discovery: &dyn DocumentDiscovery,
) -> Vec<PathBuf> {
    let candidates = match &ctx.input_repository_folder {
        Some(folder) => {
            info!(folder = %folder.display(), "discovering candidate documents");
            discovery.candidates(folder)
        }
        None => vec![PathBuf::from(&ctx.master_file_name)],
    };

    let mut obo_version = None;
    for candidate in &candidates {
        debug!(candidate = %candidate.display(), "candidate document");
        if candidate
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obo"))
        {
            if let Some(version) = obo_data_version(candidate) {
                obo_version = Some(version);
            }
        }
    }
    if let Some(version) = obo_version {
        ctx.set_obo_version(version);
    }
    candidates
}

/// Scans a flat file for a `data-version:` marker line; the version is the
/// second whitespace-separated token.
pub fn obo_data_version(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    for line in text.lines() {
        if line.contains("data-version:") {
            if let Some(version) = line.split_whitespace().nth(1) {
                return Some(version.to_string());
            }
        }
    }
    None
}

/// Selects the master document among the candidates.
pub fn resolve_master(
    candidates: &[PathBuf],
    input_folder: Option<&Path>,
    master_file_name: &str,
) -> Option<PathBuf> {
    let Some(folder) = input_folder else {
        // Direct-file mode: the single candidate is the master.
        return candidates.first().cloned();
    };

    let expected = folder.join(master_file_name);
    if let Some(exact) = candidates.iter().find(|c| **c == expected) {
        return Some(exact.clone());
    }
    candidates
        .iter()
        .find(|c| {
            c.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n == master_file_name)
        })
        .cloned()
}
