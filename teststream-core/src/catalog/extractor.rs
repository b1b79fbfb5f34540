//! Fragment extraction from dependency artifacts
//!
//! Looks inside each jar dependency for an embedded catalog fragment, and
//! falls back to a sibling `testcatalog` JSON artifact when the jar does
//! not carry one. A dependency with neither is normal and merely logged.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::artifact::{ArtifactKind, ArtifactScope, ArtifactSource, DependencyDescriptor};

use super::CatalogFragment;

/// Fixed path of the embedded fragment inside a bundle jar
pub const EMBEDDED_FRAGMENT_PATH: &str = "META-INF/testcatalog.json";

/// Locate and parse the test catalog fragment for one dependency
///
/// Returns `Ok(None)` when the dependency is out of scope for catalog
/// processing or simply has no fragment. Malformed JSON or an unreadable
/// archive is an error and fails the whole merge.
pub fn extract_fragment(
    source: &dyn ArtifactSource,
    dependency: &DependencyDescriptor,
) -> Result<Option<CatalogFragment>> {
    // Only compile-scoped jars carry test catalogs.
    if dependency.scope != ArtifactScope::Compile || dependency.kind != ArtifactKind::Jar {
        debug!(
            "Skipping dependency {} ({} scope, {} type)",
            dependency.identity(),
            dependency.scope,
            dependency.kind
        );
        return Ok(None);
    }

    if let Some(path) = source.resolve(dependency) {
        if let Some(fragment) = extract_embedded(dependency, &path)? {
            info!("Merging embedded test catalog from {}", dependency.identity());
            return Ok(Some(fragment));
        }
    }

    if let Some(path) = source.resolve_test_catalog(dependency) {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read sibling test catalog for {}: {}",
                dependency.identity(),
                path.display()
            )
        })?;
        let fragment = CatalogFragment::from_json(&content).with_context(|| {
            format!("Invalid sibling test catalog for {}", dependency.identity())
        })?;
        info!("Merging sibling test catalog from {}", dependency.identity());
        return Ok(Some(fragment));
    }

    warn!("No test catalog found for {}", dependency.identity());
    Ok(None)
}

/// Scan a jar for the fragment at [`EMBEDDED_FRAGMENT_PATH`]
fn extract_embedded(
    dependency: &DependencyDescriptor,
    path: &std::path::Path,
) -> Result<Option<CatalogFragment>> {
    let file = File::open(path).with_context(|| {
        format!(
            "Failed to open artifact for {}: {}",
            dependency.identity(),
            path.display()
        )
    })?;

    let mut archive = ZipArchive::new(BufReader::new(file)).with_context(|| {
        format!("Unreadable archive for {}: {}", dependency.identity(), path.display())
    })?;

    let entry = match archive.by_name(EMBEDDED_FRAGMENT_PATH) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Unreadable archive entry in {}", dependency.identity())
            })
        }
    };

    let fragment = CatalogFragment::from_reader(entry).with_context(|| {
        format!("Invalid embedded test catalog in {}", dependency.identity())
    })?;

    Ok(Some(fragment))
}

/// Extract every available fragment for a source's dependencies
///
/// Fragments come back in dependency declaration order, which the merge
/// relies on for its last-fragment-wins rule.
pub fn collect_fragments(source: &dyn ArtifactSource) -> Result<Vec<CatalogFragment>> {
    let mut fragments = Vec::new();
    for dependency in source.dependencies() {
        if let Some(fragment) = extract_fragment(source, &dependency)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}
