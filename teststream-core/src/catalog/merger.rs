//! Composite catalog merging
//!
//! Folds a sequence of fragments into one document. Keyed sections
//! (classes, bundles, shared environments, gherkin) are replace-by-key:
//! a later fragment silently overwrites an earlier one sharing a key.
//! Package arrays are append-only and never deduplicated, so merging the
//! same fragment twice duplicates its package entries. Fragment order is
//! therefore significant and must match the dependency declaration order.

use std::collections::BTreeMap;

use super::{CatalogDocument, CatalogFragment, CatalogMetadata, Section};

/// Metadata of the enclosing project, stamped onto the merged document
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    /// Display name
    pub name: String,

    /// Group identifier
    pub group: String,

    /// Artifact identifier
    pub artifact: String,

    /// Version string
    pub version: String,
}

impl ProjectMetadata {
    /// The `group:artifact:version` coordinates
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Merges catalog fragments into a composite document
pub struct CatalogMerger {
    project: ProjectMetadata,
    build_job: Option<String>,
}

impl CatalogMerger {
    /// Create a merger stamping documents with the given project metadata
    pub fn new(project: ProjectMetadata) -> Self {
        Self {
            project,
            build_job: None,
        }
    }

    /// Override the build identifier
    ///
    /// Without an override the identifier defaults to
    /// `{group}:{artifact}:{version} - {timestamp}`.
    pub fn with_build_job(mut self, build_job: impl Into<String>) -> Self {
        self.build_job = Some(build_job.into());
        self
    }

    /// Merge fragments, in the order supplied, into one document
    pub fn merge(&self, fragments: impl IntoIterator<Item = CatalogFragment>) -> CatalogDocument {
        let now = chrono::Utc::now().to_rfc3339();

        let build = self
            .build_job
            .clone()
            .filter(|job| !job.trim().is_empty())
            .unwrap_or_else(|| format!("{} - {}", self.project.coordinates(), now));

        let mut document = CatalogDocument {
            name: self.project.name.clone(),
            build,
            version: self.project.version.clone(),
            built: now.clone(),
            metadata: CatalogMetadata {
                generated: now,
                name: self.project.name.clone(),
            },
            classes: Section::new(),
            packages: BTreeMap::new(),
            bundles: Section::new(),
            shared_environments: Section::new(),
            gherkin: Section::new(),
        };

        for fragment in fragments {
            merge_fragment(&mut document, fragment);
        }

        document
    }
}

fn merge_fragment(document: &mut CatalogDocument, fragment: CatalogFragment) {
    // Replace-by-key sections: last fragment wins.
    for (key, value) in fragment.classes {
        document.classes.insert(key, value);
    }
    for (key, value) in fragment.bundles {
        document.bundles.insert(key, value);
    }
    for (key, value) in fragment.shared_environments {
        document.shared_environments.insert(key, value);
    }
    for (key, value) in fragment.gherkin {
        document.gherkin.insert(key, value);
    }

    // Package arrays are appended, never deduplicated.
    for (package, class_keys) in fragment.packages {
        document
            .packages
            .entry(package)
            .or_default()
            .extend(class_keys);
    }
}
