//! Repository-directory artifact source
//!
//! Resolves dependencies against a Maven-style repository layout:
//! `{root}/{group as path}/{artifact}/{version}/{artifact}-{version}.{ext}`.
//! Sibling test catalogs sit next to the main artifact as
//! `{artifact}-{version}-testcatalog.json`.

use std::path::{Path, PathBuf};

use super::{ArtifactSource, DependencyDescriptor};

/// An [`ArtifactSource`] backed by a local repository directory
pub struct DirectoryArtifactSource {
    root: PathBuf,
    dependencies: Vec<DependencyDescriptor>,
}

impl DirectoryArtifactSource {
    /// Create a source rooted at `root` with the given declared dependencies
    pub fn new(root: impl Into<PathBuf>, dependencies: Vec<DependencyDescriptor>) -> Self {
        Self {
            root: root.into(),
            dependencies,
        }
    }

    /// The directory holding a dependency's artifacts
    fn artifact_dir(&self, dependency: &DependencyDescriptor) -> PathBuf {
        let mut dir = self.root.clone();
        for part in dependency.group.split('.') {
            dir.push(part);
        }
        dir.push(&dependency.artifact);
        dir.push(&dependency.version);
        dir
    }

    fn existing(path: PathBuf) -> Option<PathBuf> {
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }
}

impl ArtifactSource for DirectoryArtifactSource {
    fn dependencies(&self) -> Vec<DependencyDescriptor> {
        self.dependencies.clone()
    }

    fn resolve(&self, dependency: &DependencyDescriptor) -> Option<PathBuf> {
        // An explicit path in the declaration wins over repository layout.
        if let Some(path) = &dependency.path {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                self.root.join(path)
            };
            return Self::existing(path);
        }

        let file = format!(
            "{}-{}.{}",
            dependency.artifact, dependency.version, dependency.kind
        );
        Self::existing(self.artifact_dir(dependency).join(file))
    }

    fn resolve_test_catalog(&self, dependency: &DependencyDescriptor) -> Option<PathBuf> {
        let file = format!(
            "{}-{}-testcatalog.json",
            dependency.artifact, dependency.version
        );
        Self::existing(self.artifact_dir(dependency).join(file))
    }
}

/// Place a file into a repository directory at the layout position for the
/// given coordinates. Intended for tests and tooling that assemble
/// repository fixtures.
pub fn layout_path(root: &Path, group: &str, artifact: &str, version: &str, file: &str) -> PathBuf {
    let mut dir = root.to_path_buf();
    for part in group.split('.') {
        dir.push(part);
    }
    dir.push(artifact);
    dir.push(version);
    dir.push(file);
    dir
}
