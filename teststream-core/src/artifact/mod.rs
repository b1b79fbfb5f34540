//! Dependency artifacts and the host adapter that supplies them
//!
//! The build host (CLI, CI task, anything driving the pipeline) resolves
//! dependencies; the core only sees descriptors through the
//! [`ArtifactSource`] trait. This keeps the merge logic independent of
//! where artifacts actually live.

mod directory;

pub use directory::{layout_path, DirectoryArtifactSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The packaging type of a dependency artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// An OSGi bundle jar, possibly carrying an embedded catalog fragment
    Jar,
    /// An OBR repository artifact
    Obr,
    /// A standalone JSON artifact (e.g. a test catalog fragment)
    Json,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Jar => write!(f, "jar"),
            ArtifactKind::Obr => write!(f, "obr"),
            ArtifactKind::Json => write!(f, "json"),
        }
    }
}

/// The dependency scope declared by the enclosing project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactScope {
    Compile,
    Provided,
    Runtime,
    Test,
}

impl Default for ArtifactScope {
    fn default() -> Self {
        ArtifactScope::Compile
    }
}

impl fmt::Display for ArtifactScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactScope::Compile => write!(f, "compile"),
            ArtifactScope::Provided => write!(f, "provided"),
            ArtifactScope::Runtime => write!(f, "runtime"),
            ArtifactScope::Test => write!(f, "test"),
        }
    }
}

/// A dependency declared by the enclosing project
///
/// Created by the host's dependency resolution and read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDescriptor {
    /// Group identifier (e.g. "dev.example")
    pub group: String,

    /// Artifact identifier (e.g. "example.payments.tests")
    pub artifact: String,

    /// Version string
    pub version: String,

    /// Packaging type
    #[serde(default = "default_kind")]
    pub kind: ArtifactKind,

    /// Dependency scope
    #[serde(default)]
    pub scope: ArtifactScope,

    /// Explicit path to the resolved file, overriding repository layout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_kind() -> ArtifactKind {
    ArtifactKind::Jar
}

impl DependencyDescriptor {
    /// Create a compile-scoped jar dependency
    pub fn jar(group: &str, artifact: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
            kind: ArtifactKind::Jar,
            scope: ArtifactScope::Compile,
            path: None,
        }
    }

    /// The `group:artifact:version` coordinates, used in logs and errors
    pub fn identity(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Supplies dependency descriptors and resolves them to local files
///
/// Implemented by each build host. The core never touches the filesystem
/// layout of a repository directly.
pub trait ArtifactSource {
    /// The project's dependencies, in declaration order
    ///
    /// Order matters: later fragments overwrite earlier ones on shared
    /// catalog keys, so implementations must not reorder.
    fn dependencies(&self) -> Vec<DependencyDescriptor>;

    /// Resolve a dependency to its local artifact file, if present
    fn resolve(&self, dependency: &DependencyDescriptor) -> Option<PathBuf>;

    /// Resolve the sibling test catalog artifact for a dependency
    ///
    /// The sibling shares the dependency's coordinates but is classified
    /// as a standalone `testcatalog` JSON document.
    fn resolve_test_catalog(&self, dependency: &DependencyDescriptor) -> Option<PathBuf>;
}
