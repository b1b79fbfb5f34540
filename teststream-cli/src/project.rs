//! Project manifest loading
//!
//! The manifest is the CLI's stand-in for the build tool's project model:
//! coordinates, packaging, dependency list, and deploy target.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use teststream_core::artifact::DependencyDescriptor;
use teststream_core::catalog::ProjectMetadata;

/// A TestStream project manifest (`teststream.yaml`)
#[derive(Debug, Deserialize)]
pub struct ProjectManifest {
    /// Display name
    pub name: String,

    /// Group identifier
    pub group: String,

    /// Artifact identifier
    pub artifact: String,

    /// Version string
    pub version: String,

    /// Packaging type; catalog merging applies to `obr` projects,
    /// fragment building to `bundle` projects
    #[serde(default = "default_packaging")]
    pub packaging: String,

    /// Stream the catalog is published against
    #[serde(default)]
    pub stream: Option<String>,

    /// Bootstrap URL of the ecosystem server
    #[serde(default)]
    pub bootstrap: Option<String>,

    /// Repository directory the dependencies resolve against
    #[serde(default)]
    pub repository: Option<PathBuf>,

    /// Declared dependencies, in order
    #[serde(default)]
    pub dependencies: Vec<DependencyDescriptor>,

    /// Bundle description, for `bundle` packaging
    #[serde(default)]
    pub bundle: Option<BundleManifest>,
}

/// The bundle section of a manifest
#[derive(Debug, Deserialize)]
pub struct BundleManifest {
    /// Bundle symbolic name
    pub name: String,

    /// Fully qualified test class names
    #[serde(default)]
    pub classes: Vec<String>,

    /// Fully qualified shared environment class names
    #[serde(default, rename = "sharedEnvironments")]
    pub shared_environments: Vec<String>,
}

fn default_packaging() -> String {
    "obr".to_string()
}

impl ProjectManifest {
    /// Load a manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project manifest: {}", path.display()))?;
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse project manifest: {}", path.display()))
    }

    /// The project metadata stamped onto merged catalogs
    pub fn project_metadata(&self) -> ProjectMetadata {
        ProjectMetadata {
            name: self.name.clone(),
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: self.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
name: Example OBR
group: dev.example
artifact: example.obr
version: 0.9.0
stream: prod
bootstrap: https://my.server/api/bootstrap
dependencies:
  - group: dev.example
    artifact: example.payments
    version: 1.0.0
  - group: dev.example
    artifact: example.accounts
    version: 1.0.0
    scope: test
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: ProjectManifest = serde_yaml_ng::from_str(SAMPLE).unwrap();

        assert_eq!(manifest.name, "Example OBR");
        assert_eq!(manifest.packaging, "obr");
        assert_eq!(manifest.stream.as_deref(), Some("prod"));
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies[0].artifact, "example.payments");
    }

    #[test]
    fn test_parse_bundle_section() {
        let manifest: ProjectManifest = serde_yaml_ng::from_str(
            r#"
name: Payments bundle
group: dev.example
artifact: example.payments
version: 1.0.0
packaging: bundle
bundle:
  name: dev.example.payments
  classes:
    - dev.example.payments.TestRefund
  sharedEnvironments:
    - dev.example.payments.SharedAccounts
"#,
        )
        .unwrap();

        let bundle = manifest.bundle.unwrap();
        assert_eq!(bundle.name, "dev.example.payments");
        assert_eq!(bundle.classes.len(), 1);
        assert_eq!(bundle.shared_environments.len(), 1);
    }

    #[test]
    fn test_metadata_carries_coordinates() {
        let manifest: ProjectManifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        let metadata = manifest.project_metadata();

        assert_eq!(metadata.coordinates(), "dev.example:example.obr:0.9.0");
    }
}
