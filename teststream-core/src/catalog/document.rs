//! Catalog document model
//!
//! The persisted JSON schema: top-level metadata plus five sections.
//! Section values are kept as raw JSON objects because contributors may
//! inject fields the core does not know about.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A catalog section mapping keys to descriptor records
pub type Section = serde_json::Map<String, Value>;

/// A complete, composite test catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Display name of the enclosing project
    pub name: String,

    /// Free-text build identifier
    pub build: String,

    /// Project version
    pub version: String,

    /// When the catalog was built (RFC 3339)
    pub built: String,

    /// Generation metadata
    pub metadata: CatalogMetadata,

    /// Test class descriptors, keyed by `bundleName/className`
    pub classes: Section,

    /// Package name to ordered class keys (append-only, duplicates kept)
    pub packages: BTreeMap<String, Vec<String>>,

    /// Bundle descriptors, keyed by bundle symbolic name
    pub bundles: Section,

    /// Shared environment descriptors
    #[serde(rename = "sharedEnvironments")]
    pub shared_environments: Section,

    /// Gherkin feature descriptors
    pub gherkin: Section,
}

/// Generation metadata stamped onto a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    /// When the document was generated (RFC 3339)
    pub generated: String,

    /// Name of the generating project
    pub name: String,
}

impl CatalogDocument {
    /// Parse a document from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse test catalog document")
    }

    /// Serialize to pretty-printed JSON, the persisted artifact format
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize test catalog document")
    }

    /// Total number of test classes across all merged fragments
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// One bundle's partial test catalog, prior to merging
///
/// Every section is optional so that fragments carrying only some
/// sections still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFragment {
    /// Test class descriptors, keyed by `bundleName/className`
    #[serde(default)]
    pub classes: Section,

    /// Package name to ordered class keys
    #[serde(default)]
    pub packages: BTreeMap<String, Vec<String>>,

    /// Bundle descriptors
    #[serde(default)]
    pub bundles: Section,

    /// Shared environment descriptors
    #[serde(default, rename = "sharedEnvironments")]
    pub shared_environments: Section,

    /// Gherkin feature descriptors
    #[serde(default)]
    pub gherkin: Section,
}

impl CatalogFragment {
    /// Parse a fragment from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse test catalog fragment")
    }

    /// Parse a fragment from a reader
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse test catalog fragment")
    }

    /// True if no section carries any entry
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.packages.is_empty()
            && self.bundles.is_empty()
            && self.shared_environments.is_empty()
            && self.gherkin.is_empty()
    }
}
