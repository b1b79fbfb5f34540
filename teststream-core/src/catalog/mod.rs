//! Test catalog documents - building, extraction and merging
//!
//! A test catalog describes the test classes a set of bundles provides.
//! Each bundle publishes a partial catalog (a fragment), either embedded
//! inside its jar or as a sibling JSON artifact; an aggregating project
//! merges every fragment on its dependency list into one composite
//! document, which can then be deployed to an ecosystem server.
//!
//! # Architecture
//!
//! ```text
//! bundle jars / sibling artifacts
//!     │
//!     ├── META-INF/testcatalog.json      ← embedded fragment
//!     └── {artifact}-testcatalog.json    ← sibling fragment
//!            │
//!            ▼
//!     extract_fragment (per dependency)
//!            │
//!            ▼
//!     CatalogMerger ── fold in declaration order
//!            │
//!            ▼
//!     CatalogDocument ── testcatalog.json / deploy PUT
//! ```

mod builder;
mod document;
mod extractor;
mod merger;

pub use builder::{CatalogBuilder, CatalogContributor, ClassDescriptor};
pub use document::{CatalogDocument, CatalogFragment, CatalogMetadata, Section};
pub use extractor::{collect_fragments, extract_fragment, EMBEDDED_FRAGMENT_PATH};
pub use merger::{CatalogMerger, ProjectMetadata};
