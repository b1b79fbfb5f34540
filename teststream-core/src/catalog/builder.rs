//! Bundle catalog building with explicit contributor registration
//!
//! Builds the fragment a single bundle publishes. Contributors are
//! registered up front as trait objects with a fixed signature; there is
//! no runtime discovery of builder implementations.

use serde_json::{json, Value};
use tracing::info;

use super::{CatalogFragment, Section};

/// Descriptor of one test class inside a bundle
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Fully qualified class name
    pub name: String,

    /// Symbolic name of the owning bundle
    pub bundle: String,

    /// Class name without its package
    pub short_name: String,

    /// Package name, or `default` for the unnamed package
    pub package: String,
}

impl ClassDescriptor {
    /// Derive a descriptor from a bundle name and a qualified class name
    pub fn new(bundle: &str, qualified_name: &str) -> Self {
        let (package, short_name) = match qualified_name.rsplit_once('.') {
            Some((package, short_name)) => (package.to_string(), short_name.to_string()),
            None => ("default".to_string(), qualified_name.to_string()),
        };

        Self {
            name: qualified_name.to_string(),
            bundle: bundle.to_string(),
            short_name,
            package,
        }
    }

    /// The catalog key, `bundleName/className`
    pub fn key(&self) -> String {
        format!("{}/{}", self.bundle, self.name)
    }
}

/// Augments catalog entries while a bundle fragment is being built
///
/// Each registered contributor is called once per class with the fragment
/// under construction and the class's descriptor entry, and may add fields
/// to either.
pub trait CatalogContributor {
    /// Append contributor-specific data for one test class
    fn contribute(&self, fragment: &mut CatalogFragment, entry: &mut Section, class: &ClassDescriptor);
}

/// Builds the catalog fragment for a single bundle
pub struct CatalogBuilder {
    bundle: String,
    contributors: Vec<Box<dyn CatalogContributor>>,
}

impl CatalogBuilder {
    /// Create a builder for the bundle with the given symbolic name
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            contributors: Vec::new(),
        }
    }

    /// Register a contributor to run for every test class
    pub fn register(&mut self, contributor: Box<dyn CatalogContributor>) {
        self.contributors.push(contributor);
    }

    /// Build the fragment for the given test classes and shared environments
    pub fn build(&self, test_classes: &[String], shared_environments: &[String]) -> CatalogFragment {
        let mut fragment = CatalogFragment::default();
        let mut bundle_packages: Section = Section::new();

        info!("Building the test catalog for bundle {}:-", self.bundle);
        for qualified_name in test_classes {
            let class = ClassDescriptor::new(&self.bundle, qualified_name);
            info!("     {}", class.name);

            let mut entry = class_entry(&class);
            for contributor in &self.contributors {
                contributor.contribute(&mut fragment, &mut entry, &class);
            }
            fragment.classes.insert(class.key(), Value::Object(entry));

            fragment
                .packages
                .entry(class.package.clone())
                .or_default()
                .push(class.key());
            append_bundle_package(&mut bundle_packages, &class);
        }

        for qualified_name in shared_environments {
            let class = ClassDescriptor::new(&self.bundle, qualified_name);
            info!("     {}", class.name);
            fragment
                .shared_environments
                .insert(class.key(), Value::Object(class_entry(&class)));
        }

        fragment.bundles.insert(
            self.bundle.clone(),
            json!({ "packages": Value::Object(bundle_packages) }),
        );

        log_count(test_classes.len(), "test class", "test classes");
        log_count(
            shared_environments.len(),
            "shared environment",
            "shared environments",
        );

        fragment
    }
}

/// The plain descriptor entry before contributors run
fn class_entry(class: &ClassDescriptor) -> Section {
    let mut entry = Section::new();
    entry.insert("name".to_string(), Value::String(class.name.clone()));
    entry.insert("bundle".to_string(), Value::String(class.bundle.clone()));
    entry.insert(
        "shortName".to_string(),
        Value::String(class.short_name.clone()),
    );
    entry.insert("package".to_string(), Value::String(class.package.clone()));
    entry
}

fn append_bundle_package(bundle_packages: &mut Section, class: &ClassDescriptor) {
    let list = bundle_packages
        .entry(class.package.clone())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(list) = list {
        list.push(Value::String(class.key()));
    }
}

fn log_count(count: usize, singular: &str, plural: &str) {
    match count {
        0 => info!("Test catalog built with no {} defined", plural),
        1 => info!("Test catalog built with 1 {}", singular),
        n => info!("Test catalog built with {} {}", n, plural),
    }
}
