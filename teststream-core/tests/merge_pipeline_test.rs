//! End-to-end merge pipeline tests
//!
//! Assembles a repository directory with real jar fixtures, extracts every
//! fragment through the artifact source, and checks the merged document.

use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use teststream_core::artifact::{layout_path, DependencyDescriptor, DirectoryArtifactSource};
use teststream_core::catalog::{
    collect_fragments, CatalogDocument, CatalogMerger, ProjectMetadata, EMBEDDED_FRAGMENT_PATH,
};

fn write_jar(root: &Path, dep: &DependencyDescriptor, fragment: Option<&str>) {
    let path = layout_path(
        root,
        &dep.group,
        &dep.artifact,
        &dep.version,
        &format!("{}-{}.jar", dep.artifact, dep.version),
    );
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let file = std::fs::File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    writer
        .start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    if let Some(content) = fragment {
        writer
            .start_file(EMBEDDED_FRAGMENT_PATH, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn write_sibling(root: &Path, dep: &DependencyDescriptor, content: &str) {
    let path = layout_path(
        root,
        &dep.group,
        &dep.artifact,
        &dep.version,
        &format!("{}-{}-testcatalog.json", dep.artifact, dep.version),
    );
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project() -> ProjectMetadata {
    ProjectMetadata {
        name: "Example OBR".to_string(),
        group: "dev.example".to_string(),
        artifact: "example.obr".to_string(),
        version: "0.9.0".to_string(),
    }
}

#[test]
fn test_merges_embedded_and_sibling_fragments() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let payments = DependencyDescriptor::jar("dev.example", "example.payments", "1.0.0");
    write_jar(
        temp_dir.path(),
        &payments,
        Some(
            r#"{
                "classes": {"example.payments/TestRefund": {"name": "TestRefund"}},
                "packages": {"dev.example.payments": ["example.payments/TestRefund"]},
                "bundles": {"example.payments": {}}
            }"#,
        ),
    );

    let accounts = DependencyDescriptor::jar("dev.example", "example.accounts", "1.0.0");
    write_jar(temp_dir.path(), &accounts, None);
    write_sibling(
        temp_dir.path(),
        &accounts,
        r#"{
            "classes": {"example.accounts/TestLedger": {"name": "TestLedger"}},
            "packages": {"dev.example.accounts": ["example.accounts/TestLedger"]},
            "bundles": {"example.accounts": {}}
        }"#,
    );

    // A dependency with no catalog at all is skipped with a warning.
    let plain = DependencyDescriptor::jar("dev.example", "example.util", "1.0.0");
    write_jar(temp_dir.path(), &plain, None);

    let source = DirectoryArtifactSource::new(
        temp_dir.path(),
        vec![payments, accounts, plain],
    );

    let fragments = collect_fragments(&source).unwrap();
    assert_eq!(fragments.len(), 2);

    let document = CatalogMerger::new(project())
        .with_build_job("ci-run-42")
        .merge(fragments);

    assert_eq!(document.class_count(), 2);
    assert!(document.classes.contains_key("example.payments/TestRefund"));
    assert!(document.classes.contains_key("example.accounts/TestLedger"));
    assert_eq!(document.bundles.len(), 2);
    assert_eq!(document.build, "ci-run-42");

    // The persisted artifact parses back into an identical section set.
    let json = document.to_pretty_json().unwrap();
    let reloaded = CatalogDocument::from_json(&json).unwrap();
    assert_eq!(reloaded.class_count(), 2);
    assert_eq!(
        reloaded.packages["dev.example.payments"],
        vec!["example.payments/TestRefund"]
    );
}

#[test]
fn test_later_dependency_overwrites_shared_class_key() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let older = DependencyDescriptor::jar("dev.example", "example.older", "1.0.0");
    write_jar(
        temp_dir.path(),
        &older,
        Some(r#"{"classes": {"shared/TestShared": {"name": "TestShared", "revision": 1}}}"#),
    );

    let newer = DependencyDescriptor::jar("dev.example", "example.newer", "1.0.0");
    write_jar(
        temp_dir.path(),
        &newer,
        Some(r#"{"classes": {"shared/TestShared": {"name": "TestShared", "revision": 2}}}"#),
    );

    let source = DirectoryArtifactSource::new(temp_dir.path(), vec![older, newer]);
    let document = CatalogMerger::new(project()).merge(collect_fragments(&source).unwrap());

    assert_eq!(document.classes["shared/TestShared"]["revision"], 2);
}

#[test]
fn test_malformed_fragment_fails_the_whole_merge() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let good = DependencyDescriptor::jar("dev.example", "example.good", "1.0.0");
    write_jar(
        temp_dir.path(),
        &good,
        Some(r#"{"classes": {"g/TestGood": {"name": "TestGood"}}}"#),
    );

    let bad = DependencyDescriptor::jar("dev.example", "example.bad", "1.0.0");
    write_jar(temp_dir.path(), &bad, Some("{ this is not json"));

    let source = DirectoryArtifactSource::new(temp_dir.path(), vec![good, bad]);
    let err = collect_fragments(&source).unwrap_err();

    assert!(format!("{err:#}").contains("dev.example:example.bad:1.0.0"));
}
