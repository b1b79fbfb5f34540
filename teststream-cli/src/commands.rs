//! Command execution for merge, build and deploy
//!
//! Skippable preconditions (missing stream, wrong packaging, absent
//! catalog artifact, explicit skip flags) log and return early; everything
//! past them fails the command.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use teststream_core::artifact::DirectoryArtifactSource;
use teststream_core::catalog::{collect_fragments, CatalogBuilder, CatalogMerger};
use teststream_core::deploy::CatalogDeployer;

use crate::project::ProjectManifest;

/// File name of the catalog artifact within the output directory
pub const CATALOG_FILE_NAME: &str = "testcatalog.json";

const OBR_PACKAGING: &str = "obr";
const BUNDLE_PACKAGING: &str = "bundle";

/// Merge dependency fragments into the composite catalog artifact
pub fn execute_merge(
    manifest: &ProjectManifest,
    repository: Option<PathBuf>,
    output: &Path,
    build_job: Option<String>,
    skip: bool,
) -> Result<()> {
    if skip {
        info!("Skipping test catalog merge");
        return Ok(());
    }
    if manifest.packaging != OBR_PACKAGING {
        info!("Skipping test catalog merge, not an obr project");
        return Ok(());
    }

    let repository = repository
        .or_else(|| manifest.repository.clone())
        .context("No repository directory supplied. Use --repository or the manifest's repository field.")?;

    let source = DirectoryArtifactSource::new(repository, manifest.dependencies.clone());
    let fragments = collect_fragments(&source)?;

    let mut merger = CatalogMerger::new(manifest.project_metadata());
    if let Some(build_job) = build_job {
        merger = merger.with_build_job(build_job);
    }
    let document = merger.merge(fragments);

    let path = write_catalog(output, &document.to_pretty_json()?)?;
    info!(
        "Merged test catalog with {} test classes written to {}",
        document.class_count(),
        path.display()
    );
    Ok(())
}

/// Build the catalog fragment a single bundle publishes
pub fn execute_build(manifest: &ProjectManifest, output: &Path, skip: bool) -> Result<()> {
    if skip {
        info!("Skipping bundle test catalog build");
        return Ok(());
    }
    if manifest.packaging != BUNDLE_PACKAGING {
        info!("Skipping bundle test catalog build, not a bundle project");
        return Ok(());
    }

    let bundle = manifest
        .bundle
        .as_ref()
        .context("The project manifest has no bundle section")?;

    let builder = CatalogBuilder::new(&bundle.name);
    let fragment = builder.build(&bundle.classes, &bundle.shared_environments);

    let content = serde_json::to_string_pretty(&fragment)
        .context("Failed to serialize test catalog fragment")?;
    let path = write_catalog(output, &content)?;
    info!("Bundle test catalog written to {}", path.display());
    Ok(())
}

/// Deploy the merged catalog artifact to the ecosystem server
pub async fn execute_deploy(
    manifest: &ProjectManifest,
    catalog: Option<PathBuf>,
    output: &Path,
    bootstrap: Option<String>,
    stream: Option<String>,
    token: Option<String>,
    skip: bool,
) -> Result<()> {
    if skip {
        info!("Skipping test catalog deploy");
        return Ok(());
    }

    let stream = stream
        .or_else(|| manifest.stream.clone())
        .filter(|s| !s.trim().is_empty());
    let Some(stream) = stream else {
        info!("Skipping test catalog deploy - test stream name is missing");
        return Ok(());
    };

    let bootstrap = bootstrap.or_else(|| manifest.bootstrap.clone());
    let Some(bootstrap) = bootstrap else {
        info!("Skipping test catalog deploy - bootstrap URL is missing");
        return Ok(());
    };

    if manifest.packaging != OBR_PACKAGING {
        info!("Skipping test catalog deploy, not an obr project");
        return Ok(());
    }

    let catalog_path = catalog.unwrap_or_else(|| output.join(CATALOG_FILE_NAME));
    if !catalog_path.is_file() {
        info!("Skipping test catalog deploy, no test catalog artifact present");
        return Ok(());
    }

    let bytes = std::fs::read(&catalog_path)
        .with_context(|| format!("Failed to read test catalog: {}", catalog_path.display()))?;

    let deployer = CatalogDeployer::new()?;
    deployer
        .deploy(&bootstrap, &stream, token.as_deref(), bytes)
        .await?;

    Ok(())
}

fn write_catalog(output: &Path, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let path = output.join(CATALOG_FILE_NAME);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write test catalog: {}", path.display()))?;
    Ok(path)
}
