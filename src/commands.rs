//! Subcommand implementations
//!
//! Each command writes its result to the given writer so it can be tested
//! without capturing stdout.

use std::io::Write;

use anyhow::Context;
use tracing::info;

use crate::toolchain;
use crate::version::catalog::{Catalog, SortOrder};
use crate::version::resolver::{Resolution, resolve};
use crate::version::semver::GoVersion;
use crate::version::source::CatalogSource;

/// Print the installed Go version without the `go` prefix
pub fn print_version(out: &mut impl Write) -> anyhow::Result<()> {
    let version = toolchain::running_version()?;
    writeln!(out, "{}", version)?;
    Ok(())
}

/// Print the directory holding downloaded SDKs
pub fn print_sdk_path(out: &mut impl Write) -> anyhow::Result<()> {
    let root = toolchain::sdk_root().context("failed to get home directory")?;
    writeln!(out, "{}", root.display())?;
    Ok(())
}

/// Print GOPATH
pub fn print_gopath(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", toolchain::gopath().display())?;
    Ok(())
}

/// Print every catalog version, oldest first, skipping versions below `low_limit`
pub async fn print_sdk_versions(
    source: &dyn CatalogSource,
    low_limit: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let low_limit = low_limit
        .map(GoVersion::parse)
        .transpose()
        .context("invalid LOW_LIMIT_VERSION")?;

    let catalog = Catalog::build(source.fetch_releases().await?, SortOrder::Ascending);
    info!("Catalog contains {} releases", catalog.len());

    for release in catalog
        .iter()
        .filter(|r| low_limit.as_ref().is_none_or(|low| r.version >= *low))
    {
        writeln!(out, "{}", release.display)?;
    }
    Ok(())
}

/// Print the newest release marked stable
pub async fn print_latest_sdk_version(
    source: &dyn CatalogSource,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = Catalog::build(source.fetch_releases().await?, SortOrder::Descending);
    match catalog.first_stable() {
        Some(release) => writeln!(out, "{}", release.display)?,
        None => info!("No stable release in catalog"),
    }
    Ok(())
}

/// Print the release a version or constraint resolves to
pub async fn print_resolved_version(
    source: &dyn CatalogSource,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<Resolution> {
    let resolution = resolve(source, query).await?;
    writeln!(out, "{}", resolution)?;
    Ok(resolution)
}
