use serde::Deserialize;

use crate::version::source::CatalogSource;
use crate::version::sources::{HtmlIndexSource, JsonFeedSource};

// =============================================================================
// Catalog endpoints and fixed strings
// =============================================================================

/// JSON release feed, including unstable and archived releases
pub const JSON_FEED_URL: &str = "https://go.dev/dl/?mode=json&include=all";

/// HTML download index page
pub const HTML_INDEX_URL: &str = "https://go.dev/dl/";

/// Path prefix of every archive link on the download index
pub const DOWNLOAD_PATH_PREFIX: &str = "/dl/go";

/// Link suffix marking a source archive
pub const SOURCE_SUFFIX: &str = ".src.tar.gz";

/// Prefix of every published version string (`go1.21.3`)
pub const DISTRIBUTION_PREFIX: &str = "go";

pub const USER_AGENT: &str = "gosdk";

/// Which catalog shape to read releases from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Structured JSON release feed
    #[default]
    Json,
    /// Binary archive links scraped from the HTML download index
    Html,
    /// Source archive links scraped from the HTML download index
    HtmlSource,
}

/// Catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    pub source: SourceKind,
    /// Endpoint override; each source kind has its own default
    pub url: Option<String>,
    /// Download link prefix override for the scraped index
    pub link_prefix: Option<String>,
}

impl CatalogConfig {
    pub fn new(source: SourceKind, url: Option<String>) -> Self {
        Self {
            source,
            url,
            link_prefix: None,
        }
    }

    pub fn with_link_prefix(mut self, link_prefix: Option<String>) -> Self {
        self.link_prefix = link_prefix;
        self
    }

    /// Endpoint the configured source reads from
    pub fn endpoint(&self) -> &str {
        match (&self.url, self.source) {
            (Some(url), _) => url.as_str(),
            (None, SourceKind::Json) => JSON_FEED_URL,
            (None, SourceKind::Html | SourceKind::HtmlSource) => HTML_INDEX_URL,
        }
    }

    /// Build the catalog source for the current platform
    pub fn build_source(&self) -> Box<dyn CatalogSource> {
        let url = self.endpoint();
        let suffix = match self.source {
            SourceKind::Json => return Box::new(JsonFeedSource::new(url, go_os())),
            SourceKind::Html => archive_suffix(),
            SourceKind::HtmlSource => SOURCE_SUFFIX.to_string(),
        };

        let source = HtmlIndexSource::new(url, &suffix);
        match &self.link_prefix {
            Some(prefix) => Box::new(source.with_link_prefix(prefix)),
            None => Box::new(source),
        }
    }
}

/// Operating system name as used in Go release file names
pub fn go_os() -> &'static str {
    go_os_name(std::env::consts::OS)
}

/// Architecture name as used in Go release file names
pub fn go_arch() -> &'static str {
    go_arch_name(std::env::consts::ARCH, cfg!(target_endian = "little"))
}

fn go_os_name(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch_name(arch: &'static str, little_endian: bool) -> &'static str {
    match (arch, little_endian) {
        ("x86_64", _) => "amd64",
        ("x86", _) => "386",
        ("aarch64", _) => "arm64",
        ("arm", _) => "armv6l",
        ("loongarch64", _) => "loong64",
        ("powerpc64", true) => "ppc64le",
        ("powerpc64", false) => "ppc64",
        ("mips64", true) => "mips64le",
        ("mips", true) => "mipsle",
        (other, _) => other,
    }
}

/// Link suffix of the binary archive for the running platform (`.linux-amd64.tar.gz`)
pub fn archive_suffix() -> String {
    archive_suffix_for(go_os(), go_arch())
}

fn archive_suffix_for(os: &str, arch: &str) -> String {
    let ext = if os == "windows" { "zip" } else { "tar.gz" };
    format!(".{}-{}.{}", os, arch, ext)
}
