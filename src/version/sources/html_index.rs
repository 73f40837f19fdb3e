//! Download links scraped from the HTML download index (`https://go.dev/dl/`)
//!
//! Archive links look like `/dl/go1.21.3.linux-amd64.tar.gz`. The version
//! token is the text between the download path prefix and the platform
//! (or source archive) suffix.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;
use tracing::{debug, warn};

use crate::config::{DOWNLOAD_PATH_PREFIX, USER_AGENT};
use crate::version::error::CatalogError;
use crate::version::semver::GoVersion;
use crate::version::source::CatalogSource;
use crate::version::sources::dom::anchor_hrefs;
use crate::version::types::Release;

/// Catalog source scraping archive links from the download index page
pub struct HtmlIndexSource {
    client: reqwest::Client,
    url: String,
    link_prefix: String,
    link_suffix: String,
}

impl HtmlIndexSource {
    /// Creates a source for `url` matching links that end in `link_suffix`
    pub fn new(url: &str, link_suffix: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
            link_prefix: DOWNLOAD_PATH_PREFIX.to_string(),
            link_suffix: link_suffix.to_string(),
        }
    }

    /// Overrides the download path prefix (e.g. `https://dl.google.com/go/go`)
    pub fn with_link_prefix(mut self, prefix: &str) -> Self {
        self.link_prefix = prefix.to_string();
        self
    }

    /// Extracts the version token from a download link, if it is one
    fn version_token<'a>(&self, href: &'a str) -> Option<&'a str> {
        let rest = href.strip_prefix(self.link_prefix.as_str())?;
        let end = rest.find(self.link_suffix.as_str())?;
        Some(&rest[..end])
    }

    fn releases_from_html(&self, html: &str) -> Result<Vec<Release>, CatalogError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        let releases = anchor_hrefs(&dom.document)
            .iter()
            .filter_map(|href| self.version_token(href))
            .filter_map(|token| match GoVersion::parse(token) {
                Ok(version) => {
                    let stable = !version.is_prerelease();
                    Some(Release::new(token, version, stable))
                }
                Err(e) => {
                    warn!("invalid version format of '{}': {}", token, e);
                    None
                }
            })
            .collect();

        Ok(releases)
    }
}

#[async_trait::async_trait]
impl CatalogSource for HtmlIndexSource {
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        debug!("Fetching download index: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Download index returned status {}: {}", status, self.url);
            return Err(CatalogError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read download index: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        self.releases_from_html(&body)
    }
}
