//! Structured JSON release feed (`https://go.dev/dl/?mode=json&include=all`)

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::USER_AGENT;
use crate::version::error::CatalogError;
use crate::version::semver::{GoVersion, strip_distribution_prefix};
use crate::version::source::CatalogSource;
use crate::version::types::{Release, ReleaseFile};

/// One entry of the release feed
#[derive(Debug, Deserialize)]
struct FeedRelease {
    version: String,
    #[serde(default)]
    stable: bool,
    #[serde(default)]
    files: Vec<ReleaseFile>,
}

/// Catalog source reading the JSON release feed
pub struct JsonFeedSource {
    client: reqwest::Client,
    url: String,
    os: String,
}

impl JsonFeedSource {
    /// Creates a source for `url` that keeps releases shipping files for `os`
    pub fn new(url: &str, os: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
            os: os.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFeedSource {
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        debug!("Fetching release feed: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Release feed returned status {}: {}", status, self.url);
            return Err(CatalogError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let feed: Vec<FeedRelease> = response.json().await.map_err(|e| {
            warn!("Failed to parse release feed: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        Ok(releases_for_os(feed, &self.os))
    }
}

/// Keeps releases with at least one file for `os`, skipping unparseable versions
fn releases_for_os(feed: Vec<FeedRelease>, os: &str) -> Vec<Release> {
    feed.into_iter()
        .filter(|r| r.files.iter().any(|f| f.os == os))
        .filter_map(|r| {
            let display = strip_distribution_prefix(&r.version);
            match GoVersion::parse(display) {
                Ok(version) => {
                    Some(Release::new(display, version, r.stable).with_files(r.files))
                }
                Err(e) => {
                    warn!("invalid version format of '{}': {}", r.version, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::types::FileKind;
    use mockito::Server;

    const FEED: &str = r#"[
        {
            "version": "go1.21.3",
            "stable": true,
            "files": [
                {"filename": "go1.21.3.src.tar.gz", "os": "", "arch": "", "version": "go1.21.3", "sha256": "aa", "size": 1, "kind": "source"},
                {"filename": "go1.21.3.linux-amd64.tar.gz", "os": "linux", "arch": "amd64", "version": "go1.21.3", "sha256": "bb", "size": 2, "kind": "archive"}
            ]
        },
        {
            "version": "go1.22rc1",
            "stable": false,
            "files": [
                {"filename": "go1.22rc1.linux-amd64.tar.gz", "os": "linux", "arch": "amd64", "version": "go1.22rc1", "sha256": "cc", "size": 3, "kind": "archive"}
            ]
        },
        {
            "version": "go1.4-bootstrap-20171003",
            "stable": false,
            "files": [
                {"filename": "go1.4-bootstrap-20171003.tar.gz", "os": "linux", "arch": "", "version": "go1.4-bootstrap-20171003", "sha256": "dd", "size": 4, "kind": "source"}
            ]
        },
        {
            "version": "go1.20.10",
            "stable": true,
            "files": [
                {"filename": "go1.20.10.windows-amd64.msi", "os": "windows", "arch": "amd64", "version": "go1.20.10", "sha256": "ee", "size": 5, "kind": "installer"}
            ]
        }
    ]"#;

    #[tokio::test]
    async fn fetch_releases_keeps_releases_for_os() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/dl/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(FEED)
            .create_async()
            .await;

        let source = JsonFeedSource::new(&format!("{}/dl/", server.url()), "linux");
        let result = source.fetch_releases().await.unwrap();

        mock.assert_async().await;
        let displays: Vec<&str> = result.iter().map(|r| r.display.as_str()).collect();
        assert_eq!(displays, vec!["1.21.3", "1.22rc1", "1.4-bootstrap-20171003"]);
        assert!(result[0].stable);
        assert!(!result[1].stable);
        assert_eq!(result[0].files.len(), 2);
        assert_eq!(result[0].files[1].kind, FileKind::Archive);
        assert_eq!(result[1].version, GoVersion::parse("1.22rc1").unwrap());
    }

    #[tokio::test]
    async fn fetch_releases_skips_malformed_versions() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"version": "gotip", "stable": false, "files": [{"filename": "x", "os": "linux", "arch": "amd64", "kind": "archive"}]},
                    {"version": "go1.21.0", "stable": true, "files": [{"filename": "y", "os": "linux", "arch": "amd64", "kind": "archive"}]}
                ]"#,
            )
            .create_async()
            .await;

        let source = JsonFeedSource::new(&server.url(), "linux");
        let result = source.fetch_releases().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].display, "1.21.0");
    }

    #[tokio::test]
    async fn fetch_releases_returns_invalid_response_for_error_status() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let source = JsonFeedSource::new(&server.url(), "linux");
        let result = source.fetch_releases().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_releases_returns_invalid_response_for_undecodable_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let source = JsonFeedSource::new(&server.url(), "linux");
        let result = source.fetch_releases().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
    }
}
