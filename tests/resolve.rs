//! End-to-end tests against a mock download server

use gosdk::commands;
use gosdk::config::{CatalogConfig, SourceKind, archive_suffix, go_arch, go_os};
use gosdk::version::resolver::{Resolution, resolve};
use mockito::{Matcher, Server, ServerGuard};

fn feed(os: &str, arch: &str) -> String {
    let entry = |version: &str, stable: bool| {
        format!(
            r#"{{"version": "go{version}", "stable": {stable}, "files": [
                {{"filename": "go{version}.src.tar.gz", "os": "", "arch": "", "version": "go{version}", "sha256": "00", "size": 1, "kind": "source"}},
                {{"filename": "go{version}.{os}-{arch}.tar.gz", "os": "{os}", "arch": "{arch}", "version": "go{version}", "sha256": "11", "size": 2, "kind": "archive"}}
            ]}}"#
        )
    };
    format!(
        "[{}, {}, {}, {}, {}]",
        entry("1.22rc1", false),
        entry("1.21.3", true),
        entry("1.20.10", true),
        entry("1.19.13", true),
        entry("1.18.10", true),
    )
}

fn index(suffix: &str) -> String {
    let links: String = ["1.22rc1", "1.21.3", "1.21.3", "1.20.10", "1.17rc1"]
        .iter()
        .map(|v| {
            format!(
                "<tr><td><a class=\"download\" href=\"/dl/go{v}{suffix}\">go{v}{suffix}</a></td></tr>\n\
                 <tr><td><a class=\"download\" href=\"/dl/go{v}.src.tar.gz\">go{v}.src.tar.gz</a></td></tr>\n"
            )
        })
        .collect();
    format!("<html><body><table>{links}</table></body></html>")
}

async fn json_server() -> (ServerGuard, CatalogConfig) {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/dl/")
        .match_query(Matcher::UrlEncoded("mode".into(), "json".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feed(go_os(), go_arch()))
        .create_async()
        .await;
    let config = CatalogConfig::new(
        SourceKind::Json,
        Some(format!("{}/dl/?mode=json&include=all", server.url())),
    );
    (server, config)
}

async fn html_server(source: SourceKind) -> (ServerGuard, CatalogConfig) {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/dl/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(index(&archive_suffix()))
        .create_async()
        .await;
    let config = CatalogConfig::new(source, Some(format!("{}/dl/", server.url())));
    (server, config)
}

fn lines(buf: Vec<u8>) -> Vec<String> {
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn json_feed_resolves_constraint_to_newest_match() {
    let (_server, config) = json_server().await;
    let source = config.build_source();

    let result = resolve(source.as_ref(), ">=1.19, <1.21").await.unwrap();

    assert_eq!(result, Resolution::Resolved("1.20.10".to_string()));
}

#[tokio::test]
async fn json_feed_latest_sdk_version_is_first_stable() {
    let (_server, config) = json_server().await;
    let source = config.build_source();
    let mut buf = Vec::new();

    commands::print_latest_sdk_version(source.as_ref(), &mut buf)
        .await
        .unwrap();

    assert_eq!(lines(buf), vec!["1.21.3"]);
}

#[tokio::test]
async fn json_feed_sdk_versions_lists_from_floor() {
    let (_server, config) = json_server().await;
    let source = config.build_source();
    let mut buf = Vec::new();

    commands::print_sdk_versions(source.as_ref(), Some("1.20"), &mut buf)
        .await
        .unwrap();

    assert_eq!(lines(buf), vec!["1.20.10", "1.21.3", "1.22rc1"]);
}

#[tokio::test]
async fn html_index_lists_deduplicated_platform_versions() {
    let (_server, config) = html_server(SourceKind::Html).await;
    let source = config.build_source();
    let mut buf = Vec::new();

    commands::print_sdk_versions(source.as_ref(), None, &mut buf)
        .await
        .unwrap();

    assert_eq!(lines(buf), vec!["1.17rc1", "1.20.10", "1.21.3", "1.22rc1"]);
}

#[tokio::test]
async fn html_source_index_resolves_constraint() {
    let (_server, config) = html_server(SourceKind::HtmlSource).await;
    let source = config.build_source();

    let result = resolve(source.as_ref(), "<1.21").await.unwrap();

    assert_eq!(result, Resolution::Resolved("1.20.10".to_string()));
}

#[tokio::test]
async fn unreachable_catalog_is_an_error() {
    let config = CatalogConfig::new(SourceKind::Json, Some("http://127.0.0.1:9/".to_string()));
    let source = config.build_source();

    let result = resolve(source.as_ref(), ">=1.18").await;

    assert!(result.is_err());
}
