//! Release data model shared by catalog sources and the resolver

use serde::Deserialize;

use crate::version::semver::GoVersion;

/// Kind of a downloadable release file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Archive,
    Installer,
    Source,
    #[serde(other)]
    Unknown,
}

/// One downloadable file of a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseFile {
    pub filename: String,
    pub os: String,
    pub arch: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "sha256", default)]
    pub checksum: String,
    #[serde(default)]
    pub size: u64,
    pub kind: FileKind,
}

/// A published release with its canonical version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Version as published, distribution prefix stripped (`1.21.3`, `1.17rc1`)
    pub display: String,
    pub version: GoVersion,
    pub stable: bool,
    pub files: Vec<ReleaseFile>,
}

impl Release {
    pub fn new(display: impl Into<String>, version: GoVersion, stable: bool) -> Self {
        Self {
            display: display.into(),
            version,
            stable,
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<ReleaseFile>) -> Self {
        self.files = files;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn release_file_deserializes_feed_entry() {
        let file = serde_json::from_value::<ReleaseFile>(json!({
            "filename": "go1.21.3.linux-amd64.tar.gz",
            "os": "linux",
            "arch": "amd64",
            "version": "go1.21.3",
            "sha256": "1241381b2843fae5a9707eec1f8fb2ef94d827990582c7c7c32f5bdfbfd420c8",
            "size": 66639663,
            "kind": "archive"
        }))
        .unwrap();

        assert_eq!(file.filename, "go1.21.3.linux-amd64.tar.gz");
        assert_eq!(file.size, 66639663);
        assert_eq!(file.kind, FileKind::Archive);
        assert!(file.checksum.starts_with("1241381b"));
    }

    #[test]
    fn release_file_with_unknown_kind_deserializes() {
        let file = serde_json::from_value::<ReleaseFile>(json!({
            "filename": "go1.21.3.linux-amd64.tar.gz.asc",
            "os": "linux",
            "arch": "amd64",
            "kind": "signature"
        }))
        .unwrap();

        assert_eq!(file.kind, FileKind::Unknown);
        assert_eq!(file.size, 0);
    }
}
