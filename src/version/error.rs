use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Malformed version '{input}': {source}")]
    Malformed {
        input: String,
        #[source]
        source: semver::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("{0:?} not yet supported")]
    UnsupportedPlatform(String),

    #[error("can't find user home directory; {0} is empty")]
    HomeNotFound(&'static str),

    #[error("go command failed: {0}")]
    GoCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
