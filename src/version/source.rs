//! Catalog source trait for fetching Go releases from a remote index

#[cfg(test)]
use mockall::automock;

use crate::version::error::CatalogError;
use crate::version::types::Release;

/// Trait for fetching the release catalog from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every release the source lists for the running platform
    ///
    /// Issues exactly one request. Entries whose version cannot be normalized
    /// are logged and skipped.
    ///
    /// # Returns
    /// * `Ok(Vec<Release>)` - Releases in the order the source lists them (unsorted, may repeat)
    /// * `Err(CatalogError)` - If the request fails or the body cannot be decoded
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError>;
}
