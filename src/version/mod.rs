//! Go release catalog: fetching, normalizing and resolving SDK versions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Catalog   │────▶│  Resolver   │
//! │  (fetch)    │     │(dedup, sort)│     │ (constraint)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Sources   │     │   Semver    │
//! │ (json,html) │     │ (normalize) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Catalog source trait for fetching releases from a remote index
//! - [`sources`]: Concrete sources (JSON feed, scraped HTML index)
//! - [`catalog`]: Deduplicated, sorted release catalog
//! - [`resolver`]: Exact version and constraint resolution
//! - [`semver`]: Go version normalization and rendering
//! - [`types`]: Release data model
//! - [`error`]: Error types for versions, catalog fetches and the local toolchain

pub mod catalog;
pub mod error;
pub mod resolver;
pub mod semver;
pub mod source;
pub mod sources;
pub mod types;
