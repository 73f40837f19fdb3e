//! Resolve a version query against the release catalog
//!
//! A query is either an exact version (echoed back without touching the
//! network) or a constraint such as `>=1.18, <1.20 || ~1.21`, which picks the
//! newest catalog release that satisfies it.

use std::fmt;

use semver::VersionReq;
use tracing::{debug, info};

use crate::version::catalog::{Catalog, SortOrder};
use crate::version::error::CatalogError;
use crate::version::semver::GoVersion;
use crate::version::source::CatalogSource;

/// Outcome of resolving a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The query already was an exact version
    Exact(String),
    /// A catalog release satisfied the constraint
    Resolved(String),
    /// Nothing matched, or the query is neither a version nor a constraint.
    /// Holds the original query.
    Unresolved(String),
}

impl Resolution {
    /// The string to print. Unresolved queries are echoed unchanged, so
    /// callers that need strict validation must check [`Resolution::is_resolved`].
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Exact(v) | Resolution::Resolved(v) | Resolution::Unresolved(v) => {
                v.as_str()
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved(_))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators, longest first so `>=` wins over `>`
const OPERATORS: [&str; 7] = [">=", "<=", ">", "<", "=", "~", "^"];

/// Version constraint: `||`-separated alternatives of comparators joined by
/// commas or whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    alternatives: Vec<VersionReq>,
}

impl Constraint {
    /// Parse a constraint expression, returning `None` if any alternative is invalid
    pub fn parse(expr: &str) -> Option<Self> {
        let alternatives = expr
            .split("||")
            .map(|alt| VersionReq::parse(&normalize_alternative(alt)?).ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { alternatives })
    }

    pub fn matches(&self, version: &GoVersion) -> bool {
        self.alternatives
            .iter()
            .any(|req| req.matches(version.as_semver()))
    }

    /// Newest release in a descending catalog satisfying this constraint
    pub fn newest_match<'a>(&self, catalog: &'a Catalog) -> Option<&'a str> {
        catalog
            .iter()
            .find(|release| self.matches(&release.version))
            .map(|release| release.display.as_str())
    }
}

/// Rewrite one alternative into `VersionReq` syntax.
///
/// Operators may be detached from their operand (`>= 1.18`). Returns `None`
/// for an empty alternative or a dangling operator.
fn normalize_alternative(alt: &str) -> Option<String> {
    let mut comparators = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in alt
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if OPERATORS.contains(&token) {
            if pending_op.replace(token).is_some() {
                return None;
            }
            continue;
        }
        let comparator = match pending_op.take() {
            Some(op) => format!("{}{}", op, token),
            None => token.to_string(),
        };
        comparators.push(normalize_comparator(&comparator));
    }

    if pending_op.is_some() || comparators.is_empty() {
        return None;
    }
    Some(comparators.join(", "))
}

/// Compare against the exact release Go spells the operand as.
///
/// `1.20` is a release (1.20.0), so `=1.20`, `<=1.20`, `>1.20` and `<1.20`
/// bound at 1.20.0, and `1.21rc1` means 1.21.0-rc1. A bare partial version
/// matches its minor series, a bare full version matches exactly. Tilde,
/// caret and wildcards keep their `VersionReq` meaning.
fn normalize_comparator(comparator: &str) -> String {
    let op = OPERATORS
        .iter()
        .copied()
        .find(|op| comparator.starts_with(op))
        .unwrap_or("");
    let operand = &comparator[op.len()..];

    match (op, GoVersion::parse(operand)) {
        (">=" | "<=" | ">" | "<" | "=", Ok(version)) => {
            format!("{}{}", op, version.as_semver())
        }
        ("", Ok(_)) if is_partial(operand) => format!("~{}", operand),
        ("", Ok(version)) => format!("={}", version.as_semver()),
        _ => comparator.to_string(),
    }
}

/// `1` or `1.20`, without patch or suffix
fn is_partial(operand: &str) -> bool {
    let parts: Vec<&str> = operand.split('.').collect();
    parts.len() < 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Resolve a query. The catalog is fetched only for constraint queries.
pub async fn resolve(
    source: &dyn CatalogSource,
    query: &str,
) -> Result<Resolution, CatalogError> {
    if GoVersion::parse(query).is_ok() {
        debug!("'{}' is an exact version", query);
        return Ok(Resolution::Exact(query.to_string()));
    }

    let Some(constraint) = Constraint::parse(query) else {
        debug!("'{}' is neither a version nor a constraint", query);
        return Ok(Resolution::Unresolved(query.to_string()));
    };

    let catalog = Catalog::build(source.fetch_releases().await?, SortOrder::Descending);
    match constraint.newest_match(&catalog) {
        Some(version) => Ok(Resolution::Resolved(version.to_string())),
        None => {
            info!("No release satisfies '{}'", query);
            Ok(Resolution::Unresolved(query.to_string()))
        }
    }
}
