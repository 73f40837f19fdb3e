//! Go release version parsing and rendering
//!
//! Go publishes versions in two spellings:
//! - Standard semver: `1.21.3`, `1.21.0`
//! - Legacy spelling with an attached suffix and an optional patch: `1.17rc1`, `1.9.2rc2`
//!
//! Both are normalized into a [`GoVersion`], which renders back in the
//! distribution's own convention (`1.17rc1`, not `1.17.0-rc1`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::{Prerelease, Version};

use crate::config::DISTRIBUTION_PREFIX;
use crate::version::error::VersionError;

/// `major.minor[.patch]suffix` with the suffix glued on without a separator
static LEGACY_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?([A-Za-z][0-9A-Za-z]*)$")
        .expect("legacy version pattern is valid")
});

/// Canonical, totally ordered Go release version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoVersion(Version);

impl GoVersion {
    /// Parse a version string whose distribution prefix is already stripped.
    ///
    /// Strict parsing is tried first (partial versions like `1.21` are padded
    /// with zeros). On failure the legacy spelling is rewritten to
    /// `major.minor.patch-suffix` and parsed again. If both fail, the error
    /// from the strict attempt is reported.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let strict_err = match parse_padded(input) {
            Ok(version) => return Ok(Self(version)),
            Err(e) => e,
        };

        if let Some(caps) = LEGACY_VERSION.captures(input) {
            let patch = caps.get(3).map_or("0", |m| m.as_str());
            let rewritten = format!("{}.{}.{}-{}", &caps[1], &caps[2], patch, &caps[4]);
            if let Ok(version) = Version::parse(&rewritten) {
                return Ok(Self(version));
            }
        }

        Err(VersionError::Malformed {
            input: input.to_string(),
            source: strict_err,
        })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Prerelease suffix, if any (`rc1`, `beta2`)
    pub fn prerelease(&self) -> Option<&str> {
        (!self.0.pre.is_empty()).then(|| self.0.pre.as_str())
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

/// Pads `1` and `1.2` to three components before strict parsing
fn parse_padded(input: &str) -> Result<Version, semver::Error> {
    let (core, rest) = match input.find(['-', '+']) {
        Some(idx) => input.split_at(idx),
        None => (input, ""),
    };
    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, rest),
        2 => format!("{}.0{}", core, rest),
        _ => input.to_string(),
    };
    Version::parse(&padded)
}

/// Whether a suffix can be glued to the numeric part and still parse back
fn is_compact_suffix(pre: &Prerelease) -> bool {
    pre.as_str()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && pre.as_str().chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0;
        let pre = &v.pre;
        if pre.is_empty() {
            if v.patch == 0 {
                write!(f, "{}.{}", v.major, v.minor)
            } else {
                write!(f, "{}.{}.{}", v.major, v.minor, v.patch)
            }
        } else if is_compact_suffix(pre) {
            if v.patch == 0 {
                write!(f, "{}.{}{}", v.major, v.minor, pre)
            } else {
                write!(f, "{}.{}.{}{}", v.major, v.minor, v.patch, pre)
            }
        } else {
            write!(f, "{}.{}.{}-{}", v.major, v.minor, v.patch, pre)
        }
    }
}

impl FromStr for GoVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for GoVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GoVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Strip the `go` distribution prefix from a published version (`go1.21.3` -> `1.21.3`)
pub fn strip_distribution_prefix(version: &str) -> &str {
    version.strip_prefix(DISTRIBUTION_PREFIX).unwrap_or(version)
}
