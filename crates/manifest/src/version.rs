//! Version parsing and ordering for repository version keys.
//!
//! Versions use numeric dot notation with an optional prerelease suffix
//! (`0.3.1`, `1.2.0-beta.1`). Precedence follows the semantic-versioning
//! rules: release components compare numerically position by position,
//! prerelease identifiers compare numerically when all-digit and lexically
//! otherwise, and a stable release sorts after any prerelease that shares
//! its numeric core.

use std::cmp::Ordering;
use std::str::FromStr;

/// Error type for version parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// The string does not follow numeric dot notation.
    #[error(
        "version '{0}' is invalid; use numeric dot notation, optionally with a prerelease suffix (example: 0.5.3-beta or 0.5.3-beta.1)"
    )]
    Syntax(String),
    /// A prerelease identifier was empty.
    #[error("prerelease identifier must not be empty")]
    EmptyIdentifier,
    /// A prerelease identifier contains characters outside `[0-9A-Za-z-]`.
    #[error("invalid prerelease identifier '{0}'; only [0-9A-Za-z-] is allowed")]
    InvalidIdentifier(String),
    /// An all-digit prerelease identifier has a leading zero.
    #[error("invalid numeric prerelease identifier '{0}': leading zeroes are not allowed")]
    LeadingZero(String),
}

/// A single dot-separated prerelease identifier.
///
/// The derived ordering is load-bearing: `Numeric` sorts before `Alpha`,
/// numeric identifiers compare by value and alphanumeric ones by ASCII
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Identifier {
    Numeric(u64),
    Alpha(String),
}

impl Identifier {
    fn parse(identifier: &str) -> Result<Self, VersionError> {
        if identifier.is_empty() {
            return Err(VersionError::EmptyIdentifier);
        }
        if !identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(VersionError::InvalidIdentifier(identifier.to_owned()));
        }
        if identifier.bytes().all(|b| b.is_ascii_digit()) {
            if identifier.len() > 1 && identifier.starts_with('0') {
                return Err(VersionError::LeadingZero(identifier.to_owned()));
            }
            let value = identifier
                .parse()
                .map_err(|_| VersionError::InvalidIdentifier(identifier.to_owned()))?;
            return Ok(Identifier::Numeric(value));
        }
        Ok(Identifier::Alpha(identifier.to_owned()))
    }
}

/// A parsed version, ordered by semantic-version precedence.
///
/// # Example
///
/// ```rust
/// use vpm_manifest::Version;
///
/// let old: Version = "0.3.1".parse().unwrap();
/// let new: Version = "0.3.2".parse().unwrap();
/// assert!(old < new);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Version {
    /// Numeric core components (`1.2.3` parses to `[1, 2, 3]`).
    release: Vec<u64>,
    /// Prerelease identifiers; empty for stable releases.
    prerelease: Vec<Identifier>,
}

impl Version {
    /// Parse a version string.
    ///
    /// Equivalent to [`str::parse`]; provided so call sites can name the
    /// error type without spelling out the `FromStr` machinery.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        version.parse()
    }

    /// Whether this version carries a prerelease suffix.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let (core, suffix) = match version.split_once('-') {
            Some((core, suffix)) => (core, Some(suffix)),
            None => (version, None),
        };

        if core.is_empty() {
            return Err(VersionError::Syntax(version.to_owned()));
        }
        let release = core
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::Syntax(version.to_owned()));
                }
                part.parse()
                    .map_err(|_| VersionError::Syntax(version.to_owned()))
            })
            .collect::<Result<Vec<u64>, VersionError>>()?;

        let prerelease = match suffix {
            None => Vec::new(),
            Some("") => return Err(VersionError::Syntax(version.to_owned())),
            Some(suffix) => suffix
                .split('.')
                .map(Identifier::parse)
                .collect::<Result<Vec<_>, VersionError>>()?,
        };

        Ok(Self {
            release,
            prerelease,
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release.cmp(&other.release).then_with(|| {
            match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                // Stable releases sort after prerelease entries with the
                // same core.
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.prerelease.cmp(&other.prerelease),
            }
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
