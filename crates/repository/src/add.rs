//! Deriving and inserting a new version entry.

use anyhow::{Context, bail};
use vpm_manifest::{PackageRecord, Repository, Version, validate};

/// Outcome of a successful version append.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AddedVersion {
    /// The version string that was appended.
    pub version: String,
    /// The latest pre-existing version the new entry was copied from.
    pub base: String,
}

/// Pick the package record to update.
///
/// The repository format allows any number of packages, so a specific
/// identifier must be requested unless the manifest lists exactly one.
pub fn resolve_package<'a>(
    repository: &'a Repository,
    requested: Option<&str>,
) -> anyhow::Result<&'a str> {
    let available = || {
        repository
            .packages
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    match requested {
        Some(id) => match repository.packages.get_key_value(id) {
            Some((key, _)) => Ok(key.as_str()),
            None => bail!(
                "package '{id}' not found in manifest; available packages: {}",
                available()
            ),
        },
        None => {
            let mut keys = repository.packages.keys();
            match (keys.next(), keys.next()) {
                (Some(key), None) => Ok(key.as_str()),
                (None, _) => bail!("manifest contains no packages"),
                (Some(_), Some(_)) => bail!(
                    "manifest lists more than one package; specify one of: {}",
                    available()
                ),
            }
        }
    }
}

/// Append `new_version` to `package`'s version map, deriving the entry from
/// the current latest version.
///
/// The latest entry is deep-copied, its `version` field is overwritten, and
/// the first occurrence of the old version inside its `url` is replaced with
/// the new one. The new entry lands directly after the one it was copied
/// from, so the map's order keeps reflecting recency even when the latest
/// entry was not last. Nothing is mutated until every guard has passed.
pub fn add_version(
    repository: &mut Repository,
    package: &str,
    new_version: &str,
) -> anyhow::Result<AddedVersion> {
    // Validate the new version before looking at the file contents at all.
    let version = Version::parse(new_version)?;
    tracing::debug!(
        version = new_version,
        prerelease = version.is_prerelease(),
        "validated new version"
    );

    if let Err(errors) = validate(repository) {
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        bail!("manifest failed validation: {details}");
    }

    let record = repository
        .packages
        .get_mut(package)
        .with_context(|| format!("package '{package}' not found in manifest"))?;

    if record.versions.contains_key(new_version) {
        bail!("version {new_version} already exists");
    }

    let latest = latest_version(record)?;
    let mut entry = record
        .versions
        .get(latest.as_str())
        .cloned()
        .with_context(|| format!("latest version '{latest}' has no entry"))?;

    entry.version = new_version.to_owned();
    if let Some(url) = entry.url.as_mut() {
        if !url.contains(latest.as_str()) {
            bail!("latest version '{latest}' not found in URL '{url}'");
        }
        // First occurrence only: the version may legitimately appear again
        // later in the URL (a file name repeating it, for instance).
        *url = url.replacen(latest.as_str(), new_version, 1);
    }
    tracing::debug!(base = %latest, version = new_version, "derived new version entry");

    let index = record
        .versions
        .get_index_of(latest.as_str())
        .map_or(record.versions.len(), |index| index + 1);
    record
        .versions
        .shift_insert(index, new_version.to_owned(), entry);

    Ok(AddedVersion {
        version: new_version.to_owned(),
        base: latest,
    })
}

/// Find the key of the latest version in the record.
///
/// Every key must parse; an unparsable key would make "latest" meaningless.
/// Ties (distinct keys that parse equal) resolve to the key listed first.
fn latest_version(record: &PackageRecord) -> anyhow::Result<String> {
    let mut latest: Option<(&String, Version)> = None;
    for key in record.versions.keys() {
        let parsed = Version::parse(key)
            .with_context(|| format!("manifest contains an invalid version key '{key}'"))?;
        let is_newer = match &latest {
            Some((_, current)) => parsed > *current,
            None => true,
        };
        if is_newer {
            latest = Some((key, parsed));
        }
    }
    let (key, _) = latest.context("package has no versions to copy from")?;
    Ok(key.clone())
}
