//! Types for the VPM repository manifest (`vpm-repo.json`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The root structure of a repository manifest.
///
/// A repository lists one or more packages, each with a map of downloadable
/// versions. Top-level metadata fields (`name`, `author`, `url`, `id`, ...)
/// vary between repositories, so they are carried through untouched rather
/// than enumerated here.
///
/// # Example
///
/// ```json
/// {
///     "name": "Example Repo",
///     "id": "com.example.repo",
///     "packages": {
///         "com.example.tool": {
///             "versions": {}
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Repository {
    /// Repository metadata fields, kept in their original order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// The packages listed by this repository, keyed by package identifier.
    #[serde(default)]
    pub packages: IndexMap<String, PackageRecord>,
}

/// A single package's record within a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct PackageRecord {
    /// Package-level metadata fields, kept in their original order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Version entries keyed by version string, in file order.
    ///
    /// File order is meaningful: entries are expected to be listed oldest
    /// first, and a newly derived entry is inserted right after the one it
    /// was copied from.
    #[serde(default)]
    pub versions: IndexMap<String, VersionEntry>,
}

/// One version's metadata record within a package's version map.
///
/// Only `version` and `url` are interpreted; everything else (name,
/// displayName, unity, dependencies, ...) is opaque payload copied verbatim
/// when a new entry is derived from this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct VersionEntry {
    /// The version string; must equal the entry's key in the version map.
    pub version: String,

    /// Download URL for this version, when present. Expected to contain the
    /// version string as a substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Remaining entry fields, kept in their original order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        let json = r#"{
            "name": "Example Repo",
            "author": "example",
            "url": "https://example.com/vpm-repo.json",
            "id": "com.example.repo",
            "packages": {
                "com.example.tool": {
                    "versions": {
                        "0.3.0": {
                            "version": "0.3.0",
                            "url": "https://example.com/releases/0.3.0/tool.zip"
                        },
                        "0.3.1": {
                            "version": "0.3.1",
                            "url": "https://example.com/releases/0.3.1/tool.zip"
                        }
                    }
                }
            }
        }"#;

        let repository: Repository = serde_json::from_str(json).expect("Failed to parse manifest");

        assert_eq!(repository.extra.len(), 4);
        assert_eq!(
            repository.extra.get("name").and_then(Value::as_str),
            Some("Example Repo")
        );

        let record = repository
            .packages
            .get("com.example.tool")
            .expect("package missing");
        assert_eq!(record.versions.len(), 2);

        let entry = record.versions.get("0.3.1").expect("entry missing");
        assert_eq!(entry.version, "0.3.1");
        assert_eq!(
            entry.url.as_deref(),
            Some("https://example.com/releases/0.3.1/tool.zip")
        );
    }

    #[test]
    fn test_entry_preserves_unknown_fields() {
        let json = r#"{
            "name": "Converter Tool",
            "displayName": "Converter Tool",
            "version": "0.3.1",
            "unity": "2022.3",
            "url": "https://example.com/releases/0.3.1/tool.zip",
            "dependencies": {}
        }"#;

        let entry: VersionEntry = serde_json::from_str(json).expect("Failed to parse entry");

        assert_eq!(entry.version, "0.3.1");
        assert_eq!(entry.extra.len(), 4);
        let keys: Vec<_> = entry.extra.keys().collect();
        assert_eq!(keys, ["name", "displayName", "unity", "dependencies"]);
    }

    #[test]
    fn test_entry_without_url_skips_field() {
        let entry = VersionEntry {
            version: "1.0.0".to_string(),
            url: None,
            extra: Map::new(),
        };

        let json = serde_json::to_string(&entry).expect("Failed to serialize entry");

        assert!(!json.contains("url"));
    }

    #[test]
    fn test_versions_keep_file_order() {
        let json = r#"{
            "versions": {
                "0.2.0": { "version": "0.2.0" },
                "0.1.0": { "version": "0.1.0" },
                "0.3.0": { "version": "0.3.0" }
            }
        }"#;

        let record: PackageRecord = serde_json::from_str(json).expect("Failed to parse record");

        let keys: Vec<_> = record.versions.keys().collect();
        assert_eq!(keys, ["0.2.0", "0.1.0", "0.3.0"]);
    }

    #[test]
    fn test_missing_packages_defaults_to_empty() {
        let repository: Repository =
            serde_json::from_str(r#"{ "name": "Empty" }"#).expect("Failed to parse manifest");

        assert!(repository.packages.is_empty());
        assert_eq!(repository.extra.len(), 1);
    }
}
