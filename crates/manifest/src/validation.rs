//! Validation of repository manifest invariants.

use crate::Repository;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A version entry's `version` field does not match its map key.
    #[error("package '{package}': entry version '{version}' does not match key '{key}'")]
    VersionKeyMismatch {
        /// The package whose version map holds the offending entry.
        package: String,
        /// The key under which the entry is stored.
        key: String,
        /// The `version` field recorded inside the entry.
        version: String,
    },
}

/// Validates that every version entry matches its map key.
///
/// Entries where the map key and the embedded `version` field disagree are
/// ambiguous about which version they describe, so any mutation of the
/// manifest must be refused until they are fixed by hand.
///
/// # Example
///
/// ```rust
/// use vpm_manifest::{Repository, validate};
///
/// let json = r#"{
///     "packages": {
///         "com.example.tool": {
///             "versions": {
///                 "0.3.1": { "version": "0.3.1" }
///             }
///         }
///     }
/// }"#;
///
/// let repository: Repository = serde_json::from_str(json).unwrap();
/// assert!(validate(&repository).is_ok());
/// ```
///
/// # Errors
///
/// Returns every mismatch found across all packages. An `Ok(())` result
/// means the manifest is safe to mutate.
pub fn validate(repository: &Repository) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (package, record) in &repository.packages {
        for (key, entry) in &record.versions {
            if entry.version != *key {
                errors.push(ValidationError::VersionKeyMismatch {
                    package: package.clone(),
                    key: key.clone(),
                    version: entry.version.clone(),
                });
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(json: &str) -> Repository {
        serde_json::from_str(json).expect("Failed to parse manifest")
    }

    #[test]
    fn test_validate_success() {
        let repository = repository(
            r#"{
                "packages": {
                    "com.example.tool": {
                        "versions": {
                            "0.3.0": { "version": "0.3.0" },
                            "0.3.1": { "version": "0.3.1" }
                        }
                    }
                }
            }"#,
        );

        assert!(validate(&repository).is_ok());
    }

    #[test]
    fn test_validate_mismatched_entry() {
        let repository = repository(
            r#"{
                "packages": {
                    "com.example.tool": {
                        "versions": {
                            "0.3.1": { "version": "0.3.0" }
                        }
                    }
                }
            }"#,
        );

        let errors = validate(&repository).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first(),
            Some(&ValidationError::VersionKeyMismatch {
                package: "com.example.tool".to_string(),
                key: "0.3.1".to_string(),
                version: "0.3.0".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_reports_all_mismatches() {
        let repository = repository(
            r#"{
                "packages": {
                    "com.example.tool": {
                        "versions": {
                            "0.1.0": { "version": "0.2.0" }
                        }
                    },
                    "com.example.other": {
                        "versions": {
                            "1.0.0": { "version": "1.0.0" },
                            "1.1.0": { "version": "1.1.1" }
                        }
                    }
                }
            }"#,
        );

        let errors = validate(&repository).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_empty() {
        let repository = repository(r#"{ "packages": {} }"#);
        assert!(validate(&repository).is_ok());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::VersionKeyMismatch {
            package: "com.example.tool".to_string(),
            key: "0.3.1".to_string(),
            version: "0.3.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "package 'com.example.tool': entry version '0.3.0' does not match key '0.3.1'"
        );
    }
}
