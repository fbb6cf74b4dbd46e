//! Manifest format types for VPM package repositories.
//!
//! This crate provides types for parsing and serializing VPM repository
//! manifests (`vpm-repo.json`), together with the version ordering used to
//! pick a package's latest entry.
//!
//! # Example: Parsing a Repository
//!
//! ```rust
//! use vpm_manifest::Repository;
//!
//! let json = r#"{
//!     "name": "Example Repo",
//!     "packages": {
//!         "com.example.tool": {
//!             "versions": {
//!                 "0.3.1": {
//!                     "version": "0.3.1",
//!                     "url": "https://example.com/0.3.1/tool.zip"
//!                 }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let repository: Repository = serde_json::from_str(json).unwrap();
//! assert_eq!(repository.packages.len(), 1);
//! ```
//!
//! # Example: Ordering Versions
//!
//! ```rust
//! use vpm_manifest::Version;
//!
//! let stable: Version = "1.2.0".parse().unwrap();
//! let beta: Version = "1.2.0-beta.1".parse().unwrap();
//! assert!(beta < stable);
//! ```

#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

mod repository;
mod validation;
mod version;

pub use repository::{PackageRecord, Repository, VersionEntry};
pub use validation::{ValidationError, validate};
pub use version::{Version, VersionError};
