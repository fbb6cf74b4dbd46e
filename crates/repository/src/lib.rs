//! Stateful operations for maintaining VPM repository manifests on disk.
//!
//! The flow mirrors how the manifest is maintained by hand: [`load`] the
//! file, [`add_version`] a new entry derived from the latest one, then
//! [`save`] the result atomically so an interrupted run never corrupts the
//! destination.

mod add;
mod document;

pub use add::{AddedVersion, add_version, resolve_package};
pub use document::{load, save, to_json_bytes};
