//! Reading and writing the repository manifest file.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tempfile::NamedTempFile;
use vpm_manifest::Repository;

/// Read and deserialize the repository manifest at `path`.
pub fn load(path: &Path) -> anyhow::Result<Repository> {
    if !path.exists() {
        let mut message = format!("input file not found: {}.", path.display());
        if let Some(hint) = json_candidates_hint() {
            message.push(' ');
            message.push_str(&hint);
        }
        anyhow::bail!(message);
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    let repository = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid repository manifest", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded repository manifest");
    Ok(repository)
}

/// List the `*.json` files in the current directory, so a mistyped `--path`
/// points the user at the likely candidates.
fn json_candidates_hint() -> Option<String> {
    let entries = fs::read_dir(".").ok()?;
    let mut candidates: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.sort();
    Some(format!(
        "Available JSON files in current directory: {}.",
        candidates.join(", ")
    ))
}

/// Serialize the repository as UTF-8 JSON, 4-space indented, with a trailing
/// newline.
pub fn to_json_bytes(repository: &Repository) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4096);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    repository
        .serialize(&mut serializer)
        .context("could not serialize the repository manifest")?;
    buf.push(b'\n');
    Ok(buf)
}

/// Atomically write the repository manifest to `path`.
///
/// The manifest is serialized into a temporary file in the destination
/// directory and renamed over the destination, so an interrupted run leaves
/// the destination untouched. Missing parent directories are created first.
pub fn save(repository: &Repository, path: &Path) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("could not create {}", parent.display()))?;

    let bytes = to_json_bytes(repository)?;
    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("could not create a temporary file in {}", parent.display()))?;
    file.write_all(&bytes)
        .context("could not write the temporary manifest file")?;
    file.persist(path)
        .with_context(|| format!("could not replace {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote repository manifest");
    Ok(())
}
