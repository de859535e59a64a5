//! Storage key validation for the artifact store.
//!
//! Keys map onto filesystem paths in the filesystem backend, so they are
//! validated against directory traversal before any I/O.

use anyhow::{Result, bail};
use std::path::{Component, Path, PathBuf};

/// Validates and normalizes a storage key.
///
/// Rejects keys that are empty, absolute, or contain `..` components.
pub(crate) fn validate_key(key: &str) -> Result<PathBuf> {
    if key.is_empty() {
        bail!("Storage key cannot be empty");
    }

    let path = Path::new(key);

    if path.is_absolute() {
        bail!("Storage key cannot be absolute: {key}");
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => normalized.push(name),
            Component::CurDir => {},
            Component::ParentDir => bail!("Storage key cannot contain '..': {key}"),
            Component::RootDir | Component::Prefix(_) => {
                bail!("Storage key cannot contain root or prefix: {key}")
            },
        }
    }

    if normalized.as_os_str().is_empty() {
        bail!("Storage key normalized to empty path");
    }

    Ok(normalized)
}

/// Returns the filesystem path for an artifact under a base directory.
pub(crate) fn object_path(base_dir: &Path, key: &str) -> Result<PathBuf> {
    let normalized = validate_key(key)?;
    Ok(base_dir.join(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_keys() {
        assert!(validate_key("processed/inv-1.pdf").is_ok());
        assert!(validate_key("approved/2024/inv-2.pdf").is_ok());
    }

    #[test]
    fn rejects_traversal_and_absolute() {
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("processed/../../etc/passwd").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("").is_err());
    }
}
