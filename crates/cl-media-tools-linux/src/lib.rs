//! Linux-specific implementation for cl-media-tools
//!
//! Reports the running kernel's version string, the same value `uname(2)`
//! exposes in its `version` field.

#![cfg(target_os = "linux")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use thiserror::Error;

/// procfs mirror of `utsname.version`.
const KERNEL_VERSION_PATH: &str = "/proc/sys/kernel/version";

/// Errors raised while probing the host version.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The procfs entry could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: &'static str,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The kernel reported an empty version string.
    #[error("kernel reported an empty version string")]
    Empty,
}

/// Get platform name
#[must_use]
pub fn platform_name() -> &'static str {
    "Linux"
}

/// Get the kernel version string.
///
/// # Errors
///
/// Returns an error if `/proc/sys/kernel/version` cannot be read or is empty.
pub fn os_version() -> Result<String, VersionError> {
    let raw = read_version_from(Path::new(KERNEL_VERSION_PATH)).map_err(|source| {
        VersionError::Read {
            path: KERNEL_VERSION_PATH,
            source,
        }
    })?;
    parse_kernel_version(&raw).ok_or(VersionError::Empty)
}

fn read_version_from(path: &Path) -> std::io::Result<String> {
    let raw = std::fs::read_to_string(path)?;
    tracing::trace!(path = %path.display(), "read kernel version");
    Ok(raw)
}

/// Normalize the raw procfs contents into a version string.
///
/// Returns `None` when nothing but whitespace was reported.
#[must_use]
pub fn parse_kernel_version(raw: &str) -> Option<String> {
    let version = raw.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}
