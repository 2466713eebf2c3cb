//! macOS-specific implementation for cl-media-tools.
//!
//! The product version (for example `14.4.1`) is obtained from `sw_vers`,
//! which reads it from the system version property list.

#![cfg(target_os = "macos")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::Command;

use thiserror::Error;

const SW_VERS: &str = "/usr/bin/sw_vers";

/// Errors raised while probing the host version.
#[derive(Debug, Error)]
pub enum VersionError {
    /// `sw_vers` could not be launched.
    #[error("failed to run sw_vers: {0}")]
    Spawn(#[from] std::io::Error),

    /// `sw_vers` exited unsuccessfully.
    #[error("sw_vers exited with {status}")]
    Status {
        /// Exit status description.
        status: String,
    },

    /// `sw_vers` printed nothing usable.
    #[error("sw_vers returned no product version")]
    Empty,
}

/// Get the platform name.
#[must_use]
pub fn platform_name() -> &'static str {
    "macOS"
}

/// Get the product version of the running system.
///
/// # Errors
///
/// Returns an error if `sw_vers` cannot be run or reports nothing.
pub fn os_version() -> Result<String, VersionError> {
    let output = Command::new(SW_VERS).arg("-productVersion").output()?;
    if !output.status.success() {
        return Err(VersionError::Status {
            status: output.status.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::trace!(output = %stdout.trim(), "sw_vers -productVersion");
    parse_product_version(&stdout).ok_or(VersionError::Empty)
}

/// Extract the product version from `sw_vers -productVersion` output.
#[must_use]
pub fn parse_product_version(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}
