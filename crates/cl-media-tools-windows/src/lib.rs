//! Windows-specific implementation for cl-media-tools.
//!
//! The build triple is taken from the banner printed by `ver`, e.g.
//! `Microsoft Windows [Version 10.0.22631.3296]` yields `10.0.22631.3296`.

#![cfg(target_os = "windows")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::Command;

use thiserror::Error;

/// Errors raised while probing the host version.
#[derive(Debug, Error)]
pub enum VersionError {
    /// `cmd /C ver` could not be launched.
    #[error("failed to run ver: {0}")]
    Spawn(#[from] std::io::Error),

    /// The banner did not contain a `[Version ...]` block.
    #[error("unrecognized ver output: {0}")]
    Unrecognized(String),
}

/// Get the platform name.
#[must_use]
pub fn platform_name() -> &'static str {
    "Windows"
}

/// Get the version of the running system.
///
/// # Errors
///
/// Returns an error if `ver` cannot be run or its output has no version.
pub fn os_version() -> Result<String, VersionError> {
    let output = Command::new("cmd").args(["/C", "ver"]).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::trace!(output = %stdout.trim(), "cmd /C ver");
    parse_ver_banner(&stdout).ok_or_else(|| VersionError::Unrecognized(stdout.trim().to_string()))
}

/// Extract the dotted version from the `ver` banner.
#[must_use]
pub fn parse_ver_banner(banner: &str) -> Option<String> {
    let start = banner.find('[')? + 1;
    let end = start + banner[start..].find(']')?;
    let version = banner[start..end].trim().rsplit(' ').next()?.trim();
    if version.is_empty() || !version.starts_with(|c: char| c.is_ascii_digit()) {
        None
    } else {
        Some(version.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name(), "Windows");
    }

    #[test]
    fn test_parse_ver_banner() {
        let banner = "\r\nMicrosoft Windows [Version 10.0.22631.3296]\r\n";
        assert_eq!(parse_ver_banner(banner).as_deref(), Some("10.0.22631.3296"));
    }

    #[test]
    fn test_parse_localized_banner() {
        let banner = "Microsoft Windows [Versión 10.0.19045.4170]";
        assert_eq!(parse_ver_banner(banner).as_deref(), Some("10.0.19045.4170"));
    }

    #[test]
    fn test_parse_unrecognized_banner() {
        assert!(parse_ver_banner("").is_none());
        assert!(parse_ver_banner("Microsoft Windows").is_none());
        assert!(parse_ver_banner("[Version ]").is_none());
    }

    #[test]
    fn test_os_version_not_empty() {
        let version = os_version().expect("cmd is always available on windows");
        assert!(!version.is_empty());
    }
}
