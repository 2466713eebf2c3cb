//! Host platform identification.
//!
//! The version handler never talks to the operating system directly; it asks a
//! [`HostPlatform`]. [`NativeHost`] forwards to the per-OS crate compiled in
//! for the current target, [`StaticHost`] reports fixed values, and
//! [`OverrideHost`] replaces individual fields from configuration.

use std::fmt;

use crate::config::HostConfig;

#[cfg(target_os = "linux")]
use cl_media_tools_linux as platform;

#[cfg(target_os = "macos")]
use cl_media_tools_mac as platform;

#[cfg(target_os = "windows")]
use cl_media_tools_windows as platform;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod platform {
    pub fn platform_name() -> &'static str {
        std::env::consts::OS
    }

    pub fn os_version() -> Result<String, std::io::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no version probe for this target",
        ))
    }
}

/// Version reported when the host probe fails.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Source of the platform-name prefix and OS version string.
pub trait HostPlatform: Send + Sync {
    /// Fixed name of the operating system family, e.g. `"Linux"`.
    fn platform_name(&self) -> String;

    /// Version string as reported by the host. Never empty.
    fn os_version(&self) -> String;
}

/// The operating system this binary was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl HostPlatform for NativeHost {
    fn platform_name(&self) -> String {
        platform::platform_name().to_string()
    }

    fn os_version(&self) -> String {
        version_or_unknown(platform::os_version())
    }
}

/// The probed version, or [`UNKNOWN_VERSION`] with a warning if the probe failed.
pub(crate) fn version_or_unknown<E: fmt::Display>(probe: Result<String, E>) -> String {
    match probe {
        Ok(version) => version,
        Err(err) => {
            tracing::warn!(error = %err, fallback = UNKNOWN_VERSION, "host version probe failed");
            UNKNOWN_VERSION.to_string()
        }
    }
}

/// A host with fixed answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost {
    platform_name: String,
    os_version: String,
}

impl StaticHost {
    /// Create a host reporting the given name and version.
    #[must_use]
    pub fn new(platform_name: impl Into<String>, os_version: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            os_version: os_version.into(),
        }
    }
}

impl HostPlatform for StaticHost {
    fn platform_name(&self) -> String {
        self.platform_name.clone()
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }
}

/// Wraps another host, replacing whichever fields are set.
#[derive(Debug, Clone)]
pub struct OverrideHost<H> {
    inner: H,
    platform_name: Option<String>,
    os_version: Option<String>,
}

impl<H: HostPlatform> OverrideHost<H> {
    /// Apply the `[host]` configuration section on top of `inner`.
    #[must_use]
    pub fn new(inner: H, config: &HostConfig) -> Self {
        Self {
            inner,
            platform_name: config.platform_name.clone(),
            os_version: config.os_version.clone(),
        }
    }
}

impl<H: HostPlatform> HostPlatform for OverrideHost<H> {
    fn platform_name(&self) -> String {
        self.platform_name
            .clone()
            .unwrap_or_else(|| self.inner.platform_name())
    }

    fn os_version(&self) -> String {
        self.os_version
            .clone()
            .unwrap_or_else(|| self.inner.os_version())
    }
}
