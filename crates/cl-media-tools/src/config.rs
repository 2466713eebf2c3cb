//! Configuration management for cl-media-tools.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::fmt;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::channel::{ChannelName, DEFAULT_CHANNEL};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "cl-media-tools";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CL_MEDIA_TOOLS_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CL_MEDIA_TOOLS_`, sections split
///    on `__`, e.g. `CL_MEDIA_TOOLS_HOST__OS_VERSION`)
/// 2. TOML config file at `~/.config/cl-media-tools/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Channel configuration.
    pub channel: ChannelConfig,
    /// Host reporting overrides.
    pub host: HostConfig,
}

/// Channel-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Identifier the handler is registered under.
    pub name: String,
}

/// Overrides for what the host reports.
///
/// Unset fields fall through to the native probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Replaces the platform-name prefix, e.g. `"iOS"`.
    #[serde(deserialize_with = "platform_name_override")]
    pub platform_name: Option<String>,
    /// Replaces the reported OS version.
    #[serde(deserialize_with = "os_version_override")]
    pub os_version: Option<String>,
}

fn platform_name_override<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OverrideVisitor {
        key: "host.platform_name",
    })
}

fn os_version_override<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OverrideVisitor {
        key: "host.os_version",
    })
}

/// Reads a host override as text.
///
/// Environment values are parsed before they reach us, so `CL_MEDIA_TOOLS_HOST__OS_VERSION=17`
/// arrives as an integer and is taken verbatim. Floats and booleans are
/// rejected: `10.10` would come back as `10.1`, so such values must be quoted.
struct OverrideVisitor {
    key: &'static str,
}

impl OverrideVisitor {
    fn quote_hint<E: de::Error>(&self, found: impl fmt::Display) -> E {
        E::custom(format!(
            "{} must be a string, got {found}; quote the value, e.g. '\"10.10\"'",
            self.key
        ))
    }
}

impl<'de> Visitor<'de> for OverrideVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string for {}", self.key)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Self::Value, E> {
        Err(self.quote_hint(format_args!("the number {value}")))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Self::Value, E> {
        Err(self.quote_hint(format_args!("the boolean {value}")))
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHANNEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.channel_name()?;

        if self.host.platform_name.as_deref().is_some_and(str::is_empty) {
            return Err(Error::config_validation(
                "host.platform_name must not be empty when set",
            ));
        }

        if self.host.os_version.as_deref().is_some_and(str::is_empty) {
            return Err(Error::config_validation(
                "host.os_version must not be empty when set",
            ));
        }

        Ok(())
    }

    /// The configured channel name, validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid channel token.
    pub fn channel_name(&self) -> Result<ChannelName> {
        ChannelName::new(&self.channel.name)
    }
}
