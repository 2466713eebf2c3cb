//! Plugin registration.

use crate::channel::{ChannelName, ChannelRegistry};
use crate::codec::MethodCodec;
use crate::config::Config;
use crate::error::Result;
use crate::handler::VersionQueryHandler;
use crate::host::{NativeHost, OverrideHost};

/// The handler type this plugin registers.
pub type PluginHandler = VersionQueryHandler<OverrideHost<NativeHost>>;

/// Build the handler described by `config`.
#[must_use]
pub fn plugin_handler(config: &Config) -> PluginHandler {
    VersionQueryHandler::new(OverrideHost::new(NativeHost, &config.host))
}

/// Register the version handler on the configured channel.
///
/// Returns the channel name it was bound to.
///
/// # Errors
///
/// Returns an error if the configured channel name is invalid.
pub fn register_with<C: MethodCodec>(
    registry: &mut ChannelRegistry<C>,
    config: &Config,
) -> Result<ChannelName> {
    let channel = config.channel_name()?;
    registry.register(channel.clone(), plugin_handler(config));
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{MethodCall, MethodResponse};

    #[test]
    fn test_register_on_default_channel() {
        let mut registry: ChannelRegistry = ChannelRegistry::default();
        let channel = register_with(&mut registry, &Config::default()).unwrap();

        assert_eq!(channel.as_str(), "cl_media_tools");
        assert!(registry.contains("cl_media_tools"));
    }

    #[test]
    fn test_register_with_overrides() {
        let mut config = Config::default();
        config.channel.name = "media/tools".to_string();
        config.host.platform_name = Some("iOS".to_string());
        config.host.os_version = Some("17.4".to_string());

        let mut registry: ChannelRegistry = ChannelRegistry::default();
        register_with(&mut registry, &config).unwrap();

        let response = registry
            .invoke("media/tools", &MethodCall::new("getPlatformVersion"))
            .unwrap();
        assert_eq!(response, MethodResponse::success("iOS 17.4"));
        assert!(!registry.contains("cl_media_tools"));
    }

    #[test]
    fn test_register_rejects_bad_channel() {
        let mut config = Config::default();
        config.channel.name = "not valid".to_string();

        let mut registry: ChannelRegistry = ChannelRegistry::default();
        let err = register_with(&mut registry, &config).unwrap_err();
        assert!(err.is_config_error());
    }
}
