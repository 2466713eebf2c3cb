//! End-to-end tests of the plugin through the channel registry.

use cl_media_tools::{
    register_with, ChannelName, ChannelRegistry, Config, HostPlatform, MethodCall,
    MethodResponse, NativeHost, StaticHost, VersionQueryHandler,
};

fn ios_config() -> Config {
    let mut config = Config::default();
    config.host.platform_name = Some("iOS".to_string());
    config.host.os_version = Some("17.4".to_string());
    config
}

#[test]
fn reports_configured_host_over_default_channel() {
    let mut registry: ChannelRegistry = ChannelRegistry::default();
    let channel = register_with(&mut registry, &ios_config()).unwrap();

    let response = registry
        .channel(channel)
        .invoke_method(&MethodCall::new("getPlatformVersion"))
        .unwrap();

    assert_eq!(response, MethodResponse::success("iOS 17.4"));
}

#[test]
fn unknown_method_yields_sentinel_without_payload() {
    let mut registry: ChannelRegistry = ChannelRegistry::default();
    let channel = register_with(&mut registry, &ios_config()).unwrap();
    let channel = registry.channel(channel);

    for method in ["unknownMethod", "foo", "", "getPlatformVersion "] {
        let response = channel.invoke_method(&MethodCall::new(method)).unwrap();
        assert_eq!(response, MethodResponse::NotImplemented, "method {method:?}");
    }
}

#[test]
fn native_host_reply_has_prefix_and_version() {
    let mut registry: ChannelRegistry = ChannelRegistry::default();
    let channel = register_with(&mut registry, &Config::default()).unwrap();

    let response = registry
        .channel(channel)
        .invoke_method(&MethodCall::new("getPlatformVersion"))
        .unwrap();
    let text = response.as_str().expect("version string");

    let prefix = format!("{} ", NativeHost.platform_name());
    let version = text.strip_prefix(&prefix).expect("platform prefix");
    assert!(!version.is_empty());
}

#[test]
fn handler_reachable_only_through_its_channel() {
    let mut registry: ChannelRegistry = ChannelRegistry::default();
    registry.register(
        ChannelName::new("vendor/versions").unwrap(),
        VersionQueryHandler::new(StaticHost::new("Linux", "6.8")),
    );

    let elsewhere = registry
        .channel(ChannelName::default())
        .invoke_method(&MethodCall::new("getPlatformVersion"))
        .unwrap_err();
    assert!(elsewhere.is_no_handler());

    let reply = registry
        .dispatch("vendor/versions", br#"{"method":"getPlatformVersion","args":null}"#)
        .unwrap()
        .unwrap();
    assert_eq!(reply, br#"["Linux 6.8"]"#);
}

#[test]
fn repeated_calls_agree() {
    let mut registry: ChannelRegistry = ChannelRegistry::default();
    let channel = register_with(&mut registry, &Config::default()).unwrap();
    let channel = registry.channel(channel);

    let call = MethodCall::new("getPlatformVersion");
    let first = channel.invoke_method(&call).unwrap();
    let second = channel.invoke_method(&call).unwrap();
    assert_eq!(first.kind(), second.kind());
}
