//! `cl-media-tools` - host platform version responder
//!
//! Answers `getPlatformVersion` on a named method channel with
//! `"<platform-name> <os-version>"`; every other method gets the
//! not-implemented sentinel.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod channel;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod logging;
pub mod method;
pub mod plugin;
pub mod serve;

pub use channel::{ChannelName, ChannelRegistry, MethodChannel, DEFAULT_CHANNEL};
pub use codec::{JsonMethodCodec, MethodCodec};
pub use config::Config;
pub use error::{Error, Result};
pub use handler::{MethodCallHandler, VersionQueryHandler};
pub use host::{HostPlatform, NativeHost, OverrideHost, StaticHost};
pub use logging::init_logging;
pub use method::{Method, MethodCall, MethodResponse};
pub use plugin::register_with;
pub use serve::{serve_lines, ServeStats};
