//! Named channels and the registry that routes calls to their handlers.
//!
//! A handler is only reachable through the channel name it was registered
//! under. The registry plays the part of the host's message dispatcher: it
//! decodes incoming envelopes, invokes the bound handler and encodes the
//! reply.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::{JsonMethodCodec, MethodCodec};
use crate::error::{Error, Result};
use crate::handler::MethodCallHandler;
use crate::method::{MethodCall, MethodResponse};

/// Channel this plugin registers on unless configured otherwise.
pub const DEFAULT_CHANNEL: &str = "cl_media_tools";

/// Error code replied when an incoming call cannot be decoded.
pub const BAD_ENVELOPE: &str = "BAD_ENVELOPE";

fn channel_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_./-]+$").expect("Invalid regex pattern"))
}

/// A validated channel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    /// Validate `name` as a channel identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelName`] unless `name` is a non-empty run
    /// of ASCII letters, digits, `_`, `.`, `-` or `/`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if channel_name_pattern().is_match(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidChannelName { name })
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelName {
    fn default() -> Self {
        Self(DEFAULT_CHANNEL.to_string())
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ChannelName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Routes calls to the handler bound to each channel.
pub struct ChannelRegistry<C = JsonMethodCodec> {
    codec: C,
    handlers: HashMap<ChannelName, Arc<dyn MethodCallHandler>>,
}

impl<C> fmt::Debug for ChannelRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut channels: Vec<&str> = self.handlers.keys().map(ChannelName::as_str).collect();
        channels.sort_unstable();
        f.debug_struct("ChannelRegistry")
            .field("channels", &channels)
            .finish_non_exhaustive()
    }
}

impl Default for ChannelRegistry<JsonMethodCodec> {
    fn default() -> Self {
        Self::new(JsonMethodCodec)
    }
}

impl<C: MethodCodec> ChannelRegistry<C> {
    /// Create an empty registry using `codec` on the wire.
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            handlers: HashMap::new(),
        }
    }

    /// The codec used by [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Bind `handler` to `name`. A later registration on the same name wins.
    pub fn register<H>(&mut self, name: ChannelName, handler: H)
    where
        H: MethodCallHandler + 'static,
    {
        debug!(channel = %name, "registering method call handler");
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            debug!(channel = %name, "replaced previously registered handler");
        }
    }

    /// Remove the handler bound to `name`, returning whether one existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Whether any handler is bound to `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke the handler bound to `channel`.
    ///
    /// Returns `None` when nothing listens on that channel.
    #[must_use]
    pub fn invoke(&self, channel: &str, call: &MethodCall) -> Option<MethodResponse> {
        let handler = self.handlers.get(channel)?;
        Some(handler.handle_call(call))
    }

    /// Decode an encoded call, invoke the bound handler and encode its reply.
    ///
    /// Returns `Ok(None)` when nothing listens on `channel`. A call that
    /// cannot be decoded is answered with a [`BAD_ENVELOPE`] error reply.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reply cannot be encoded.
    pub fn dispatch(&self, channel: &str, message: &[u8]) -> Result<Option<Vec<u8>>> {
        let Some(handler) = self.handlers.get(channel) else {
            debug!(channel, "no handler registered for channel");
            return Ok(None);
        };

        let response = match self.codec.decode_call(message) {
            Ok(call) => handler.handle_call(&call),
            Err(err) => {
                warn!(channel, error = %err, "rejecting malformed method call");
                MethodResponse::Error {
                    code: BAD_ENVELOPE.to_string(),
                    message: Some(err.to_string()),
                    details: Value::Null,
                }
            }
        };

        self.codec.encode_response(&response).map(Some)
    }

    /// A caller-side view of the channel `name`.
    #[must_use]
    pub fn channel(&self, name: ChannelName) -> MethodChannel<'_, C> {
        MethodChannel {
            name,
            registry: self,
        }
    }
}

/// Caller-side handle for one channel of a registry.
///
/// Calls go through the full encode, dispatch, decode path.
#[derive(Debug)]
pub struct MethodChannel<'a, C = JsonMethodCodec> {
    name: ChannelName,
    registry: &'a ChannelRegistry<C>,
}

impl<C: MethodCodec> MethodChannel<'_, C> {
    /// The channel identifier.
    #[must_use]
    pub fn name(&self) -> &ChannelName {
        &self.name
    }

    /// Invoke `call` on this channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoHandler`] if nothing listens on the channel, or a
    /// codec error if an envelope cannot be encoded or decoded.
    pub fn invoke_method(&self, call: &MethodCall) -> Result<MethodResponse> {
        let codec = self.registry.codec();
        let message = codec.encode_call(call)?;
        let reply = self
            .registry
            .dispatch(self.name.as_str(), &message)?
            .ok_or_else(|| Error::NoHandler {
                channel: self.name.to_string(),
            })?;
        codec.decode_response(&reply)
    }
}
