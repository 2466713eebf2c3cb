//! The version query handler.

use tracing::trace;

use crate::host::{HostPlatform, NativeHost};
use crate::method::{Method, MethodCall, MethodResponse};

/// Anything that can answer method calls arriving on a channel.
pub trait MethodCallHandler: Send + Sync {
    /// Produce exactly one response for `call`.
    fn handle_call(&self, call: &MethodCall) -> MethodResponse;
}

/// Answers `getPlatformVersion` with `"<platform> <version>"`.
///
/// Every other method name gets [`MethodResponse::NotImplemented`]. The
/// handler holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct VersionQueryHandler<H = NativeHost> {
    host: H,
}

impl<H: HostPlatform> VersionQueryHandler<H> {
    /// Create a handler backed by `host`.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// The host this handler reports on.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Answer a request by name.
    #[must_use]
    pub fn handle(&self, method: &str) -> MethodResponse {
        let response = match Method::from_name(method) {
            Some(Method::GetPlatformVersion) => {
                MethodResponse::success(self.platform_version())
            }
            None => MethodResponse::NotImplemented,
        };
        trace!(method, kind = response.kind(), "handled method call");
        response
    }

    /// `"<platform-name> <os-version>"` for the current host.
    #[must_use]
    pub fn platform_version(&self) -> String {
        format!("{} {}", self.host.platform_name(), self.host.os_version())
    }
}

impl<H: HostPlatform> MethodCallHandler for VersionQueryHandler<H> {
    fn handle_call(&self, call: &MethodCall) -> MethodResponse {
        self.handle(&call.method)
    }
}
