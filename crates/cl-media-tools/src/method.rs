//! Method call and response types exchanged over a channel.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A method invocation delivered by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Name of the invoked method.
    pub method: String,

    /// Optional argument payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub args: Value,
}

impl MethodCall {
    /// Create a call with no arguments.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Value::Null,
        }
    }

    /// Attach an argument payload.
    #[must_use]
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }
}

/// The reply to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// The method ran and produced a value.
    Success(Value),

    /// The method failed; mirrors the framework's error envelope.
    Error {
        /// Machine-readable error code.
        code: String,
        /// Human-readable message.
        message: Option<String>,
        /// Extra structured details.
        details: Value,
    },

    /// No behavior exists for the requested method name.
    NotImplemented,
}

impl MethodResponse {
    /// Build a success response.
    #[must_use]
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success(value.into())
    }

    /// Build an error response without details.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: Some(message.into()),
            details: Value::Null,
        }
    }

    /// Whether this is a success value.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether this is the not-implemented sentinel.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }

    /// The success value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Success(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Short name of the response kind, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error { .. } => "error",
            Self::NotImplemented => "not_implemented",
        }
    }
}

/// Methods this plugin knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `getPlatformVersion`: report `"<platform> <version>"`.
    GetPlatformVersion,
}

impl Method {
    /// Every supported method.
    pub const ALL: [Method; 1] = [Method::GetPlatformVersion];

    /// Resolve a wire name. Matching is exact; no trimming or case folding.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }

    /// The wire name of this method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GetPlatformVersion => "getPlatformVersion",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
