use std::borrow::Cow;

/// Shown when the provider fails without saying why.
pub const GENERIC_UPSTREAM_MESSAGE: &str = "Player not found or API error";

/// Shown when no response could be obtained from the provider at all.
pub const NETWORK_FAILURE_MESSAGE: &str = "Failed to fetch stats from TRN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupErrorKind {
    /// Rejected before any request was made.
    ValidationFailed,
    /// The provider answered successfully but had no profile for the player.
    NotFound,
    /// The provider answered with a non-success status.
    UpstreamError,
    /// No response was obtained (connect failure, reset, timeout).
    NetworkFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[error("{message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: Cow<'static, str>,
    /// Provider HTTP status, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl LookupError {
    fn new(kind: LookupErrorKind, message: impl Into<Cow<'static, str>>, status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
        }
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(LookupErrorKind::ValidationFailed, message, None)
    }

    pub fn not_found(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(LookupErrorKind::NotFound, message, Some(status))
    }

    pub fn upstream(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(LookupErrorKind::UpstreamError, message, Some(status))
    }

    pub fn network() -> Self {
        Self::new(LookupErrorKind::NetworkFailure, NETWORK_FAILURE_MESSAGE, None)
    }
}
