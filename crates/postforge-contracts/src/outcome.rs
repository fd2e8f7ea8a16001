use std::fmt;

use crate::error::{ProviderFailure, RequestError};

/// Prefix of the payload returned when generation failed in an unexpected way.
pub const FAILURE_MARKER: &str = "Error generating content. Please try again. Error:";

/// Why synthetic content was returned in place of a provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Provider(ProviderFailure),
    /// The modality has no live provider; a sample was chosen instead.
    NoLiveProvider,
    /// Something escaped the normal handling; the payload is the failure text.
    Recovered(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Provider(failure) => write!(f, "{failure}"),
            FallbackReason::NoLiveProvider => f.write_str("no live provider for modality"),
            FallbackReason::Recovered(message) => write!(f, "recovered failure: {message}"),
        }
    }
}

/// Result of one dispatch. Callers that only need displayable content use
/// [`GenerationOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    ProviderSuccess(String),
    Fallback {
        content: String,
        reason: FallbackReason,
    },
    Rejected(RequestError),
}

impl GenerationOutcome {
    pub fn fallback(content: impl Into<String>, reason: FallbackReason) -> Self {
        Self::Fallback {
            content: content.into(),
            reason,
        }
    }

    /// Wraps a failure message the way the outermost boundary reports it.
    pub fn recovered(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        Self::Fallback {
            content: format!("{FAILURE_MARKER} {message}"),
            reason: FallbackReason::Recovered(message),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            GenerationOutcome::ProviderSuccess(content)
            | GenerationOutcome::Fallback { content, .. } => Some(content),
            GenerationOutcome::Rejected(_) => None,
        }
    }

    pub fn is_provider_success(&self) -> bool {
        matches!(self, GenerationOutcome::ProviderSuccess(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            GenerationOutcome::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<String, RequestError> {
        match self {
            GenerationOutcome::ProviderSuccess(content)
            | GenerationOutcome::Fallback { content, .. } => Ok(content),
            GenerationOutcome::Rejected(err) => Err(err),
        }
    }
}
