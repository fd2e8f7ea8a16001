use thiserror::Error;

/// A request the dispatcher refuses to serve. This is the only failure that
/// reaches the caller as an error instead of as content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// Coarse failure classes used to pick the degraded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport error, non-2xx status or missing credentials.
    Unavailable,
    /// 2xx response whose body matched none of the accepted shapes.
    MalformedResponse,
}

/// A classified provider failure. Always recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    #[error("{provider} request failed: {message}")]
    Network { provider: String, message: String },

    #[error("{provider} request failed ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unexpected payload: {detail}")]
    Malformed { provider: String, detail: String },

    #[error("{provider} is not configured: {detail}")]
    NotConfigured { provider: String, detail: String },
}

impl ProviderFailure {
    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Malformed {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    pub fn not_configured(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotConfigured {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderFailure::Malformed { .. } => FailureKind::MalformedResponse,
            ProviderFailure::Network { .. }
            | ProviderFailure::Status { .. }
            | ProviderFailure::NotConfigured { .. } => FailureKind::Unavailable,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            ProviderFailure::Network { provider, .. }
            | ProviderFailure::Status { provider, .. }
            | ProviderFailure::Malformed { provider, .. }
            | ProviderFailure::NotConfigured { provider, .. } => provider,
        }
    }
}
