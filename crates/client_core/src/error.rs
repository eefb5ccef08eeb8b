use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{0}'")]
    InvalidBaseUrl(String),
    #[error("{endpoint}: request did not complete: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },
    #[error("{endpoint}: server rejected request with status {status}")]
    Rejected {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("{endpoint}: unexpected response body: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Transport,
    Rejected,
    Decode,
}

impl ClientError {
    pub fn transport(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn kind(&self) -> ClientErrorKind {
        match self {
            Self::InvalidBaseUrl(_) | Self::Transport { .. } => ClientErrorKind::Transport,
            Self::Rejected { .. } => ClientErrorKind::Rejected,
            Self::Decode { .. } => ClientErrorKind::Decode,
        }
    }

    /// Server-provided explanation, only present on rejections.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to show a user: rejection detail verbatim, otherwise the
    /// given fallback for rejections or the generic message for everything
    /// else.
    pub fn user_message(&self, rejected_fallback: &str, generic: &str) -> String {
        match self {
            Self::Rejected { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| rejected_fallback.to_string()),
            _ => generic.to_string(),
        }
    }
}
