use thiserror::Error;

/// Failure while fetching the mapping tree.
///
/// Carried inside `Message`, so every variant holds owned, cloneable data
/// rather than the underlying `reqwest` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("malformed mapping payload: {0}")]
    Decode(String),
}

/// Failure reported by the OAuth provider.
///
/// These never reach `AuthStore`; the app shell shows them on the login view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no access token supplied")]
    MissingToken,
    #[error("provider rejected the request (HTTP {0})")]
    Rejected(u16),
    #[error("request to provider failed: {0}")]
    Request(String),
    #[error("unreadable profile: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AuthError::Rejected(status.as_u16())
        } else {
            AuthError::Request(err.to_string())
        }
    }
}
