use thiserror::Error;

/// Failures exchanging credentials for a session. Surfaced directly to
/// the login form, never retried automatically.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication service unavailable: {0}")]
    ServerUnavailable(String),
}

/// Failures creating a new customer account.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The server rejected the profile; carries its human-readable reason.
    #[error("registration rejected: {0}")]
    Validation(String),
    #[error("registration service unavailable: {0}")]
    ServerUnavailable(String),
}

/// Failure of a single authenticated dataset read.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server rejected the bearer token; the session must be torn down.
    #[error("session token rejected by the server")]
    Unauthorized,
    /// Transport or server failure, including transport-level timeouts.
    /// Retryable, but never retried automatically.
    #[error("server unreachable: {0}")]
    Unreachable(String),
    /// The response did not conform to the endpoint's schema.
    #[error("malformed {endpoint} response: {message}")]
    InvalidResponse {
        endpoint: &'static str,
        message: String,
    },
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized)
    }
}

/// Aggregate failure of the all-or-nothing dashboard fan-out, tagged with
/// the first endpoint that failed.
#[derive(Debug, Error)]
#[error("dashboard fetch failed on {endpoint}: {source}")]
pub struct OrchestrationError {
    pub endpoint: &'static str,
    #[source]
    pub source: FetchError,
}

impl OrchestrationError {
    pub fn is_unauthorized(&self) -> bool {
        self.source.is_unauthorized()
    }
}
