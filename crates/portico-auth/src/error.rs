// Error type for hosted auth service calls.
// Decision: two variants only; callers never branch on detail beyond "was it a 401"

use thiserror::Error;

/// Failure reported by a hosted auth service call.
#[derive(Debug, Error)]
pub enum AuthApiError {
    /// The request never produced a usable response (network, TLS, decode).
    #[error("auth service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("auth service rejected the request ({status})")]
    Rejected {
        status: u16,
        /// Response body, kept for logging only.
        detail: String,
    },
}

impl AuthApiError {
    /// True when the service rejected the credentials themselves, which is the
    /// one case worth a refresh attempt.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthApiError::Rejected { status: 401, .. })
    }
}
