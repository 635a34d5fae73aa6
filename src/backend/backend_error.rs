#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Wrong credentials or an expired/invalid access token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, BackendError::Status { status: 400 | 401 | 403, .. })
    }
}
