use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngageError {
    /// No usable credential for an operation that requires one.
    /// Callers should route the user to the login flow.
    #[error("Not logged in")]
    Unauthenticated,

    /// Input rejected locally before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The backend rejected or failed a request. Prior local state is
    /// left intact; there is no automatic retry.
    #[error("Catalog request failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Response arrived but could not be normalized into a typed value.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl EngageError {
    /// True for failures that should surface as a transient notification
    /// rather than interrupting the view.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngageError::Remote(_) | EngageError::RequestFailed(_))
    }
}
