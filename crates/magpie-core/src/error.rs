use thiserror::Error;

/// Errors from indicator identity resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The indicator has not announced its application id yet. Routine and
    /// recoverable: a readiness notification will arrive once it does, and
    /// the caller retries the whole pass then.
    #[error("indicator application id not yet available")]
    NotYetResolvable,

    /// Anything else. Not caught per item; aborts the surrounding
    /// reconciliation pass.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ResolveError {
    pub fn is_not_yet_resolvable(&self) -> bool {
        matches!(self, Self::NotYetResolvable)
    }
}
