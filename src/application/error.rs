use thiserror::Error;

use crate::infra::provider::ProviderError;

#[derive(Debug, Error)]
pub enum ContentError {
    /// No identifier supplied; caught before any I/O.
    #[error("no post identifier supplied")]
    InvalidRequest,
    /// The content provider has no record for the identifier.
    #[error("no post found for slug `{slug}`")]
    NotFound { slug: String },
    /// The fetch failed or was not completed, excluding cancellation.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Superseded by navigation away; not an error from the viewer's side.
    #[error("load superseded before completion")]
    Cancelled,
}

impl ContentError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// How the embedding UI should surface this error.
    pub fn presentation(&self) -> ErrorPresentation {
        match self {
            Self::InvalidRequest | Self::NotFound { .. } => ErrorPresentation::NotFound,
            Self::Provider(_) => ErrorPresentation::Retryable,
            Self::Cancelled => ErrorPresentation::Silent,
        }
    }
}

/// User-visible classification of a terminal load outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPresentation {
    /// A displayable "not found" state.
    NotFound,
    /// A generic retryable error state.
    Retryable,
    /// Fully absorbed: no UI change, no failure log.
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_mapping() {
        assert_eq!(
            ContentError::InvalidRequest.presentation(),
            ErrorPresentation::NotFound
        );
        assert_eq!(
            ContentError::not_found("missing").presentation(),
            ErrorPresentation::NotFound
        );
        assert_eq!(
            ContentError::Provider(ProviderError::Status {
                status: 502,
                body: "bad gateway".to_owned(),
            })
            .presentation(),
            ErrorPresentation::Retryable
        );
        assert_eq!(
            ContentError::Cancelled.presentation(),
            ErrorPresentation::Silent
        );
    }

    #[test]
    fn only_cancellation_is_cancelled() {
        assert!(ContentError::Cancelled.is_cancelled());
        assert!(!ContentError::InvalidRequest.is_cancelled());
        assert!(!ContentError::not_found("x").is_cancelled());
    }
}
