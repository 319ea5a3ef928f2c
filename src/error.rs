//! Error types for curamatch.
//!
//! All errors are strongly typed using thiserror. Precondition failures are
//! raised before any store query is issued; store failures propagate
//! unchanged. The resolver performs no retries of its own and leaves
//! retry/rollback policy to the caller's transaction.

use thiserror::Error;

use crate::storage::StoreError;

/// A malformed candidate, rejected before any query is issued.
///
/// These indicate an upstream construction bug, never a transient condition,
/// so callers should not retry them.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// An experiment candidate has no biological source.
    #[error("experiment '{label}' has no biological source")]
    ExperimentWithoutBioSource {
        /// Short label of the offending candidate.
        label: String,
    },

    /// An experiment candidate has no interaction detection method with a
    /// controlled identifier.
    #[error("experiment '{label}' has no interaction detection method identifier")]
    ExperimentWithoutDetectionMethod {
        /// Short label of the offending candidate.
        label: String,
    },

    /// An experiment candidate has no participant identification method with
    /// a controlled identifier.
    #[error("experiment '{label}' has no participant identification method identifier")]
    ExperimentWithoutIdentificationMethod {
        /// Short label of the offending candidate.
        label: String,
    },

    /// A publication candidate carries an empty short label. The label is the
    /// publication's store-wide key, so there is nothing to resolve against.
    #[error("publication candidate has an empty short label")]
    PublicationWithoutLabel,
}

/// Top-level error type for a resolution attempt.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The candidate was malformed; no query was issued.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// A store query failed. Propagated unchanged from the gateway.
    #[error("store query failed: {0}")]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Returns true if this is a precondition failure.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Returns true if this is a store failure.
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type alias for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_error_messages_name_the_candidate() {
        let err = PreconditionError::ExperimentWithoutBioSource {
            label: "kerrien-2006-1".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("kerrien-2006-1"));
        assert!(msg.contains("biological source"));

        let err = PreconditionError::ExperimentWithoutDetectionMethod {
            label: "kerrien-2006-1".to_string(),
        };
        assert!(format!("{err}").contains("detection method"));

        let err = PreconditionError::ExperimentWithoutIdentificationMethod {
            label: "kerrien-2006-1".to_string(),
        };
        assert!(format!("{err}").contains("identification method"));
    }

    #[test]
    fn test_resolve_error_from_precondition() {
        let err: ResolveError = PreconditionError::PublicationWithoutLabel.into();
        assert!(err.is_precondition());
        assert!(!err.is_store());
        assert!(format!("{err}").contains("precondition failed"));
    }

    #[test]
    fn test_resolve_error_from_store() {
        let err: ResolveError = StoreError::Backend("connection refused".to_string()).into();
        assert!(err.is_store());
        assert!(!err.is_precondition());
        let msg = format!("{err}");
        assert!(msg.contains("store query failed"));
        assert!(msg.contains("connection refused"));
    }
}
