//! Error types for the Slasher subsystem
//!
//! Every variant maps to the pipeline stage at which it terminates a
//! submission. Structural and cryptographic failures are final; only the
//! collaborator failures may succeed when retried unchanged.

use shared_types::ValidatorIndex;
use thiserror::Error;

/// Stages of the slashing report pipeline, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    Received,
    IndicesValidated,
    DomainResolved,
    KeysResolved,
    SignatureVerified,
    Persisted,
    Detected,
    SpansUpdated,
    SpanUpdateSkippedOnError,
}

impl PipelineStage {
    /// Stable label used for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::IndicesValidated => "indices_validated",
            Self::DomainResolved => "domain_resolved",
            Self::KeysResolved => "keys_resolved",
            Self::SignatureVerified => "signature_verified",
            Self::Persisted => "persisted",
            Self::Detected => "detected",
            Self::SpansUpdated => "spans_updated",
            Self::SpanUpdateSkippedOnError => "span_update_skipped_on_error",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slasher subsystem errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlasherError {
    /// Attestation data or its target checkpoint is absent
    #[error("Nil or missing indexed attestation data: {0}")]
    MissingData(&'static str),

    /// More attesting indices than a committee can hold
    #[error("Validator indices count exceeds MAX_VALIDATORS_PER_COMMITTEE, {count} > {max}")]
    TooManyIndices { count: usize, max: usize },

    /// Attesting indices are not strictly ascending
    #[error("Attesting indices are not uniquely sorted")]
    NonCanonicalIndices,

    /// Fork or genesis lookup failed while building the signature domain
    #[error("Could not compute signature domain: {0}")]
    DomainComputation(String),

    /// Attestation data could not be hashed
    #[error("Could not get signing root of object: {0}")]
    SigningRoot(String),

    /// Signature bytes are not a valid compressed G2 point
    #[error("Could not convert bytes to signature")]
    SignatureDecode,

    /// Keystore returned bytes that are not a valid public key
    #[error("Could not deserialize public key of validator {validator_index}")]
    PublicKeyDecode { validator_index: ValidatorIndex },

    /// Aggregate signature does not match the attesters over the signing root
    #[error("Aggregate signature failed to verify")]
    SignatureInvalid,

    /// Keystore has no public key for a requested index
    #[error("Unknown validator: {validator_index}")]
    UnknownValidator { validator_index: ValidatorIndex },

    /// Keystore could not answer at all
    #[error("Keystore unavailable: {0}")]
    KeystoreUnavailable(String),

    /// Attestation store rejected the write
    #[error("Could not save indexed attestation: {0}")]
    Persistence(String),

    /// Slashing detector failed
    #[error("Could not detect attester slashings: {0}")]
    Detection(String),

    /// Span bookkeeping failed (non-fatal)
    #[error("Could not update spans: {0}")]
    SpanUpdate(String),

    /// Caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Endpoint exists but has no implementation
    #[error("Unimplemented: {0}")]
    Unimplemented(&'static str),
}

impl SlasherError {
    /// The stage whose check produced this error.
    ///
    /// `Cancelled` and `Unimplemented` are reported as `Received` since they
    /// are not tied to a single check.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::MissingData(_) | Self::TooManyIndices { .. } | Self::NonCanonicalIndices => {
                PipelineStage::IndicesValidated
            }
            Self::DomainComputation(_) | Self::SigningRoot(_) => PipelineStage::DomainResolved,
            Self::UnknownValidator { .. }
            | Self::PublicKeyDecode { .. }
            | Self::KeystoreUnavailable(_) => PipelineStage::KeysResolved,
            Self::SignatureDecode | Self::SignatureInvalid => PipelineStage::SignatureVerified,
            Self::Persistence(_) => PipelineStage::Persisted,
            Self::Detection(_) => PipelineStage::Detected,
            Self::SpanUpdate(_) => PipelineStage::SpansUpdated,
            Self::Cancelled | Self::Unimplemented(_) => PipelineStage::Received,
        }
    }

    /// Errors surfaced to callers as internal-service failures.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SignatureDecode
                | Self::SignatureInvalid
                | Self::PublicKeyDecode { .. }
                | Self::KeystoreUnavailable(_)
                | Self::Persistence(_)
                | Self::Detection(_)
        )
    }

    /// Whether resubmitting the same input could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::KeystoreUnavailable(_)
                | Self::Persistence(_)
                | Self::Detection(_)
                | Self::SpanUpdate(_)
                | Self::Cancelled
        )
    }
}

/// Result type for slasher operations
pub type SlasherResult<T> = Result<T, SlasherError>;
