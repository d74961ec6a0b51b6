//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Collaborators the pipeline calls. All of them may be remote and may be
//! shared with other callers; the pipeline never assumes exclusive access.

use crate::domain::{AttesterSlashing, BlsPublicKey, IndexedAttestation};
use crate::error::PipelineStage;
use async_trait::async_trait;
use shared_types::{Epoch, Fork, Hash, ValidatorIndex};
use std::collections::HashMap;
use thiserror::Error;

/// Error from fork or genesis lookups.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No fork scheduled for epoch {epoch}")]
    NoForkForEpoch { epoch: Epoch },

    #[error("Malformed fork schedule: {reason}")]
    MalformedSchedule { reason: String },

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Error from public key resolution.
#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("Unknown validator index {0}")]
    UnknownValidator(ValidatorIndex),

    #[error("Keystore unavailable: {0}")]
    Unavailable(String),
}

/// Error from the attestation store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Database(String),
}

/// Error from the slashing detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Detector unavailable: {0}")]
    Unavailable(String),

    #[error("Span update failed: {0}")]
    SpanUpdate(String),
}

/// Fork schedule and genesis metadata.
#[async_trait]
pub trait ForkProvider: Send + Sync {
    /// Fork in force at `epoch`.
    async fn fork_at(&self, epoch: Epoch) -> Result<Fork, ProviderError>;

    async fn genesis_validators_root(&self) -> Result<Hash, ProviderError>;
}

/// Public key lookup by validator index.
#[async_trait]
pub trait Keystore: Send + Sync {
    /// Keys for every index in `indices`.
    ///
    /// Must fail instead of returning a partial mapping when any index is
    /// unknown.
    async fn resolve_public_keys(
        &self,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, BlsPublicKey>, KeystoreError>;
}

/// Append-only store of verified attestations.
#[async_trait]
pub trait AttestationStore: Send + Sync {
    /// Persist `attestation`. Saving an identical attestation twice must
    /// leave the store unchanged.
    async fn save_indexed_attestation(
        &self,
        attestation: &IndexedAttestation,
    ) -> Result<(), StoreError>;
}

/// Double-vote and surround-vote detection.
#[async_trait]
pub trait SlashingDetector: Send + Sync {
    /// Slashings proven by `attestation` against previously seen votes.
    async fn detect_attester_slashings(
        &self,
        attestation: &IndexedAttestation,
    ) -> Result<Vec<AttesterSlashing>, DetectorError>;

    /// Record `attestation` so later conflicting votes are caught.
    async fn update_spans(&self, attestation: &IndexedAttestation) -> Result<(), DetectorError>;
}

/// Observability sink injected into the service.
pub trait SlasherMetrics: Send + Sync {
    fn attestation_received(&self);

    /// A submission stopped at `stage` with an error.
    fn attestation_rejected(&self, stage: PipelineStage);

    fn stage_reached(&self, stage: PipelineStage);

    fn slashings_detected(&self, count: usize);

    fn span_update_failed(&self);
}
