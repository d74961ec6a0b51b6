//! # Slasher Service
//!
//! Application service that implements the `SlasherApi` inbound port.
//!
//! ## Pipeline
//!
//! ```text
//! Received → IndicesValidated → DomainResolved → KeysResolved
//!          → SignatureVerified → Persisted → Detected
//!          → SpansUpdated | SpanUpdateSkippedOnError
//! ```
//!
//! The first failing stage ends the run. Nothing is written before the
//! signature has verified, and a stored attestation is never rolled back.

use crate::config::SlasherConfig;
use crate::domain::{
    convert_to_indexed, IndexedAttestation, IndexedAttestationVerifier, RawAttestation,
    SignedBlockHeader,
};
use crate::error::{PipelineStage, SlasherError, SlasherResult};
use crate::metrics::NoopMetrics;
use crate::ports::inbound::{OperationContext, SlasherApi, SlashingResponse};
use crate::ports::outbound::{
    AttestationStore, ForkProvider, Keystore, KeystoreError, SlasherMetrics, SlashingDetector,
};
use async_trait::async_trait;
use shared_types::ValidatorIndex;
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

/// Slashing report pipeline.
///
/// Holds shared handles to its collaborators and no mutable state of its
/// own, so any number of submissions may run at once.
pub struct SlasherService<F, K, S, D>
where
    F: ForkProvider,
    K: Keystore,
    S: AttestationStore,
    D: SlashingDetector,
{
    config: SlasherConfig,
    verifier: IndexedAttestationVerifier,
    fork_provider: Arc<F>,
    keystore: Arc<K>,
    store: Arc<S>,
    detector: Arc<D>,
    metrics: Arc<dyn SlasherMetrics>,
}

impl<F, K, S, D> SlasherService<F, K, S, D>
where
    F: ForkProvider,
    K: Keystore,
    S: AttestationStore,
    D: SlashingDetector,
{
    /// Create a new slasher service with metrics disabled.
    pub fn new(
        config: SlasherConfig,
        fork_provider: Arc<F>,
        keystore: Arc<K>,
        store: Arc<S>,
        detector: Arc<D>,
    ) -> Self {
        Self {
            verifier: IndexedAttestationVerifier::from_config(&config),
            config,
            fork_provider,
            keystore,
            store,
            detector,
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Replace the metrics sink.
    pub fn with_metrics(mut self, metrics: Arc<dyn SlasherMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &SlasherConfig {
        &self.config
    }

    /// Run `attestation` through every stage, reporting the outcome to the
    /// metrics sink.
    async fn process(
        &self,
        ctx: &OperationContext,
        attestation: IndexedAttestation,
    ) -> SlasherResult<SlashingResponse> {
        self.metrics.attestation_received();

        let result = self.run_pipeline(ctx, &attestation).await;
        match &result {
            Ok(response) => {
                tracing::debug!(
                    reached = %response.reached,
                    slashings = response.attester_slashings.len(),
                    "[qc-18] Attestation processed"
                );
            }
            Err(e) => {
                self.metrics.attestation_rejected(e.stage());
                if e.is_internal() {
                    tracing::error!(stage = %e.stage(), "[qc-18] Attestation failed: {}", e);
                } else {
                    tracing::warn!(stage = %e.stage(), "[qc-18] Attestation rejected: {}", e);
                }
            }
        }
        result
    }

    async fn run_pipeline(
        &self,
        ctx: &OperationContext,
        attestation: &IndexedAttestation,
    ) -> SlasherResult<SlashingResponse> {
        if ctx.is_cancelled() {
            return Err(SlasherError::Cancelled);
        }

        // Structural checks run before any collaborator is contacted.
        let data = self.verifier.validate(attestation)?;
        self.reached(PipelineStage::IndicesValidated);

        let target_epoch = data
            .target_epoch()
            .ok_or(SlasherError::MissingData("target checkpoint"))?;
        let fork = cancellable(ctx, async {
            self.fork_provider
                .fork_at(target_epoch)
                .await
                .map_err(|e| SlasherError::DomainComputation(e.to_string()))
        })
        .await?;
        let genesis_validators_root = cancellable(ctx, async {
            self.fork_provider
                .genesis_validators_root()
                .await
                .map_err(|e| SlasherError::DomainComputation(e.to_string()))
        })
        .await?;
        let signing_root = self
            .verifier
            .signing_root(data, &fork, &genesis_validators_root)?;
        self.reached(PipelineStage::DomainResolved);

        let indices = &attestation.attesting_indices;
        let public_keys = if indices.is_empty() {
            Vec::new()
        } else {
            let resolved = cancellable(ctx, async {
                self.keystore
                    .resolve_public_keys(indices)
                    .await
                    .map_err(keystore_error)
            })
            .await?;
            self.verifier.collect_public_keys(indices, &resolved)?
        };
        self.reached(PipelineStage::KeysResolved);

        self.verifier
            .verify_signature(&signing_root, &public_keys, attestation)?;
        self.reached(PipelineStage::SignatureVerified);

        cancellable(ctx, async {
            self.store
                .save_indexed_attestation(attestation)
                .await
                .map_err(|e| SlasherError::Persistence(e.to_string()))
        })
        .await?;
        self.reached(PipelineStage::Persisted);

        let attester_slashings = cancellable(ctx, async {
            self.detector
                .detect_attester_slashings(attestation)
                .await
                .map_err(|e| SlasherError::Detection(e.to_string()))
        })
        .await?;
        self.reached(PipelineStage::Detected);

        if !attester_slashings.is_empty() {
            self.metrics.slashings_detected(attester_slashings.len());
            tracing::warn!(
                count = attester_slashings.len(),
                target_epoch,
                "[qc-18] Attester slashing detected"
            );
            return Ok(SlashingResponse {
                attester_slashings,
                span_update_error: None,
                reached: PipelineStage::Detected,
            });
        }

        let span_update = cancellable(ctx, async {
            self.detector
                .update_spans(attestation)
                .await
                .map_err(|e| SlasherError::SpanUpdate(e.to_string()))
        })
        .await;

        match span_update {
            Ok(()) => {
                self.reached(PipelineStage::SpansUpdated);
                Ok(SlashingResponse {
                    attester_slashings,
                    span_update_error: None,
                    reached: PipelineStage::SpansUpdated,
                })
            }
            // Cancellation still aborts the call; only detector failures are
            // downgraded.
            Err(SlasherError::Cancelled) => Err(SlasherError::Cancelled),
            Err(e) => {
                tracing::error!("[qc-18] Could not update spans: {}", e);
                self.metrics.span_update_failed();
                self.reached(PipelineStage::SpanUpdateSkippedOnError);
                Ok(SlashingResponse {
                    attester_slashings,
                    span_update_error: Some(e),
                    reached: PipelineStage::SpanUpdateSkippedOnError,
                })
            }
        }
    }

    fn reached(&self, stage: PipelineStage) {
        tracing::trace!(stage = %stage, "[qc-18] Stage complete");
        self.metrics.stage_reached(stage);
    }
}

#[async_trait]
impl<F, K, S, D> SlasherApi for SlasherService<F, K, S, D>
where
    F: ForkProvider,
    K: Keystore,
    S: AttestationStore,
    D: SlashingDetector,
{
    async fn submit_indexed_attestation(
        &self,
        ctx: &OperationContext,
        attestation: IndexedAttestation,
    ) -> SlasherResult<SlashingResponse> {
        let span = tracing::info_span!(
            "submit_indexed_attestation",
            correlation_id = %ctx.correlation_id,
            attesters = attestation.attesting_indices.len()
        );
        self.process(ctx, attestation).instrument(span).await
    }

    async fn submit_attestation(
        &self,
        ctx: &OperationContext,
        attestation: RawAttestation,
        committee: &[ValidatorIndex],
    ) -> SlasherResult<SlashingResponse> {
        let indexed = convert_to_indexed(&attestation, committee);
        let span = tracing::info_span!(
            "submit_attestation",
            correlation_id = %ctx.correlation_id,
            committee_size = committee.len(),
            attesters = indexed.attesting_indices.len()
        );
        self.process(ctx, indexed).instrument(span).await
    }

    async fn is_slashable_block(
        &self,
        ctx: &OperationContext,
        header: SignedBlockHeader,
    ) -> SlasherResult<SlashingResponse> {
        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            slot = header.slot,
            proposer_index = header.proposer_index,
            "[qc-18] Block slashing check requested"
        );
        Err(SlasherError::Unimplemented("proposer slashing detection"))
    }
}

/// Race `fut` against the caller's cancellation token.
async fn cancellable<T, Fut>(ctx: &OperationContext, fut: Fut) -> SlasherResult<T>
where
    Fut: Future<Output = SlasherResult<T>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => Err(SlasherError::Cancelled),
        result = fut => result,
    }
}

fn keystore_error(err: KeystoreError) -> SlasherError {
    match err {
        KeystoreError::UnknownValidator(validator_index) => {
            SlasherError::UnknownValidator { validator_index }
        }
        KeystoreError::Unavailable(reason) => SlasherError::KeystoreUnavailable(reason),
    }
}
