//! Driving Ports (API - Inbound)

use crate::domain::{AttesterSlashing, IndexedAttestation, RawAttestation, SignedBlockHeader};
use crate::error::{PipelineStage, SlasherError, SlasherResult};
use async_trait::async_trait;
use shared_types::ValidatorIndex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Correlation ID for tracing a submission through logs
pub type CorrelationId = Uuid;

/// Per-call context: identity for logs and a cancellation signal.
#[derive(Clone, Debug)]
pub struct OperationContext {
    pub correlation_id: CorrelationId,
    pub cancel: CancellationToken,
}

impl OperationContext {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Context bound to an existing token, e.g. a child of a request scope.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            cancel,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a successful submission.
#[derive(Clone, Debug)]
pub struct SlashingResponse {
    /// Slashings proven by the submitted attestation
    pub attester_slashings: Vec<AttesterSlashing>,
    /// Set when span bookkeeping failed after an otherwise clean run
    pub span_update_error: Option<SlasherError>,
    /// Last stage the submission completed
    pub reached: PipelineStage,
}

impl SlashingResponse {
    pub fn is_slashable(&self) -> bool {
        !self.attester_slashings.is_empty()
    }
}

/// Primary Slasher API
///
/// Each call runs one attestation through validation, signature
/// verification, persistence and detection. Calls are independent and may
/// run concurrently.
#[async_trait]
pub trait SlasherApi: Send + Sync {
    /// Check an already-indexed attestation for slashable offences.
    async fn submit_indexed_attestation(
        &self,
        ctx: &OperationContext,
        attestation: IndexedAttestation,
    ) -> SlasherResult<SlashingResponse>;

    /// Index a committee vote against `committee`, then run the same
    /// pipeline as `submit_indexed_attestation`.
    async fn submit_attestation(
        &self,
        ctx: &OperationContext,
        attestation: RawAttestation,
        committee: &[ValidatorIndex],
    ) -> SlasherResult<SlashingResponse>;

    /// Check a block header for double proposals.
    async fn is_slashable_block(
        &self,
        ctx: &OperationContext,
        header: SignedBlockHeader,
    ) -> SlasherResult<SlashingResponse>;
}
