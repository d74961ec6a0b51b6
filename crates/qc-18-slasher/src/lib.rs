//! # Slasher Subsystem (QC-18)
//!
//! Turns attestations into verified, persisted evidence and reports any
//! attester slashings they prove.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Indexing, canonical-form checks, signing
//!   roots and BLS verification. Pure, no I/O
//! - **Ports Layer** (`ports/`): Inbound API and outbound collaborator traits
//! - **Service Layer** (`service.rs`): The slashing report pipeline
//! - **Adapters Layer** (`adapters/`): In-memory collaborators
//!
//! ## Security Notes
//!
//! - **Verify Before Write**: Nothing is persisted until the aggregate
//!   signature has verified against the resolved keys
//! - **Reject, Never Repair**: Unsorted or duplicated attesting indices are
//!   refused, not normalised
//! - **Proof of Possession**: Signatures are checked against the Ethereum
//!   PoP ciphersuite with subgroup checks on every point

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{
    InMemoryAttestationStore, InMemoryKeystore, InMemorySlashingDetector, StaticForkSchedule,
};
pub use config::{ConfigError, SlasherConfig, MAX_VALIDATORS_PER_COMMITTEE};
pub use domain::bitfield::{AggregationBitfield, BitfieldError};
pub use domain::bls::{aggregate_signatures, verify_aggregate, EmptyAttesterPolicy, DST};
pub use domain::canonical::{validate_attesting_indices, validate_indexed_attestation};
pub use domain::entities::{
    AttesterSlashing, BlsPublicKey, BlsSignature, IndexedAttestation, RawAttestation,
    SignedBlockHeader,
};
pub use domain::indexing::{attesting_indices, convert_to_indexed};
pub use domain::signing::{
    compute_domain, compute_fork_data_root, compute_signing_root, DOMAIN_BEACON_ATTESTER,
};
pub use domain::verify::IndexedAttestationVerifier;
pub use error::{PipelineStage, SlasherError, SlasherResult};
pub use metrics::NoopMetrics;
#[cfg(feature = "metrics")]
pub use metrics::PrometheusMetrics;
pub use ports::inbound::{CorrelationId, OperationContext, SlasherApi, SlashingResponse};
pub use ports::outbound::{
    AttestationStore, DetectorError, ForkProvider, Keystore, KeystoreError, ProviderError,
    SlasherMetrics, SlashingDetector, StoreError,
};
pub use service::SlasherService;
