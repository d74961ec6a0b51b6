//! # Domain Layer
//!
//! Pure logic with no I/O: indexing, canonical-form checks, signing roots
//! and BLS verification. Everything here is stateless and safe to call from
//! any number of tasks at once.

pub mod bitfield;
pub mod bls;
pub mod canonical;
pub mod entities;
pub mod indexing;
pub mod signing;
pub mod verify;

pub use bitfield::{AggregationBitfield, BitfieldError};
pub use bls::EmptyAttesterPolicy;
pub use entities::{
    AttesterSlashing, BlsPublicKey, BlsSignature, IndexedAttestation, RawAttestation,
    SignedBlockHeader,
};
pub use indexing::{attesting_indices, convert_to_indexed};
pub use verify::IndexedAttestationVerifier;
