//! # Domain Entities
//!
//! Attestation shapes handled by the slasher and the key/signature wrappers
//! used for BLS verification.

use super::bitfield::AggregationBitfield;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{AttestationData, Hash, Slot, ValidatorIndex};

// =============================================================================
// BLS Types (BLS12-381, public keys on G1)
// =============================================================================

/// Compressed BLS signature (G2 point, 96 bytes).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlsSignature {
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 96],
}

impl BlsSignature {
    pub fn new(bytes: [u8; 96]) -> Self {
        Self { bytes }
    }

    /// The compressed point at infinity, carried by attestations with no
    /// participants.
    pub fn infinity() -> Self {
        let mut bytes = [0u8; 96];
        bytes[0] = 0xc0;
        Self { bytes }
    }
}

/// Compressed BLS public key (G1 point, 48 bytes).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlsPublicKey {
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 48],
}

impl BlsPublicKey {
    pub fn new(bytes: [u8; 48]) -> Self {
        Self { bytes }
    }
}

// =============================================================================
// Attestations
// =============================================================================

/// Committee-relative vote as received from gossip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttestation {
    pub aggregation_bits: AggregationBitfield,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

/// Vote whose attesters are named by global validator index.
///
/// Canonical form requires `attesting_indices` to be strictly ascending and
/// no longer than the committee bound. Values in any other form are
/// rejected, never repaired.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexedAttestation {
    pub attesting_indices: Vec<ValidatorIndex>,
    pub data: Option<AttestationData>,
    pub signature: BlsSignature,
}

impl IndexedAttestation {
    pub fn new(
        attesting_indices: Vec<ValidatorIndex>,
        data: AttestationData,
        signature: BlsSignature,
    ) -> Self {
        Self {
            attesting_indices,
            data: Some(data),
            signature,
        }
    }
}

/// Two attestations that together prove a slashable offence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

impl AttesterSlashing {
    /// Validators named in both attestations.
    pub fn slashable_indices(&self) -> Vec<ValidatorIndex> {
        // Both lists are canonical, so a merge walk finds the intersection.
        let (a, b) = (
            &self.attestation_1.attesting_indices,
            &self.attestation_2.attesting_indices,
        );
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// Signed beacon block header, the evidence unit for proposer slashings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Hash,
    pub state_root: Hash,
    pub body_root: Hash,
    pub signature: BlsSignature,
}
