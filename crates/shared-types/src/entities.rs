//! # Core Consensus Entities
//!
//! Primitive aliases and the vote payload shared by every subsystem that
//! handles attestations.
//!
//! ## Clusters
//!
//! - **Primitives**: `Hash`, `Epoch`, `Slot`, `ValidatorIndex`, `Version`
//! - **Votes**: `Checkpoint`, `AttestationData`
//! - **Forks**: `Fork`

use serde::{Deserialize, Serialize};
use tree_hash_derive::TreeHash;

// =============================================================================
// CLUSTER A: PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 digest (block roots, state roots, signing roots).
pub type Hash = [u8; 32];

/// Epoch number.
pub type Epoch = u64;

/// Slot number.
pub type Slot = u64;

/// Global index of a validator in the registry.
pub type ValidatorIndex = u64;

/// Index of a committee within a slot.
pub type CommitteeIndex = u64;

/// 4-byte fork version.
pub type Version = [u8; 4];

/// 4-byte signature domain type (e.g. beacon attester).
pub type DomainType = [u8; 4];

/// 32-byte signature domain: `domain_type || fork_data_root[..28]`.
pub type Domain = [u8; 32];

/// Epoch value meaning "never".
pub const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

// =============================================================================
// CLUSTER B: VOTES
// =============================================================================

/// A justified/finalized checkpoint reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TreeHash)]
pub struct Checkpoint {
    /// Epoch of the checkpoint.
    pub epoch: Epoch,
    /// Block root at the start of the epoch.
    pub root: Hash,
}

impl Checkpoint {
    pub fn new(epoch: Epoch, root: Hash) -> Self {
        Self { epoch, root }
    }
}

/// The payload signed by attesters.
///
/// `source` and `target` are optional because the value is produced by an
/// untrusted decoder. Consumers must reject a vote whose checkpoints are
/// missing instead of substituting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttestationData {
    /// Slot the vote was cast in.
    pub slot: Slot,
    /// Committee index within the slot.
    pub index: CommitteeIndex,
    /// LMD GHOST vote.
    pub beacon_block_root: Hash,
    /// FFG source checkpoint.
    pub source: Option<Checkpoint>,
    /// FFG target checkpoint.
    pub target: Option<Checkpoint>,
}

impl AttestationData {
    /// Build a fully populated vote.
    pub fn new(
        slot: Slot,
        index: CommitteeIndex,
        beacon_block_root: Hash,
        source: Checkpoint,
        target: Checkpoint,
    ) -> Self {
        Self {
            slot,
            index,
            beacon_block_root,
            source: Some(source),
            target: Some(target),
        }
    }

    /// Target epoch, if the target checkpoint is present.
    pub fn target_epoch(&self) -> Option<Epoch> {
        self.target.map(|t| t.epoch)
    }
}

// =============================================================================
// CLUSTER C: FORKS
// =============================================================================

/// Fork versions active around a fork boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fork {
    /// Version in force before `epoch`.
    pub previous_version: Version,
    /// Version in force from `epoch` onward.
    pub current_version: Version,
    /// Activation epoch of `current_version`.
    pub epoch: Epoch,
}

impl Fork {
    /// Fork version that signs messages for `epoch`.
    pub fn version_at(&self, epoch: Epoch) -> Version {
        if epoch < self.epoch {
            self.previous_version
        } else {
            self.current_version
        }
    }
}
