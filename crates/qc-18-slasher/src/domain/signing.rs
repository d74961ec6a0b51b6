//! # Signature Domains and Signing Roots
//!
//! Hash tree roots of the handful of containers a vote signature covers:
//!
//! ```text
//! ForkData      { current_version, genesis_validators_root }
//! Checkpoint    { epoch, root }
//! AttestationData { slot, index, beacon_block_root, source, target }
//! SigningData   { object_root, domain }
//! ```
//!
//! `domain = domain_type || hash_tree_root(ForkData)[..28]`

use crate::error::{SlasherError, SlasherResult};
use shared_types::{
    AttestationData, Checkpoint, CommitteeIndex, Domain, DomainType, Epoch, Fork, Hash, Slot,
    Version,
};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// Domain type of attestation signatures.
pub const DOMAIN_BEACON_ATTESTER: DomainType = [1, 0, 0, 0];

#[derive(TreeHash)]
struct ForkData {
    current_version: Version,
    genesis_validators_root: Hash,
}

#[derive(TreeHash)]
struct SigningData {
    object_root: Hash,
    domain: Domain,
}

/// Fully formed vote payload, both checkpoints present.
#[derive(TreeHash)]
struct CompleteAttestationData {
    slot: Slot,
    index: CommitteeIndex,
    beacon_block_root: Hash,
    source: Checkpoint,
    target: Checkpoint,
}

impl TryFrom<&AttestationData> for CompleteAttestationData {
    type Error = SlasherError;

    fn try_from(data: &AttestationData) -> Result<Self, Self::Error> {
        let source = data
            .source
            .ok_or_else(|| SlasherError::SigningRoot("missing source checkpoint".into()))?;
        let target = data
            .target
            .ok_or_else(|| SlasherError::SigningRoot("missing target checkpoint".into()))?;

        Ok(Self {
            slot: data.slot,
            index: data.index,
            beacon_block_root: data.beacon_block_root,
            source,
            target,
        })
    }
}

pub fn checkpoint_root(checkpoint: &Checkpoint) -> Hash {
    checkpoint.tree_hash_root().0
}

/// Hash tree root of the vote payload.
///
/// Fails if either checkpoint is absent, since the container cannot be
/// formed without it.
pub fn attestation_data_root(data: &AttestationData) -> SlasherResult<Hash> {
    let complete = CompleteAttestationData::try_from(data)?;
    Ok(complete.tree_hash_root().0)
}

pub fn compute_fork_data_root(current_version: Version, genesis_validators_root: &Hash) -> Hash {
    ForkData {
        current_version,
        genesis_validators_root: *genesis_validators_root,
    }
    .tree_hash_root()
    .0
}

/// Signature domain for `epoch` under `fork`.
pub fn compute_domain(
    domain_type: DomainType,
    fork: &Fork,
    epoch: Epoch,
    genesis_validators_root: &Hash,
) -> Domain {
    let fork_data_root = compute_fork_data_root(fork.version_at(epoch), genesis_validators_root);

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type);
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    domain
}

/// The digest attesters sign: `hash_tree_root(SigningData)`.
pub fn compute_signing_root(data: &AttestationData, domain: &Domain) -> SlasherResult<Hash> {
    let signing_data = SigningData {
        object_root: attestation_data_root(data)?,
        domain: *domain,
    };
    Ok(signing_data.tree_hash_root().0)
}
