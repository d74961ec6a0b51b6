//! # Test Fixtures
//!
//! Deterministic validators, a two-fork schedule and helpers that produce
//! genuinely signed attestations for it.

use blst::min_pk::SecretKey;
use qc_18_slasher::{
    aggregate_signatures, BlsPublicKey, BlsSignature, IndexedAttestation,
    IndexedAttestationVerifier, InMemoryKeystore, StaticForkSchedule, DST,
};
use shared_types::{AttestationData, Checkpoint, Epoch, Fork, Hash, ValidatorIndex};

pub const GENESIS_VALIDATORS_ROOT: Hash = [0x4b; 32];

/// Epoch at which the second fork activates.
pub const ALTAIR_EPOCH: Epoch = 10;

pub fn genesis_fork() -> Fork {
    Fork {
        previous_version: [0, 0, 0, 0],
        current_version: [0, 0, 0, 0],
        epoch: 0,
    }
}

pub fn altair_fork() -> Fork {
    Fork {
        previous_version: [0, 0, 0, 0],
        current_version: [1, 0, 0, 0],
        epoch: ALTAIR_EPOCH,
    }
}

/// Fork in force at `epoch` under `fork_schedule()`.
pub fn fork_for(epoch: Epoch) -> Fork {
    if epoch >= ALTAIR_EPOCH {
        altair_fork()
    } else {
        genesis_fork()
    }
}

pub fn fork_schedule() -> StaticForkSchedule {
    StaticForkSchedule::new(vec![genesis_fork(), altair_fork()], GENESIS_VALIDATORS_ROOT)
        .expect("fixture schedule is ascending")
}

/// Secret key derived from the validator index.
pub fn secret_key(index: ValidatorIndex) -> SecretKey {
    let mut ikm = [0x5a; 32];
    ikm[..8].copy_from_slice(&index.to_le_bytes());
    SecretKey::key_gen(&ikm, &[]).expect("32-byte ikm is accepted")
}

pub fn public_key(index: ValidatorIndex) -> BlsPublicKey {
    BlsPublicKey::new(secret_key(index).sk_to_pk().to_bytes())
}

/// Keystore knowing validators `0..count`.
pub fn keystore(count: ValidatorIndex) -> InMemoryKeystore {
    (0..count).map(|i| (i, public_key(i))).collect()
}

/// Vote `source -> target` for the block identified by `root`.
pub fn attestation_data(source: Epoch, target: Epoch, root: u8) -> AttestationData {
    AttestationData::new(
        target * 32,
        0,
        [root; 32],
        Checkpoint::new(source, [source as u8; 32]),
        Checkpoint::new(target, [root; 32]),
    )
}

/// Aggregate signature of `signers` over `data` under the fixture schedule.
pub fn aggregate_signature(signers: &[ValidatorIndex], data: &AttestationData) -> BlsSignature {
    let target = data.target_epoch().expect("fixture data has a target");
    aggregate_signature_under(signers, data, &fork_for(target))
}

/// Aggregate signature of `signers` over `data` under an explicit fork.
pub fn aggregate_signature_under(
    signers: &[ValidatorIndex],
    data: &AttestationData,
    fork: &Fork,
) -> BlsSignature {
    let root = IndexedAttestationVerifier::default()
        .signing_root(data, fork, &GENESIS_VALIDATORS_ROOT)
        .expect("fixture data has both checkpoints");
    let signatures: Vec<BlsSignature> = signers
        .iter()
        .map(|&i| BlsSignature::new(secret_key(i).sign(&root, DST, &[]).to_bytes()))
        .collect();
    aggregate_signatures(&signatures).expect("fixture signatures decode")
}

/// Indexed attestation signed by exactly `indices`.
pub fn signed_attestation(
    indices: Vec<ValidatorIndex>,
    data: AttestationData,
) -> IndexedAttestation {
    let signature = aggregate_signature(&indices, &data);
    IndexedAttestation::new(indices, data, signature)
}
