//! # BLS Aggregate Verification (BLS12-381)
//!
//! Pure domain logic for checking an attestation's aggregate signature.
//!
//! ## Implementation Details
//!
//! - Public keys are on G1 (48 bytes compressed)
//! - Signatures are on G2 (96 bytes compressed)
//!
//! This uses blst's `min_pk` variant, the layout of beacon chain validator
//! keys. All signers sign the same signing root, so a single
//! `fast_aggregate_verify` covers the whole set.

use super::entities::{BlsPublicKey, BlsSignature};
use crate::error::{SlasherError, SlasherResult};
use blst::min_pk::{AggregateSignature, PublicKey, Signature};
use blst::BLST_ERROR;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, ValidatorIndex};

/// Domain Separation Tag for proof-of-possession BLS signatures
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// How an attestation with no attesters is treated.
///
/// Such an attestation carries the empty aggregate and cannot be checked
/// against any key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyAttesterPolicy {
    /// Skip the pairing check and accept.
    #[default]
    Accept,
    /// Fail with `SignatureInvalid`.
    Reject,
}

/// Parse a compressed signature.
pub fn decode_signature(signature: &BlsSignature) -> SlasherResult<Signature> {
    Signature::from_bytes(&signature.bytes).map_err(|_| SlasherError::SignatureDecode)
}

/// Parse and subgroup-check a validator public key.
pub fn decode_public_key(
    validator_index: ValidatorIndex,
    public_key: &BlsPublicKey,
) -> SlasherResult<PublicKey> {
    PublicKey::key_validate(&public_key.bytes)
        .map_err(|_| SlasherError::PublicKeyDecode { validator_index })
}

/// Verify that `signature` was produced jointly by `public_keys` over
/// `signing_root`.
///
/// The signature is always decoded first, so malformed bytes are reported
/// as `SignatureDecode` even when the key set is empty.
pub fn verify_aggregate(
    signing_root: &Hash,
    public_keys: &[PublicKey],
    signature: &BlsSignature,
    empty_policy: EmptyAttesterPolicy,
) -> SlasherResult<()> {
    let sig = decode_signature(signature)?;

    if public_keys.is_empty() {
        return match empty_policy {
            EmptyAttesterPolicy::Accept => Ok(()),
            EmptyAttesterPolicy::Reject => Err(SlasherError::SignatureInvalid),
        };
    }

    let pk_refs: Vec<&PublicKey> = public_keys.iter().collect();
    let result = sig.fast_aggregate_verify(true, signing_root, DST, &pk_refs);

    if result == BLST_ERROR::BLST_SUCCESS {
        Ok(())
    } else {
        Err(SlasherError::SignatureInvalid)
    }
}

/// Aggregate multiple signatures over the same message into one.
pub fn aggregate_signatures(signatures: &[BlsSignature]) -> SlasherResult<BlsSignature> {
    if signatures.is_empty() {
        return Ok(BlsSignature::infinity());
    }

    let parsed = signatures
        .iter()
        .map(decode_signature)
        .collect::<SlasherResult<Vec<_>>>()?;
    let refs: Vec<&Signature> = parsed.iter().collect();

    let aggregate =
        AggregateSignature::aggregate(&refs, true).map_err(|_| SlasherError::SignatureDecode)?;

    Ok(BlsSignature::new(aggregate.to_signature().to_bytes()))
}
