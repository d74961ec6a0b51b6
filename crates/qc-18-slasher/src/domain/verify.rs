//! # Indexed Attestation Verification
//!
//! The one place that decides whether an indexed attestation is
//! well-formed and correctly signed. The pipeline calls the stages one at a
//! time so it can interleave collaborator lookups; `verify` runs them all
//! for callers that already hold the fork, genesis root and keys.

use super::bls::{self, EmptyAttesterPolicy};
use super::canonical;
use super::entities::{BlsPublicKey, IndexedAttestation};
use super::signing;
use crate::config::SlasherConfig;
use crate::error::{SlasherError, SlasherResult};
use blst::min_pk::PublicKey;
use shared_types::{AttestationData, DomainType, Fork, Hash, ValidatorIndex};
use std::collections::HashMap;

/// Stateless verifier parameterised by chain constants.
#[derive(Clone, Debug)]
pub struct IndexedAttestationVerifier {
    max_validators_per_committee: usize,
    domain_type: DomainType,
    empty_policy: EmptyAttesterPolicy,
}

impl IndexedAttestationVerifier {
    pub fn new(
        max_validators_per_committee: usize,
        domain_type: DomainType,
        empty_policy: EmptyAttesterPolicy,
    ) -> Self {
        Self {
            max_validators_per_committee,
            domain_type,
            empty_policy,
        }
    }

    pub fn from_config(config: &SlasherConfig) -> Self {
        Self::new(
            config.max_validators_per_committee,
            config.domain_beacon_attester,
            config.empty_attester_policy,
        )
    }

    /// Presence of data and canonical index form.
    pub fn validate<'a>(
        &self,
        attestation: &'a IndexedAttestation,
    ) -> SlasherResult<&'a AttestationData> {
        canonical::validate_indexed_attestation(attestation, self.max_validators_per_committee)
    }

    /// Signing root of `data` under the fork in force at its target epoch.
    pub fn signing_root(
        &self,
        data: &AttestationData,
        fork: &Fork,
        genesis_validators_root: &Hash,
    ) -> SlasherResult<Hash> {
        let target_epoch = data
            .target_epoch()
            .ok_or(SlasherError::MissingData("target checkpoint"))?;
        let domain =
            signing::compute_domain(self.domain_type, fork, target_epoch, genesis_validators_root);
        signing::compute_signing_root(data, &domain)
    }

    /// Decoded keys for exactly `indices`, in index order.
    ///
    /// An index absent from `resolved` is an unknown validator.
    pub fn collect_public_keys(
        &self,
        indices: &[ValidatorIndex],
        resolved: &HashMap<ValidatorIndex, BlsPublicKey>,
    ) -> SlasherResult<Vec<PublicKey>> {
        indices
            .iter()
            .map(|&validator_index| {
                let key = resolved
                    .get(&validator_index)
                    .ok_or(SlasherError::UnknownValidator { validator_index })?;
                bls::decode_public_key(validator_index, key)
            })
            .collect()
    }

    pub fn verify_signature(
        &self,
        signing_root: &Hash,
        public_keys: &[PublicKey],
        attestation: &IndexedAttestation,
    ) -> SlasherResult<()> {
        bls::verify_aggregate(
            signing_root,
            public_keys,
            &attestation.signature,
            self.empty_policy,
        )
    }

    /// Every pure check, in pipeline order.
    pub fn verify(
        &self,
        attestation: &IndexedAttestation,
        fork: &Fork,
        genesis_validators_root: &Hash,
        resolved: &HashMap<ValidatorIndex, BlsPublicKey>,
    ) -> SlasherResult<()> {
        let data = self.validate(attestation)?;
        let signing_root = self.signing_root(data, fork, genesis_validators_root)?;
        let keys = self.collect_public_keys(&attestation.attesting_indices, resolved)?;
        self.verify_signature(&signing_root, &keys, attestation)
    }
}

impl Default for IndexedAttestationVerifier {
    fn default() -> Self {
        Self::from_config(&SlasherConfig::default())
    }
}
