//! # Canonical Index Validation
//!
//! Slashing evidence is compared by exact index sequence, so an indexed
//! attestation has exactly one accepted encoding: strictly ascending,
//! duplicate-free and within the committee bound.

use super::entities::IndexedAttestation;
use crate::error::{SlasherError, SlasherResult};
use shared_types::{AttestationData, ValidatorIndex};

/// Check the index list of an attestation.
///
/// Missing data or a missing target checkpoint is reported before the
/// index list is looked at.
pub fn validate_indexed_attestation(
    attestation: &IndexedAttestation,
    max_validators_per_committee: usize,
) -> SlasherResult<&AttestationData> {
    let data = attestation
        .data
        .as_ref()
        .ok_or(SlasherError::MissingData("attestation data"))?;
    if data.target.is_none() {
        return Err(SlasherError::MissingData("target checkpoint"));
    }

    validate_attesting_indices(&attestation.attesting_indices, max_validators_per_committee)?;
    Ok(data)
}

/// Reject index lists that are too long or not uniquely sorted.
pub fn validate_attesting_indices(
    indices: &[ValidatorIndex],
    max_validators_per_committee: usize,
) -> SlasherResult<()> {
    if indices.len() > max_validators_per_committee {
        return Err(SlasherError::TooManyIndices {
            count: indices.len(),
            max: max_validators_per_committee,
        });
    }

    let mut canonical = indices.to_vec();
    canonical.sort_unstable();
    canonical.dedup();

    if canonical != indices {
        return Err(SlasherError::NonCanonicalIndices);
    }
    Ok(())
}
