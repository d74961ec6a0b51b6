//! # Attestation Indexing
//!
//! Converts committee-relative votes into global validator indices.

use super::bitfield::AggregationBitfield;
use super::entities::{IndexedAttestation, RawAttestation};
use shared_types::ValidatorIndex;

/// Global validator indices for the set bits of `bits`.
///
/// Output follows bit position, so it is only sorted when the committee
/// is. Set bits at or beyond `committee.len()` are ignored.
pub fn attesting_indices(
    bits: &AggregationBitfield,
    committee: &[ValidatorIndex],
) -> Vec<ValidatorIndex> {
    let mut indices = Vec::with_capacity(bits.count_ones().min(committee.len()));
    for position in bits.set_positions() {
        if let Some(&index) = committee.get(position) {
            indices.push(index);
        }
    }
    indices
}

/// Build the indexed form of `attestation` for the given committee.
///
/// Indices are sorted but not de-duplicated: a committee listing the same
/// validator twice produces a list that fails canonical validation.
pub fn convert_to_indexed(
    attestation: &RawAttestation,
    committee: &[ValidatorIndex],
) -> IndexedAttestation {
    let mut indices = attesting_indices(&attestation.aggregation_bits, committee);
    indices.sort_unstable();

    IndexedAttestation {
        attesting_indices: indices,
        data: Some(attestation.data.clone()),
        signature: attestation.signature.clone(),
    }
}
