//! # In-Memory Slashing Detector
//!
//! Enforces the two attester commandments against every vote recorded so
//! far:
//!
//! 1. No Double Vote: two different votes for the same target epoch
//! 2. No Surround Vote: a vote `S->T` alongside a vote `S'->T'` where
//!    `S < S'` and `T' < T`
//!
//! History is unbounded. Long-running nodes want a span-based detector.

use crate::domain::{AttesterSlashing, IndexedAttestation};
use crate::ports::outbound::{DetectorError, SlashingDetector};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Epoch, ValidatorIndex};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
struct DetectorState {
    /// Every recorded attestation, once
    attestations: Vec<IndexedAttestation>,
    /// Validator -> positions in `attestations`
    by_validator: HashMap<ValidatorIndex, Vec<usize>>,
}

/// Detector that keeps the full vote history in memory.
#[derive(Debug, Default)]
pub struct InMemorySlashingDetector {
    state: RwLock<DetectorState>,
}

impl InMemorySlashingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct attestations recorded.
    pub fn recorded(&self) -> usize {
        self.state.read().attestations.len()
    }

    /// Attestations recorded for `validator`.
    pub fn history_of(&self, validator: ValidatorIndex) -> Vec<IndexedAttestation> {
        let state = self.state.read();
        state
            .by_validator
            .get(&validator)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&p| state.attestations[p].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `(source, target)` epochs, when the attestation carries both.
fn vote(attestation: &IndexedAttestation) -> Option<(Epoch, Epoch)> {
    let data = attestation.data.as_ref()?;
    Some((data.source?.epoch, data.target?.epoch))
}

fn is_double_vote(a: &IndexedAttestation, b: &IndexedAttestation) -> bool {
    match (vote(a), vote(b)) {
        (Some((_, ta)), Some((_, tb))) => ta == tb && a.data != b.data,
        _ => false,
    }
}

fn surrounds(outer: (Epoch, Epoch), inner: (Epoch, Epoch)) -> bool {
    outer.0 < inner.0 && inner.1 < outer.1
}

fn is_surround_vote(a: &IndexedAttestation, b: &IndexedAttestation) -> bool {
    match (vote(a), vote(b)) {
        (Some(va), Some(vb)) => surrounds(va, vb) || surrounds(vb, va),
        _ => false,
    }
}

#[async_trait]
impl SlashingDetector for InMemorySlashingDetector {
    async fn detect_attester_slashings(
        &self,
        attestation: &IndexedAttestation,
    ) -> Result<Vec<AttesterSlashing>, DetectorError> {
        let state = self.state.read();

        // One slashing per conflicting attestation, however many validators
        // it shares with the new one.
        let mut conflicting = BTreeSet::new();
        for validator in &attestation.attesting_indices {
            let Some(positions) = state.by_validator.get(validator) else {
                continue;
            };
            for &position in positions {
                let previous = &state.attestations[position];
                if is_double_vote(previous, attestation) || is_surround_vote(previous, attestation)
                {
                    conflicting.insert(position);
                }
            }
        }

        let slashings: Vec<AttesterSlashing> = conflicting
            .into_iter()
            .map(|position| AttesterSlashing {
                attestation_1: state.attestations[position].clone(),
                attestation_2: attestation.clone(),
            })
            .collect();

        if !slashings.is_empty() {
            tracing::debug!(count = slashings.len(), "[qc-18] Conflicting votes found");
        }
        Ok(slashings)
    }

    async fn update_spans(&self, attestation: &IndexedAttestation) -> Result<(), DetectorError> {
        let mut state = self.state.write();
        if state.attestations.contains(attestation) {
            return Ok(());
        }

        let position = state.attestations.len();
        state.attestations.push(attestation.clone());
        for &validator in &attestation.attesting_indices {
            state.by_validator.entry(validator).or_default().push(position);
        }
        Ok(())
    }
}
