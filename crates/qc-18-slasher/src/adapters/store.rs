//! Set-backed attestation store.

use crate::domain::IndexedAttestation;
use crate::ports::outbound::{AttestationStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Stores each distinct attestation once, keyed by its full value.
#[derive(Debug, Default)]
pub struct InMemoryAttestationStore {
    attestations: RwLock<HashSet<IndexedAttestation>>,
}

impl InMemoryAttestationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attestations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attestations.read().is_empty()
    }

    pub fn contains(&self, attestation: &IndexedAttestation) -> bool {
        self.attestations.read().contains(attestation)
    }
}

#[async_trait]
impl AttestationStore for InMemoryAttestationStore {
    async fn save_indexed_attestation(
        &self,
        attestation: &IndexedAttestation,
    ) -> Result<(), StoreError> {
        let inserted = self.attestations.write().insert(attestation.clone());
        if !inserted {
            tracing::trace!("[qc-18] Attestation already stored");
        }
        Ok(())
    }
}
