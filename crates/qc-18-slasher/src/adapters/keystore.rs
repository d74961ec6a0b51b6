//! Map-backed public key lookup.

use crate::domain::BlsPublicKey;
use crate::ports::outbound::{Keystore, KeystoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::ValidatorIndex;
use std::collections::HashMap;

/// Keystore holding every known validator key in memory.
#[derive(Debug, Default)]
pub struct InMemoryKeystore {
    keys: RwLock<HashMap<ValidatorIndex, BlsPublicKey>>,
}

impl InMemoryKeystore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the key of `index`.
    pub fn insert(&self, index: ValidatorIndex, key: BlsPublicKey) {
        self.keys.write().insert(index, key);
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl FromIterator<(ValidatorIndex, BlsPublicKey)> for InMemoryKeystore {
    fn from_iter<I: IntoIterator<Item = (ValidatorIndex, BlsPublicKey)>>(iter: I) -> Self {
        Self {
            keys: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Keystore for InMemoryKeystore {
    async fn resolve_public_keys(
        &self,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, BlsPublicKey>, KeystoreError> {
        let keys = self.keys.read();
        indices
            .iter()
            .map(|&index| {
                keys.get(&index)
                    .map(|key| (index, key.clone()))
                    .ok_or(KeystoreError::UnknownValidator(index))
            })
            .collect()
    }
}
