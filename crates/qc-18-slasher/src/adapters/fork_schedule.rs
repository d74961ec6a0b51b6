//! Fork provider over a fixed, preloaded schedule.

use crate::ports::outbound::{ForkProvider, ProviderError};
use async_trait::async_trait;
use shared_types::{Epoch, Fork, Hash};

/// Fork schedule known in full at startup.
#[derive(Clone, Debug)]
pub struct StaticForkSchedule {
    /// Ordered by strictly ascending activation epoch
    forks: Vec<Fork>,
    genesis_validators_root: Hash,
}

impl StaticForkSchedule {
    /// Build a schedule from forks in activation order.
    pub fn new(forks: Vec<Fork>, genesis_validators_root: Hash) -> Result<Self, ProviderError> {
        if forks.is_empty() {
            return Err(ProviderError::MalformedSchedule {
                reason: "schedule has no forks".into(),
            });
        }
        if let Some(pair) = forks.windows(2).find(|w| w[0].epoch >= w[1].epoch) {
            return Err(ProviderError::MalformedSchedule {
                reason: format!(
                    "fork at epoch {} does not follow fork at epoch {}",
                    pair[1].epoch, pair[0].epoch
                ),
            });
        }
        Ok(Self {
            forks,
            genesis_validators_root,
        })
    }

    /// Schedule with one fork active from its epoch onwards.
    pub fn single(fork: Fork, genesis_validators_root: Hash) -> Self {
        Self {
            forks: vec![fork],
            genesis_validators_root,
        }
    }
}

#[async_trait]
impl ForkProvider for StaticForkSchedule {
    async fn fork_at(&self, epoch: Epoch) -> Result<Fork, ProviderError> {
        self.forks
            .iter()
            .rev()
            .find(|fork| fork.epoch <= epoch)
            .copied()
            .ok_or(ProviderError::NoForkForEpoch { epoch })
    }

    async fn genesis_validators_root(&self) -> Result<Hash, ProviderError> {
        Ok(self.genesis_validators_root)
    }
}
