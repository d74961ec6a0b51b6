//! Slasher configuration from defaults, environment variables or JSON.

use crate::domain::bls::EmptyAttesterPolicy;
use crate::domain::signing::DOMAIN_BEACON_ATTESTER;
use serde::{Deserialize, Serialize};
use shared_types::DomainType;
use std::env;
use thiserror::Error;

/// Upper bound on committee size in the beacon chain.
pub const MAX_VALIDATORS_PER_COMMITTEE: usize = 2048;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_validators_per_committee must be greater than zero")]
    ZeroCommitteeBound,

    #[error("Invalid configuration document: {0}")]
    Parse(String),
}

/// Configuration for the slashing report pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlasherConfig {
    /// Longest accepted attesting-index list
    pub max_validators_per_committee: usize,

    /// Domain type mixed into attestation signing roots
    pub domain_beacon_attester: DomainType,

    /// Treatment of attestations with no attesters
    pub empty_attester_policy: EmptyAttesterPolicy,
}

impl Default for SlasherConfig {
    fn default() -> Self {
        Self {
            max_validators_per_committee: MAX_VALIDATORS_PER_COMMITTEE,
            domain_beacon_attester: DOMAIN_BEACON_ATTESTER,
            empty_attester_policy: EmptyAttesterPolicy::Accept,
        }
    }
}

impl SlasherConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_SLASHER_MAX_VALIDATORS_PER_COMMITTEE`: index list bound (default: 2048)
    /// - `QC_SLASHER_DOMAIN_BEACON_ATTESTER`: 4-byte hex domain type (default: 01000000)
    /// - `QC_SLASHER_REJECT_EMPTY_ATTESTATIONS`: reject zero-attester votes (default: false)
    ///
    /// Unparseable values, and a zero committee bound, fall back to the
    /// default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_validators_per_committee: env::var("QC_SLASHER_MAX_VALIDATORS_PER_COMMITTEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|max: &usize| *max > 0)
                .unwrap_or(defaults.max_validators_per_committee),

            domain_beacon_attester: env::var("QC_SLASHER_DOMAIN_BEACON_ATTESTER")
                .ok()
                .and_then(|v| parse_domain_type(&v))
                .unwrap_or(defaults.domain_beacon_attester),

            empty_attester_policy: env::var("QC_SLASHER_REJECT_EMPTY_ATTESTATIONS")
                .map(|v| {
                    if v.to_lowercase() == "true" || v == "1" {
                        EmptyAttesterPolicy::Reject
                    } else {
                        EmptyAttesterPolicy::Accept
                    }
                })
                .unwrap_or(defaults.empty_attester_policy),
        }
    }

    /// Parse a JSON document; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_validators_per_committee == 0 {
            return Err(ConfigError::ZeroCommitteeBound);
        }
        Ok(())
    }
}

fn parse_domain_type(value: &str) -> Option<DomainType> {
    let bytes = hex::decode(value.trim_start_matches("0x")).ok()?;
    bytes.try_into().ok()
}
