//! Ports module for the Slasher subsystem
//!
//! - **Inbound (Driving)**: `SlasherApi`, the pipeline entry point
//! - **Outbound (Driven)**: fork provider, keystore, store, detector, metrics

pub mod inbound;
pub mod outbound;

pub use inbound::{OperationContext, SlasherApi, SlashingResponse};
pub use outbound::{AttestationStore, ForkProvider, Keystore, SlasherMetrics, SlashingDetector};
