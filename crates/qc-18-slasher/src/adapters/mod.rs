//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports. They back the tests and
//! suit single-process deployments; production nodes plug in their own.

mod detector;
mod fork_schedule;
mod keystore;
mod store;

pub use detector::InMemorySlashingDetector;
pub use fork_schedule::StaticForkSchedule;
pub use keystore::InMemoryKeystore;
pub use store::InMemoryAttestationStore;
