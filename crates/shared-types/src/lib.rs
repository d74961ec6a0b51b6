//! # Shared Types Crate
//!
//! Consensus primitives shared by the slashing pipeline and its
//! collaborators.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary is
//!   defined here.
//! - **Plain Values**: entities are immutable data; behaviour lives in the
//!   subsystem crates.

pub mod entities;

pub use entities::*;
