//! Aggregation bitfield
//!
//! One bit per committee seat. Bit order follows the SSZ `Bitlist` layout:
//! bit `i` lives in byte `i / 8` at position `i % 8` (least significant
//! first).

use bitvec::prelude::*;
use ssz_types::typenum::U2048;
use ssz_types::BitList;
use thiserror::Error;

/// Largest committee a wire bitlist may describe.
pub type MaxValidatorsPerCommittee = U2048;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BitfieldError {
    /// Bitlist encoding has no length sentinel bit
    #[error("Bitlist is missing its length sentinel")]
    MissingSentinel,

    /// Wrong byte count or longer than a committee can be
    #[error("Malformed bitlist: {0}")]
    Malformed(String),
}

impl From<ssz_types::Error> for BitfieldError {
    fn from(err: ssz_types::Error) -> Self {
        match err {
            ssz_types::Error::MissingLengthInformation => BitfieldError::MissingSentinel,
            other => BitfieldError::Malformed(format!("{other:?}")),
        }
    }
}

/// Participation bits of a committee vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregationBitfield {
    bits: BitVec<u8, Lsb0>,
}

impl AggregationBitfield {
    /// All-zero bitfield for a committee of `len` seats.
    pub fn with_len(len: usize) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; len],
        }
    }

    /// Bitfield of `len` seats with the given positions set.
    ///
    /// Positions outside `0..len` are dropped.
    pub fn from_positions(len: usize, positions: &[usize]) -> Self {
        let mut bits = bitvec![u8, Lsb0; 0; len];
        for &pos in positions {
            if pos < len {
                bits.set(pos, true);
            }
        }
        Self { bits }
    }

    /// Decode an SSZ `Bitlist`, where the highest set bit of the last byte
    /// marks the length and is not itself a participation bit.
    ///
    /// Lists longer than `MaxValidatorsPerCommittee` are rejected.
    pub fn from_bitlist_bytes(bytes: &[u8]) -> Result<Self, BitfieldError> {
        let list = BitList::<MaxValidatorsPerCommittee>::from_bytes(bytes.to_vec().into())?;
        Ok(Self {
            bits: list.iter().collect(),
        })
    }

    /// Number of seats covered.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, position: usize) -> bool {
        self.bits.get(position).map(|b| *b).unwrap_or(false)
    }

    /// Number of participating seats.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Set positions in ascending order.
    pub fn set_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}
