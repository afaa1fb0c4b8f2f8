//! Deterministic record addressing.
//!
//! Polls and candidates are located purely from their seeds, so no index
//! account is needed. The derivation is injected through [`AddressDeriver`]
//! so the engine can run against a substrate with a different scheme.

use anchor_lang::prelude::*;

use crate::constants::POLL_SEED;
use crate::error::VotingError;

pub trait AddressDeriver {
    /// Maps a seed tuple to exactly one address.
    fn derive(&self, seeds: &[&[u8]]) -> Result<Pubkey>;
}

/// Solana program-derived addresses owned by `program_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramAddressDeriver {
    pub program_id: Pubkey,
}

impl ProgramAddressDeriver {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }
}

impl Default for ProgramAddressDeriver {
    fn default() -> Self {
        Self::new(crate::ID)
    }
}

impl AddressDeriver for ProgramAddressDeriver {
    fn derive(&self, seeds: &[&[u8]]) -> Result<Pubkey> {
        Pubkey::try_find_program_address(seeds, &self.program_id)
            .map(|(address, _bump)| address)
            .ok_or_else(|| error!(VotingError::InvalidSeeds))
    }
}

pub fn poll_address(deriver: &impl AddressDeriver, poll_id: u64) -> Result<Pubkey> {
    deriver.derive(&[POLL_SEED, &poll_id.to_le_bytes()])
}

pub fn candidate_address(
    deriver: &impl AddressDeriver,
    poll_id: u64,
    name: &str,
) -> Result<Pubkey> {
    deriver.derive(&[&poll_id.to_le_bytes(), name.as_bytes()])
}
