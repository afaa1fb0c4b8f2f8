//! Instruction builders for off-chain callers.
//!
//! Addresses are derived with [`ProgramAddressDeriver`], so a name that cannot
//! be used as a seed comes back as `InvalidSeeds` instead of a panic.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{InstructionData, ToAccountMetas};

use crate::address::{candidate_address, poll_address, ProgramAddressDeriver};

pub fn initialize_poll(
    signer: Pubkey,
    poll_id: u64,
    voting_start: i64,
    voting_end: i64,
    name: String,
    description: String,
) -> Result<Instruction> {
    let deriver = ProgramAddressDeriver::default();
    let poll_account = poll_address(&deriver, poll_id)?;

    Ok(Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::InitializePoll {
            signer,
            poll_account,
            system_program: System::id(),
        }
        .to_account_metas(None),
        data: crate::instruction::InitializePoll {
            poll_id,
            voting_start,
            voting_end,
            name,
            description,
        }
        .data(),
    })
}

pub fn initialize_candidate(
    signer: Pubkey,
    poll_id: u64,
    candidate: String,
) -> Result<Instruction> {
    let deriver = ProgramAddressDeriver::default();
    let poll_account = poll_address(&deriver, poll_id)?;
    let candidate_account = candidate_address(&deriver, poll_id, &candidate)?;

    Ok(Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::InitializeCandidate {
            signer,
            poll_account,
            candidate_account,
            system_program: System::id(),
        }
        .to_account_metas(None),
        data: crate::instruction::InitializeCandidate { poll_id, candidate }.data(),
    })
}

pub fn vote(signer: Pubkey, poll_id: u64, candidate: String) -> Result<Instruction> {
    let deriver = ProgramAddressDeriver::default();
    let poll_account = poll_address(&deriver, poll_id)?;
    let candidate_account = candidate_address(&deriver, poll_id, &candidate)?;

    Ok(Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Vote {
            signer,
            poll_account,
            candidate_account,
        }
        .to_account_metas(None),
        data: crate::instruction::Vote { poll_id, candidate }.data(),
    })
}
