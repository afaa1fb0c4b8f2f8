//! Host-agnostic state machine.
//!
//! The on-chain handlers lean on Anchor account constraints for address
//! checks and allocation. This module runs the same transitions against any
//! [`RecordStore`], with address derivation and time injected, so the rules
//! can be exercised or simulated off chain.

use anchor_lang::prelude::*;

use crate::{
    address::{candidate_address, poll_address, AddressDeriver},
    clock::LedgerClock,
    error::VotingError,
    state::{CandidateAccount, PollAccount},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VotingInstruction {
    CreatePoll {
        poll_id: u64,
        voting_start: i64,
        voting_end: i64,
        name: String,
        description: String,
    },
    RegisterCandidate {
        poll_id: u64,
        name: String,
    },
    CastVote {
        poll_id: u64,
        name: String,
    },
}

/// Record addresses a transaction claims to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionAccounts {
    pub poll: Pubkey,
    pub candidate: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// `None` when the transaction carries no valid signature
    pub signer: Option<Pubkey>,
    pub accounts: InstructionAccounts,
    pub instruction: VotingInstruction,
}

impl VotingInstruction {
    pub fn poll_id(&self) -> u64 {
        match self {
            Self::CreatePoll { poll_id, .. }
            | Self::RegisterCandidate { poll_id, .. }
            | Self::CastVote { poll_id, .. } => *poll_id,
        }
    }

    /// Addresses an honest client would pass for this instruction.
    pub fn accounts(&self, deriver: &impl AddressDeriver) -> Result<InstructionAccounts> {
        let poll = poll_address(deriver, self.poll_id())?;
        let candidate = match self {
            Self::CreatePoll { .. } => None,
            Self::RegisterCandidate { poll_id, name } | Self::CastVote { poll_id, name } => {
                Some(candidate_address(deriver, *poll_id, name)?)
            }
        };

        Ok(InstructionAccounts { poll, candidate })
    }
}

impl Transaction {
    /// Builds a signed transaction with freshly derived account addresses.
    pub fn new(
        signer: Pubkey,
        instruction: VotingInstruction,
        deriver: &impl AddressDeriver,
    ) -> Result<Self> {
        Ok(Self {
            signer: Some(signer),
            accounts: instruction.accounts(deriver)?,
            instruction,
        })
    }
}

/// Persistence the engine reads from and writes to.
///
/// Poll and candidate records share one address space.
pub trait RecordStore {
    fn is_occupied(&self, address: &Pubkey) -> bool;

    fn poll(&self, address: &Pubkey) -> Option<PollAccount>;

    fn candidate(&self, address: &Pubkey) -> Option<CandidateAccount>;

    fn put_poll(&mut self, address: Pubkey, poll: PollAccount);

    fn put_candidate(&mut self, address: Pubkey, candidate: CandidateAccount);
}

/// Validates and applies one transaction.
///
/// Every precondition is checked before the first write, so a failed
/// transaction leaves `store` untouched.
pub fn process<S, D, C>(store: &mut S, deriver: &D, clock: &C, tx: &Transaction) -> Result<()>
where
    S: RecordStore,
    D: AddressDeriver,
    C: LedgerClock,
{
    require!(tx.signer.is_some(), VotingError::Unauthorized);

    match &tx.instruction {
        VotingInstruction::CreatePoll {
            poll_id,
            voting_start,
            voting_end,
            name,
            description,
        } => create_poll(
            store,
            deriver,
            &tx.accounts,
            *poll_id,
            *voting_start,
            *voting_end,
            name,
            description,
        ),
        VotingInstruction::RegisterCandidate { poll_id, name } => {
            register_candidate(store, deriver, &tx.accounts, *poll_id, name)
        }
        VotingInstruction::CastVote { poll_id, name } => {
            cast_vote(store, deriver, clock, &tx.accounts, *poll_id, name)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn create_poll(
    store: &mut impl RecordStore,
    deriver: &impl AddressDeriver,
    accounts: &InstructionAccounts,
    poll_id: u64,
    voting_start: i64,
    voting_end: i64,
    name: &str,
    description: &str,
) -> Result<()> {
    let address = checked_poll_address(deriver, accounts, poll_id)?;
    require!(!store.is_occupied(&address), VotingError::PollAlreadyExists);

    let poll = PollAccount::new(
        poll_id,
        name.to_owned(),
        description.to_owned(),
        voting_start,
        voting_end,
    )?;

    msg!(
        "Creating poll {} open from {} to {}",
        poll_id,
        voting_start,
        voting_end
    );
    store.put_poll(address, poll);

    Ok(())
}

fn register_candidate(
    store: &mut impl RecordStore,
    deriver: &impl AddressDeriver,
    accounts: &InstructionAccounts,
    poll_id: u64,
    name: &str,
) -> Result<()> {
    let candidate = CandidateAccount::new(name.to_owned())?;

    let poll_address = checked_poll_address(deriver, accounts, poll_id)?;
    let candidate_address = checked_candidate_address(deriver, accounts, poll_id, name)?;

    let mut poll = store
        .poll(&poll_address)
        .ok_or(VotingError::PollNotFound)?;
    require!(
        !store.is_occupied(&candidate_address),
        VotingError::CandidateAlreadyExists
    );

    let ordinal = poll.register_option()?;

    msg!(
        "Registered candidate {} as option {} of poll {}",
        name,
        ordinal,
        poll_id
    );
    store.put_candidate(candidate_address, candidate);
    store.put_poll(poll_address, poll);

    Ok(())
}

fn cast_vote(
    store: &mut impl RecordStore,
    deriver: &impl AddressDeriver,
    clock: &impl LedgerClock,
    accounts: &InstructionAccounts,
    poll_id: u64,
    name: &str,
) -> Result<()> {
    let poll_address = checked_poll_address(deriver, accounts, poll_id)?;
    let candidate_address = checked_candidate_address(deriver, accounts, poll_id, name)?;

    let poll = store
        .poll(&poll_address)
        .ok_or(VotingError::PollNotFound)?;
    let mut candidate = store
        .candidate(&candidate_address)
        .ok_or(VotingError::CandidateNotFound)?;

    poll.check_voting_open(clock.unix_timestamp()?)?;
    let votes = candidate.record_vote()?;

    msg!("Vote for {} in poll {}, tally now {}", name, poll_id, votes);
    store.put_candidate(candidate_address, candidate);

    Ok(())
}

fn checked_poll_address(
    deriver: &impl AddressDeriver,
    accounts: &InstructionAccounts,
    poll_id: u64,
) -> Result<Pubkey> {
    let expected = poll_address(deriver, poll_id)?;
    require_keys_eq!(accounts.poll, expected, VotingError::AddressMismatch);
    Ok(expected)
}

fn checked_candidate_address(
    deriver: &impl AddressDeriver,
    accounts: &InstructionAccounts,
    poll_id: u64,
    name: &str,
) -> Result<Pubkey> {
    let supplied = accounts.candidate.ok_or(VotingError::MissingAccount)?;
    let expected = candidate_address(deriver, poll_id, name)?;
    require_keys_eq!(supplied, expected, VotingError::AddressMismatch);
    Ok(expected)
}
