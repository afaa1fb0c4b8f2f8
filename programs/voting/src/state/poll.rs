use anchor_lang::prelude::*;

use crate::constants::{MAX_POLL_DESCRIPTION_LEN, MAX_POLL_NAME_LEN};
use crate::error::VotingError;

/// Where a poll sits relative to its voting window at a given instant.
///
/// Polls carry no status field; the phase is always computed from the
/// window and the current ledger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingPhase {
    NotStarted,
    Open,
    Closed,
}

/// A poll, stored at `[b"poll", poll_id.to_le_bytes()]`.
///
/// The creator is not recorded: anyone may register candidates or vote.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct PollAccount {
    /// Creator-chosen identifier, also the address seed
    pub poll_id: u64,
    #[max_len(MAX_POLL_NAME_LEN)]
    pub poll_name: String,
    #[max_len(MAX_POLL_DESCRIPTION_LEN)]
    pub poll_description: String,
    /// Unix seconds; zero means the poll is open from creation
    pub poll_voting_start: i64,
    /// Unix seconds, inclusive
    pub poll_voting_end: i64,
    /// Number of candidates registered so far, i.e. the ordinal of the next one
    pub poll_option_index: u64,
}

impl PollAccount {
    /// Validates the creation inputs and builds a poll with no candidates.
    pub fn new(
        poll_id: u64,
        name: String,
        description: String,
        voting_start: i64,
        voting_end: i64,
    ) -> Result<Self> {
        require!(name.len() <= MAX_POLL_NAME_LEN, VotingError::PollNameTooLong);
        require!(
            description.len() <= MAX_POLL_DESCRIPTION_LEN,
            VotingError::PollDescriptionTooLong
        );
        require!(
            voting_start < voting_end,
            VotingError::InvalidVotingWindow
        );

        Ok(Self {
            poll_id,
            poll_name: name,
            poll_description: description,
            poll_voting_start: voting_start,
            poll_voting_end: voting_end,
            poll_option_index: 0,
        })
    }

    pub fn phase(&self, now: i64) -> VotingPhase {
        if now < self.poll_voting_start {
            VotingPhase::NotStarted
        } else if now > self.poll_voting_end {
            VotingPhase::Closed
        } else {
            VotingPhase::Open
        }
    }

    /// Fails unless `voting_start <= now <= voting_end`.
    pub fn check_voting_open(&self, now: i64) -> Result<()> {
        match self.phase(now) {
            VotingPhase::Open => Ok(()),
            VotingPhase::NotStarted => err!(VotingError::VotingNotStarted),
            VotingPhase::Closed => err!(VotingError::VotingClosed),
        }
    }

    /// Bumps the option index and returns the ordinal assigned to the new candidate.
    pub fn register_option(&mut self) -> Result<u64> {
        let ordinal = self.poll_option_index;
        self.poll_option_index = ordinal
            .checked_add(1)
            .ok_or(VotingError::CounterOverflow)?;
        Ok(ordinal)
    }
}
