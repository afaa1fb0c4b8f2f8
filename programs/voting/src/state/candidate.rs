use anchor_lang::prelude::*;

use crate::constants::MAX_CANDIDATE_NAME_LEN;
use crate::error::VotingError;

/// A candidate, stored at `[poll_id.to_le_bytes(), name.as_bytes()]`.
///
/// The owning poll is only implied by the address seeds.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct CandidateAccount {
    #[max_len(MAX_CANDIDATE_NAME_LEN)]
    pub candidate_name: String,
    pub candidate_votes: u64,
}

impl CandidateAccount {
    pub fn new(name: String) -> Result<Self> {
        require!(
            name.len() <= MAX_CANDIDATE_NAME_LEN,
            VotingError::CandidateNameTooLong
        );

        Ok(Self {
            candidate_name: name,
            candidate_votes: 0,
        })
    }

    /// Adds one vote and returns the new tally. Voters are not tracked.
    pub fn record_vote(&mut self) -> Result<u64> {
        self.candidate_votes = self
            .candidate_votes
            .checked_add(1)
            .ok_or(VotingError::CounterOverflow)?;
        Ok(self.candidate_votes)
    }
}
