use anchor_lang::prelude::*;

#[error_code]
pub enum VotingError {
    #[msg("A poll with this id already exists")]
    PollAlreadyExists,
    #[msg("A candidate with this name is already registered in the poll")]
    CandidateAlreadyExists,
    #[msg("Poll not found")]
    PollNotFound,
    #[msg("Candidate not found")]
    CandidateNotFound,
    #[msg("Voting start must be before voting end")]
    InvalidVotingWindow,
    #[msg("Voting has not started yet")]
    VotingNotStarted,
    #[msg("Voting has been closed")]
    VotingClosed,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Account address does not match the address derived from its seeds")]
    AddressMismatch,
    #[msg("A required account was not supplied")]
    MissingAccount,
    #[msg("Poll name is too long")]
    PollNameTooLong,
    #[msg("Poll description is too long")]
    PollDescriptionTooLong,
    #[msg("Candidate name is too long")]
    CandidateNameTooLong,
    #[msg("Counter overflow")]
    CounterOverflow,
    #[msg("Seeds do not produce a valid program address")]
    InvalidSeeds,
}
