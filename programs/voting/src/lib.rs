//! Voting - Solana Anchor Program
//!
//! Anyone can open a poll with a voting window, register named candidates
//! under it and cast votes while the window is open. Poll and candidate
//! records live at program-derived addresses computed from their seeds, so
//! clients locate them without any index account.

use anchor_lang::prelude::*;

pub mod address;
pub mod client;
pub mod clock;
pub mod constants;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod state;

use clock::SysvarClock;
pub use error::VotingError;
pub use handlers::*;
pub use state::*;

declare_id!("8gYP5MjjMfZzriFysNoN1zo5My7xWE8pA4wwrYdscNUp");

#[program]
pub mod voting {
    use super::*;

    /// Create a poll with a fixed voting window
    pub fn initialize_poll(
        ctx: Context<InitializePoll>,
        poll_id: u64,
        voting_start: i64,
        voting_end: i64,
        name: String,
        description: String,
    ) -> Result<()> {
        handlers::initialize_poll::initialize_poll(
            ctx,
            poll_id,
            voting_start,
            voting_end,
            name,
            description,
        )
    }

    /// Register a candidate under an existing poll
    pub fn initialize_candidate(
        ctx: Context<InitializeCandidate>,
        poll_id: u64,
        candidate: String,
    ) -> Result<()> {
        handlers::initialize_candidate::initialize_candidate(ctx, poll_id, candidate)
    }

    /// Cast one vote for a candidate
    pub fn vote(ctx: Context<Vote>, poll_id: u64, candidate: String) -> Result<()> {
        handlers::vote::vote(ctx, &SysvarClock, poll_id, candidate)
    }
}
