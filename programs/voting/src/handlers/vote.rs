use anchor_lang::prelude::*;

use crate::{
    clock::LedgerClock,
    constants::POLL_SEED,
    state::{CandidateAccount, PollAccount},
};

#[derive(Accounts)]
#[instruction(poll_id: u64, candidate: String)]
pub struct Vote<'info> {
    pub signer: Signer<'info>,

    #[account(
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll_account: Account<'info, PollAccount>,

    #[account(
        mut,
        seeds = [poll_id.to_le_bytes().as_ref(), candidate.as_bytes()],
        bump
    )]
    pub candidate_account: Account<'info, CandidateAccount>,
}

/// Adds one vote to a candidate while the poll's window is open.
///
/// Voters are not recorded, so the same signer may vote repeatedly.
pub fn vote(
    ctx: Context<Vote>,
    clock: &impl LedgerClock,
    poll_id: u64,
    candidate: String,
) -> Result<()> {
    let now = clock.unix_timestamp()?;
    ctx.accounts.poll_account.check_voting_open(now)?;

    let votes = ctx.accounts.candidate_account.record_vote()?;

    msg!(
        "Vote for {} in poll {}, tally now {}",
        candidate,
        poll_id,
        votes
    );

    Ok(())
}
