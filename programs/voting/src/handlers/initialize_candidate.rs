use anchor_lang::prelude::*;

use crate::{
    constants::POLL_SEED,
    state::{CandidateAccount, PollAccount},
};

#[derive(Accounts)]
#[instruction(poll_id: u64, candidate: String)]
pub struct InitializeCandidate<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll_account: Account<'info, PollAccount>,

    #[account(
        init,
        payer = signer,
        space = 8 + CandidateAccount::INIT_SPACE,
        seeds = [poll_id.to_le_bytes().as_ref(), candidate.as_bytes()],
        bump
    )]
    pub candidate_account: Account<'info, CandidateAccount>,

    pub system_program: Program<'info, System>,
}

/// Registers a named candidate under an existing poll.
///
/// The candidate PDA is keyed on `(poll_id, candidate)`, so a duplicate name
/// within the same poll fails at `init`. Registration is allowed at any time,
/// including after the voting window has closed.
pub fn initialize_candidate(
    ctx: Context<InitializeCandidate>,
    poll_id: u64,
    candidate: String,
) -> Result<()> {
    let record = CandidateAccount::new(candidate)?;
    let ordinal = ctx.accounts.poll_account.register_option()?;

    msg!(
        "Registered candidate {} as option {} of poll {}",
        record.candidate_name,
        ordinal,
        poll_id
    );

    ctx.accounts.candidate_account.set_inner(record);

    Ok(())
}
