use anchor_lang::prelude::*;

use crate::{constants::POLL_SEED, state::PollAccount};

#[derive(Accounts)]
#[instruction(poll_id: u64)]
pub struct InitializePoll<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = 8 + PollAccount::INIT_SPACE,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll_account: Account<'info, PollAccount>,

    pub system_program: Program<'info, System>,
}

/// Creates a poll with an empty candidate list.
///
/// `init` fails if the poll PDA is already allocated, so each `poll_id`
/// can be used once. The signer pays rent but is not recorded.
///
/// # Arguments
/// * `poll_id` - Identifier chosen by the creator, also the PDA seed
/// * `voting_start` - First second at which votes are accepted (0 = immediately)
/// * `voting_end` - Last second at which votes are accepted
pub fn initialize_poll(
    ctx: Context<InitializePoll>,
    poll_id: u64,
    voting_start: i64,
    voting_end: i64,
    name: String,
    description: String,
) -> Result<()> {
    let poll = PollAccount::new(poll_id, name, description, voting_start, voting_end)?;

    msg!(
        "Creating poll {} open from {} to {}",
        poll_id,
        voting_start,
        voting_end
    );

    ctx.accounts.poll_account.set_inner(poll);

    Ok(())
}
