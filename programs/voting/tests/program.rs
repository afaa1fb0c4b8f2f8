//! Integration Tests for the Voting Solana Program
//!
//! These load the program into a test bank and send real transactions:
//! - PDA derivation and account creation through `init`
//! - Seed constraints on poll and candidate accounts
//! - Voting window enforcement against the Clock sysvar
//! - Error codes surfaced to the client

use anchor_lang::prelude::{Clock, Pubkey};
use anchor_lang::solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, instruction::Instruction,
};
use anchor_lang::AccountDeserialize;
use solana_program_test::*;
use solana_sdk::{
    instruction::InstructionError,
    signature::Signer,
    transaction::{Transaction, TransactionError},
};
use voting::{
    address::{candidate_address, poll_address, ProgramAddressDeriver},
    client, CandidateAccount, PollAccount, VotingError,
};

const POLL_ID: u64 = 1;
const VOTING_END: i64 = 1_870_558_415;
const NOW: i64 = 1_700_000_000;
const POLL_NAME: &str = "What is your favorite programming language?";
const POLL_DESCRIPTION: &str = "Share your preference on programming languages";

/// Runs the Anchor entrypoint as a native builtin
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    // The generated entrypoint wants the slice to live as long as the accounts
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    voting::entry(program_id, accounts, data)
}

/// Test context holding the running bank and its funded payer
struct TestContext {
    context: ProgramTestContext,
}

impl TestContext {
    /// Start a bank with the program loaded and the clock pinned to `NOW`
    async fn new() -> Self {
        let program_test = ProgramTest::new("voting", voting::ID, processor!(process_instruction));
        let context = program_test.start_with_context().await;

        let mut ctx = Self { context };
        ctx.set_time(NOW).await;
        ctx
    }

    fn signer(&self) -> Pubkey {
        self.context.payer.pubkey()
    }

    /// Overwrite the Clock sysvar's unix timestamp
    async fn set_time(&mut self, unix_timestamp: i64) {
        let mut clock: Clock = self.context.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp = unix_timestamp;
        self.context.set_sysvar(&clock);
    }

    /// Sign with the payer and submit under a fresh blockhash, so repeated
    /// identical instructions are not deduplicated
    async fn send(&mut self, ix: Instruction) -> Result<(), BanksClientError> {
        let blockhash = self.context.get_new_latest_blockhash().await.unwrap();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.context.payer.pubkey()),
            &[&self.context.payer],
            blockhash,
        );
        self.context.banks_client.process_transaction(tx).await
    }

    async fn create_poll(&mut self, poll_id: u64, start: i64, end: i64) -> Result<(), BanksClientError> {
        let ix = client::initialize_poll(
            self.signer(),
            poll_id,
            start,
            end,
            POLL_NAME.to_string(),
            POLL_DESCRIPTION.to_string(),
        )
        .unwrap();
        self.send(ix).await
    }

    async fn register(&mut self, poll_id: u64, name: &str) -> Result<(), BanksClientError> {
        let ix = client::initialize_candidate(self.signer(), poll_id, name.to_string()).unwrap();
        self.send(ix).await
    }

    async fn vote(&mut self, poll_id: u64, name: &str) -> Result<(), BanksClientError> {
        let ix = client::vote(self.signer(), poll_id, name.to_string()).unwrap();
        self.send(ix).await
    }

    async fn poll(&mut self, poll_id: u64) -> PollAccount {
        let address = poll_address(&ProgramAddressDeriver::default(), poll_id).unwrap();
        let account = self
            .context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("poll account exists");

        PollAccount::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    async fn candidate(&mut self, poll_id: u64, name: &str) -> CandidateAccount {
        let address = candidate_address(&ProgramAddressDeriver::default(), poll_id, name).unwrap();
        let account = self
            .context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("candidate account exists");

        CandidateAccount::try_deserialize(&mut account.data.as_slice()).unwrap()
    }
}

/// Error raised by the first (only) instruction of a failed transaction
fn instruction_error(err: BanksClientError) -> InstructionError {
    match err.unwrap() {
        TransactionError::InstructionError(0, error) => error,
        other => panic!("unexpected transaction error: {other:?}"),
    }
}

fn program_error(error: VotingError) -> InstructionError {
    InstructionError::Custom(u32::from(error))
}

fn anchor_error(error: anchor_lang::error::ErrorCode) -> InstructionError {
    InstructionError::Custom(u32::from(error))
}

/// System program's `AccountAlreadyInUse`, raised when `init` hits an allocated PDA
const ACCOUNT_ALREADY_IN_USE: InstructionError = InstructionError::Custom(0);

// =============================================================================
// POLL INITIALIZATION TESTS
// =============================================================================

#[tokio::test]
async fn test_initialize_poll_success() {
    let mut ctx = TestContext::new().await;

    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();

    let poll = ctx.poll(POLL_ID).await;
    assert_eq!(poll.poll_id, POLL_ID);
    assert_eq!(poll.poll_name, POLL_NAME);
    assert_eq!(poll.poll_description, POLL_DESCRIPTION);
    assert_eq!(poll.poll_voting_start, 0);
    assert_eq!(poll.poll_voting_end, VOTING_END);
    assert_eq!(poll.poll_option_index, 0);
}

#[tokio::test]
async fn test_initialize_poll_twice_fails() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();

    let err = ctx.create_poll(POLL_ID, 5, 10).await.unwrap_err();
    assert_eq!(instruction_error(err), ACCOUNT_ALREADY_IN_USE);

    let poll = ctx.poll(POLL_ID).await;
    assert_eq!(poll.poll_voting_start, 0);
    assert_eq!(poll.poll_voting_end, VOTING_END);
}

#[tokio::test]
async fn test_initialize_poll_invalid_window() {
    let mut ctx = TestContext::new().await;

    let err = ctx.create_poll(POLL_ID, 500, 500).await.unwrap_err();
    assert_eq!(
        instruction_error(err),
        program_error(VotingError::InvalidVotingWindow)
    );
}

// =============================================================================
// CANDIDATE TESTS
// =============================================================================

#[tokio::test]
async fn test_initialize_candidate_success() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();

    ctx.register(POLL_ID, "Rust").await.unwrap();

    let candidate = ctx.candidate(POLL_ID, "Rust").await;
    assert_eq!(candidate.candidate_name, "Rust");
    assert_eq!(candidate.candidate_votes, 0);
    assert_eq!(ctx.poll(POLL_ID).await.poll_option_index, 1);
}

#[tokio::test]
async fn test_initialize_candidate_duplicate_fails() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();
    ctx.register(POLL_ID, "Rust").await.unwrap();

    let err = ctx.register(POLL_ID, "Rust").await.unwrap_err();
    assert_eq!(instruction_error(err), ACCOUNT_ALREADY_IN_USE);
    assert_eq!(ctx.poll(POLL_ID).await.poll_option_index, 1);
}

#[tokio::test]
async fn test_initialize_candidate_without_poll_fails() {
    let mut ctx = TestContext::new().await;

    let err = ctx.register(POLL_ID, "Rust").await.unwrap_err();
    assert_eq!(
        instruction_error(err),
        anchor_error(anchor_lang::error::ErrorCode::AccountNotInitialized)
    );
}

#[tokio::test]
async fn test_initialize_candidate_name_at_seed_limit() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();
    let name = "x".repeat(32);

    ctx.register(POLL_ID, &name).await.unwrap();

    assert_eq!(ctx.candidate(POLL_ID, &name).await.candidate_name, name);
}

// =============================================================================
// VOTING TESTS
// =============================================================================

#[tokio::test]
async fn test_vote_twice_from_same_signer() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, NOW - 100, NOW + 1_000).await.unwrap();
    ctx.register(POLL_ID, "TypeScript").await.unwrap();

    ctx.vote(POLL_ID, "TypeScript").await.unwrap();
    assert_eq!(ctx.candidate(POLL_ID, "TypeScript").await.candidate_votes, 1);

    ctx.vote(POLL_ID, "TypeScript").await.unwrap();
    assert_eq!(ctx.candidate(POLL_ID, "TypeScript").await.candidate_votes, 2);
}

#[tokio::test]
async fn test_vote_before_start_fails() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, NOW + 100, NOW + 1_000).await.unwrap();
    ctx.register(POLL_ID, "Rust").await.unwrap();

    let err = ctx.vote(POLL_ID, "Rust").await.unwrap_err();
    assert_eq!(
        instruction_error(err),
        program_error(VotingError::VotingNotStarted)
    );
    assert_eq!(ctx.candidate(POLL_ID, "Rust").await.candidate_votes, 0);
}

#[tokio::test]
async fn test_vote_after_end_fails() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, NOW - 100, NOW + 100).await.unwrap();
    ctx.register(POLL_ID, "Rust").await.unwrap();
    ctx.vote(POLL_ID, "Rust").await.unwrap();

    ctx.set_time(NOW + 101).await;

    let err = ctx.vote(POLL_ID, "Rust").await.unwrap_err();
    assert_eq!(
        instruction_error(err),
        program_error(VotingError::VotingClosed)
    );
    assert_eq!(ctx.candidate(POLL_ID, "Rust").await.candidate_votes, 1);
}

#[tokio::test]
async fn test_vote_with_mismatched_candidate_account_fails() {
    let mut ctx = TestContext::new().await;
    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();
    ctx.register(POLL_ID, "Rust").await.unwrap();
    ctx.register(POLL_ID, "TypeScript").await.unwrap();

    let mut ix = client::vote(ctx.signer(), POLL_ID, "Rust".to_string()).unwrap();
    ix.accounts[2].pubkey =
        candidate_address(&ProgramAddressDeriver::default(), POLL_ID, "TypeScript").unwrap();

    let err = ctx.send(ix).await.unwrap_err();
    assert_eq!(
        instruction_error(err),
        anchor_error(anchor_lang::error::ErrorCode::ConstraintSeeds)
    );
    assert_eq!(ctx.candidate(POLL_ID, "Rust").await.candidate_votes, 0);
    assert_eq!(ctx.candidate(POLL_ID, "TypeScript").await.candidate_votes, 0);
}

// =============================================================================
// END-TO-END SCENARIO
// =============================================================================

#[tokio::test]
async fn test_favorite_language_poll() {
    let mut ctx = TestContext::new().await;

    ctx.create_poll(POLL_ID, 0, VOTING_END).await.unwrap();
    let poll = ctx.poll(POLL_ID).await;
    assert_eq!(poll.poll_name, POLL_NAME);
    assert_eq!(poll.poll_option_index, 0);

    ctx.register(POLL_ID, "Rust").await.unwrap();
    assert_eq!(ctx.poll(POLL_ID).await.poll_option_index, 1);
    assert_eq!(ctx.candidate(POLL_ID, "Rust").await.candidate_votes, 0);

    ctx.register(POLL_ID, "TypeScript").await.unwrap();
    ctx.vote(POLL_ID, "TypeScript").await.unwrap();
    ctx.vote(POLL_ID, "TypeScript").await.unwrap();

    assert_eq!(ctx.candidate(POLL_ID, "TypeScript").await.candidate_votes, 2);
    assert_eq!(ctx.candidate(POLL_ID, "Rust").await.candidate_votes, 0);
    assert_eq!(ctx.poll(POLL_ID).await.poll_option_index, 2);
}
