/// Seed prefix for poll PDAs
pub const POLL_SEED: &[u8] = b"poll";

/// Longest poll title accepted, in bytes
pub const MAX_POLL_NAME_LEN: usize = 64;

/// Longest poll description accepted, in bytes
pub const MAX_POLL_DESCRIPTION_LEN: usize = 280;

/// Candidate names are used verbatim as a PDA seed, so they share the seed limit.
pub const MAX_CANDIDATE_NAME_LEN: usize = 32;
