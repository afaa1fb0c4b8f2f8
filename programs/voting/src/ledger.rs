//! In-memory ledger for simulation and tests.
//!
//! Commits each transaction atomically: writes are staged while the engine
//! runs and only folded into the ledger if it returns `Ok`.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{
    address::{candidate_address, poll_address, AddressDeriver, ProgramAddressDeriver},
    clock::{FixedClock, LedgerClock},
    engine::{self, RecordStore, Transaction},
    state::{CandidateAccount, PollAccount},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Poll(PollAccount),
    Candidate(CandidateAccount),
}

impl Record {
    fn as_poll(&self) -> Option<&PollAccount> {
        match self {
            Record::Poll(poll) => Some(poll),
            Record::Candidate(_) => None,
        }
    }

    fn as_candidate(&self) -> Option<&CandidateAccount> {
        match self {
            Record::Candidate(candidate) => Some(candidate),
            Record::Poll(_) => None,
        }
    }
}

pub struct MemoryLedger<D = ProgramAddressDeriver, C = FixedClock> {
    records: BTreeMap<Pubkey, Record>,
    deriver: D,
    clock: C,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new(ProgramAddressDeriver::default(), FixedClock::default())
    }
}

impl<D: AddressDeriver, C: LedgerClock> MemoryLedger<D, C> {
    pub fn new(deriver: D, clock: C) -> Self {
        Self {
            records: BTreeMap::new(),
            deriver,
            clock,
        }
    }

    pub fn deriver(&self) -> &D {
        &self.deriver
    }

    pub fn set_clock(&mut self, clock: C) {
        self.clock = clock;
    }

    /// Runs `tx` through the engine and commits its writes on success.
    pub fn submit(&mut self, tx: &Transaction) -> Result<()> {
        let mut staged = Staged {
            base: &self.records,
            writes: BTreeMap::new(),
        };
        engine::process(&mut staged, &self.deriver, &self.clock, tx)?;

        let writes = staged.writes;
        self.records.extend(writes);
        Ok(())
    }

    pub fn poll(&self, address: &Pubkey) -> Option<&PollAccount> {
        self.records.get(address).and_then(Record::as_poll)
    }

    pub fn candidate(&self, address: &Pubkey) -> Option<&CandidateAccount> {
        self.records.get(address).and_then(Record::as_candidate)
    }

    pub fn fetch_poll(&self, poll_id: u64) -> Result<Option<&PollAccount>> {
        let address = poll_address(&self.deriver, poll_id)?;
        Ok(self.poll(&address))
    }

    pub fn fetch_candidate(&self, poll_id: u64, name: &str) -> Result<Option<&CandidateAccount>> {
        let address = candidate_address(&self.deriver, poll_id, name)?;
        Ok(self.candidate(&address))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct Staged<'a> {
    base: &'a BTreeMap<Pubkey, Record>,
    writes: BTreeMap<Pubkey, Record>,
}

impl Staged<'_> {
    fn get(&self, address: &Pubkey) -> Option<&Record> {
        self.writes.get(address).or_else(|| self.base.get(address))
    }
}

impl RecordStore for Staged<'_> {
    fn is_occupied(&self, address: &Pubkey) -> bool {
        self.get(address).is_some()
    }

    fn poll(&self, address: &Pubkey) -> Option<PollAccount> {
        self.get(address).and_then(Record::as_poll).cloned()
    }

    fn candidate(&self, address: &Pubkey) -> Option<CandidateAccount> {
        self.get(address).and_then(Record::as_candidate).cloned()
    }

    fn put_poll(&mut self, address: Pubkey, poll: PollAccount) {
        self.writes.insert(address, Record::Poll(poll));
    }

    fn put_candidate(&mut self, address: Pubkey, candidate: CandidateAccount) {
        self.writes.insert(address, Record::Candidate(candidate));
    }
}
