//! Storage access for the circle.
//!
//! | Key                       | Tier           | Lifecycle            |
//! |---------------------------|----------------|----------------------|
//! | `DataKey::Config`         | `instance()`   | Written once         |
//! | `DataKey::State`          | `instance()`   | Every transition     |
//! | `DataKey::Roster`         | `instance()`   | Join / exit          |
//! | `DataKey::Member(addr)`   | `persistent()` | Per member           |
//! | `DataKey::Nonce(n)`       | `persistent()` | Forever, append-only |
//! | `DataKey::Bid(c, addr)`   | `persistent()` | Per cycle            |
//! | `DataKey::Bidders(c)`     | `persistent()` | Per cycle            |
//! | `DataKey::CycleResult(c)` | `persistent()` | Forever              |
//!
//! The roster is bounded by `MAX_MEMBERS`, so it stays in `instance()` next
//! to config and state. Everything that grows with time lives in
//! `persistent()` and has its TTL bumped whenever it is touched.

use circle_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

use crate::types::{BidCommit, CircleConfig, CircleState, CycleResult, DataKey, Member};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn bump_persistent(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

// ── Config ────────────────────────────────────────────────────────────────

pub fn has_config(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub fn load_config(e: &Env) -> Result<CircleConfig, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(e: &Env, config: &CircleConfig) {
    e.storage().instance().set(&DataKey::Config, config);
    bump_instance(e);
}

// ── State ─────────────────────────────────────────────────────────────────

pub fn load_state(e: &Env) -> Result<CircleState, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_state(e: &Env, state: &CircleState) {
    e.storage().instance().set(&DataKey::State, state);
    bump_instance(e);
}

// ── Roster ────────────────────────────────────────────────────────────────

pub fn load_roster(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::Roster)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn save_roster(e: &Env, roster: &Vec<Address>) {
    e.storage().instance().set(&DataKey::Roster, roster);
}

// ── Members ───────────────────────────────────────────────────────────────

/// Any row for `wallet`, active or not.
pub fn find_member(e: &Env, wallet: &Address) -> Option<Member> {
    let key = DataKey::Member(wallet.clone());
    let member: Option<Member> = e.storage().persistent().get(&key);
    if member.is_some() {
        bump_persistent(e, &key);
    }
    member
}

/// The row for `wallet`, or `NotMember` if none was ever written.
pub fn load_member(e: &Env, wallet: &Address) -> Result<Member, ContractError> {
    find_member(e, wallet).ok_or(ContractError::NotMember)
}

/// The row for `wallet` if it currently holds a slot.
pub fn load_active_member(e: &Env, wallet: &Address) -> Result<Member, ContractError> {
    match find_member(e, wallet) {
        Some(member) if member.active => Ok(member),
        _ => Err(ContractError::NotMember),
    }
}

pub fn save_member(e: &Env, member: &Member) {
    let key = DataKey::Member(member.wallet.clone());
    e.storage().persistent().set(&key, member);
    bump_persistent(e, &key);
}

// ── Nonces ────────────────────────────────────────────────────────────────

pub fn is_nonce_consumed(e: &Env, nonce: u64) -> bool {
    e.storage().persistent().has(&DataKey::Nonce(nonce))
}

pub fn consume_nonce(e: &Env, nonce: u64) {
    let key = DataKey::Nonce(nonce);
    e.storage().persistent().set(&key, &true);
    bump_persistent(e, &key);
}

// ── Bids ──────────────────────────────────────────────────────────────────

pub fn load_bid(e: &Env, cycle: u32, wallet: &Address) -> Option<BidCommit> {
    e.storage()
        .persistent()
        .get(&DataKey::Bid(cycle, wallet.clone()))
}

pub fn save_bid(e: &Env, cycle: u32, wallet: &Address, bid: &BidCommit) {
    let key = DataKey::Bid(cycle, wallet.clone());
    e.storage().persistent().set(&key, bid);
    bump_persistent(e, &key);
}

pub fn load_bidders(e: &Env, cycle: u32) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&DataKey::Bidders(cycle))
        .unwrap_or_else(|| Vec::new(e))
}

pub fn save_bidders(e: &Env, cycle: u32, bidders: &Vec<Address>) {
    let key = DataKey::Bidders(cycle);
    e.storage().persistent().set(&key, bidders);
    bump_persistent(e, &key);
}

// ── Cycle results ─────────────────────────────────────────────────────────

pub fn load_cycle_result(e: &Env, cycle: u32) -> Option<CycleResult> {
    e.storage().persistent().get(&DataKey::CycleResult(cycle))
}

pub fn save_cycle_result(e: &Env, result: &CycleResult) {
    let key = DataKey::CycleResult(result.cycle);
    e.storage().persistent().set(&key, result);
    bump_persistent(e, &key);
}
