//! Dense roster of active members.
//!
//! Join appends at the tail. Exit moves the tail into the vacated slot and
//! pops, so indices `0..count` are always occupied.

use circle_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::types::{AdmissionTicket, CircleStatus, Member};
use crate::{events, ledger, math, signature, storage};

pub fn count(e: &Env) -> u32 {
    storage::load_roster(e).len()
}

pub fn member_at(e: &Env, index: u32) -> Result<Address, ContractError> {
    storage::load_roster(e)
        .get(index)
        .ok_or(ContractError::MemberIndexOutOfRange)
}

/// Append `wallet` and return its slot.
pub fn append(e: &Env, wallet: &Address) -> u32 {
    let mut roster = storage::load_roster(e);
    let slot = roster.len();
    roster.push_back(wallet.clone());
    storage::save_roster(e, &roster);
    slot
}

/// Swap-remove the entry at `slot`, fixing the slot of the member moved in.
pub fn remove(e: &Env, slot: u32) -> Result<(), ContractError> {
    let mut roster = storage::load_roster(e);
    let len = roster.len();
    if slot >= len {
        return Err(ContractError::MemberIndexOutOfRange);
    }
    let last = len - 1;
    if slot != last {
        let moved = roster
            .get(last)
            .ok_or(ContractError::MemberIndexOutOfRange)?;
        roster.set(slot, moved.clone());
        let mut row = storage::load_member(e, &moved)?;
        row.slot = slot;
        storage::save_member(e, &row);
    }
    roster.pop_back();
    storage::save_roster(e, &roster);
    Ok(())
}

/// Admit `wallet` with a guardian ticket. Filling the last slot locks the
/// circle and opens cycle 1 funding.
pub fn join(e: &Env, wallet: &Address, ticket: &AdmissionTicket) -> Result<u32, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    if let Some(existing) = storage::find_member(e, wallet) {
        if existing.active {
            return Err(ContractError::AlreadyMember);
        }
    }
    if count(e) >= config.n_members {
        return Err(ContractError::CircleFull);
    }
    if state.status != CircleStatus::Recruiting {
        return Err(ContractError::WrongStatus);
    }
    signature::verify_ticket(e, &config.guardian_key, wallet, ticket)?;

    let slot = append(e, wallet);
    storage::save_member(e, &Member::new(wallet.clone(), slot));
    events::emit_joined(e, wallet, slot, ticket.nonce);

    if count(e) == config.n_members {
        let due_at = math::add_secs(e.ledger().timestamp(), config.interval_sec)?;
        state.status = CircleStatus::Locked;
        state.current_cycle = 1;
        ledger::start_cycle(e, &config, &mut state, due_at)?;
        events::emit_circle_locked(e, state.due_at, state.grace_end_at);
    }
    storage::save_state(e, &state);
    Ok(slot)
}
