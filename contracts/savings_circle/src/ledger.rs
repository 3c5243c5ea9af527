//! Funding ledger and phase clock.
//!
//! Balances move only through the helpers here and in settlement /
//! termination. Phases are never pushed by a timer: every message calls
//! [`sync`] first, which pulls the clock forward from the ledger timestamp.

use circle_errors::ContractError;
use soroban_sdk::{Address, Bytes, Env};

use crate::types::{CircleConfig, CircleState, CircleStatus, Member, Phase, Purpose};
use crate::{events, math, registry, storage, token};

/// Upper bound of a single late or non-reveal penalty, in token units.
pub const FIXED_PENALTY_UNITS: i128 = 1_000_000;

/// Share of collateral charged as a penalty when below the fixed cap (1 %).
pub const PENALTY_RATE_BPS: u32 = 100;

const TAG_COLLATERAL: u8 = 0x01;
const TAG_PREFUND: u8 = 0x02;

/// Read the purpose tag from a forwarded deposit payload.
/// Unknown, empty or malformed payloads fall back to `Prefund`.
pub fn decode_purpose(payload: &Bytes) -> Purpose {
    match payload.get(0) {
        Some(TAG_COLLATERAL) => Purpose::Collateral,
        Some(TAG_PREFUND) => Purpose::Prefund,
        _ => Purpose::Prefund,
    }
}

/// `min(FIXED_PENALTY_UNITS, 1 % of collateral)`.
pub fn penalty_amount(collateral: i128) -> Result<i128, ContractError> {
    let share = math::bps(collateral, PENALTY_RATE_BPS)?;
    Ok(share.min(FIXED_PENALTY_UNITS))
}

/// Move one penalty from `member.collateral` to the treasury. Returns the
/// amount moved; callers own the once-per-cycle marker.
pub fn seize_penalty(member: &mut Member, state: &mut CircleState) -> Result<i128, ContractError> {
    let amount = penalty_amount(member.collateral)?;
    member.collateral = math::sub(member.collateral, amount)?;
    state.treasury_owed = math::add(state.treasury_owed, amount)?;
    Ok(amount)
}

/// Every balance the circle holds for `member`, escrow included.
pub fn total_balance(member: &Member) -> Result<i128, ContractError> {
    let mut total = math::add(member.collateral, member.prefund)?;
    total = math::add(total, member.credit)?;
    total = math::add(total, member.vesting_locked)?;
    total = math::add(total, member.future_locked)?;
    total = math::add(total, member.withdrawable)?;
    math::add(total, member.paid_this_cycle)
}

fn draw(balance: &mut i128, due: &mut i128) -> Result<i128, ContractError> {
    let take = (*balance).min(*due);
    *balance = math::sub(*balance, take)?;
    *due = math::sub(*due, take)?;
    Ok(take)
}

/// Pay `due_remaining` from credit, then future_locked, then prefund.
/// Returns the amount moved into `paid_this_cycle`.
pub fn apply_waterfall(member: &mut Member) -> Result<i128, ContractError> {
    let mut due = member.due_remaining;
    let mut taken = draw(&mut member.credit, &mut due)?;
    taken = math::add(taken, draw(&mut member.future_locked, &mut due)?)?;
    taken = math::add(taken, draw(&mut member.prefund, &mut due)?)?;
    member.due_remaining = due;
    member.paid_this_cycle = math::add(member.paid_this_cycle, taken)?;
    Ok(taken)
}

/// Pull the phase clock forward to `now`.
///
/// Returns `true` when this call completed the cycle's funding and opened the
/// commit window.
pub fn advance_phase(
    config: &CircleConfig,
    state: &mut CircleState,
    members_count: u32,
    now: u64,
) -> Result<bool, ContractError> {
    if !matches!(state.status, CircleStatus::Locked | CircleStatus::Active) {
        return Ok(false);
    }
    let mut funding_completed = false;
    loop {
        match state.phase {
            Phase::Funding => {
                if members_count > 0 && state.funded_count >= members_count {
                    state.commit_end_at = math::add_secs(now, config.commit_duration_sec)?;
                    state.reveal_end_at =
                        math::add_secs(state.commit_end_at, config.reveal_duration_sec)?;
                    state.phase = Phase::Commit;
                    state.status = CircleStatus::Active;
                    funding_completed = true;
                } else if now >= state.grace_end_at {
                    state.phase = Phase::DefaultEligible;
                } else {
                    break;
                }
            }
            Phase::Commit if now >= state.commit_end_at => state.phase = Phase::Reveal,
            _ => break,
        }
    }
    Ok(funding_completed)
}

/// [`advance_phase`] at the current ledger time, emitting on funding completion.
pub fn sync(e: &Env, config: &CircleConfig, state: &mut CircleState) -> Result<(), ContractError> {
    let now = e.ledger().timestamp();
    if advance_phase(config, state, registry::count(e), now)? {
        events::emit_funding_complete(
            e,
            state.current_cycle,
            state.commit_end_at,
            state.reveal_end_at,
        );
    }
    Ok(())
}

/// Inside `[due_at, grace_end_at)` while still collecting.
pub fn in_grace_window(state: &CircleState, now: u64) -> bool {
    state.phase == Phase::Funding && now >= state.due_at && now < state.grace_end_at
}

/// Open funding for `state.current_cycle`: every roster member owes one
/// contribution from `due_at`.
pub fn start_cycle(
    e: &Env,
    config: &CircleConfig,
    state: &mut CircleState,
    due_at: u64,
) -> Result<(), ContractError> {
    state.phase = Phase::Funding;
    state.due_at = due_at;
    state.grace_end_at = math::add_secs(due_at, config.grace_sec)?;
    state.commit_end_at = 0;
    state.reveal_end_at = 0;
    state.funded_count = 0;
    state.commit_seq = 0;
    for wallet in storage::load_roster(e).iter() {
        let mut member = storage::load_active_member(e, &wallet)?;
        member.due_remaining = config.contribution;
        storage::save_member(e, &member);
    }
    Ok(())
}

/// Run the waterfall for one member and record funding completion.
/// A completion strictly after `due_at` costs one late penalty per cycle.
fn debit_member(
    e: &Env,
    state: &mut CircleState,
    member: &mut Member,
    now: u64,
) -> Result<(), ContractError> {
    if member.due_remaining == 0 {
        return Ok(());
    }
    let taken = apply_waterfall(member)?;
    if taken == 0 {
        return Ok(());
    }
    events::emit_debited(
        e,
        &member.wallet,
        state.current_cycle,
        taken,
        member.due_remaining,
    );
    if member.due_remaining == 0 {
        state.funded_count += 1;
        if now > state.due_at && member.late_penalty_cycle != state.current_cycle {
            member.late_penalty_cycle = state.current_cycle;
            let penalty = seize_penalty(member, state)?;
            events::emit_penalised(e, &member.wallet, state.current_cycle, penalty, "late");
        }
    }
    storage::save_member(e, member);
    Ok(())
}

/// Credit a deposit and auto-debit when inside the grace window.
///
/// Non-members and amounts that are zero, negative or below
/// `min_deposit_units` are ignored without moving tokens.
pub fn deposit(
    e: &Env,
    depositor: &Address,
    amount: i128,
    payload: &Bytes,
) -> Result<(), ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    match state.status {
        CircleStatus::Recruiting | CircleStatus::Locked | CircleStatus::Active => {}
        _ => return Err(ContractError::WrongStatus),
    }

    let mut member = match storage::find_member(e, depositor) {
        Some(m) if m.active => m,
        _ => return Ok(()),
    };
    if amount <= 0 || amount < config.min_deposit_units {
        return Ok(());
    }

    sync(e, &config, &mut state)?;
    token::transfer_into_circle(e, &config.token, depositor, amount);

    let purpose = decode_purpose(payload);
    match purpose {
        Purpose::Collateral => member.collateral = math::add(member.collateral, amount)?,
        Purpose::Prefund => member.prefund = math::add(member.prefund, amount)?,
    }
    events::emit_deposited(e, depositor, amount, purpose == Purpose::Collateral);

    let now = e.ledger().timestamp();
    if in_grace_window(&state, now) {
        debit_member(e, &mut state, &mut member, now)?;
    }
    storage::save_member(e, &member);

    sync(e, &config, &mut state)?;
    storage::save_state(e, &state);
    Ok(())
}

/// Debit every unpaid member. Returns the funded count.
///
/// Only permitted inside `[due_at, grace_end_at)`; once funding is complete
/// and the window is still open the call is a no-op.
pub fn debit_all(e: &Env) -> Result<u32, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    if !matches!(state.status, CircleStatus::Locked | CircleStatus::Active) {
        return Err(ContractError::WrongStatus);
    }
    sync(e, &config, &mut state)?;

    let now = e.ledger().timestamp();
    if now >= state.grace_end_at {
        return Err(ContractError::DebitOutsideWindow);
    }
    match state.phase {
        Phase::Commit | Phase::Reveal => {
            storage::save_state(e, &state);
            return Ok(state.funded_count);
        }
        Phase::DefaultEligible => return Err(ContractError::DebitOutsideWindow),
        Phase::Funding if now < state.due_at => return Err(ContractError::DebitOutsideWindow),
        Phase::Funding => {}
    }

    for wallet in storage::load_roster(e).iter() {
        let mut member = storage::load_active_member(e, &wallet)?;
        debit_member(e, &mut state, &mut member, now)?;
    }

    sync(e, &config, &mut state)?;
    storage::save_state(e, &state);
    Ok(state.funded_count)
}
