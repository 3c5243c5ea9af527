//! Default termination, emergency stop, withdrawals and treasury collection.

use circle_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

use crate::types::{CircleStatus, Member, Phase, StopDirective, WithdrawMode};
use crate::{events, ledger, math, registry, signature, storage, token, validation};

/// Terminate a circle whose funding window closed with members unpaid.
///
/// Escrow is refunded to every payer's prefund. Each underfunded member
/// loses collateral up to the required amount; the pool is split evenly among
/// the members that paid in full and the remainder goes to the treasury.
/// With no such members the whole pool goes to the treasury.
///
/// Returns the seized penalty pool.
pub fn terminate_default(e: &Env) -> Result<i128, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    match state.status {
        CircleStatus::Locked | CircleStatus::Active => {}
        CircleStatus::EmergencyStop => return Err(ContractError::WrongStatus),
        _ => return Err(ContractError::NotDefaultEligible),
    }
    ledger::sync(e, &config, &mut state)?;
    if state.phase != Phase::DefaultEligible {
        return Err(ContractError::NotDefaultEligible);
    }

    let required = validation::required_collateral(&config)?;
    let mut penalty_pool: i128 = 0;
    let mut recipients: Vec<Address> = Vec::new(e);

    for wallet in storage::load_roster(e).iter() {
        let mut member = storage::load_active_member(e, &wallet)?;
        let defaulted = member.due_remaining > 0;
        member.prefund = math::add(member.prefund, member.paid_this_cycle)?;
        member.paid_this_cycle = 0;
        member.due_remaining = 0;
        if defaulted {
            let seized = member.collateral.min(required);
            member.collateral = math::sub(member.collateral, seized)?;
            penalty_pool = math::add(penalty_pool, seized)?;
        } else {
            recipients.push_back(wallet.clone());
        }
        storage::save_member(e, &member);
    }

    let (share, remainder) = math::split_even(penalty_pool, recipients.len())?;
    if share > 0 {
        for wallet in recipients.iter() {
            let mut member = storage::load_active_member(e, &wallet)?;
            member.prefund = math::add(member.prefund, share)?;
            storage::save_member(e, &member);
        }
    }
    state.treasury_owed = math::add(state.treasury_owed, remainder)?;
    state.status = CircleStatus::Terminated;
    storage::save_state(e, &state);

    events::emit_circle_terminated(e, state.current_cycle, penalty_pool, recipients.len());
    Ok(penalty_pool)
}

/// Freeze the circle on a guardian-signed directive.
pub fn emergency_stop(e: &Env, directive: &StopDirective) -> Result<(), ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    if !matches!(
        state.status,
        CircleStatus::Recruiting | CircleStatus::Locked | CircleStatus::Active
    ) {
        return Err(ContractError::WrongStatus);
    }
    signature::verify_stop(e, &config.guardian_key, directive)?;
    state.status = CircleStatus::EmergencyStop;
    storage::save_state(e, &state);
    events::emit_emergency_stop(e, directive.nonce, e.ledger().timestamp());
    Ok(())
}

/// Zero every balance of `member` and return the sum.
fn drain(member: &mut Member) -> Result<i128, ContractError> {
    let total = ledger::total_balance(member)?;
    member.collateral = 0;
    member.prefund = 0;
    member.credit = 0;
    member.vesting_locked = 0;
    member.vesting_released = 0;
    member.future_locked = 0;
    member.withdrawable = 0;
    member.paid_this_cycle = 0;
    member.due_remaining = 0;
    Ok(total)
}

/// Deactivate `member` and drop it from the roster.
fn leave(e: &Env, member: &mut Member) -> Result<(), ContractError> {
    if member.active {
        registry::remove(e, member.slot)?;
        member.active = false;
    }
    Ok(())
}

/// Pay out according to `mode`. Returns the amount transferred.
pub fn withdraw(e: &Env, wallet: &Address, mode: WithdrawMode) -> Result<i128, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    ledger::sync(e, &config, &mut state)?;

    let amount = match mode {
        WithdrawMode::Available => {
            if state.status != CircleStatus::Active {
                return Err(ContractError::WrongStatus);
            }
            let mut member = storage::load_active_member(e, wallet)?;
            let amount = member.withdrawable;
            if amount == 0 {
                return Err(ContractError::NothingToWithdraw);
            }
            member.withdrawable = 0;
            storage::save_member(e, &member);
            amount
        }
        WithdrawMode::CloseOut => {
            if !matches!(
                state.status,
                CircleStatus::Completed | CircleStatus::Terminated | CircleStatus::EmergencyStop
            ) {
                return Err(ContractError::WrongStatus);
            }
            let mut member = storage::load_member(e, wallet)?;
            let slot = member.slot;
            let amount = drain(&mut member)?;
            if amount == 0 {
                return Err(ContractError::NothingToWithdraw);
            }
            let was_active = member.active;
            leave(e, &mut member)?;
            storage::save_member(e, &member);
            if was_active {
                events::emit_exited(e, wallet, slot, amount);
            }
            amount
        }
        WithdrawMode::ExitRefund => {
            if state.status != CircleStatus::Recruiting {
                return Err(ContractError::WrongStatus);
            }
            let mut member = storage::load_active_member(e, wallet)?;
            let slot = member.slot;
            let amount = drain(&mut member)?;
            leave(e, &mut member)?;
            storage::save_member(e, &member);
            events::emit_exited(e, wallet, slot, amount);
            amount
        }
    };

    storage::save_state(e, &state);
    token::transfer_from_circle(e, &config.token, wallet, amount);
    events::emit_withdrawn(e, wallet, mode as u32, amount);
    Ok(amount)
}

/// Send everything owed to the treasury.
pub fn collect_treasury(e: &Env) -> Result<i128, ContractError> {
    let config = storage::load_config(e)?;
    config.treasury.require_auth();
    let mut state = storage::load_state(e)?;
    let amount = state.treasury_owed;
    if amount == 0 {
        return Err(ContractError::NothingToWithdraw);
    }
    state.treasury_owed = 0;
    storage::save_state(e, &state);
    token::transfer_from_circle(e, &config.token, &config.treasury, amount);
    events::emit_treasury_collected(e, &config.treasury, amount);
    Ok(amount)
}
