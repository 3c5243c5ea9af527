//! Cycle settlement.
//!
//! [`compute_settlement`] is plain arithmetic over the cycle's inputs and is
//! the single source of every split. [`settle`] applies a breakdown to the
//! member rows, records the `CycleResult` and opens the next cycle.
//!
//! Value flow for a pot `P` and a winning bid `W`:
//!
//! | Portion                    | Destination                   |
//! |----------------------------|-------------------------------|
//! | `fee = W * take / 10_000`  | `treasury_owed`               |
//! | `W - fee`                  | winner (vesting, lock, free)  |
//! | `(P - W) / (n - 1)` each   | every other member's `credit` |
//! | split remainder            | `treasury_owed`               |

use circle_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::types::{CircleConfig, CircleState, CircleStatus, CycleResult};
use crate::{events, ledger, math, storage, validation};

/// Inputs of one cycle's settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementParams {
    pub pot: i128,
    pub payout_wanted: i128,
    pub n_members: u32,
    pub cycle: u32,
    pub total_cycles: u32,
    pub contribution: i128,
    pub take_rate_bps: u32,
    pub vesting_bps_cycle1: u32,
    pub early_lock_rate_bps_cycle1: u32,
}

impl SettlementParams {
    pub fn from_config(
        config: &CircleConfig,
        cycle: u32,
        payout_wanted: i128,
    ) -> Result<Self, ContractError> {
        Ok(SettlementParams {
            pot: validation::pot(config)?,
            payout_wanted,
            n_members: config.n_members,
            cycle,
            total_cycles: config.total_cycles,
            contribution: config.contribution,
            take_rate_bps: config.take_rate_bps,
            vesting_bps_cycle1: config.vesting_bps_cycle1,
            early_lock_rate_bps_cycle1: config.early_lock_rate_bps_cycle1,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementBreakdown {
    pub fee: i128,
    pub payout_net: i128,
    pub discount: i128,
    pub credit_per_member: i128,
    pub remainder: i128,
    pub vesting: i128,
    pub safety_lock: i128,
    /// Part of `payout_net` the winner can take out right away.
    pub withdrawable: i128,
}

/// Split one cycle's pot.
///
/// Vesting and the safety lock apply to the first cycle only; later winners
/// receive `payout_net` as withdrawable.
///
/// # Errors
/// * `BidOutOfBounds` if `payout_wanted` is negative or above the pot.
/// * `Overflow` / `Underflow` from checked arithmetic.
pub fn compute_settlement(p: &SettlementParams) -> Result<SettlementBreakdown, ContractError> {
    if p.payout_wanted < 0 || p.payout_wanted > p.pot {
        return Err(ContractError::BidOutOfBounds);
    }
    let fee = math::bps(p.payout_wanted, p.take_rate_bps)?;
    let payout_net = math::sub(p.payout_wanted, fee)?;

    let discount = math::sub(p.pot, p.payout_wanted)?;
    let (credit_per_member, remainder) =
        math::split_even(discount, p.n_members.saturating_sub(1))?;

    let (vesting, safety_lock, withdrawable) = if p.cycle == 1 {
        let vesting = math::bps(payout_net, p.vesting_bps_cycle1)?;
        let after_vesting = math::sub(payout_net, vesting)?;
        let cycles_left = p.total_cycles.saturating_sub(p.cycle) as i128;
        let remaining_obligation = math::mul(cycles_left, p.contribution)?;
        let safety_lock = math::bps(remaining_obligation, p.early_lock_rate_bps_cycle1)?
            .min(after_vesting);
        (vesting, safety_lock, math::sub(after_vesting, safety_lock)?)
    } else {
        (0, 0, payout_net)
    };

    Ok(SettlementBreakdown {
        fee,
        payout_net,
        discount,
        credit_per_member,
        remainder,
        vesting,
        safety_lock,
        withdrawable,
    })
}

/// Vesting released in `cycle`: an even share of what is still locked over
/// the cycles left, so the last cycle releases the rest. Released tranches
/// become withdrawable.
pub fn vesting_tranche(locked: i128, cycle: u32, total_cycles: u32) -> Result<i128, ContractError> {
    if cycle < 2 || locked == 0 {
        return Ok(0);
    }
    let cycles_left = total_cycles.saturating_sub(cycle) as i128 + 1;
    math::div(locked, cycles_left)
}

/// Settle the running cycle for `winner` and open the next one.
pub fn settle(
    e: &Env,
    config: &CircleConfig,
    state: &mut CircleState,
    winner: &Address,
    payout_wanted: i128,
) -> Result<SettlementBreakdown, ContractError> {
    let cycle = state.current_cycle;
    let params = SettlementParams::from_config(config, cycle, payout_wanted)?;
    let breakdown = compute_settlement(&params)?;

    for wallet in storage::load_roster(e).iter() {
        let mut member = storage::load_active_member(e, &wallet)?;
        // The escrow is the pot being paid out.
        member.paid_this_cycle = 0;
        member.due_remaining = 0;
        if wallet == *winner {
            member.has_won = true;
            member.vesting_locked = math::add(member.vesting_locked, breakdown.vesting)?;
            member.future_locked = math::add(member.future_locked, breakdown.safety_lock)?;
            member.withdrawable = math::add(member.withdrawable, breakdown.withdrawable)?;
        } else {
            member.credit = math::add(member.credit, breakdown.credit_per_member)?;
        }
        let tranche = vesting_tranche(member.vesting_locked, cycle, config.total_cycles)?;
        if tranche > 0 {
            member.vesting_locked = math::sub(member.vesting_locked, tranche)?;
            member.vesting_released = math::add(member.vesting_released, tranche)?;
            member.withdrawable = math::add(member.withdrawable, tranche)?;
        }
        storage::save_member(e, &member);
    }

    state.treasury_owed = math::add(state.treasury_owed, breakdown.fee)?;
    state.treasury_owed = math::add(state.treasury_owed, breakdown.remainder)?;

    let now = e.ledger().timestamp();
    storage::save_cycle_result(
        e,
        &CycleResult {
            cycle,
            winner: winner.clone(),
            payout_wanted,
            fee: breakdown.fee,
            payout_net: breakdown.payout_net,
            discount: breakdown.discount,
            credit_per_member: breakdown.credit_per_member,
            remainder: breakdown.remainder,
            vesting: breakdown.vesting,
            safety_lock: breakdown.safety_lock,
            settled_at: now,
        },
    );
    events::emit_cycle_settled(
        e,
        winner,
        cycle,
        payout_wanted,
        breakdown.fee,
        breakdown.discount,
    );

    state.current_cycle = cycle + 1;
    if state.current_cycle > config.total_cycles {
        state.status = CircleStatus::Completed;
        events::emit_circle_completed(e, config.total_cycles);
    } else {
        let due_at = math::add_secs(state.due_at, config.interval_sec)?.max(now);
        ledger::start_cycle(e, config, state, due_at)?;
    }
    Ok(breakdown)
}
