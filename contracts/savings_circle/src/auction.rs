//! Sealed-bid discount auction.
//!
//! Members that have not won commit `bid_commitment(..)` during the commit
//! window and open it during the reveal window. The lowest payout wins; ties
//! go to the earlier commit. An unopened commit counts as a bid for the whole
//! pot and costs its owner one penalty.

use circle_errors::ContractError;
use soroban_sdk::{Address, BytesN, Env};

use crate::types::{BidCommit, CircleConfig, CircleState, CircleStatus, Phase};
use crate::{events, ledger, math, settlement, signature, storage, validation};

/// Lowest payout a bid may ask for.
pub fn min_payout(config: &CircleConfig) -> Result<i128, ContractError> {
    let pot = validation::pot(config)?;
    math::sub(pot, math::bps(pot, config.max_discount_bps)?)
}

fn require_active(state: &CircleState) -> Result<(), ContractError> {
    if state.status != CircleStatus::Active {
        return Err(ContractError::WrongStatus);
    }
    Ok(())
}

pub fn commit_bid(e: &Env, wallet: &Address, hash: &BytesN<32>) -> Result<u32, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    ledger::sync(e, &config, &mut state)?;
    require_active(&state)?;
    if state.phase != Phase::Commit {
        return Err(ContractError::WrongPhase);
    }
    let member = storage::load_active_member(e, wallet)?;
    if member.has_won {
        return Err(ContractError::AlreadyWon);
    }

    let cycle = state.current_cycle;
    // A re-commit only replaces the hash; the first commit fixes the order.
    let seq = match storage::load_bid(e, cycle, wallet) {
        Some(existing) => existing.seq,
        None => {
            let mut bidders = storage::load_bidders(e, cycle);
            bidders.push_back(wallet.clone());
            storage::save_bidders(e, cycle, &bidders);
            let seq = state.commit_seq;
            state.commit_seq += 1;
            seq
        }
    };
    storage::save_bid(
        e,
        cycle,
        wallet,
        &BidCommit {
            hash: hash.clone(),
            seq,
            revealed: false,
            payout_wanted: 0,
        },
    );
    storage::save_state(e, &state);
    events::emit_bid_committed(e, wallet, cycle, seq);
    Ok(seq)
}

pub fn reveal_bid(
    e: &Env,
    wallet: &Address,
    payout_wanted: i128,
    salt: &BytesN<32>,
) -> Result<(), ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    ledger::sync(e, &config, &mut state)?;
    require_active(&state)?;
    if state.phase != Phase::Reveal || e.ledger().timestamp() >= state.reveal_end_at {
        return Err(ContractError::WrongPhase);
    }
    storage::load_active_member(e, wallet)?;

    let cycle = state.current_cycle;
    let mut bid = storage::load_bid(e, cycle, wallet).ok_or(ContractError::NoCommitment)?;
    let expected = signature::bid_commitment(
        e,
        &e.current_contract_address(),
        cycle,
        wallet,
        payout_wanted,
        salt,
    );
    if expected != bid.hash {
        return Err(ContractError::HashMismatch);
    }
    if payout_wanted < min_payout(&config)? || payout_wanted > validation::pot(&config)? {
        return Err(ContractError::BidOutOfBounds);
    }
    if bid.revealed {
        return Ok(());
    }

    bid.revealed = true;
    bid.payout_wanted = payout_wanted;
    storage::save_bid(e, cycle, wallet, &bid);
    storage::save_state(e, &state);
    events::emit_bid_revealed(e, wallet, cycle, payout_wanted);
    Ok(())
}

/// Pick the winner of the current cycle. Unopened commits are charged
/// their penalty here, at most once per member and cycle.
fn select_winner(
    e: &Env,
    config: &CircleConfig,
    state: &mut CircleState,
) -> Result<(Address, i128), ContractError> {
    let pot = validation::pot(config)?;
    let cycle = state.current_cycle;
    let mut best: Option<(Address, i128, u32)> = None;

    for wallet in storage::load_bidders(e, cycle).iter() {
        let bid = match storage::load_bid(e, cycle, &wallet) {
            Some(bid) => bid,
            None => continue,
        };
        let mut member = match storage::find_member(e, &wallet) {
            Some(m) if m.active && !m.has_won => m,
            _ => continue,
        };
        let payout = if bid.revealed {
            bid.payout_wanted
        } else {
            if member.reveal_penalty_cycle != cycle {
                member.reveal_penalty_cycle = cycle;
                let penalty = ledger::seize_penalty(&mut member, state)?;
                storage::save_member(e, &member);
                events::emit_penalised(e, &wallet, cycle, penalty, "no_reveal");
            }
            pot
        };
        let better = match &best {
            None => true,
            Some((_, best_payout, best_seq)) => {
                payout < *best_payout || (payout == *best_payout && bid.seq < *best_seq)
            }
        };
        if better {
            best = Some((wallet.clone(), payout, bid.seq));
        }
    }

    if let Some((winner, payout, _)) = best {
        return Ok((winner, payout));
    }

    // Nobody bid: lowest slot that has not won takes the full pot.
    for wallet in storage::load_roster(e).iter() {
        let member = storage::load_active_member(e, &wallet)?;
        if !member.has_won {
            return Ok((wallet, pot));
        }
    }
    Err(ContractError::NotMember)
}

/// Close the reveal window, settle the cycle and return the winner.
pub fn finalize(e: &Env) -> Result<Address, ContractError> {
    let config = storage::load_config(e)?;
    let mut state = storage::load_state(e)?;
    ledger::sync(e, &config, &mut state)?;
    match state.status {
        CircleStatus::Active => {}
        CircleStatus::Terminated | CircleStatus::EmergencyStop => {
            return Err(ContractError::WrongStatus)
        }
        _ => return Err(ContractError::WrongPhase),
    }
    if state.phase != Phase::Reveal || e.ledger().timestamp() < state.reveal_end_at {
        return Err(ContractError::WrongPhase);
    }

    let (winner, payout_wanted) = select_winner(e, &config, &mut state)?;
    settlement::settle(e, &config, &mut state, &winner, payout_wanted)?;
    storage::save_state(e, &state);
    Ok(winner)
}
