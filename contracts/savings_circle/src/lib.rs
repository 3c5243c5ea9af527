//! Sealed-Bid Savings Circle Contract
//!
//! A fixed group of members contributes one `contribution` per cycle into a
//! shared pot. Each cycle the pot goes to the member that asks for the
//! smallest payout in a commit/reveal auction; the discount is shared out as
//! credit towards the others' future contributions.
//!
//! ## Lifecycle
//!
//! `Recruiting` → (roster full) `Locked` → (cycle 1 funded) `Active` →
//! (last cycle settled) `Completed`. A funding window that closes with unpaid
//! members allows `terminate_default` (`Terminated`); a guardian-signed stop
//! freezes everything but withdrawals (`EmergencyStop`).
//!
//! Inside a cycle the phase runs `Funding` → `Commit` → `Reveal`, or
//! `Funding` → `DefaultEligible` when the grace window closes first.
//! Phases move lazily: each call pulls the clock forward from the ledger
//! timestamp before acting.
//!
//! ## Key design decisions
//!
//! - **Result everywhere**: every entry point returns `ContractError`, so a
//!   rejected call leaves no partial state.
//! - **Escrowed contributions**: funds debited for a cycle stay attributed to
//!   the payer (`paid_this_cycle`) until settlement or refund.
//! - **Replay-proof admission**: ticket and stop nonces are burnt forever.

#![no_std]

mod auction;
mod events;
mod ledger;
mod math;
mod registry;
mod settlement;
mod signature;
mod storage;
mod termination;
mod token;
mod types;
mod validation;

pub use settlement::{compute_settlement, SettlementBreakdown, SettlementParams};
pub use signature::{bid_commitment, join_ticket_digest, stop_directive_digest};
pub use types::{
    AdmissionTicket, BidCommit, CircleConfig, CircleState, CircleStatus, CycleResult, Member,
    Phase, StatusView, StopDirective, WithdrawMode,
};
pub use validation::MAX_MEMBERS;

use circle_errors::ContractError;
use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, Vec};




#[cfg(test)]
mod test_conservation;



#[cfg(test)]
mod test_registry;





#[contract]
pub struct SavingsCircle;

#[contractimpl]
impl SavingsCircle {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization. Validates and stores the immutable config
    /// and opens recruiting.
    pub fn initialize(e: Env, config: CircleConfig) -> Result<(), ContractError> {
        if storage::has_config(&e) {
            return Err(ContractError::AlreadyInitialized);
        }
        validation::validate_config(&config)?;
        storage::save_config(&e, &config);
        storage::save_state(
            &e,
            &CircleState {
                status: CircleStatus::Recruiting,
                phase: Phase::Funding,
                current_cycle: 0,
                due_at: 0,
                grace_end_at: 0,
                commit_end_at: 0,
                reveal_end_at: 0,
                treasury_owed: 0,
                funded_count: 0,
                commit_seq: 0,
            },
        );
        Ok(())
    }

    // ── Membership ─────────────────────────────────────────────────────────

    /// Admit `wallet` with a guardian-signed ticket. Returns the roster slot.
    pub fn join(e: Env, wallet: Address, ticket: AdmissionTicket) -> Result<u32, ContractError> {
        wallet.require_auth();
        registry::join(&e, &wallet, &ticket)
    }

    // ── Funding ────────────────────────────────────────────────────────────

    /// Pull `amount` from `depositor` and credit it by the purpose tag in
    /// `purpose` (`0x01` collateral, anything else prefund).
    pub fn deposit(
        e: Env,
        depositor: Address,
        amount: i128,
        purpose: Bytes,
    ) -> Result<(), ContractError> {
        depositor.require_auth();
        ledger::deposit(&e, &depositor, amount, &purpose)
    }

    /// Permissionless. Runs the debit waterfall for every unpaid member and
    /// returns the funded count.
    pub fn trigger_debit_all(e: Env) -> Result<u32, ContractError> {
        ledger::debit_all(&e)
    }

    // ── Auction ────────────────────────────────────────────────────────────

    /// Store a sealed bid for the current cycle. Returns its commit order.
    pub fn commit_bid(e: Env, wallet: Address, hash: BytesN<32>) -> Result<u32, ContractError> {
        wallet.require_auth();
        auction::commit_bid(&e, &wallet, &hash)
    }

    pub fn reveal_bid(
        e: Env,
        wallet: Address,
        payout_wanted: i128,
        salt: BytesN<32>,
    ) -> Result<(), ContractError> {
        wallet.require_auth();
        auction::reveal_bid(&e, &wallet, payout_wanted, &salt)
    }

    /// Permissionless. Settles the cycle once the reveal window closed and
    /// returns the winner.
    pub fn finalize_auction(e: Env) -> Result<Address, ContractError> {
        auction::finalize(&e)
    }

    // ── Termination and withdrawal ─────────────────────────────────────────

    /// Permissionless. Returns the seized penalty pool.
    pub fn terminate_default(e: Env) -> Result<i128, ContractError> {
        termination::terminate_default(&e)
    }

    pub fn emergency_stop(e: Env, directive: StopDirective) -> Result<(), ContractError> {
        termination::emergency_stop(&e, &directive)
    }

    /// Withdraw under `mode`. Returns the amount transferred.
    pub fn withdraw(e: Env, wallet: Address, mode: WithdrawMode) -> Result<i128, ContractError> {
        wallet.require_auth();
        termination::withdraw(&e, &wallet, mode)
    }

    /// Transfer everything owed to the treasury. Requires treasury auth.
    pub fn collect_treasury(e: Env) -> Result<i128, ContractError> {
        termination::collect_treasury(&e)
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn get_config(e: Env) -> Result<CircleConfig, ContractError> {
        storage::load_config(&e)
    }

    /// Status with the phase clock advanced to now. Nothing is written.
    pub fn get_status(e: Env) -> Result<StatusView, ContractError> {
        let config = storage::load_config(&e)?;
        let mut state = storage::load_state(&e)?;
        ledger::advance_phase(
            &config,
            &mut state,
            registry::count(&e),
            e.ledger().timestamp(),
        )?;
        Ok(StatusView {
            status: state.status,
            current_cycle: state.current_cycle,
            phase: state.phase,
            due_at: state.due_at,
            grace_end_at: state.grace_end_at,
            commit_end_at: state.commit_end_at,
            reveal_end_at: state.reveal_end_at,
            funded_count: state.funded_count,
        })
    }

    pub fn get_member(e: Env, wallet: Address) -> Result<Member, ContractError> {
        storage::load_member(&e, &wallet)
    }

    pub fn get_members_count(e: Env) -> u32 {
        registry::count(&e)
    }

    pub fn get_member_at(e: Env, index: u32) -> Result<Address, ContractError> {
        registry::member_at(&e, index)
    }

    /// Token contract every deposit and payout goes through.
    pub fn get_token_wallet(e: Env) -> Result<Address, ContractError> {
        Ok(storage::load_config(&e)?.token)
    }

    pub fn get_treasury_owed(e: Env) -> Result<i128, ContractError> {
        Ok(storage::load_state(&e)?.treasury_owed)
    }

    pub fn get_pot(e: Env) -> Result<i128, ContractError> {
        validation::pot(&storage::load_config(&e)?)
    }

    pub fn get_required_collateral(e: Env) -> Result<i128, ContractError> {
        validation::required_collateral(&storage::load_config(&e)?)
    }

    pub fn is_nonce_consumed(e: Env, nonce: u64) -> bool {
        storage::is_nonce_consumed(&e, nonce)
    }

    pub fn get_bid(e: Env, cycle: u32, wallet: Address) -> Option<BidCommit> {
        storage::load_bid(&e, cycle, &wallet)
    }

    /// Wallets that committed in `cycle`, in first-commit order.
    pub fn get_bidders(e: Env, cycle: u32) -> Vec<Address> {
        storage::load_bidders(&e, cycle)
    }

    pub fn get_cycle_result(e: Env, cycle: u32) -> Option<CycleResult> {
        storage::load_cycle_result(&e, cycle)
    }

    /// The hash `commit_bid` expects for these bid values on this circle.
    pub fn compute_commitment(
        e: Env,
        cycle: u32,
        wallet: Address,
        payout_wanted: i128,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        signature::bid_commitment(
            &e,
            &e.current_contract_address(),
            cycle,
            &wallet,
            payout_wanted,
            &salt,
        )
    }
}
