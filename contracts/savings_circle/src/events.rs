use soroban_sdk::{Address, Env, Symbol};

/// Emitted when a wallet is admitted with a valid ticket.
///
/// # Topics
/// * `Symbol` - "joined"
/// * `Address` - The new member
///
/// # Data
/// * `u32` - The roster slot assigned
/// * `u64` - The ticket nonce consumed
pub fn emit_joined(e: &Env, wallet: &Address, slot: u32, nonce: u64) {
    let topics = (Symbol::new(e, "joined"), wallet.clone());
    e.events().publish(topics, (slot, nonce));
}

/// Emitted when a member leaves the roster (recruiting exit or close-out).
///
/// # Data
/// * `u32` - The slot the member held
/// * `i128` - The amount paid out on exit
pub fn emit_exited(e: &Env, wallet: &Address, slot: u32, refunded: i128) {
    let topics = (Symbol::new(e, "exited"), wallet.clone());
    e.events().publish(topics, (slot, refunded));
}

/// Emitted when a deposit is credited.
///
/// # Data
/// * `i128` - The amount received
/// * `bool` - `true` if credited to collateral, `false` for prefund
pub fn emit_deposited(e: &Env, wallet: &Address, amount: i128, to_collateral: bool) {
    let topics = (Symbol::new(e, "deposited"), wallet.clone());
    e.events().publish(topics, (amount, to_collateral));
}

/// Emitted when the debit waterfall moves funds into the cycle's escrow.
///
/// # Data
/// * `u32` - The cycle
/// * `i128` - Amount taken by this debit
/// * `i128` - Obligation still outstanding
pub fn emit_debited(e: &Env, wallet: &Address, cycle: u32, taken: i128, due_remaining: i128) {
    let topics = (Symbol::new(e, "debited"), wallet.clone());
    e.events().publish(topics, (cycle, taken, due_remaining));
}

/// Emitted when collateral is moved to the treasury as a penalty.
///
/// # Data
/// * `u32` - The cycle
/// * `i128` - The penalty amount
/// * `Symbol` - "late" or "no_reveal"
pub fn emit_penalised(e: &Env, wallet: &Address, cycle: u32, amount: i128, reason: &str) {
    let topics = (Symbol::new(e, "penalised"), wallet.clone());
    e.events()
        .publish(topics, (cycle, amount, Symbol::new(e, reason)));
}

/// Emitted when every active member has paid and the commit window opens.
pub fn emit_funding_complete(e: &Env, cycle: u32, commit_end_at: u64, reveal_end_at: u64) {
    let topics = (Symbol::new(e, "funding_complete"),);
    e.events()
        .publish(topics, (cycle, commit_end_at, reveal_end_at));
}

pub fn emit_bid_committed(e: &Env, wallet: &Address, cycle: u32, seq: u32) {
    let topics = (Symbol::new(e, "bid_committed"), wallet.clone());
    e.events().publish(topics, (cycle, seq));
}

pub fn emit_bid_revealed(e: &Env, wallet: &Address, cycle: u32, payout_wanted: i128) {
    let topics = (Symbol::new(e, "bid_revealed"), wallet.clone());
    e.events().publish(topics, (cycle, payout_wanted));
}

/// Emitted when a cycle is settled.
///
/// # Topics
/// * `Symbol` - "cycle_settled"
/// * `Address` - The winner
///
/// # Data
/// * `u32` - The cycle
/// * `i128` - Gross payout the winner bid
/// * `i128` - Fee routed to the treasury
/// * `i128` - Discount shared with the other members
pub fn emit_cycle_settled(
    e: &Env,
    winner: &Address,
    cycle: u32,
    payout_wanted: i128,
    fee: i128,
    discount: i128,
) {
    let topics = (Symbol::new(e, "cycle_settled"), winner.clone());
    e.events()
        .publish(topics, (cycle, payout_wanted, fee, discount));
}

/// Emitted when the roster fills and cycle 1 funding starts.
pub fn emit_circle_locked(e: &Env, due_at: u64, grace_end_at: u64) {
    let topics = (Symbol::new(e, "circle_locked"),);
    e.events().publish(topics, (due_at, grace_end_at));
}

pub fn emit_circle_completed(e: &Env, cycles: u32) {
    let topics = (Symbol::new(e, "circle_completed"),);
    e.events().publish(topics, cycles);
}

/// Emitted when a default terminates the circle.
///
/// # Data
/// * `u32` - The cycle that failed to fund
/// * `i128` - Collateral seized into the penalty pool
/// * `u32` - Number of members that shared the pool
pub fn emit_circle_terminated(e: &Env, cycle: u32, penalty_pool: i128, recipients: u32) {
    let topics = (Symbol::new(e, "circle_terminated"),);
    e.events()
        .publish(topics, (cycle, penalty_pool, recipients));
}

pub fn emit_emergency_stop(e: &Env, nonce: u64, stopped_at: u64) {
    let topics = (Symbol::new(e, "emergency_stop"),);
    e.events().publish(topics, (nonce, stopped_at));
}

/// Emitted when a member withdraws.
///
/// # Data
/// * `u32` - The withdraw mode as its wire value
/// * `i128` - The amount transferred
pub fn emit_withdrawn(e: &Env, wallet: &Address, mode: u32, amount: i128) {
    let topics = (Symbol::new(e, "withdrawn"), wallet.clone());
    e.events().publish(topics, (mode, amount));
}

pub fn emit_treasury_collected(e: &Env, treasury: &Address, amount: i128) {
    let topics = (Symbol::new(e, "treasury_collected"), treasury.clone());
    e.events().publish(topics, amount);
}
