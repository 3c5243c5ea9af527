use soroban_sdk::{contracttype, Address, BytesN};

// ─── Configuration ─────────────────────────────────────────────────────────

/// Immutable circle parameters, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircleConfig {
    /// ed25519 public key of the admission authority (signs tickets and stops).
    pub guardian_key: BytesN<32>,
    /// Address that collects `treasury_owed`.
    pub treasury: Address,
    /// Stellar asset / token contract used for every deposit and payout.
    pub token: Address,
    pub n_members: u32,
    /// Per-cycle obligation of every member, in token units.
    pub contribution: i128,
    pub total_cycles: u32,
    pub interval_sec: u64,
    pub grace_sec: u64,
    pub take_rate_bps: u32,
    pub collateral_rate_bps: u32,
    pub max_discount_bps: u32,
    pub vesting_bps_cycle1: u32,
    pub early_lock_rate_bps_cycle1: u32,
    pub commit_duration_sec: u64,
    pub reveal_duration_sec: u64,
    pub max_pot_cap: i128,
    /// Deposits below this amount are ignored.
    pub min_deposit_units: i128,
}

// ─── Circle state ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircleStatus {
    Recruiting,
    Locked,
    Active,
    Completed,
    Terminated,
    EmergencyStop,
}

/// Position inside a cycle. Only meaningful while the circle is Locked or Active.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Funding,
    Commit,
    Reveal,
    DefaultEligible,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircleState {
    pub status: CircleStatus,
    pub phase: Phase,
    /// 1-based; exceeds `total_cycles` once the circle completes.
    pub current_cycle: u32,
    pub due_at: u64,
    pub grace_end_at: u64,
    pub commit_end_at: u64,
    pub reveal_end_at: u64,
    /// Accrued fees, penalties and rounding remainders.
    pub treasury_owed: i128,
    /// Active members whose obligation for the current cycle is fully paid.
    pub funded_count: u32,
    /// Next commit order number for the current cycle.
    pub commit_seq: u32,
}

/// Read-only snapshot returned by `get_status`, with the phase clock already
/// advanced to the current ledger time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusView {
    pub status: CircleStatus,
    pub current_cycle: u32,
    pub phase: Phase,
    pub due_at: u64,
    pub grace_end_at: u64,
    pub commit_end_at: u64,
    pub reveal_end_at: u64,
    pub funded_count: u32,
}

// ─── Members ───────────────────────────────────────────────────────────────

/// Ledger row of one wallet. Every balance is a non-negative token amount.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    pub wallet: Address,
    pub active: bool,
    pub has_won: bool,
    /// Roster index while active.
    pub slot: u32,
    pub collateral: i128,
    pub prefund: i128,
    /// Discount share from other members' wins; spent first by the waterfall.
    pub credit: i128,
    pub vesting_locked: i128,
    /// Running total of vesting moved to `withdrawable`. Not a balance.
    pub vesting_released: i128,
    /// First-cycle safety lock, spent on the winner's later obligations.
    pub future_locked: i128,
    pub withdrawable: i128,
    pub due_remaining: i128,
    /// Escrowed contribution for the running cycle.
    pub paid_this_cycle: i128,
    /// Cycle in which the late-payment penalty was applied (0 = never).
    pub late_penalty_cycle: u32,
    /// Cycle in which the non-reveal penalty was applied (0 = never).
    pub reveal_penalty_cycle: u32,
}

impl Member {
    /// Empty row for a freshly admitted wallet.
    pub fn new(wallet: Address, slot: u32) -> Self {
        Member {
            wallet,
            active: true,
            has_won: false,
            slot,
            collateral: 0,
            prefund: 0,
            credit: 0,
            vesting_locked: 0,
            vesting_released: 0,
            future_locked: 0,
            withdrawable: 0,
            due_remaining: 0,
            paid_this_cycle: 0,
            late_penalty_cycle: 0,
            reveal_penalty_cycle: 0,
        }
    }
}

// ─── Signed payloads ───────────────────────────────────────────────────────

/// Guardian-signed, single-use admission credential.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdmissionTicket {
    /// Circle instance the ticket was issued for.
    pub circle: Address,
    pub exp: u32,
    pub nonce: u64,
    pub signature: BytesN<64>,
}

/// Guardian-signed emergency freeze.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StopDirective {
    pub circle: Address,
    pub exp: u32,
    pub nonce: u64,
    pub signature: BytesN<64>,
}

// ─── Auction ───────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidCommit {
    pub hash: BytesN<32>,
    /// Commit order inside the cycle; lower wins ties.
    pub seq: u32,
    pub revealed: bool,
    /// Valid only once `revealed` is true.
    pub payout_wanted: i128,
}

/// Audit record of one settled cycle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleResult {
    pub cycle: u32,
    pub winner: Address,
    pub payout_wanted: i128,
    pub fee: i128,
    pub payout_net: i128,
    pub discount: i128,
    pub credit_per_member: i128,
    pub remainder: i128,
    pub vesting: i128,
    pub safety_lock: i128,
    pub settled_at: u64,
}

// ─── Deposits and withdrawals ──────────────────────────────────────────────

/// What a deposit is credited to. Decoded leniently from the forwarded payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Purpose {
    Collateral,
    Prefund,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WithdrawMode {
    /// Pay out `withdrawable` while the circle is running.
    Available = 1,
    /// Drain every balance after the circle closed.
    CloseOut = 2,
    /// Leave during recruiting and get every deposit back.
    ExitRefund = 3,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// CircleConfig. Instance storage.
    Config,
    /// CircleState. Instance storage.
    State,
    /// Dense roster `Vec<Address>`. Instance storage.
    Roster,
    /// Member row by wallet. Persistent.
    Member(Address),
    /// Consumed ticket / stop nonce. Persistent, never removed.
    Nonce(u64),
    /// Bid commitment by (cycle, wallet). Persistent.
    Bid(u32, Address),
    /// Wallets that committed in a cycle, in first-commit order. Persistent.
    Bidders(u32),
    /// Settled cycle audit record. Persistent.
    CycleResult(u32),
}
