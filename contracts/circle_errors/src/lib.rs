#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and configuration errors (codes 1-99).
    Initialization,
    /// Signed ticket / stop-directive errors (codes 100-199).
    Admission,
    /// Funding window and auction window errors (codes 200-299).
    Timing,
    /// Sealed-bid auction errors (codes 300-399).
    Auction,
    /// Roster and member lookup errors (codes 400-499).
    Membership,
    /// Circle status and withdrawal errors (codes 500-599).
    State,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the savings circle contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Admission
///   200 - 299 : Timing
///   300 - 399 : Auction
///   400 - 499 : Membership
///   500 - 599 : State
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    /// A configuration field is out of range (bps > 10000, zero durations,
    /// fewer than two members, more cycles than members, ...).
    InvalidConfig = 3,

    /// `n_members * contribution` exceeds `max_pot_cap`.
    PotExceedsCap = 4,

    // --- Admission (100-199) ---
    /// Ticket or stop directive is past its `exp` timestamp.
    TicketExpired = 100,

    /// Signature does not verify against the guardian key.
    SignatureInvalid = 101,

    /// Nonce was already consumed by this circle.
    NonceReused = 102,

    /// Payload was issued for a different circle instance.
    DomainMismatch = 103,

    // --- Timing (200-299) ---
    /// Debit requested before `due_at` or after the grace window closed.
    DebitOutsideWindow = 200,

    /// Termination requested while the grace window is still open or every
    /// member is funded.
    NotDefaultEligible = 201,

    /// Commit, reveal or finalize attempted in the wrong auction phase.
    WrongPhase = 202,

    // --- Auction (300-399) ---
    /// Revealed bid does not reproduce the committed hash.
    HashMismatch = 300,

    /// Revealed payout is below the minimum payout or above the pot.
    BidOutOfBounds = 301,

    /// Member already received a pot in an earlier cycle.
    AlreadyWon = 302,

    /// Reveal submitted without a commit for the current cycle.
    NoCommitment = 303,

    // --- Membership (400-499) ---
    /// Wallet is not an active member of this circle.
    NotMember = 400,

    /// Wallet already holds an active slot.
    AlreadyMember = 401,

    /// Every slot is taken.
    CircleFull = 402,

    /// Roster index is past the member count.
    MemberIndexOutOfRange = 403,

    // --- State (500-599) ---
    /// Operation is not permitted in the circle's current status.
    WrongStatus = 500,

    /// Nothing is available to withdraw or collect.
    NothingToWithdraw = 501,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidConfig
            | ContractError::PotExceedsCap => ErrorCategory::Initialization,

            ContractError::TicketExpired
            | ContractError::SignatureInvalid
            | ContractError::NonceReused
            | ContractError::DomainMismatch => ErrorCategory::Admission,

            ContractError::DebitOutsideWindow
            | ContractError::NotDefaultEligible
            | ContractError::WrongPhase => ErrorCategory::Timing,

            ContractError::HashMismatch
            | ContractError::BidOutOfBounds
            | ContractError::AlreadyWon
            | ContractError::NoCommitment => ErrorCategory::Auction,

            ContractError::NotMember
            | ContractError::AlreadyMember
            | ContractError::CircleFull
            | ContractError::MemberIndexOutOfRange => ErrorCategory::Membership,

            ContractError::WrongStatus | ContractError::NothingToWithdraw => ErrorCategory::State,

            ContractError::Overflow | ContractError::Underflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::InvalidConfig => "Circle configuration is out of range",
            ContractError::PotExceedsCap => "Pot size exceeds the configured cap",
            ContractError::TicketExpired => "Signed payload has expired",
            ContractError::SignatureInvalid => "Signature does not match the guardian key",
            ContractError::NonceReused => "Nonce has already been consumed",
            ContractError::DomainMismatch => "Payload was issued for a different circle",
            ContractError::DebitOutsideWindow => "Debit is only allowed inside the funding window",
            ContractError::NotDefaultEligible => {
                "Circle is not eligible for default termination"
            }
            ContractError::WrongPhase => "Operation is not allowed in the current phase",
            ContractError::HashMismatch => "Revealed bid does not match the commitment",
            ContractError::BidOutOfBounds => "Bid is outside the allowed payout range",
            ContractError::AlreadyWon => "Member has already won a cycle",
            ContractError::NoCommitment => "No bid commitment found for this cycle",
            ContractError::NotMember => "Wallet is not an active member",
            ContractError::AlreadyMember => "Wallet is already an active member",
            ContractError::CircleFull => "Every member slot is taken",
            ContractError::MemberIndexOutOfRange => "Member index is out of range",
            ContractError::WrongStatus => "Operation is not allowed in the current status",
            ContractError::NothingToWithdraw => "Nothing available to withdraw",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
        }
    }
}

#[cfg(test)]
mod test_errors;
