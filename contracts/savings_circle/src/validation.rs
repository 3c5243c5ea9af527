//! Configuration Validation Module
//!
//! Checks a `CircleConfig` before `initialize` stores it. The config is
//! immutable afterwards, so every bound is enforced here once.
//!
//! ## Constraints
//! - **Members**: `2 <= n_members <= MAX_MEMBERS`.
//! - **Cycles**: `1 <= total_cycles <= n_members`, so every cycle has a member
//!   that has not won yet.
//! - **Rates**: every basis-point field is at most `10_000`.
//! - **Durations**: interval, grace, commit and reveal windows are non-zero.
//!   A zero grace window leaves no time in which a cycle can be funded.
//! - **Pot**: `n_members * contribution` must fit in `i128` and stay within
//!   `max_pot_cap` (`PotExceedsCap`).

use circle_errors::ContractError;

use crate::math;
use crate::types::CircleConfig;

/// Upper bound on the roster. Keeps every per-message roster walk bounded.
pub const MAX_MEMBERS: u32 = 64;

/// Largest accepted basis-point value (100 %).
pub const MAX_BPS: u32 = 10_000;

fn check_bps(value: u32) -> Result<(), ContractError> {
    if value > MAX_BPS {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

/// The pot every cycle's winner bids against.
pub fn pot(config: &CircleConfig) -> Result<i128, ContractError> {
    math::mul(config.contribution, config.n_members as i128)
}

/// Collateral a member is expected to hold, sized to the whole obligation.
pub fn required_collateral(config: &CircleConfig) -> Result<i128, ContractError> {
    let total_obligation = math::mul(config.contribution, config.total_cycles as i128)?;
    math::bps(total_obligation, config.collateral_rate_bps)
}

/// Validate every field of `config`.
///
/// # Errors
/// * `InvalidConfig` for any out-of-range field.
/// * `Overflow` if the pot does not fit in `i128`.
/// * `PotExceedsCap` if the pot is above `max_pot_cap`.
pub fn validate_config(config: &CircleConfig) -> Result<(), ContractError> {
    if config.n_members < 2 || config.n_members > MAX_MEMBERS {
        return Err(ContractError::InvalidConfig);
    }
    if config.total_cycles == 0 || config.total_cycles > config.n_members {
        return Err(ContractError::InvalidConfig);
    }
    if config.contribution <= 0 || config.min_deposit_units < 0 || config.max_pot_cap <= 0 {
        return Err(ContractError::InvalidConfig);
    }
    if config.interval_sec == 0
        || config.grace_sec == 0
        || config.commit_duration_sec == 0
        || config.reveal_duration_sec == 0
    {
        return Err(ContractError::InvalidConfig);
    }

    check_bps(config.take_rate_bps)?;
    check_bps(config.collateral_rate_bps)?;
    check_bps(config.max_discount_bps)?;
    check_bps(config.vesting_bps_cycle1)?;
    check_bps(config.early_lock_rate_bps_cycle1)?;

    if pot(config)? > config.max_pot_cap {
        return Err(ContractError::PotExceedsCap);
    }
    // Sized up front so later settlement math cannot hit it first.
    required_collateral(config)?;
    Ok(())
}
