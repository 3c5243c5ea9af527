//! Overflow-safe arithmetic helpers for ledger calculations.
//!
//! Every helper returns `ContractError::Overflow` / `Underflow` instead of
//! wrapping, so callers propagate with `?` and the whole invocation is
//! rolled back.

use circle_errors::ContractError;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked subtraction that also refuses to go below zero; balances are
/// never negative.
#[inline]
pub fn sub(a: i128, b: i128) -> Result<i128, ContractError> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(ContractError::Underflow),
    }
}

#[inline]
pub fn mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// Floor division. A zero divisor is reported as overflow.
#[inline]
pub fn div(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_div(b).ok_or(ContractError::Overflow)
}

/// `floor(amount * bps / 10_000)` with a checked intermediate product.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, ContractError> {
    div(mul(amount, bps as i128)?, BPS_DENOMINATOR)
}

/// Split `total` into `parts` equal floor shares.
/// Returns `(per_part, remainder)` with `per_part * parts + remainder == total`.
pub fn split_even(total: i128, parts: u32) -> Result<(i128, i128), ContractError> {
    if parts == 0 {
        return Ok((0, total));
    }
    let per = div(total, parts as i128)?;
    let remainder = sub(total, mul(per, parts as i128)?)?;
    Ok((per, remainder))
}

/// Checked timestamp addition.
#[inline]
pub fn add_secs(at: u64, secs: u64) -> Result<u64, ContractError> {
    at.checked_add(secs).ok_or(ContractError::Overflow)
}
