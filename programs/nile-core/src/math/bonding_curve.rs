//! NILE Core - Bonding Curve Mathematics
//!
//! Bancor-style continuous bonding curve: price is a deterministic function of
//! the reserve balance and the effective (virtual + real) token supply, with
//! reserve ratio `r = RESERVE_RATIO / PPM ≈ 1/3`.

use crate::errors::NileError;
use crate::math::fixed_point::{div_wad, mul_wad, pow_approx, WAD};
use anchor_lang::prelude::*;

/// Parts-per-million scale for the reserve ratio.
pub const PPM: u64 = 1_000_000;

/// Bancor reserve ratio, in PPM: `RESERVE_RATIO / PPM ≈ 1/3`.
pub const RESERVE_RATIO: u64 = 333_333;

/// Basis-points denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Total trading fee: 1%.
pub const FEE_BPS: u64 = 100;

/// Creator's share of the fee: 0.5%.
pub const FEE_CREATOR_BPS: u64 = 50;

/// Protocol's share of the fee: 0.3%.
pub const FEE_PROTOCOL_BPS: u64 = 30;

/// Staker pool's share of the fee: 0.2% (computed as the remainder so
/// rounding is absorbed into the staker share rather than lost).
pub const FEE_STAKER_BPS: u64 = 20;

/// Non-zero virtual reserve seeded at curve construction (coin-units).
pub const INITIAL_RESERVE: u64 = 10;

/// Virtual supply added to real `total_supply` to keep the curve well-defined
/// at bootstrap (token base units).
pub const INITIAL_SUPPLY: u64 = 100_000;

/// `token.total_supply + INITIAL_SUPPLY`.
pub fn effective_supply(total_supply: u64) -> u128 {
    total_supply as u128 + INITIAL_SUPPLY as u128
}

/// Fee components for one trade.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeSplit {
    pub creator_fee: u64,
    pub protocol_fee: u64,
    pub staker_fee: u64,
    pub total_fee: u64,
}

/// Splits a gross fee `f` into creator/protocol/staker shares. The staker
/// share is the remainder (`f - creator - protocol`) so integer-division
/// rounding never leaves lamports unaccounted for.
pub fn split_fee(gross: u64) -> FeeSplit {
    let total_fee = (gross as u128 * FEE_BPS as u128 / BPS_DENOMINATOR as u128) as u64;
    let creator_fee = (gross as u128 * FEE_CREATOR_BPS as u128 / BPS_DENOMINATOR as u128) as u64;
    let protocol_fee = (gross as u128 * FEE_PROTOCOL_BPS as u128 / BPS_DENOMINATOR as u128) as u64;
    let staker_fee = total_fee.saturating_sub(creator_fee).saturating_sub(protocol_fee);
    FeeSplit { creator_fee, protocol_fee, staker_fee, total_fee }
}

/// `fee = v * FEE_BPS / BPS_DENOMINATOR` (1%, rounded down).
pub fn trade_fee(amount: u64) -> u64 {
    (amount as u128 * FEE_BPS as u128 / BPS_DENOMINATOR as u128) as u64
}

/// `CalcBuy(supply, reserve, v) = supply * ((1 + v/reserve)^r - 1)`.
///
/// Returns 0 if either `supply` or `v` is zero. Monotone non-decreasing in
/// `v` because `pow_approx` is monotone non-decreasing in its ratio argument
/// and every other factor is held fixed.
pub fn calc_buy(supply: u128, reserve: u128, v: u128) -> Result<u64> {
    if supply == 0 || v == 0 {
        return Ok(0);
    }
    require!(reserve != 0, NileError::MathOverflow);

    let ratio = div_wad(v, reserve)?;
    let growth = pow_approx(ratio, RESERVE_RATIO as u128, PPM as u128)?;
    let tokens_out = mul_wad(supply, growth)?;
    u64::try_from(tokens_out).map_err(|_| NileError::MathOverflow.into())
}

/// `CalcSell(supply, reserve, t) = reserve * (1 - (1 - t/supply)^(1/r))`,
/// with `1/r = 3` an exact integer power — computed by repeated wad
/// multiplication rather than the Taylor approximation used for the
/// fractional buy-side exponent, since cubing is both exact and cheaper.
/// Saturates at `reserve` (never returns more than the curve holds) and
/// returns 0 if either `supply` or `t` is zero.
pub fn calc_sell(supply: u128, reserve: u128, t: u128) -> Result<u64> {
    if supply == 0 || t == 0 {
        return Ok(0);
    }

    let ratio = div_wad(t, supply)?;
    if ratio >= WAD {
        // Selling the entire (or more than the) effective supply drains the
        // whole reserve; there is nothing left to compute.
        return u64::try_from(reserve).map_err(|_| NileError::MathOverflow.into());
    }

    let remaining = WAD - ratio; // (1 - t/supply), in wad, in (0, 1]
    let remaining_cubed = mul_wad(mul_wad(remaining, remaining)?, remaining)?;
    let drained_fraction = WAD - remaining_cubed; // 1 - (1 - t/supply)^3
    let gross = mul_wad(reserve, drained_fraction)?;
    let gross = gross.min(reserve);
    u64::try_from(gross).map_err(|_| NileError::MathOverflow.into())
}

/// Instantaneous marginal price: `reserve * PPM / (supply * RESERVE_RATIO / WAD)`.
///
/// Degenerates to 0 for `supply` small enough that the denominator's integer
/// division floors to 0 — an artifact of the literal spec formula at very low
/// supply, not corrected here since the spec gives this formula verbatim.
pub fn current_price(reserve: u128, supply: u128) -> Result<u128> {
    let denom_inner = supply
        .checked_mul(RESERVE_RATIO as u128)
        .ok_or(NileError::MathOverflow)?;
    let denom = denom_inner / WAD;
    require!(denom != 0, NileError::MathOverflow);
    let numer = reserve.checked_mul(PPM as u128).ok_or(NileError::MathOverflow)?;
    Ok(numer / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPLY: u128 = 50_000_000 * 1_000_000_000; // 50M tokens, 9 decimals
    const RESERVE: u128 = 30 * 1_000_000_000; // 30 coin-units (lamports-scale)

    #[test]
    fn test_calc_buy_zero_inputs() {
        assert_eq!(calc_buy(0, RESERVE, 1_000).unwrap(), 0);
        assert_eq!(calc_buy(SUPPLY, RESERVE, 0).unwrap(), 0);
    }

    #[test]
    fn test_calc_sell_zero_inputs() {
        assert_eq!(calc_sell(0, RESERVE, 1_000).unwrap(), 0);
        assert_eq!(calc_sell(SUPPLY, RESERVE, 0).unwrap(), 0);
    }

    #[test]
    fn test_calc_buy_monotone_nondecreasing() {
        let mut prev = 0u64;
        for i in 1..=10u128 {
            let v = i * 1_000_000_000;
            let out = calc_buy(SUPPLY, RESERVE, v).unwrap();
            assert!(out >= prev);
            prev = out;
        }
    }

    #[test]
    fn test_calc_sell_monotone_nondecreasing() {
        let mut prev = 0u64;
        for i in 1..=10u128 {
            let t = i * SUPPLY / 100;
            let out = calc_sell(SUPPLY, RESERVE, t).unwrap();
            assert!(out >= prev);
            prev = out;
        }
    }

    #[test]
    fn test_calc_sell_saturates_at_reserve() {
        let out = calc_sell(SUPPLY, RESERVE, SUPPLY * 2).unwrap();
        assert_eq!(out, RESERVE as u64);
    }

    #[test]
    fn test_round_trip_bound() {
        // Selling tokens bought with v (before fees) must yield no more than v.
        let v = 5 * 1_000_000_000u128;
        let tokens_out = calc_buy(SUPPLY, RESERVE, v).unwrap();
        let new_supply = SUPPLY + tokens_out as u128;
        let new_reserve = RESERVE + v;
        let coin_back = calc_sell(new_supply, new_reserve, tokens_out as u128).unwrap();
        assert!(coin_back as u128 <= v, "round-trip must not exceed the original input");
    }

    #[test]
    fn test_split_fee_sums_to_total() {
        let split = split_fee(1_000_000);
        assert_eq!(split.total_fee, 10_000); // 1%
        assert_eq!(
            split.creator_fee + split.protocol_fee + split.staker_fee,
            split.total_fee
        );
    }

    #[test]
    fn test_trade_fee_is_one_percent() {
        assert_eq!(trade_fee(1_000_000_000), 10_000_000);
    }
}
