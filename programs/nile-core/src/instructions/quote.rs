//! NILE Core - Quote Aggregation & Post-Graduation Stub
//!
//! Read-only trade previews and the Router's explanation for why a graduated
//! token has nowhere left to route to (see SPEC_FULL.md §6).

use crate::errors::NileError;
use crate::math::bonding_curve::{self, effective_supply};
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

#[derive(Accounts)]
pub struct QuoteTrade<'info> {
    #[account(
        seeds = [CURVE_SEED, mint.key().as_ref()],
        bump = curve.bump,
    )]
    pub curve: Box<Account<'info, Curve>>,

    pub mint: Box<Account<'info, Mint>>,
}

/// Read-only preview of a trade: the net amount after fees, plus the fee itself.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default)]
pub struct QuotePreview {
    pub amount: u64,
    pub fee: u64,
}

/// Previews the tokens a `coin_in`-lamport buy would currently yield,
/// without mutating any state.
pub fn quote_buy(ctx: Context<QuoteTrade>, coin_in: u64) -> Result<QuotePreview> {
    require!(ctx.accounts.curve.active, NileError::CurveNotActive);
    let fee_split = bonding_curve::split_fee(coin_in);
    let v_net = coin_in.saturating_sub(fee_split.total_fee);
    let supply = effective_supply(ctx.accounts.mint.supply);
    let amount = bonding_curve::calc_buy(supply, ctx.accounts.curve.reserve_balance as u128, v_net as u128)?;
    Ok(QuotePreview { amount, fee: fee_split.total_fee })
}

/// Previews the lamports a `token_in`-unit sell would currently yield.
pub fn quote_sell(ctx: Context<QuoteTrade>, token_in: u64) -> Result<QuotePreview> {
    require!(ctx.accounts.curve.active, NileError::CurveNotActive);
    let supply = effective_supply(ctx.accounts.mint.supply);
    let gross = bonding_curve::calc_sell(supply, ctx.accounts.curve.reserve_balance as u128, token_in as u128)?;
    let fee_split = bonding_curve::split_fee(gross);
    let amount = gross.saturating_sub(fee_split.total_fee);
    Ok(QuotePreview { amount, fee: fee_split.total_fee })
}

/// Current marginal price for this curve.
pub fn quote_price(ctx: Context<QuoteTrade>) -> Result<u128> {
    bonding_curve::current_price(
        ctx.accounts.curve.reserve_balance as u128,
        effective_supply(ctx.accounts.mint.supply),
    )
}

#[derive(Accounts)]
pub struct RouteGraduatedTrade<'info> {
    #[account(
        seeds = [SOUL_TOKEN_SEED, mint.key().as_ref()],
        bump = soul_token.bump,
    )]
    pub soul_token: Box<Account<'info, SoulToken>>,

    pub mint: Box<Account<'info, Mint>>,
}

/// A trade attempt against an already-graduated token has nowhere left to go:
/// there is no external AMM/order-book integration in this core (see
/// Non-goals). `NotGraduated` names the routing gap itself, distinct from
/// `CurveNotActive`, which flags the curve-level invariant that sent the
/// caller here in the first place.
pub fn route_graduated_trade(_ctx: Context<RouteGraduatedTrade>) -> Result<()> {
    Err(NileError::NotGraduated.into())
}
