//! NILE Core - Sell Tokens
//!
//! Sells soul tokens back into the bonding curve for lamports. Burns directly
//! from the seller's token account; fee forwarding degrades the same way as
//! `buy` (see buy.rs).

use crate::errors::NileError;
use crate::instructions::treasury::FeesReceived;
use crate::math::bonding_curve::{self, effective_supply};
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Sell<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        seeds = [SOUL_TOKEN_SEED, mint.key().as_ref()],
        bump = soul_token.bump,
        constraint = soul_token.minter == curve.key() @ NileError::OnlyMinter,
    )]
    pub soul_token: Box<Account<'info, SoulToken>>,

    #[account(
        mut,
        seeds = [CURVE_SEED, mint.key().as_ref()],
        bump = curve.bump,
        constraint = curve.active @ NileError::CurveNotActive,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// CHECK: PDA lamport vault backing the curve's reserve.
    #[account(
        mut,
        seeds = [CURVE_VAULT_SEED, curve.key().as_ref()],
        bump = curve.vault_bump,
    )]
    pub curve_vault: UncheckedAccount<'info>,

    #[account(mut, constraint = mint.key() == curve.mint)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = seller,
    )]
    pub seller_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// CHECK: PDA lamport vault backing the treasury.
    #[account(
        mut,
        seeds = [TREASURY_VAULT_SEED, treasury.key().as_ref()],
        bump = treasury.vault_bump,
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = seller,
        space = CreatorLedger::LEN,
        seeds = [CREATOR_LEDGER_SEED, treasury.key().as_ref(), curve.creator.as_ref()],
        bump,
    )]
    pub creator_ledger: Box<Account<'info, CreatorLedger>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SellParams {
    pub token_amount: u64,
    pub min_sol_out: u64,
}

pub fn sell(ctx: Context<Sell>, params: SellParams) -> Result<()> {
    require!(params.token_amount > 0, NileError::InsufficientTokens);
    require!(
        ctx.accounts.seller_token_account.amount >= params.token_amount,
        NileError::InsufficientTokens
    );
    ctx.accounts.curve.acquire_lock()?;

    let supply = effective_supply(ctx.accounts.mint.supply);
    let gross = bonding_curve::calc_sell(
        supply,
        ctx.accounts.curve.reserve_balance as u128,
        params.token_amount as u128,
    )?;
    require!(gross <= ctx.accounts.curve.reserve_balance, NileError::InsufficientBalance);

    let fee_split = bonding_curve::split_fee(gross);
    let sol_net = gross.saturating_sub(fee_split.total_fee);
    require!(sol_net >= params.min_sol_out, NileError::SlippageExceeded);

    ctx.accounts.curve.apply_sell(gross);

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.mint.to_account_info(),
                from: ctx.accounts.seller_token_account.to_account_info(),
                authority: ctx.accounts.seller.to_account_info(),
            },
        ),
        params.token_amount,
    )?;

    let curve_key = ctx.accounts.curve.key();
    let curve_vault_seeds: &[&[u8]] =
        &[CURVE_VAULT_SEED, curve_key.as_ref(), &[ctx.accounts.curve.vault_bump]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.curve_vault.to_account_info(),
                to: ctx.accounts.seller.to_account_info(),
            },
            &[curve_vault_seeds],
        ),
        sol_net,
    )?;

    if ctx.accounts.creator_ledger.is_new() {
        ctx.accounts.creator_ledger.init(
            ctx.accounts.treasury.key(),
            ctx.accounts.curve.creator,
            ctx.bumps.creator_ledger,
        );
    }

    let fee_forwarded = system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.curve_vault.to_account_info(),
                to: ctx.accounts.treasury_vault.to_account_info(),
            },
            &[curve_vault_seeds],
        ),
        fee_split.total_fee,
    )
    .is_ok();

    if fee_forwarded {
        ctx.accounts.treasury.receive_protocol_fee(fee_split.protocol_fee);
        ctx.accounts.treasury.receive_staker_fee(fee_split.staker_fee);
        ctx.accounts.treasury.note_creator_fee(fee_split.creator_fee);
        ctx.accounts.creator_ledger.credit(fee_split.creator_fee);
        emit!(FeesReceived {
            creator: ctx.accounts.curve.creator,
            creator_fee: fee_split.creator_fee,
            protocol_fee: fee_split.protocol_fee,
            staker_fee: fee_split.staker_fee,
        });
    } else {
        ctx.accounts.curve.retain_fee(fee_split.total_fee);
        msg!("fee forwarding failed, retained {} lamports in curve reserve", fee_split.total_fee);
    }

    let new_price = bonding_curve::current_price(
        ctx.accounts.curve.reserve_balance as u128,
        effective_supply(ctx.accounts.mint.supply - params.token_amount),
    )
    .unwrap_or(0);

    ctx.accounts.curve.release_lock();

    emit!(SellExecuted {
        seller: ctx.accounts.seller.key(),
        curve: ctx.accounts.curve.key(),
        tokens_in: params.token_amount,
        coin_out: sol_net,
        fee: fee_split.total_fee,
        new_price,
    });

    msg!("Sell: {} tokens -> {} lamports, fee {}", params.token_amount, sol_net, fee_split.total_fee);

    Ok(())
}

#[event]
pub struct SellExecuted {
    #[index]
    pub seller: Pubkey,
    #[index]
    pub curve: Pubkey,
    pub tokens_in: u64,
    pub coin_out: u64,
    pub fee: u64,
    pub new_price: u128,
}

