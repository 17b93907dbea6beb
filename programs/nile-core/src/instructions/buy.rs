//! NILE Core - Buy Tokens
//!
//! Buys soul tokens from the bonding curve using lamports. Mints directly to
//! the buyer (see the Router design note in SPEC_FULL.md §6) and forwards the
//! trading fee to the treasury, degrading gracefully to fee retention if that
//! forwarding CPI fails.

use crate::errors::NileError;
use crate::instructions::treasury::FeesReceived;
use crate::math::bonding_curve::{self, effective_supply};
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        seeds = [SOUL_TOKEN_SEED, mint.key().as_ref()],
        bump = soul_token.bump,
        constraint = soul_token.minter == curve.key() @ NileError::OnlyMinter,
    )]
    pub soul_token: Box<Account<'info, SoulToken>>,

    /// CHECK: PDA checked by seeds; only ever signs mint CPIs.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, soul_token.key().as_ref()],
        bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

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
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer,
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,

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
        payer = buyer,
        space = CreatorLedger::LEN,
        seeds = [CREATOR_LEDGER_SEED, treasury.key().as_ref(), curve.creator.as_ref()],
        bump,
    )]
    pub creator_ledger: Box<Account<'info, CreatorLedger>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct BuyParams {
    pub sol_amount: u64,
    pub min_tokens_out: u64,
}

pub fn buy(ctx: Context<Buy>, params: BuyParams) -> Result<()> {
    require!(params.sol_amount > 0, NileError::InsufficientPayment);
    ctx.accounts.curve.acquire_lock()?;

    let fee_split = bonding_curve::split_fee(params.sol_amount);
    let v_net = params.sol_amount.saturating_sub(fee_split.total_fee);

    let supply = effective_supply(ctx.accounts.mint.supply);
    let tokens_out = bonding_curve::calc_buy(
        supply,
        ctx.accounts.curve.reserve_balance as u128,
        v_net as u128,
    )?;
    require!(tokens_out >= params.min_tokens_out, NileError::SlippageExceeded);

    let graduated = ctx.accounts.curve.apply_buy(v_net);

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.curve_vault.to_account_info(),
            },
        ),
        params.sol_amount,
    )?;

    let soul_token_key = ctx.accounts.soul_token.key();
    let mint_authority_seeds: &[&[u8]] =
        &[MINT_AUTHORITY_SEED, soul_token_key.as_ref(), &[ctx.bumps.mint_authority]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.buyer_token_account.to_account_info(),
                authority: ctx.accounts.mint_authority.to_account_info(),
            },
            &[mint_authority_seeds],
        ),
        tokens_out,
    )?;

    if ctx.accounts.creator_ledger.is_new() {
        ctx.accounts.creator_ledger.init(
            ctx.accounts.treasury.key(),
            ctx.accounts.curve.creator,
            ctx.bumps.creator_ledger,
        );
    }

    let curve_key = ctx.accounts.curve.key();
    let curve_vault_seeds: &[&[u8]] =
        &[CURVE_VAULT_SEED, curve_key.as_ref(), &[ctx.accounts.curve.vault_bump]];

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
        effective_supply(ctx.accounts.mint.supply + tokens_out),
    )
    .unwrap_or(0);

    ctx.accounts.curve.release_lock();

    emit!(BuyExecuted {
        buyer: ctx.accounts.buyer.key(),
        curve: ctx.accounts.curve.key(),
        coin_in: params.sol_amount,
        tokens_out,
        fee: fee_split.total_fee,
        new_price,
    });

    msg!("Buy: {} lamports -> {} tokens, fee {}", params.sol_amount, tokens_out, fee_split.total_fee);

    if graduated {
        emit!(GraduationTriggered {
            curve: ctx.accounts.curve.key(),
            reserve: ctx.accounts.curve.reserve_balance,
        });
        msg!("Graduation threshold reached at reserve {}", ctx.accounts.curve.reserve_balance);
    }

    Ok(())
}

#[event]
pub struct BuyExecuted {
    #[index]
    pub buyer: Pubkey,
    #[index]
    pub curve: Pubkey,
    pub coin_in: u64,
    pub tokens_out: u64,
    pub fee: u64,
    pub new_price: u128,
}

#[event]
pub struct GraduationTriggered {
    #[index]
    pub curve: Pubkey,
    pub reserve: u64,
}
