//! NILE Core - Create Soul Token
//!
//! Deploys a person's dedicated fungible token: the SPL mint, the companion
//! `SoulToken` metadata PDA, the `Curve` that trades against it, and the
//! `TokenPair` registry entry, all in one instruction.

use crate::errors::NileError;
use crate::math::bonding_curve::INITIAL_RESERVE;
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{Mint, Token};

/// Token base-unit decimals, matching the teacher's mint configuration.
pub const TOKEN_DECIMALS: u8 = 9;

#[derive(Accounts)]
#[instruction(params: CreateSoulTokenParams)]
pub struct CreateSoulToken<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        realloc = Factory::space_for(factory.deployed_person_ids.len() + 1),
        realloc::payer = creator,
        realloc::zero = false,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Box<Account<'info, Factory>>,

    #[account(
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    #[account(
        init_if_needed,
        payer = creator,
        space = TokenPair::LEN,
        seeds = [TOKEN_PAIR_SEED, params.person_id.as_ref()],
        bump,
    )]
    pub token_pair: Box<Account<'info, TokenPair>>,

    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = mint_authority,
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        space = SoulToken::LEN,
        seeds = [SOUL_TOKEN_SEED, mint.key().as_ref()],
        bump,
    )]
    pub soul_token: Box<Account<'info, SoulToken>>,

    /// CHECK: PDA checked by seeds; never holds data, only signs mint CPIs.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, soul_token.key().as_ref()],
        bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        space = Curve::LEN,
        seeds = [CURVE_SEED, mint.key().as_ref()],
        bump,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// CHECK: PDA lamport vault backing the curve's reserve; system-owned.
    #[account(
        mut,
        seeds = [CURVE_VAULT_SEED, curve.key().as_ref()],
        bump,
    )]
    pub curve_vault: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateSoulTokenParams {
    pub person_id: [u8; 16],
    pub name: String,
    pub symbol: String,
    pub graduation_threshold: Option<u64>,
}

pub fn create_soul_token(ctx: Context<CreateSoulToken>, params: CreateSoulTokenParams) -> Result<()> {
    require!(!ctx.accounts.token_pair.exists, NileError::TokenAlreadyExists);
    require!(params.name.len() <= 32, NileError::InvalidConfig);
    require!(params.symbol.len() <= 10, NileError::InvalidConfig);
    require!(
        (ctx.accounts.factory.deployed_person_ids.len()) < MAX_DEPLOYED_TOKENS,
        NileError::InvalidConfig
    );

    let graduation_threshold = params
        .graduation_threshold
        .unwrap_or(ctx.accounts.factory.default_graduation_threshold);
    require!(graduation_threshold > 0, NileError::InvalidConfig);

    // Fund the curve's lamport vault with the virtual initial reserve so the
    // invariant `reserve_balance >= INITIAL_RESERVE` is backed by real lamports.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.creator.to_account_info(),
                to: ctx.accounts.curve_vault.to_account_info(),
            },
        ),
        INITIAL_RESERVE,
    )?;

    ctx.accounts.token_pair.set_inner(TokenPair {
        person_id: params.person_id,
        token: ctx.accounts.soul_token.key(),
        curve: ctx.accounts.curve.key(),
        creator: ctx.accounts.creator.key(),
        exists: true,
        bump: ctx.bumps.token_pair,
    });

    let mut name_bytes = [0u8; 32];
    let name_slice = params.name.as_bytes();
    name_bytes[..name_slice.len().min(32)].copy_from_slice(&name_slice[..name_slice.len().min(32)]);

    let mut symbol_bytes = [0u8; 10];
    let symbol_slice = params.symbol.as_bytes();
    symbol_bytes[..symbol_slice.len().min(10)].copy_from_slice(&symbol_slice[..symbol_slice.len().min(10)]);

    ctx.accounts.soul_token.set_inner(SoulToken {
        person_id: params.person_id,
        name: name_bytes,
        symbol: symbol_bytes,
        mint: ctx.accounts.mint.key(),
        factory: ctx.accounts.factory.key(),
        minter: ctx.accounts.curve.key(),
        phase: Phase::Bonding,
        graduated: false,
        bump: ctx.bumps.soul_token,
    });

    ctx.accounts.curve.init(
        params.person_id,
        ctx.accounts.soul_token.key(),
        ctx.accounts.mint.key(),
        ctx.accounts.treasury.key(),
        ctx.accounts.creator.key(),
        graduation_threshold,
        ctx.bumps.curve,
        ctx.bumps.curve_vault,
    );

    ctx.accounts.factory.register(params.person_id);

    emit!(SoulTokenCreated {
        person_id: params.person_id,
        token: ctx.accounts.soul_token.key(),
        curve: ctx.accounts.curve.key(),
        creator: ctx.accounts.creator.key(),
        name: params.name.clone(),
        symbol: params.symbol.clone(),
    });

    msg!("Soul token created: {} ({})", params.name, params.symbol);
    msg!("Mint: {}, Curve: {}", ctx.accounts.mint.key(), ctx.accounts.curve.key());
    msg!("Graduation threshold: {} lamports", graduation_threshold);

    Ok(())
}

#[event]
pub struct SoulTokenCreated {
    #[index]
    pub person_id: [u8; 16],
    #[index]
    pub token: Pubkey,
    #[index]
    pub curve: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
}
