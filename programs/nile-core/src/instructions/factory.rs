//! NILE Core - Factory Admin Instructions
//!
//! Global registry initialization plus owner-gated configuration updates and
//! the graduation handoff (see instructions::treasury for the analogous
//! owner-gated pattern).

use crate::errors::NileError;
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitFactory<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = Factory::space_for(0),
        seeds = [FACTORY_SEED],
        bump,
    )]
    pub factory: Box<Account<'info, Factory>>,

    pub system_program: Program<'info, System>,
}

pub fn init_factory(ctx: Context<InitFactory>, default_graduation_threshold: u64) -> Result<()> {
    require!(default_graduation_threshold > 0, NileError::InvalidConfig);
    ctx.accounts.factory.init(ctx.accounts.owner.key(), default_graduation_threshold, ctx.bumps.factory);
    msg!("Factory initialized, default graduation threshold: {} lamports", default_graduation_threshold);
    Ok(())
}

#[derive(Accounts)]
pub struct SetGraduationThreshold<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
        constraint = owner.key() == factory.owner @ NileError::NotAuthorized,
    )]
    pub factory: Box<Account<'info, Factory>>,

    pub owner: Signer<'info>,
}

/// Only affects curves created after this call; existing `Curve.graduation_threshold`
/// values were copied at creation time and are never read back from `Factory`.
pub fn set_graduation_threshold(ctx: Context<SetGraduationThreshold>, new_threshold: u64) -> Result<()> {
    require!(new_threshold > 0, NileError::InvalidConfig);
    ctx.accounts.factory.default_graduation_threshold = new_threshold;
    msg!("Default graduation threshold updated to {} lamports", new_threshold);
    Ok(())
}

#[derive(Accounts)]
pub struct GraduateToken<'info> {
    #[account(
        seeds = [FACTORY_SEED],
        bump = factory.bump,
        constraint = owner.key() == factory.owner @ NileError::NotAuthorized,
    )]
    pub factory: Box<Account<'info, Factory>>,

    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = soul_token.factory == factory.key() @ NileError::OnlyFactory,
    )]
    pub soul_token: Box<Account<'info, SoulToken>>,

    #[account(
        mut,
        constraint = curve.token == soul_token.key() @ NileError::TokenNotFound,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// CHECK: just stored as the token's new minter reference.
    pub new_minter: UncheckedAccount<'info>,
}

pub fn graduate_token(ctx: Context<GraduateToken>) -> Result<()> {
    require!(!ctx.accounts.soul_token.graduated, NileError::AlreadyGraduated);

    let old_minter = ctx.accounts.soul_token.minter;
    ctx.accounts.soul_token.set_phase(Phase::Amm)?;
    ctx.accounts.soul_token.set_minter(ctx.accounts.new_minter.key());
    ctx.accounts.curve.active = false;

    emit!(PhaseChanged {
        token: ctx.accounts.soul_token.key(),
        old: Phase::Bonding,
        new: Phase::Amm,
    });
    emit!(MinterUpdated {
        token: ctx.accounts.soul_token.key(),
        old: old_minter,
        new: ctx.accounts.new_minter.key(),
    });

    msg!("Token {} graduated, minter rotated to {}", ctx.accounts.soul_token.key(), ctx.accounts.new_minter.key());

    Ok(())
}

#[event]
pub struct PhaseChanged {
    #[index]
    pub token: Pubkey,
    pub old: Phase,
    pub new: Phase,
}

#[event]
pub struct MinterUpdated {
    #[index]
    pub token: Pubkey,
    #[index]
    pub old: Pubkey,
    #[index]
    pub new: Pubkey,
}
