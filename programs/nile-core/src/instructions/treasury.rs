//! NILE Core - Treasury Instructions
//!
//! One-time initialization plus owner/creator withdrawals. `receive_fees`
//! itself is not a top-level instruction — it only ever runs inline from
//! `buy`/`sell` with the lamports already in hand (see SPEC_FULL.md §8).

use crate::errors::NileError;
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;

#[derive(Accounts)]
pub struct InitTreasury<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = Treasury::LEN,
        seeds = [TREASURY_SEED],
        bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// CHECK: PDA lamport vault; holds no data.
    #[account(
        seeds = [TREASURY_VAULT_SEED, treasury.key().as_ref()],
        bump,
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    /// CHECK: just stored as the withdrawal destination.
    pub protocol_wallet: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn init_treasury(ctx: Context<InitTreasury>) -> Result<()> {
    require!(ctx.accounts.protocol_wallet.key() != Pubkey::default(), NileError::ZeroAddress);
    ctx.accounts.treasury.init(
        ctx.accounts.owner.key(),
        ctx.accounts.protocol_wallet.key(),
        ctx.bumps.treasury,
        ctx.bumps.treasury_vault,
    );
    msg!("Treasury initialized, protocol wallet: {}", ctx.accounts.protocol_wallet.key());
    Ok(())
}

#[derive(Accounts)]
pub struct CreatorWithdraw<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// CHECK: PDA lamport vault; signs its own outgoing transfer.
    #[account(
        mut,
        seeds = [TREASURY_VAULT_SEED, treasury.key().as_ref()],
        bump = treasury.vault_bump,
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [CREATOR_LEDGER_SEED, treasury.key().as_ref(), creator.key().as_ref()],
        bump = creator_ledger.bump,
        constraint = creator_ledger.creator == creator.key() @ NileError::NotAuthorized,
    )]
    pub creator_ledger: Box<Account<'info, CreatorLedger>>,

    pub system_program: Program<'info, System>,
}

pub fn creator_withdraw(ctx: Context<CreatorWithdraw>) -> Result<()> {
    ctx.accounts.creator_ledger.acquire_lock()?;
    let amount = ctx.accounts.creator_ledger.balance;
    require!(amount > 0, NileError::InsufficientBalance);

    let treasury_key = ctx.accounts.treasury.key();
    let vault_seeds: &[&[u8]] =
        &[TREASURY_VAULT_SEED, treasury_key.as_ref(), &[ctx.accounts.treasury.vault_bump]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.treasury_vault.to_account_info(),
                to: ctx.accounts.creator.to_account_info(),
            },
            &[vault_seeds],
        ),
        amount,
    )?;

    let withdrawn = ctx.accounts.creator_ledger.withdraw();
    ctx.accounts.creator_ledger.release_lock();

    emit!(CreatorWithdrawEvent {
        creator: ctx.accounts.creator.key(),
        amount: withdrawn,
    });
    msg!("Creator withdraw: {} lamports to {}", withdrawn, ctx.accounts.creator.key());

    Ok(())
}

#[derive(Accounts)]
pub struct ProtocolWithdraw<'info> {
    #[account(
        constraint = owner.key() == treasury.owner @ NileError::NotAuthorized,
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// CHECK: PDA lamport vault; signs its own outgoing transfer.
    #[account(
        mut,
        seeds = [TREASURY_VAULT_SEED, treasury.key().as_ref()],
        bump = treasury.vault_bump,
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    /// CHECK: destination wallet, verified against `treasury.protocol_wallet`.
    #[account(mut, constraint = protocol_wallet.key() == treasury.protocol_wallet @ NileError::NotAuthorized)]
    pub protocol_wallet: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn protocol_withdraw(ctx: Context<ProtocolWithdraw>) -> Result<()> {
    ctx.accounts.treasury.acquire_lock()?;
    let amount = ctx.accounts.treasury.protocol_pending;
    require!(amount > 0, NileError::InsufficientBalance);

    let treasury_key = ctx.accounts.treasury.key();
    let vault_seeds: &[&[u8]] =
        &[TREASURY_VAULT_SEED, treasury_key.as_ref(), &[ctx.accounts.treasury.vault_bump]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.treasury_vault.to_account_info(),
                to: ctx.accounts.protocol_wallet.to_account_info(),
            },
            &[vault_seeds],
        ),
        amount,
    )?;

    let withdrawn = ctx.accounts.treasury.withdraw_protocol_pending();
    ctx.accounts.treasury.release_lock();

    emit!(ProtocolWithdrawEvent {
        wallet: ctx.accounts.protocol_wallet.key(),
        amount: withdrawn,
    });
    msg!("Protocol withdraw: {} lamports to {}", withdrawn, ctx.accounts.protocol_wallet.key());

    Ok(())
}

#[derive(Accounts)]
pub struct SetProtocolWallet<'info> {
    #[account(
        constraint = owner.key() == treasury.owner @ NileError::NotAuthorized,
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// CHECK: just stored as the new withdrawal destination.
    pub new_protocol_wallet: UncheckedAccount<'info>,
}

pub fn set_protocol_wallet(ctx: Context<SetProtocolWallet>) -> Result<()> {
    require!(ctx.accounts.new_protocol_wallet.key() != Pubkey::default(), NileError::ZeroAddress);
    let old = ctx.accounts.treasury.protocol_wallet;
    ctx.accounts.treasury.set_protocol_wallet(ctx.accounts.new_protocol_wallet.key());

    emit!(ProtocolWalletUpdated {
        old,
        new: ctx.accounts.new_protocol_wallet.key(),
    });
    msg!("Protocol wallet updated: {} -> {}", old, ctx.accounts.new_protocol_wallet.key());

    Ok(())
}

#[event]
pub struct FeesReceived {
    #[index]
    pub creator: Pubkey,
    pub creator_fee: u64,
    pub protocol_fee: u64,
    pub staker_fee: u64,
}

#[event]
pub struct CreatorWithdrawEvent {
    #[index]
    pub creator: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ProtocolWithdrawEvent {
    #[index]
    pub wallet: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ProtocolWalletUpdated {
    #[index]
    pub old: Pubkey,
    #[index]
    pub new: Pubkey,
}
