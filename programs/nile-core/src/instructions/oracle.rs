//! NILE Core - Oracle Instructions
//!
//! Agent authorization and report submission/voting. Quorum math lives on
//! `Report`/`OracleConfig` (src/state/oracle.rs); this layer is only account
//! wiring and event emission, the same split as Factory/Curve.

use crate::errors::NileError;
use crate::seeds::*;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitOracle<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = OracleConfig::LEN,
        seeds = [ORACLE_SEED],
        bump,
    )]
    pub oracle: Box<Account<'info, OracleConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn init_oracle(ctx: Context<InitOracle>) -> Result<()> {
    ctx.accounts.oracle.init(ctx.accounts.owner.key(), ctx.bumps.oracle);
    msg!("Oracle initialized, owner: {}", ctx.accounts.owner.key());
    Ok(())
}

#[derive(Accounts)]
pub struct AuthorizeAgent<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ORACLE_SEED],
        bump = oracle.bump,
        constraint = owner.key() == oracle.owner @ NileError::NotAuthorized,
    )]
    pub oracle: Box<Account<'info, OracleConfig>>,

    /// CHECK: the account being granted agent authorization.
    pub agent_account: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Agent::LEN,
        seeds = [AGENT_SEED, oracle.key().as_ref(), agent_account.key().as_ref()],
        bump,
    )]
    pub agent: Box<Account<'info, Agent>>,

    pub system_program: Program<'info, System>,
}

pub fn authorize_agent(ctx: Context<AuthorizeAgent>) -> Result<()> {
    let was_authorized = ctx.accounts.agent.authorized;
    if ctx.accounts.agent.is_new() {
        ctx.accounts.agent.init(ctx.accounts.oracle.key(), ctx.accounts.agent_account.key(), ctx.bumps.agent);
    } else {
        ctx.accounts.agent.authorize();
    }
    ctx.accounts.oracle.mark_authorized(was_authorized);

    emit!(AgentAuthorized { agent: ctx.accounts.agent_account.key() });
    msg!("Agent authorized: {}", ctx.accounts.agent_account.key());
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeAgent<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ORACLE_SEED],
        bump = oracle.bump,
        constraint = owner.key() == oracle.owner @ NileError::NotAuthorized,
    )]
    pub oracle: Box<Account<'info, OracleConfig>>,

    /// CHECK: the account losing agent authorization.
    pub agent_account: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [AGENT_SEED, oracle.key().as_ref(), agent_account.key().as_ref()],
        bump = agent.bump,
    )]
    pub agent: Box<Account<'info, Agent>>,
}

pub fn revoke_agent(ctx: Context<RevokeAgent>) -> Result<()> {
    let was_authorized = ctx.accounts.agent.authorized;
    ctx.accounts.agent.revoke();
    ctx.accounts.oracle.mark_revoked(was_authorized);

    emit!(AgentRevoked { agent: ctx.accounts.agent_account.key() });
    msg!("Agent revoked: {}", ctx.accounts.agent_account.key());
    Ok(())
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct SubmitReport<'info> {
    #[account(mut)]
    pub submitter: Signer<'info>,

    #[account(
        mut,
        seeds = [ORACLE_SEED],
        bump = oracle.bump,
        constraint = report_id == oracle.report_count @ NileError::InvalidConfig,
    )]
    pub oracle: Box<Account<'info, OracleConfig>>,

    #[account(
        seeds = [AGENT_SEED, oracle.key().as_ref(), submitter.key().as_ref()],
        bump = agent.bump,
        constraint = agent.authorized @ NileError::NotAuthorized,
    )]
    pub agent: Box<Account<'info, Agent>>,

    #[account(
        init,
        payer = submitter,
        space = Report::LEN,
        seeds = [REPORT_SEED, oracle.key().as_ref(), &report_id.to_le_bytes()],
        bump,
    )]
    pub report: Box<Account<'info, Report>>,

    /// The submitter's automatic confirmation (prevents them voting again).
    #[account(
        init,
        payer = submitter,
        space = Vote::LEN,
        seeds = [VOTE_SEED, report.key().as_ref(), submitter.key().as_ref()],
        bump,
    )]
    pub submitter_vote: Box<Account<'info, Vote>>,

    pub system_program: Program<'info, System>,
}

pub fn submit_report(
    ctx: Context<SubmitReport>,
    report_id: u64,
    person_id: [u8; 16],
    event_type: EventType,
    headline: [u8; HEADLINE_LEN],
    impact_score: i8,
) -> Result<()> {
    let clock = Clock::get()?;
    let allocated_id = ctx.accounts.oracle.next_report_id();
    let agent_count = ctx.accounts.oracle.agent_count;

    ctx.accounts.report.init(
        allocated_id,
        person_id,
        event_type,
        headline,
        impact_score,
        ctx.accounts.submitter.key(),
        agent_count,
        clock.unix_timestamp,
        ctx.bumps.report,
    )?;

    ctx.accounts.submitter_vote.init(
        ctx.accounts.report.key(),
        ctx.accounts.submitter.key(),
        ctx.bumps.submitter_vote,
    );

    emit!(ReportSubmitted {
        report_id: allocated_id,
        person_id,
        submitter: ctx.accounts.submitter.key(),
    });
    msg!("Report {} submitted for person_id {:?}, impact {}", allocated_id, person_id, impact_score);

    if ctx.accounts.report.finalized {
        emit!(ReportFinalized {
            report_id: allocated_id,
            accepted: ctx.accounts.report.accepted,
            impact_score,
        });
        msg!("Report {} finalized immediately (quorum <= 1)", allocated_id);
    }

    Ok(())
}

#[derive(Accounts)]
#[instruction(report_id: u64, approve: bool)]
pub struct CastVote<'info> {
    #[account(mut)]
    pub agent_signer: Signer<'info>,

    #[account(
        seeds = [ORACLE_SEED],
        bump = oracle.bump,
    )]
    pub oracle: Box<Account<'info, OracleConfig>>,

    #[account(
        seeds = [AGENT_SEED, oracle.key().as_ref(), agent_signer.key().as_ref()],
        bump = agent.bump,
        constraint = agent.authorized @ NileError::NotAuthorized,
    )]
    pub agent: Box<Account<'info, Agent>>,

    #[account(
        mut,
        seeds = [REPORT_SEED, oracle.key().as_ref(), &report_id.to_le_bytes()],
        bump = report.bump,
    )]
    pub report: Box<Account<'info, Report>>,

    #[account(
        init_if_needed,
        payer = agent_signer,
        space = Vote::LEN,
        seeds = [VOTE_SEED, report.key().as_ref(), agent_signer.key().as_ref()],
        bump,
    )]
    pub vote: Box<Account<'info, Vote>>,

    pub system_program: Program<'info, System>,
}

pub fn cast_vote(ctx: Context<CastVote>, report_id: u64, approve: bool) -> Result<()> {
    require!(!ctx.accounts.vote.voted, NileError::AlreadyVoted);

    let (finalized, accepted) = ctx.accounts.report.cast_vote(approve)?;
    ctx.accounts.vote.init(ctx.accounts.report.key(), ctx.accounts.agent_signer.key(), ctx.bumps.vote);

    emit!(VoteCast {
        report_id,
        agent: ctx.accounts.agent_signer.key(),
        approve,
    });
    msg!("Vote cast on report {}: approve={}", report_id, approve);

    if finalized {
        emit!(ReportFinalized {
            report_id,
            accepted,
            impact_score: ctx.accounts.report.impact_score,
        });
        msg!("Report {} finalized: accepted={}", report_id, accepted);
    }

    Ok(())
}

#[event]
pub struct AgentAuthorized {
    #[index]
    pub agent: Pubkey,
}

#[event]
pub struct AgentRevoked {
    #[index]
    pub agent: Pubkey,
}

#[event]
pub struct ReportSubmitted {
    #[index]
    pub report_id: u64,
    #[index]
    pub person_id: [u8; 16],
    pub submitter: Pubkey,
}

#[event]
pub struct VoteCast {
    #[index]
    pub report_id: u64,
    #[index]
    pub agent: Pubkey,
    pub approve: bool,
}

#[event]
pub struct ReportFinalized {
    #[index]
    pub report_id: u64,
    pub accepted: bool,
    pub impact_score: i8,
}
