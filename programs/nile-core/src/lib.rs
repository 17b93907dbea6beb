//! # NILE Core
//!
//! On-chain economic core for tokenized-reputation trading.
//!
//! ## Overview
//!
//! NILE Core lets anyone deploy a dedicated bonding-curve token ("soul
//! token") for a person_id, trade against that curve with SOL, and route
//! real-world impact events through a quorum-voting oracle that scores
//! reputation. Each soul token graduates off the curve once its reserve
//! crosses a configurable threshold, at which point minting authority
//! rotates to an external market maker.
//!
//! ## Key Features
//!
//! - **Bonding Curve**: Bancor-style constant reserve-ratio pricing
//! - **Direct Mint/Burn**: buys mint straight to the buyer, sells burn
//!   straight from the seller - no router-held transient balance
//! - **Fee Treasury**: protocol/creator/staker fee split with graceful
//!   degradation if the treasury forwarding CPI fails mid-trade
//! - **Oracle Consensus**: authorized agents submit and vote on impact
//!   reports; quorum is snapshotted per-report so later agent churn never
//!   retroactively changes what already finalized
//!
//! ## Program Flow
//!
//! 1. Owner calls `init_factory` and `init_treasury` once at deployment
//! 2. A creator calls `create_soul_token` for a person_id
//! 3. Traders `buy`/`sell` against the curve; `quote_buy`/`quote_sell`/`quote_price`
//!    preview without mutating state
//! 4. Once the curve's reserve crosses threshold, the owner calls `graduate_token`
//! 5. Oracle agents `submit_report` and `vote` to score real-world events
//!
//! ## Architecture
//!
//! ```text
//! programs/nile-core/src/
//! ├── lib.rs              # Program entry point
//! ├── seeds.rs            # All PDA seeds
//! ├── state/              # Account structures
//! │   ├── factory.rs      # Global registry
//! │   ├── token_pair.rs   # person_id -> token/curve lookup
//! │   ├── soul_token.rs   # Per-token metadata and phase
//! │   ├── curve.rs        # Bonding curve reserve state
//! │   ├── treasury.rs     # Fee treasury and per-creator ledgers
//! │   └── oracle.rs       # Oracle config, agents, reports, votes
//! ├── math/               # Calculations
//! │   └── bonding_curve.rs # Curve math and fee split
//! └── instructions/       # Program instructions
//!     ├── factory.rs       # init_factory, set_graduation_threshold, graduate_token
//!     ├── create_soul_token.rs
//!     ├── buy.rs / sell.rs
//!     ├── quote.rs         # read-only previews + post-graduation stub
//!     ├── treasury.rs      # init_treasury, withdrawals
//!     └── oracle.rs        # agent authorization, report submission/voting
//! ```

use anchor_lang::prelude::*;

pub mod seeds;
pub mod state;
pub mod math;
pub mod instructions;
pub mod errors;

use instructions::*;
use state::{EventType, HEADLINE_LEN};

declare_id!("Ni1eCoreEconomicEngine11111111111111111111");

#[program]
pub mod nile_core {
    use super::*;

    /// Initialize the global factory/registry.
    pub fn init_factory(ctx: Context<InitFactory>, default_graduation_threshold: u64) -> Result<()> {
        instructions::factory::init_factory(ctx, default_graduation_threshold)
    }

    /// Update the default graduation threshold applied to newly created curves.
    pub fn set_graduation_threshold(ctx: Context<SetGraduationThreshold>, new_threshold: u64) -> Result<()> {
        instructions::factory::set_graduation_threshold(ctx, new_threshold)
    }

    /// Graduate a soul token off the bonding curve, rotating mint authority.
    pub fn graduate_token(ctx: Context<GraduateToken>) -> Result<()> {
        instructions::factory::graduate_token(ctx)
    }

    /// Deploy a new soul token, its curve, and its registry entry.
    pub fn create_soul_token(ctx: Context<CreateSoulToken>, params: CreateSoulTokenParams) -> Result<()> {
        instructions::create_soul_token::create_soul_token(ctx, params)
    }

    /// Buy soul tokens from the bonding curve using lamports.
    pub fn buy(ctx: Context<Buy>, params: BuyParams) -> Result<()> {
        instructions::buy::buy(ctx, params)
    }

    /// Sell soul tokens back into the bonding curve for lamports.
    pub fn sell(ctx: Context<Sell>, params: SellParams) -> Result<()> {
        instructions::sell::sell(ctx, params)
    }

    /// Preview the tokens a buy of `coin_in` lamports would currently yield.
    pub fn quote_buy(ctx: Context<QuoteTrade>, coin_in: u64) -> Result<instructions::quote::QuotePreview> {
        instructions::quote::quote_buy(ctx, coin_in)
    }

    /// Preview the lamports a sell of `token_in` units would currently yield.
    pub fn quote_sell(ctx: Context<QuoteTrade>, token_in: u64) -> Result<instructions::quote::QuotePreview> {
        instructions::quote::quote_sell(ctx, token_in)
    }

    /// Current marginal price for a curve.
    pub fn quote_price(ctx: Context<QuoteTrade>) -> Result<u128> {
        instructions::quote::quote_price(ctx)
    }

    /// Permanent stub: graduated tokens have no external market to route to.
    pub fn route_graduated_trade(ctx: Context<RouteGraduatedTrade>) -> Result<()> {
        instructions::quote::route_graduated_trade(ctx)
    }

    /// Initialize the global fee treasury.
    pub fn init_treasury(ctx: Context<InitTreasury>) -> Result<()> {
        instructions::treasury::init_treasury(ctx)
    }

    /// Withdraw a creator's accumulated fee balance.
    pub fn creator_withdraw(ctx: Context<CreatorWithdraw>) -> Result<()> {
        instructions::treasury::creator_withdraw(ctx)
    }

    /// Withdraw the protocol's pending fee balance.
    pub fn protocol_withdraw(ctx: Context<ProtocolWithdraw>) -> Result<()> {
        instructions::treasury::protocol_withdraw(ctx)
    }

    /// Update the protocol fee withdrawal destination.
    pub fn set_protocol_wallet(ctx: Context<SetProtocolWallet>) -> Result<()> {
        instructions::treasury::set_protocol_wallet(ctx)
    }

    /// Initialize the global oracle configuration.
    pub fn init_oracle(ctx: Context<InitOracle>) -> Result<()> {
        instructions::oracle::init_oracle(ctx)
    }

    /// Authorize an account to submit and vote on impact reports.
    pub fn authorize_agent(ctx: Context<AuthorizeAgent>) -> Result<()> {
        instructions::oracle::authorize_agent(ctx)
    }

    /// Revoke an agent's authorization.
    pub fn revoke_agent(ctx: Context<RevokeAgent>) -> Result<()> {
        instructions::oracle::revoke_agent(ctx)
    }

    /// Submit a new impact report for a person_id.
    pub fn submit_report(
        ctx: Context<SubmitReport>,
        report_id: u64,
        person_id: [u8; 16],
        event_type: EventType,
        headline: [u8; HEADLINE_LEN],
        impact_score: i8,
    ) -> Result<()> {
        instructions::oracle::submit_report(ctx, report_id, person_id, event_type, headline, impact_score)
    }

    /// Cast a confirm/reject vote on a pending report.
    pub fn vote(ctx: Context<CastVote>, report_id: u64, approve: bool) -> Result<()> {
        instructions::oracle::cast_vote(ctx, report_id, approve)
    }
}
