//! NILE Core - Error Taxonomy
//!
//! Every tag a caller can distinguish, in one place so instruction handlers
//! reference a single source of truth instead of scattering `#[error_code]`
//! enums per module.

use anchor_lang::prelude::*;

#[error_code]
pub enum NileError {
    #[msg("A token pair already exists for this person_id")]
    TokenAlreadyExists,

    #[msg("No token pair is registered for this person_id")]
    TokenNotFound,

    #[msg("Caller is not the current minter")]
    OnlyMinter,

    #[msg("Caller is not the factory")]
    OnlyFactory,

    #[msg("Curve is not active")]
    CurveNotActive,

    #[msg("Insufficient payment for this trade")]
    InsufficientPayment,

    #[msg("Insufficient tokens for this trade")]
    InsufficientTokens,

    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    #[msg("Native coin transfer failed")]
    TransferFailed,

    #[msg("Insufficient withdrawable balance")]
    InsufficientBalance,

    #[msg("Zero address is not a valid value here")]
    ZeroAddress,

    #[msg("Caller is not authorized")]
    NotAuthorized,

    #[msg("Agent has already voted on this report")]
    AlreadyVoted,

    #[msg("Report has already been finalized")]
    AlreadyFinalized,

    #[msg("Impact score must be in [-100, 100]")]
    InvalidImpactScore,

    #[msg("Token has not graduated; no external market to route to")]
    NotGraduated,

    #[msg("Token has already graduated")]
    AlreadyGraduated,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Invalid configuration parameter")]
    InvalidConfig,

    #[msg("Re-entrant call rejected")]
    ReentrancyGuard,
}
