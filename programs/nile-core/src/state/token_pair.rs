//! NILE Core - Token Pair Registry Entry
//!
//! Immutable-after-creation record tying a person to their token and curve.
//! On Solana this PDA *is* the uniqueness guarantee: it is seeded by
//! `person_id` and created with Anchor's `init`, which fails on an
//! already-allocated account — so "at most one `TokenPair` per `person_id`"
//! and `TokenAlreadyExists` both fall out of the account model for free.

use anchor_lang::prelude::*;

#[account]
#[derive(Default)]
pub struct TokenPair {
    pub person_id: [u8; 16],
    pub token: Pubkey,
    pub curve: Pubkey,
    pub creator: Pubkey,
    pub exists: bool,
    pub bump: u8,
}

impl TokenPair {
    pub const LEN: usize = 8 + // discriminator
        16 + // person_id
        32 + // token
        32 + // curve
        32 + // creator
        1 +  // exists
        1; // bump
}
