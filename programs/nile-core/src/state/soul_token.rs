//! NILE Core - Soul Token State
//!
//! The program-specific parts of a person's tokenized identity that the SPL
//! Token program has no notion of: which person it represents, who may mint
//! or burn it, and what lifecycle phase it is in.

use crate::errors::NileError;
use anchor_lang::prelude::*;

/// Lifecycle phase of a soul token.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Trading exclusively against the bonding curve.
    Bonding,
    /// Graduated to an external AMM market.
    Amm,
    /// Graduated further to an order-book market.
    OrderBook,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Bonding
    }
}

#[account]
#[derive(Default)]
pub struct SoulToken {
    /// The person this token represents.
    pub person_id: [u8; 16],

    /// Token name (max 32 chars, UTF-8, null-padded).
    pub name: [u8; 32],

    /// Token symbol (max 10 chars, UTF-8, null-padded).
    pub symbol: [u8; 10],

    /// The SPL mint backing this soul token.
    pub mint: Pubkey,

    /// Immutable factory reference; only the factory may rotate `minter` or `phase`.
    pub factory: Pubkey,

    /// The account currently authorized to request mint/burn (normally the Curve).
    /// `Pubkey::default()` disables minting entirely.
    pub minter: Pubkey,

    /// Current lifecycle phase.
    pub phase: Phase,

    /// `true` iff `phase` is `Amm` or `OrderBook`. Irreversible.
    pub graduated: bool,

    pub bump: u8,
}

impl SoulToken {
    pub const LEN: usize = 8 + // discriminator
        16 + // person_id
        32 + // name
        10 + // symbol
        32 + // mint
        32 + // factory
        32 + // minter
        1 +  // phase
        1 +  // graduated
        1; // bump

    /// Only the factory may call this. Disabling minting (zero pubkey) is
    /// allowed and used during controlled shutdowns.
    pub fn set_minter(&mut self, new_minter: Pubkey) {
        self.minter = new_minter;
    }

    /// Only the factory may call this. Moving to `Amm` is irreversible and
    /// flips `graduated`; once graduated, moving back to `Bonding` is rejected
    /// by the caller before this is invoked.
    pub fn set_phase(&mut self, new_phase: Phase) -> Result<()> {
        if self.graduated && new_phase == Phase::Bonding {
            return Err(NileError::AlreadyGraduated.into());
        }
        self.phase = new_phase;
        self.graduated = new_phase != Phase::Bonding;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_phase_to_amm_graduates_irreversibly() {
        let mut token = SoulToken::default();
        token.set_phase(Phase::Amm).unwrap();
        assert!(token.graduated);
        assert_eq!(token.phase, Phase::Amm);

        // Attempting to move back to Bonding after graduation is rejected.
        let result = token.set_phase(Phase::Bonding);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_minter_to_zero_disables_minting() {
        let mut token = SoulToken::default();
        token.set_minter(Pubkey::default());
        assert_eq!(token.minter, Pubkey::default());
    }

    #[test]
    fn test_graduated_iff_phase_in_amm_or_orderbook() {
        let mut token = SoulToken::default();
        assert!(!token.graduated);
        token.set_phase(Phase::OrderBook).unwrap();
        assert!(token.graduated);
    }
}
