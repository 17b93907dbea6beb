//! NILE Core - Factory / Global Registry
//!
//! One global PDA owning the deployment registry and the default graduation
//! threshold applied to newly created curves. `deployed_person_ids` grows via
//! Anchor account `realloc` as tokens are created, capped at
//! `MAX_DEPLOYED_TOKENS` — see DESIGN.md for the rationale.

use anchor_lang::prelude::*;

/// Hard ceiling on the registry's person-id list; an explicit, documented
/// trade-off rather than an unbounded on-chain `Vec`.
pub const MAX_DEPLOYED_TOKENS: usize = 20_000;

#[account]
pub struct Factory {
    pub owner: Pubkey,
    pub default_graduation_threshold: u64,
    pub total_tokens: u64,
    pub deployed_person_ids: Vec<[u8; 16]>,
    pub bump: u8,
}

impl Factory {
    /// Base size with an empty registry (discriminator + fields + empty Vec len prefix).
    pub const BASE_LEN: usize = 8 + // discriminator
        32 + // owner
        8 +  // default_graduation_threshold
        8 +  // total_tokens
        4 +  // Vec length prefix
        1; // bump

    pub const ENTRY_LEN: usize = 16; // one [u8; 16] person_id

    /// Required account space to hold `count` registered person ids.
    pub fn space_for(count: usize) -> usize {
        Self::BASE_LEN + count * Self::ENTRY_LEN
    }

    pub fn init(&mut self, owner: Pubkey, default_graduation_threshold: u64, bump: u8) {
        self.owner = owner;
        self.default_graduation_threshold = default_graduation_threshold;
        self.total_tokens = 0;
        self.deployed_person_ids = Vec::new();
        self.bump = bump;
    }

    pub fn register(&mut self, person_id: [u8; 16]) {
        self.deployed_person_ids.push(person_id);
        self.total_tokens = self.total_tokens.saturating_add(1);
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_increments_count_and_appends() {
        let mut factory = Factory {
            owner: Pubkey::default(),
            default_graduation_threshold: 0,
            total_tokens: 0,
            deployed_person_ids: Vec::new(),
            bump: 0,
        };
        factory.init(Pubkey::default(), 1_000, 0);
        factory.register([1u8; 16]);
        factory.register([2u8; 16]);
        assert_eq!(factory.total_tokens(), 2);
        assert_eq!(factory.deployed_person_ids, vec![[1u8; 16], [2u8; 16]]);
    }

    #[test]
    fn test_space_for_grows_linearly() {
        assert_eq!(Factory::space_for(0), Factory::BASE_LEN);
        assert_eq!(Factory::space_for(10), Factory::BASE_LEN + 10 * Factory::ENTRY_LEN);
    }
}
