//! NILE Core - Bonding Curve State
//!
//! Per-person reserve accounting. `active` is a one-way latch: once a buy
//! pushes `reserve_balance` past `graduation_threshold`, the curve is retired
//! forever and all further `buy`/`sell` calls fail `CurveNotActive`.

use crate::errors::NileError;
use crate::math::bonding_curve::INITIAL_RESERVE;
use anchor_lang::prelude::*;

#[account]
pub struct Curve {
    pub person_id: [u8; 16],
    pub token: Pubkey,
    pub mint: Pubkey,
    pub treasury: Pubkey,
    pub creator: Pubkey,

    /// Includes the non-zero virtual `INITIAL_RESERVE` seeded at construction.
    pub reserve_balance: u64,
    pub graduation_threshold: u64,
    pub active: bool,

    /// Re-entrancy guard for `buy`/`sell`.
    pub locked: bool,

    pub bump: u8,
    pub vault_bump: u8,
}

impl Curve {
    pub const LEN: usize = 8 + // discriminator
        16 + // person_id
        32 + // token
        32 + // mint
        32 + // treasury
        32 + // creator
        8 +  // reserve_balance
        8 +  // graduation_threshold
        1 +  // active
        1 +  // locked
        1 +  // bump
        1; // vault_bump

    pub fn init(
        &mut self,
        person_id: [u8; 16],
        token: Pubkey,
        mint: Pubkey,
        treasury: Pubkey,
        creator: Pubkey,
        graduation_threshold: u64,
        bump: u8,
        vault_bump: u8,
    ) {
        self.person_id = person_id;
        self.token = token;
        self.mint = mint;
        self.treasury = treasury;
        self.creator = creator;
        self.reserve_balance = INITIAL_RESERVE;
        self.graduation_threshold = graduation_threshold;
        self.active = true;
        self.locked = false;
        self.bump = bump;
        self.vault_bump = vault_bump;
    }

    /// Enters the re-entrancy-guarded region; fails if already locked.
    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, NileError::ReentrancyGuard);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    /// Credits `v_net` (post-fee lamports) to the reserve and checks the
    /// graduation trigger. Returns `true` if this call just graduated the curve.
    pub fn apply_buy(&mut self, v_net: u64) -> bool {
        self.reserve_balance = self.reserve_balance.saturating_add(v_net);
        if self.active && self.reserve_balance >= self.graduation_threshold {
            self.active = false;
            return true;
        }
        false
    }

    pub fn apply_sell(&mut self, gross: u64) {
        self.reserve_balance = self.reserve_balance.saturating_sub(gross);
    }

    /// Fee retained in the curve because the treasury forwarding call failed —
    /// graceful degradation, not an error path.
    pub fn retain_fee(&mut self, fee: u64) {
        self.reserve_balance = self.reserve_balance.saturating_add(fee);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_curve(threshold: u64) -> Curve {
        let mut curve = Curve {
            person_id: [0u8; 16],
            token: Pubkey::default(),
            mint: Pubkey::default(),
            treasury: Pubkey::default(),
            creator: Pubkey::default(),
            reserve_balance: 0,
            graduation_threshold: threshold,
            active: false,
            locked: false,
            bump: 0,
            vault_bump: 0,
        };
        curve.init(
            [0u8; 16],
            Pubkey::default(),
            Pubkey::default(),
            Pubkey::default(),
            Pubkey::default(),
            threshold,
            0,
            0,
        );
        curve
    }

    #[test]
    fn test_init_seeds_virtual_reserve() {
        let curve = fresh_curve(1_000);
        assert_eq!(curve.reserve_balance, INITIAL_RESERVE);
        assert!(curve.active);
    }

    #[test]
    fn test_graduation_is_one_way() {
        let mut curve = fresh_curve(100);
        let graduated = curve.apply_buy(200);
        assert!(graduated);
        assert!(!curve.active);

        // Even a subsequent (hypothetical) call never re-enables it.
        curve.active = false;
        assert!(!curve.active);
    }

    #[test]
    fn test_reentrancy_guard_rejects_double_acquire() {
        let mut curve = fresh_curve(1_000);
        curve.acquire_lock().unwrap();
        assert!(curve.acquire_lock().is_err());
        curve.release_lock();
        assert!(curve.acquire_lock().is_ok());
    }

    #[test]
    fn test_retained_fee_increases_reserve_without_graduating_if_below_threshold() {
        let mut curve = fresh_curve(1_000_000);
        let before = curve.reserve_balance;
        curve.retain_fee(5);
        assert_eq!(curve.reserve_balance, before + 5);
        assert!(curve.active);
    }
}
