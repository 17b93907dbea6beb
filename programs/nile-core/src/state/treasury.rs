//! NILE Core - Treasury / Fee Ledger
//!
//! Protocol-wide fee accounting plus per-creator withdrawal ledgers.
//! `protocol_pending` is the withdrawable balance (zeroed by a withdraw);
//! `protocol_cumulative` is monotonic and never reset — the split resolves
//! the ambiguity in treating a single "total fees" counter as both at once.

use crate::errors::NileError;
use anchor_lang::prelude::*;

#[account]
#[derive(Default)]
pub struct Treasury {
    pub owner: Pubkey,
    pub protocol_wallet: Pubkey,

    /// Lifetime creator fees routed through this treasury (monotonic).
    pub total_creator_fees: u64,

    /// Withdrawable protocol fee balance; zeroed by `protocol_withdraw`.
    pub protocol_pending: u64,

    /// Lifetime protocol fees ever received; never decreases.
    pub protocol_cumulative: u64,

    /// Pool reserved for staker distribution (paid out off this program's
    /// critical path; accumulation only here).
    pub staker_pool: u64,

    pub locked: bool,
    pub bump: u8,
    pub vault_bump: u8,
}

impl Treasury {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        32 + // protocol_wallet
        8 +  // total_creator_fees
        8 +  // protocol_pending
        8 +  // protocol_cumulative
        8 +  // staker_pool
        1 +  // locked
        1 +  // bump
        1; // vault_bump

    pub fn init(&mut self, owner: Pubkey, protocol_wallet: Pubkey, bump: u8, vault_bump: u8) {
        self.owner = owner;
        self.protocol_wallet = protocol_wallet;
        self.total_creator_fees = 0;
        self.protocol_pending = 0;
        self.protocol_cumulative = 0;
        self.staker_pool = 0;
        self.locked = false;
        self.bump = bump;
        self.vault_bump = vault_bump;
    }

    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, NileError::ReentrancyGuard);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    pub fn receive_protocol_fee(&mut self, amount: u64) {
        self.protocol_pending = self.protocol_pending.saturating_add(amount);
        self.protocol_cumulative = self.protocol_cumulative.saturating_add(amount);
    }

    pub fn receive_staker_fee(&mut self, amount: u64) {
        self.staker_pool = self.staker_pool.saturating_add(amount);
    }

    pub fn note_creator_fee(&mut self, amount: u64) {
        self.total_creator_fees = self.total_creator_fees.saturating_add(amount);
    }

    /// Drains the withdrawable protocol balance, returning the amount withdrawn.
    pub fn withdraw_protocol_pending(&mut self) -> u64 {
        let amount = self.protocol_pending;
        self.protocol_pending = 0;
        amount
    }

    pub fn set_protocol_wallet(&mut self, new_wallet: Pubkey) {
        self.protocol_wallet = new_wallet;
    }
}

#[account]
#[derive(Default)]
pub struct CreatorLedger {
    pub treasury: Pubkey,
    pub creator: Pubkey,
    pub balance: u64,
    pub locked: bool,
    pub bump: u8,
}

impl CreatorLedger {
    pub const LEN: usize = 8 + // discriminator
        32 + // treasury
        32 + // creator
        8 +  // balance
        1 +  // locked
        1; // bump

    pub fn init(&mut self, treasury: Pubkey, creator: Pubkey, bump: u8) {
        self.treasury = treasury;
        self.creator = creator;
        self.balance = 0;
        self.locked = false;
        self.bump = bump;
    }

    /// `true` for an `init_if_needed` account on its first write (fields are
    /// still zeroed).
    pub fn is_new(&self) -> bool {
        self.treasury == Pubkey::default() && self.creator == Pubkey::default()
    }

    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, NileError::ReentrancyGuard);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Drains the creator's balance, returning the amount withdrawn.
    pub fn withdraw(&mut self) -> u64 {
        let amount = self.balance;
        self.balance = 0;
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_pending_zeroed_on_withdraw_cumulative_survives() {
        let mut treasury = Treasury::default();
        treasury.init(Pubkey::default(), Pubkey::default(), 0, 0);
        treasury.receive_protocol_fee(100);
        treasury.receive_protocol_fee(50);
        assert_eq!(treasury.protocol_pending, 150);
        assert_eq!(treasury.protocol_cumulative, 150);

        let withdrawn = treasury.withdraw_protocol_pending();
        assert_eq!(withdrawn, 150);
        assert_eq!(treasury.protocol_pending, 0);
        assert_eq!(treasury.protocol_cumulative, 150);

        treasury.receive_protocol_fee(10);
        assert_eq!(treasury.protocol_pending, 10);
        assert_eq!(treasury.protocol_cumulative, 160);
    }

    #[test]
    fn test_creator_ledger_credit_and_withdraw() {
        let mut ledger = CreatorLedger::default();
        ledger.init(Pubkey::default(), Pubkey::default(), 0);
        ledger.credit(40);
        ledger.credit(10);
        assert_eq!(ledger.balance, 50);
        assert_eq!(ledger.withdraw(), 50);
        assert_eq!(ledger.balance, 0);
    }

    #[test]
    fn test_creator_ledger_is_new_before_init_only() {
        let ledger = CreatorLedger::default();
        assert!(ledger.is_new());
        let mut ledger = ledger;
        ledger.init(Pubkey::new_unique(), Pubkey::new_unique(), 0);
        assert!(!ledger.is_new());
    }

    #[test]
    fn test_treasury_reentrancy_guard() {
        let mut treasury = Treasury::default();
        treasury.init(Pubkey::default(), Pubkey::default(), 0, 0);
        treasury.acquire_lock().unwrap();
        assert!(treasury.acquire_lock().is_err());
        treasury.release_lock();
        assert!(treasury.acquire_lock().is_ok());
    }
}
