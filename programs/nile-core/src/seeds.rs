//! NILE Core - All PDA Seeds
//!
//! Centralized seed definitions for every program-derived address, following
//! the same one-file-per-concern layout as the rest of the program.

use anchor_lang::prelude::*;

/// Global factory/registry seed.
pub const FACTORY_SEED: &[u8] = b"factory";

/// Token pair registry entry - [TOKEN_PAIR_SEED, person_id]
pub const TOKEN_PAIR_SEED: &[u8] = b"token_pair";

/// SoulToken metadata account - [SOUL_TOKEN_SEED, mint]
pub const SOUL_TOKEN_SEED: &[u8] = b"soul_token";

/// SPL mint-authority PDA for a soul token - [MINT_AUTHORITY_SEED, soul_token]
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";

/// Curve state account - [CURVE_SEED, mint]
pub const CURVE_SEED: &[u8] = b"curve";

/// Curve's lamport reserve vault - [CURVE_VAULT_SEED, curve]
pub const CURVE_VAULT_SEED: &[u8] = b"curve_vault";

/// Global treasury account.
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Treasury's lamport vault - [TREASURY_VAULT_SEED, treasury]
pub const TREASURY_VAULT_SEED: &[u8] = b"treasury_vault";

/// Per-creator withdrawable balance - [CREATOR_LEDGER_SEED, treasury, creator]
pub const CREATOR_LEDGER_SEED: &[u8] = b"creator_ledger";

/// Global oracle configuration.
pub const ORACLE_SEED: &[u8] = b"oracle";

/// Per-agent authorization record - [AGENT_SEED, oracle, agent]
pub const AGENT_SEED: &[u8] = b"agent";

/// Per-report state - [REPORT_SEED, oracle, report_id]
pub const REPORT_SEED: &[u8] = b"report";

/// Per-(report, agent) vote marker - [VOTE_SEED, report, agent]
pub const VOTE_SEED: &[u8] = b"vote";

/// Derive the global factory PDA.
pub fn derive_factory(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FACTORY_SEED], program_id)
}

/// Derive a token pair PDA from a person_id.
pub fn derive_token_pair(person_id: &[u8; 16], program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_PAIR_SEED, person_id.as_ref()], program_id)
}

/// Derive the SoulToken PDA from its mint.
pub fn derive_soul_token(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SOUL_TOKEN_SEED, mint.as_ref()], program_id)
}

/// Derive the mint-authority PDA for a SoulToken.
pub fn derive_mint_authority(soul_token: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT_AUTHORITY_SEED, soul_token.as_ref()], program_id)
}

/// Derive the Curve PDA from its mint.
pub fn derive_curve(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CURVE_SEED, mint.as_ref()], program_id)
}

/// Derive a curve's lamport vault.
pub fn derive_curve_vault(curve: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CURVE_VAULT_SEED, curve.as_ref()], program_id)
}

/// Derive the global treasury PDA.
pub fn derive_treasury(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY_SEED], program_id)
}

/// Derive the treasury's lamport vault.
pub fn derive_treasury_vault(treasury: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY_VAULT_SEED, treasury.as_ref()], program_id)
}

/// Derive a creator's withdrawable-balance ledger.
pub fn derive_creator_ledger(
    treasury: &Pubkey,
    creator: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CREATOR_LEDGER_SEED, treasury.as_ref(), creator.as_ref()],
        program_id,
    )
}

/// Derive the global oracle PDA.
pub fn derive_oracle(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ORACLE_SEED], program_id)
}

/// Derive an agent authorization record.
pub fn derive_agent(oracle: &Pubkey, agent: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AGENT_SEED, oracle.as_ref(), agent.as_ref()], program_id)
}

/// Derive a report account from its id.
pub fn derive_report(oracle: &Pubkey, report_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[REPORT_SEED, oracle.as_ref(), &report_id.to_le_bytes()],
        program_id,
    )
}

/// Derive a (report, agent) vote marker.
pub fn derive_vote(report: &Pubkey, agent: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VOTE_SEED, report.as_ref(), agent.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_seeds_give_distinct_pdas() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (curve, _) = derive_curve(&mint, &program_id);
        let (soul_token, _) = derive_soul_token(&mint, &program_id);
        assert_ne!(curve, soul_token);
    }

    #[test]
    fn test_person_id_roundtrip_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let person_id = [7u8; 16];
        let (a, bump_a) = derive_token_pair(&person_id, &program_id);
        let (b, bump_b) = derive_token_pair(&person_id, &program_id);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }
}
