//! NILE Core - Oracle Consensus State
//!
//! Impact reports are confirmed or rejected by a rotating set of authorized
//! agents. Quorum is snapshotted onto the `Report` at submission time so that
//! later changes to `agent_count` never retroactively change what a report
//! needed to finalize.

use crate::errors::NileError;
use anchor_lang::prelude::*;

#[account]
#[derive(Default)]
pub struct OracleConfig {
    pub owner: Pubkey,
    pub agent_count: u32,
    pub report_count: u64,
    pub bump: u8,
}

impl OracleConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        4 +  // agent_count
        8 +  // report_count
        1; // bump

    pub fn init(&mut self, owner: Pubkey, bump: u8) {
        self.owner = owner;
        self.agent_count = 0;
        self.report_count = 0;
        self.bump = bump;
    }

    /// Returns `true` iff this call caused a `false -> true` transition
    /// (idempotent re-authorization does not double count).
    pub fn mark_authorized(&mut self, was_authorized: bool) -> bool {
        if !was_authorized {
            self.agent_count = self.agent_count.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Symmetric to `mark_authorized`: decrements only on `true -> false`.
    pub fn mark_revoked(&mut self, was_authorized: bool) -> bool {
        if was_authorized {
            self.agent_count = self.agent_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    pub fn next_report_id(&mut self) -> u64 {
        let id = self.report_count;
        self.report_count = self.report_count.saturating_add(1);
        id
    }

    /// `max(1, ceil(2 * agent_count / 3))`.
    pub fn required_quorum(&self) -> u32 {
        required_quorum(self.agent_count)
    }
}

pub fn required_quorum(agent_count: u32) -> u32 {
    let numerator = 2u64 * agent_count as u64;
    let quorum = (numerator + 2) / 3; // ceil(numerator / 3)
    quorum.max(1) as u32
}

#[account]
#[derive(Default)]
pub struct Agent {
    pub oracle: Pubkey,
    pub agent: Pubkey,
    pub authorized: bool,
    pub bump: u8,
}

impl Agent {
    pub const LEN: usize = 8 + // discriminator
        32 + // oracle
        32 + // agent
        1 +  // authorized
        1; // bump

    pub fn init(&mut self, oracle: Pubkey, agent: Pubkey, bump: u8) {
        self.oracle = oracle;
        self.agent = agent;
        self.authorized = true;
        self.bump = bump;
    }

    pub fn is_new(&self) -> bool {
        self.oracle == Pubkey::default()
    }

    pub fn authorize(&mut self) {
        self.authorized = true;
    }

    pub fn revoke(&mut self) {
        self.authorized = false;
    }
}

/// Coarse classification of the real-world signal a report carries; the
/// exact taxonomy is owned by the off-chain scoring pipeline, this core only
/// needs enough shape to route and index reports.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EventType {
    #[default]
    News,
    Result,
    SocialSignal,
    Other,
}

/// UTF-8 headline, null-padded to a fixed width since Anchor accounts favor
/// fixed-size fields over heap-allocated strings for predictable rent/space.
pub const HEADLINE_LEN: usize = 128;

#[account]
pub struct Report {
    pub report_id: u64,
    pub person_id: [u8; 16],
    pub event_type: EventType,
    pub headline: [u8; HEADLINE_LEN],
    pub impact_score: i8,
    pub confirmations: u32,
    pub rejections: u32,
    pub required_quorum: u32,
    pub agent_count_snapshot: u32,
    pub finalized: bool,
    pub accepted: bool,
    pub submitter: Pubkey,
    pub submitted_at: i64,
    pub bump: u8,
}

impl Report {
    pub const LEN: usize = 8 + // discriminator
        8 +  // report_id
        16 + // person_id
        1 +  // event_type
        HEADLINE_LEN +
        1 +  // impact_score
        4 +  // confirmations
        4 +  // rejections
        4 +  // required_quorum
        4 +  // agent_count_snapshot
        1 +  // finalized
        1 +  // accepted
        32 + // submitter
        8 +  // submitted_at
        1; // bump

    pub const MIN_IMPACT_SCORE: i8 = -100;
    pub const MAX_IMPACT_SCORE: i8 = 100;

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        report_id: u64,
        person_id: [u8; 16],
        event_type: EventType,
        headline: [u8; HEADLINE_LEN],
        impact_score: i8,
        submitter: Pubkey,
        agent_count: u32,
        submitted_at: i64,
        bump: u8,
    ) -> Result<()> {
        require!(
            (Self::MIN_IMPACT_SCORE..=Self::MAX_IMPACT_SCORE).contains(&impact_score),
            NileError::InvalidImpactScore
        );
        self.report_id = report_id;
        self.person_id = person_id;
        self.event_type = event_type;
        self.headline = headline;
        self.impact_score = impact_score;
        self.confirmations = 1; // the submitter is an automatic confirmation
        self.rejections = 0;
        self.required_quorum = required_quorum(agent_count);
        self.agent_count_snapshot = agent_count;
        self.submitter = submitter;
        self.submitted_at = submitted_at;
        self.bump = bump;

        // Covers `agent_count <= 1`: with at most one agent the submitter's
        // own confirmation already meets quorum.
        if self.required_quorum <= 1 {
            self.finalized = true;
            self.accepted = true;
        } else {
            self.finalized = false;
            self.accepted = false;
        }
        Ok(())
    }

    /// Records a vote and finalizes the report if quorum is reached, or if
    /// rejection has made acceptance mathematically unreachable. Returns
    /// `(finalized, accepted)` after this vote.
    pub fn cast_vote(&mut self, approve: bool) -> Result<(bool, bool)> {
        require!(!self.finalized, NileError::AlreadyFinalized);

        if approve {
            self.confirmations = self.confirmations.saturating_add(1);
        } else {
            self.rejections = self.rejections.saturating_add(1);
        }

        if self.confirmations >= self.required_quorum {
            self.finalized = true;
            self.accepted = true;
        } else if self.rejections > self.agent_count_snapshot.saturating_sub(self.required_quorum) {
            self.finalized = true;
            self.accepted = false;
        }

        Ok((self.finalized, self.accepted))
    }
}

#[account]
#[derive(Default)]
pub struct Vote {
    pub report: Pubkey,
    pub agent: Pubkey,
    pub voted: bool,
    pub bump: u8,
}

impl Vote {
    pub const LEN: usize = 8 + // discriminator
        32 + // report
        32 + // agent
        1 +  // voted
        1; // bump

    pub fn init(&mut self, report: Pubkey, agent: Pubkey, bump: u8) {
        self.report = report;
        self.agent = agent;
        self.voted = true;
        self.bump = bump;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_headline() -> [u8; HEADLINE_LEN] {
        [0u8; HEADLINE_LEN]
    }

    #[test]
    fn test_required_quorum_matches_ceil_two_thirds() {
        assert_eq!(required_quorum(0), 1);
        assert_eq!(required_quorum(1), 1);
        assert_eq!(required_quorum(2), 2);
        assert_eq!(required_quorum(3), 2);
        assert_eq!(required_quorum(4), 3);
        assert_eq!(required_quorum(9), 6);
    }

    #[test]
    fn test_oracle_config_agent_count_transitions_are_idempotent() {
        let mut config = OracleConfig::default();
        config.init(Pubkey::default(), 0);
        assert!(config.mark_authorized(false));
        assert_eq!(config.agent_count, 1);
        // Re-authorizing an already-authorized agent does not double count.
        assert!(!config.mark_authorized(true));
        assert_eq!(config.agent_count, 1);
        assert!(config.mark_revoked(true));
        assert_eq!(config.agent_count, 0);
        assert!(!config.mark_revoked(false));
        assert_eq!(config.agent_count, 0);
    }

    fn fresh_report(agent_count: u32, report_id: u64) -> Report {
        let mut report = Report {
            report_id: 0,
            person_id: [0u8; 16],
            event_type: EventType::News,
            headline: empty_headline(),
            impact_score: 0,
            confirmations: 0,
            rejections: 0,
            required_quorum: 0,
            agent_count_snapshot: 0,
            finalized: false,
            accepted: false,
            submitter: Pubkey::default(),
            submitted_at: 0,
            bump: 0,
        };
        report
            .init(
                report_id,
                [0u8; 16],
                EventType::News,
                empty_headline(),
                75,
                Pubkey::default(),
                agent_count,
                0,
                0,
            )
            .unwrap();
        report
    }

    #[test]
    fn test_quorum_le_one_finalizes_immediately_accepted() {
        let report = fresh_report(1, 0);
        assert!(report.finalized);
        assert!(report.accepted);
    }

    #[test]
    fn test_two_thirds_accept_matches_worked_example() {
        // Agents A, B, C; A submits (auto-confirm), B votes approve.
        let mut report = fresh_report(3, 0); // quorum = ceil(6/3) = 2
        assert!(!report.finalized);
        let (finalized, accepted) = report.cast_vote(true).unwrap();
        assert!(finalized);
        assert!(accepted);
        assert_eq!(report.impact_score, 75);
    }

    #[test]
    fn test_report_rejects_when_acceptance_unreachable() {
        // 3 agents, quorum 2, submitter auto-confirms (1). Two rejections
        // make confirmations reaching 2 impossible (only 3 agents total).
        let mut report = fresh_report(3, 0);
        report.cast_vote(false).unwrap();
        let (finalized, accepted) = report.cast_vote(false).unwrap();
        assert!(finalized);
        assert!(!accepted);
    }

    #[test]
    fn test_vote_after_finalized_errors() {
        let mut report = fresh_report(1, 0);
        assert!(report.finalized);
        assert!(report.cast_vote(true).is_err());
    }

    #[test]
    fn test_impact_score_out_of_range_rejected() {
        let mut report = Report {
            report_id: 0,
            person_id: [0u8; 16],
            event_type: EventType::News,
            headline: empty_headline(),
            impact_score: 0,
            confirmations: 0,
            rejections: 0,
            required_quorum: 0,
            agent_count_snapshot: 0,
            finalized: false,
            accepted: false,
            submitter: Pubkey::default(),
            submitted_at: 0,
            bump: 0,
        };
        let result = report.init(0, [0u8; 16], EventType::News, empty_headline(), 101, Pubkey::default(), 5, 0, 0);
        assert!(result.is_err());
    }
}
