use anchor_lang::prelude::*;

use crate::error::CampaignError;

/// A single fundraising campaign, escrowing donated lamports until the
/// creator releases them.
///
/// The account address is a PDA of `(creator, campaign_id)`, so the pair is
/// immutable for the record's lifetime and two campaigns can never collide
/// or overwrite each other. The record is never closed; after a release it
/// remains on chain as an audit trail.
///
/// Only the aggregate `amount_raised` is tracked. There is no per-donor
/// ledger, which means a campaign that misses its goal has no refund path:
/// donated lamports stay custodied by the PDA. Known limitation.
#[account]
pub struct Campaign {
    /// Wallet that opened the campaign; the only identity allowed to release.
    pub creator: Pubkey,
    /// Caller-chosen id, unique per creator.
    pub campaign_id: u64,
    /// Lamports required before release is permitted. Always > 0.
    pub goal_amount: u64,
    /// Running total of donations. Reset to 0 by a successful release.
    pub amount_raised: u64,
    /// Unix timestamp. Donations close and release opens when the clock
    /// reaches it.
    pub deadline: i64,
    /// Opaque pointer to off-chain campaign content; length-checked only.
    pub metadata_url: String,
    /// Lamports paid out to the creator (0 until release).
    pub withdrawn_amount: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Campaign {
    pub const SEED_PREFIX: &'static [u8] = b"campaign";

    pub const MAX_METADATA_URL_LEN: usize = 256;

    /// Space needed for a Campaign account including discriminator.
    pub const SPACE: usize = 8  // discriminator
        + 32  // creator
        + 8   // campaign_id
        + 8   // goal_amount
        + 8   // amount_raised
        + 8   // deadline
        + 4 + Self::MAX_METADATA_URL_LEN  // metadata_url
        + 8   // withdrawn_amount
        + 1;  // bump

    /// Derives the campaign PDA for a `(creator, campaign_id)` pair.
    /// Clients must reproduce this derivation exactly to address a record.
    pub fn find_address(creator: &Pubkey, campaign_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::SEED_PREFIX,
                creator.as_ref(),
                &campaign_id.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    /// Validates the creation parameters against the current clock reading.
    pub fn validate_new(
        goal_amount: u64,
        deadline: i64,
        metadata_url: &str,
        now: i64,
    ) -> Result<()> {
        require!(goal_amount > 0, CampaignError::InvalidGoalAmount);
        require!(deadline > now, CampaignError::DeadlineInPast);
        require!(
            metadata_url.len() <= Self::MAX_METADATA_URL_LEN,
            CampaignError::MetadataUrlTooLong
        );
        Ok(())
    }

    /// A campaign stops accepting donations the moment the clock reaches
    /// its deadline.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.deadline
    }

    pub fn goal_reached(&self) -> bool {
        self.amount_raised >= self.goal_amount
    }

    /// Checks that a donation may be applied. Runs before the lamport
    /// transfer so a rejected donation leaves the ledger untouched.
    pub fn check_donation(&self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, CampaignError::InvalidAmount);
        require!(!self.is_expired(now), CampaignError::CampaignExpired);
        Ok(())
    }

    /// Accumulates a donation, rejecting on u64 overflow rather than
    /// wrapping. Returns the new total.
    pub fn record_donation(&mut self, amount: u64) -> Result<u64> {
        self.amount_raised = self
            .amount_raised
            .checked_add(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        Ok(self.amount_raised)
    }

    /// Checks the release preconditions in order: caller identity, then
    /// deadline, then goal. The ordering is observable: a non-creator is
    /// told `Unauthorized` even when the other conditions also fail.
    pub fn check_release(&self, caller: &Pubkey, now: i64) -> Result<()> {
        require_keys_eq!(*caller, self.creator, CampaignError::Unauthorized);
        require!(now >= self.deadline, CampaignError::CampaignStillActive);
        require!(self.goal_reached(), CampaignError::GoalNotReached);
        Ok(())
    }

    /// Applies the record half of a release: the raised total drops to 0 in
    /// the same transaction that moves the lamports. Because `goal_amount`
    /// is always > 0, the zeroed total makes a second release fail
    /// `GoalNotReached`. The one-shot property needs no separate flag.
    pub fn settle_release(&mut self, paid: u64) {
        self.amount_raised = 0;
        self.withdrawn_amount = paid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn campaign(creator: Pubkey, goal: u64, deadline: i64) -> Campaign {
        Campaign {
            creator,
            campaign_id: 7,
            goal_amount: goal,
            amount_raised: 0,
            deadline,
            metadata_url: "ipfs://bafy".to_string(),
            withdrawn_amount: 0,
            bump: 254,
        }
    }

    #[test]
    fn validate_new_accepts_sane_parameters() {
        assert!(Campaign::validate_new(1_000, 2_000, "https://example.org/c/7", 1_000).is_ok());
    }

    #[test]
    fn validate_new_rejects_zero_goal() {
        let res = Campaign::validate_new(0, 2_000, "x", 1_000);
        assert_eq!(res, Err(CampaignError::InvalidGoalAmount.into()));
    }

    #[test]
    fn validate_new_rejects_deadline_at_or_before_now() {
        let at_now = Campaign::validate_new(1, 1_000, "x", 1_000);
        assert_eq!(at_now, Err(CampaignError::DeadlineInPast.into()));

        let in_past = Campaign::validate_new(1, 999, "x", 1_000);
        assert_eq!(in_past, Err(CampaignError::DeadlineInPast.into()));
    }

    #[test]
    fn validate_new_bounds_metadata_url() {
        let at_limit = "u".repeat(Campaign::MAX_METADATA_URL_LEN);
        assert!(Campaign::validate_new(1, 2_000, &at_limit, 1_000).is_ok());

        let over = "u".repeat(Campaign::MAX_METADATA_URL_LEN + 1);
        let res = Campaign::validate_new(1, 2_000, &over, 1_000);
        assert_eq!(res, Err(CampaignError::MetadataUrlTooLong.into()));
    }

    #[test]
    fn donations_sum_regardless_of_order() {
        let mut a = campaign(pk(1), 1_000, 2_000);
        let mut b = campaign(pk(2), 1_000, 2_000);

        for amount in [300u64, 500, 150] {
            a.check_donation(amount, 1_500).unwrap();
            a.record_donation(amount).unwrap();
        }
        for amount in [150u64, 300, 500] {
            b.check_donation(amount, 1_500).unwrap();
            b.record_donation(amount).unwrap();
        }

        assert_eq!(a.amount_raised, 950);
        assert_eq!(b.amount_raised, 950);
    }

    #[test]
    fn donation_rejected_at_zero_amount() {
        let c = campaign(pk(3), 1_000, 2_000);
        assert_eq!(
            c.check_donation(0, 1_500),
            Err(CampaignError::InvalidAmount.into())
        );
    }

    #[test]
    fn donation_closes_exactly_at_deadline() {
        let c = campaign(pk(3), 1_000, 2_000);
        assert!(c.check_donation(10, 1_999).is_ok());
        assert_eq!(
            c.check_donation(10, 2_000),
            Err(CampaignError::CampaignExpired.into())
        );
        assert_eq!(
            c.check_donation(10, 3_000),
            Err(CampaignError::CampaignExpired.into())
        );
    }

    #[test]
    fn donation_overflow_is_rejected_not_wrapped() {
        let mut c = campaign(pk(4), 1_000, 2_000);
        c.amount_raised = u64::MAX - 5;

        let res = c.record_donation(10);
        assert_eq!(res, Err(CampaignError::ArithmeticOverflow.into()));
        // Rejection leaves the total untouched.
        assert_eq!(c.amount_raised, u64::MAX - 5);

        assert_eq!(c.record_donation(5).unwrap(), u64::MAX);
    }

    #[test]
    fn release_requires_the_creator_first() {
        let creator = pk(5);
        let stranger = pk(6);
        let mut c = campaign(creator, 1_000, 2_000);
        c.amount_raised = 5_000;

        // Even with goal met and deadline passed, a stranger gets Unauthorized.
        assert_eq!(
            c.check_release(&stranger, 3_000),
            Err(CampaignError::Unauthorized.into())
        );
        assert!(c.check_release(&creator, 3_000).is_ok());
    }

    #[test]
    fn release_blocked_until_deadline() {
        let creator = pk(7);
        let mut c = campaign(creator, 1_000, 2_000);
        c.amount_raised = 5_000;

        assert_eq!(
            c.check_release(&creator, 1_999),
            Err(CampaignError::CampaignStillActive.into())
        );
        // The deadline instant itself is releasable.
        assert!(c.check_release(&creator, 2_000).is_ok());
    }

    #[test]
    fn release_blocked_below_goal() {
        let creator = pk(7);
        let mut c = campaign(creator, 10_000_000_000, 2_000);
        c.amount_raised = 1_000_000_000;

        assert_eq!(
            c.check_release(&creator, 3_000),
            Err(CampaignError::GoalNotReached.into())
        );
    }

    #[test]
    fn release_is_one_shot_via_zeroed_total() {
        let creator = pk(7);
        let mut c = campaign(creator, 1_000_000_000, 2_000);
        c.amount_raised = 1_000_000_000;

        c.check_release(&creator, 3_000).unwrap();
        c.settle_release(1_000_000_000);

        assert_eq!(c.amount_raised, 0);
        assert_eq!(c.withdrawn_amount, 1_000_000_000);
        // Second attempt trips the goal check, no flag involved.
        assert_eq!(
            c.check_release(&creator, 3_000),
            Err(CampaignError::GoalNotReached.into())
        );
    }

    #[test]
    fn overfunded_campaign_releases() {
        let creator = pk(7);
        let mut c = campaign(creator, 1_000, 2_000);

        c.check_donation(900, 1_500).unwrap();
        c.record_donation(900).unwrap();
        assert!(!c.goal_reached());

        // Overfunding beyond the goal is allowed.
        c.check_donation(600, 1_500).unwrap();
        c.record_donation(600).unwrap();
        assert!(c.goal_reached());
        assert_eq!(c.amount_raised, 1_500);

        assert!(c.check_release(&creator, 2_000).is_ok());
    }

    #[test]
    fn full_lifecycle_goal_met() {
        let creator = pk(7);
        let now = 1_700_000_000;
        let deadline = now + 2;

        Campaign::validate_new(1_000_000_000, deadline, "ipfs://bafy", now).unwrap();
        let mut c = campaign(creator, 1_000_000_000, deadline);

        c.check_donation(1_000_000_000, now + 1).unwrap();
        c.record_donation(1_000_000_000).unwrap();

        c.check_release(&creator, now + 3).unwrap();
        c.settle_release(1_000_000_000);
        assert_eq!(c.amount_raised, 0);
    }

    #[test]
    fn address_derivation_is_deterministic_and_collision_free() {
        let creator_a = pk(8);
        let creator_b = pk(9);

        let (addr, bump) = Campaign::find_address(&creator_a, 42);
        let (again, bump_again) = Campaign::find_address(&creator_a, 42);
        assert_eq!(addr, again);
        assert_eq!(bump, bump_again);

        // Distinct pairs, distinct addresses.
        assert_ne!(addr, Campaign::find_address(&creator_a, 43).0);
        assert_ne!(addr, Campaign::find_address(&creator_b, 42).0);

        // Matches the raw seed derivation the on-chain constraints use.
        let (expected, _) = Pubkey::find_program_address(
            &[b"campaign", creator_a.as_ref(), &42u64.to_le_bytes()],
            &crate::ID,
        );
        assert_eq!(addr, expected);
    }

    #[test]
    fn space_constant_matches_layout() {
        assert_eq!(Campaign::SPACE, 8 + 32 + 8 + 8 + 8 + 8 + 4 + 256 + 8 + 1);
    }
}
