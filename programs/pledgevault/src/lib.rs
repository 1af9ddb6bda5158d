pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
use instructions::*;

declare_id!("BDz31MWVhr9GHkXy7p2BL4Sp2tcEWqoss2zjNz5dhZKw");

/// Pledgevault Campaign Program
///
/// Time-boxed crowdfunding escrow: a creator opens a campaign with a fixed
/// lamport goal and a deadline, anyone donates while the campaign is
/// active, and the escrowed funds are released to the creator only once
/// the deadline has passed AND the goal is met.
///
/// Each campaign lives in a PDA derived from
/// `("campaign", creator, campaign_id)`, so records never collide and no
/// shared counter exists. All validation is re-asserted on chain; callers
/// are untrusted regardless of what a frontend checked.
///
/// # Security Considerations
///
/// Release is gated on the signer matching `campaign.creator`, on the
/// clock having reached the deadline, and on `amount_raised >=
/// goal_amount`, in that order, so a non-creator always sees
/// `Unauthorized`. A successful release zeroes `amount_raised`, which
/// makes the goal check fail any repeat attempt; one-shot behavior falls
/// out of the state itself rather than a separate flag.
#[program]
pub mod pledgevault {
    use super::*;

    /// Opens a new fundraising campaign.
    ///
    /// Fails if the goal is zero, the deadline is not in the future, the
    /// metadata URL exceeds the bound, or a campaign already exists for
    /// this `(creator, campaign_id)` pair.
    pub fn create_campaign(
        ctx: Context<CreateCampaign>,
        campaign_id: u64,
        goal_amount: u64,
        deadline: i64,
        metadata_url: String,
    ) -> Result<()> {
        create_campaign::handler(ctx, campaign_id, goal_amount, deadline, metadata_url)
    }

    /// Donates lamports to an active campaign.
    ///
    /// Open to any signer until the deadline. Overfunding past the goal is
    /// allowed; the running total is overflow-checked.
    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        donate::handler(ctx, amount)
    }

    /// Releases the escrowed funds to the campaign creator.
    ///
    /// Creator-only, and only once the deadline has passed with the goal
    /// reached. Pays out the full escrowed balance above the rent-exempt
    /// reserve and zeroes `amount_raised` atomically.
    pub fn release(ctx: Context<Release>) -> Result<()> {
        release::handler(ctx)
    }
}
