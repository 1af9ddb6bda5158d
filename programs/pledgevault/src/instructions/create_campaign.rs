use anchor_lang::prelude::*;

use crate::events::CampaignCreated;
use crate::state::Campaign;

#[derive(Accounts)]
#[instruction(campaign_id: u64)]
pub struct CreateCampaign<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The campaign PDA. `init` refuses to overwrite an occupied address,
    /// so opening the same (creator, campaign_id) twice fails at the
    /// account layer before the handler runs.
    #[account(
        init,
        payer = creator,
        space = Campaign::SPACE,
        seeds = [Campaign::SEED_PREFIX, creator.key().as_ref(), &campaign_id.to_le_bytes()],
        bump,
    )]
    pub campaign: Account<'info, Campaign>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateCampaign>,
    campaign_id: u64,
    goal_amount: u64,
    deadline: i64,
    metadata_url: String,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    Campaign::validate_new(goal_amount, deadline, &metadata_url, now)?;

    let campaign = &mut ctx.accounts.campaign;
    campaign.creator = ctx.accounts.creator.key();
    campaign.campaign_id = campaign_id;
    campaign.goal_amount = goal_amount;
    campaign.amount_raised = 0;
    campaign.deadline = deadline;
    campaign.metadata_url = metadata_url.clone();
    campaign.withdrawn_amount = 0;
    campaign.bump = ctx.bumps.campaign;

    msg!(
        "Campaign {} created by {} (goal: {}, deadline: {})",
        campaign_id,
        campaign.creator,
        goal_amount,
        deadline
    );

    emit!(CampaignCreated {
        campaign: campaign.key(),
        campaign_id,
        creator: campaign.creator,
        goal_amount,
        deadline,
        metadata_url,
        timestamp: now,
    });

    Ok(())
}
