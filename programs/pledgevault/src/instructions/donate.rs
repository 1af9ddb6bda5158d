use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::events::CampaignDonated;
use crate::state::Campaign;

#[derive(Accounts)]
pub struct Donate<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

    #[account(
        mut,
        seeds = [
            Campaign::SEED_PREFIX,
            campaign.creator.as_ref(),
            &campaign.campaign_id.to_le_bytes(),
        ],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Donate>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    // Guards run before the transfer, so a rejected donation never debits
    // the donor.
    ctx.accounts.campaign.check_donation(amount, now)?;

    // Credit the campaign PDA. Donations beyond the goal are allowed.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.donor.to_account_info(),
                to: ctx.accounts.campaign.to_account_info(),
            },
        ),
        amount,
    )?;

    let campaign = &mut ctx.accounts.campaign;
    let amount_raised = campaign.record_donation(amount)?;

    msg!(
        "Donation of {} lamports for campaign {} (total: {}/{})",
        amount,
        campaign.campaign_id,
        amount_raised,
        campaign.goal_amount
    );

    emit!(CampaignDonated {
        campaign: campaign.key(),
        campaign_id: campaign.campaign_id,
        donor: ctx.accounts.donor.key(),
        amount,
        amount_raised,
        timestamp: now,
    });

    Ok(())
}
