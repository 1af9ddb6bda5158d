use anchor_lang::prelude::*;

use crate::error::CampaignError;
use crate::events::CampaignWithdrawn;
use crate::state::Campaign;

#[derive(Accounts)]
pub struct Release<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

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
}

/// Pays the campaign's full escrowed balance to its creator.
///
/// The PDA keeps its rent-exempt floor; that reserve is the storage
/// deposit charged at creation, never donor money. Everything above it,
/// including overfunding past the goal, is released in one shot. The
/// lamport moves and the `amount_raised` reset commit in the same
/// transaction; neither can be observed without the other.
pub fn handler(ctx: Context<Release>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .campaign
        .check_release(&ctx.accounts.creator.key(), now)?;

    let campaign_info = ctx.accounts.campaign.to_account_info();
    let creator_info = ctx.accounts.creator.to_account_info();

    let rent_floor = Rent::get()?.minimum_balance(Campaign::SPACE);
    let payout = campaign_info
        .lamports()
        .checked_sub(rent_floor)
        .ok_or(CampaignError::InsufficientFunds)?;
    require!(payout > 0, CampaignError::InsufficientFunds);

    let creator_lamports = creator_info.lamports();
    **campaign_info.try_borrow_mut_lamports()? = rent_floor;
    **creator_info.try_borrow_mut_lamports()? = creator_lamports
        .checked_add(payout)
        .ok_or(CampaignError::ArithmeticOverflow)?;

    let campaign = &mut ctx.accounts.campaign;
    campaign.settle_release(payout);

    msg!(
        "Released {} lamports to creator {} (goal: {})",
        payout,
        campaign.creator,
        campaign.goal_amount
    );

    emit!(CampaignWithdrawn {
        campaign: campaign.key(),
        campaign_id: campaign.campaign_id,
        creator: campaign.creator,
        amount: payout,
        timestamp: now,
    });

    Ok(())
}
