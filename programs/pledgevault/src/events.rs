//! Exactly one event is emitted per successful state transition, after all
//! checks and transfers, and never on a failed instruction. The off-chain
//! indexer keys these by transaction signature and slot; a missed emission
//! is reconciled there by replay, not here.

use anchor_lang::prelude::*;

#[event]
pub struct CampaignCreated {
    pub campaign: Pubkey,
    pub campaign_id: u64,
    pub creator: Pubkey,
    pub goal_amount: u64,
    pub deadline: i64,
    pub metadata_url: String,
    pub timestamp: i64,
}

#[event]
pub struct CampaignDonated {
    pub campaign: Pubkey,
    pub campaign_id: u64,
    pub donor: Pubkey,
    pub amount: u64,
    pub amount_raised: u64,
    pub timestamp: i64,
}

#[event]
pub struct CampaignWithdrawn {
    pub campaign: Pubkey,
    pub campaign_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
