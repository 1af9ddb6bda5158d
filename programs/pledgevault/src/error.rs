use anchor_lang::prelude::*;

/// Every failure the lifecycle engine can raise itself. Account-layer
/// failures (a campaign PDA that already exists at create, or is absent at
/// donate/release) surface as Anchor's own constraint errors.
#[error_code]
pub enum CampaignError {
    #[msg("Goal amount must be greater than 0")]
    InvalidGoalAmount,

    #[msg("Deadline must be in the future")]
    DeadlineInPast,

    #[msg("Metadata URL exceeds maximum length")]
    MetadataUrlTooLong,

    #[msg("Donation amount must be greater than 0")]
    InvalidAmount,

    #[msg("Campaign deadline has passed, donations are closed")]
    CampaignExpired,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Only the campaign creator can release funds")]
    Unauthorized,

    #[msg("Campaign is still active, cannot release yet")]
    CampaignStillActive,

    #[msg("Campaign goal has not been reached")]
    GoalNotReached,

    #[msg("Insufficient funds - release would dip below the rent-exempt reserve")]
    InsufficientFunds,
}
