// =============================================================================
// FlashVault Events
// =============================================================================
// Events emitted on the program log stream. Off-chain indexers consume these
// to derive APY, activity feeds, and governance state without re-deriving it
// from account snapshots.
// =============================================================================

use anchor_lang::prelude::*;

#[event]
pub struct EngineInitialized {
    pub owner: Pubkey,
    pub management_fee_percentage: u16,
    pub timestamp: i64,
}

#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrew {
    pub user: Pubkey,
    pub asset: Pubkey,
    pub principal: u64,
    pub fees: u64,
    pub timestamp: i64,
}

#[event]
pub struct FlashLoaned {
    pub borrower: Pubkey,
    pub receiver: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct VoteCast {
    pub asset: Pubkey,
    pub voter: Pubkey,
    pub bps: u16,
    pub voter_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct ProposalCreated {
    pub asset: Pubkey,
    pub bps: u16,
    pub execution_block: u64,
    pub timestamp: i64,
}

#[event]
pub struct ProposalExecuted {
    pub asset: Pubkey,
    pub old_bps: u16,
    pub new_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct LPFeeChanged {
    pub asset: Pubkey,
    pub old_bps: u16,
    pub new_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct ManagementFeeChanged {
    pub old_pct: u16,
    pub new_pct: u16,
    pub timestamp: i64,
}

#[event]
pub struct ManagementFeeWithdrawn {
    pub asset: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}
