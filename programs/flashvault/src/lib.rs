// =============================================================================
// FlashVault - Multi-Token Flash-Loan Lending Engine
// =============================================================================
//
// FlashVault is a pool-per-asset liquidity vault on Solana:
// - Depositors share the yield from atomic, single-transaction flash loans
// - Every pool's loan fee is governed by a share-weighted vote with a
//   timelock on execution
// - A loan is either fully repaid with fees in the same transaction, or the
//   transaction reverts with no state change
//
// This is the main entry point for the FlashVault Anchor program.
// =============================================================================

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod receiver;
pub mod state;
pub mod token_util;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("2cTDHuGALYQQQTLai9HLwsvkS7nv6r8JJLgPeMrsRPxm");

/// The FlashVault program module. Each function here is one of the thirteen
/// mutating entry points plus the read-only view surface.
#[program]
pub mod flashvault {
    use super::*;

    // =========================================================================
    // Engine Lifecycle
    // =========================================================================

    /// One-shot: sets the caller as engine owner and the management-fee split.
    pub fn initialize(ctx: Context<Initialize>, management_fee_percentage: u16) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, management_fee_percentage)
    }

    // =========================================================================
    // Pool Accounting
    // =========================================================================

    /// Deposit `amount` of an asset, receiving shares in return. Creates the
    /// pool, its vault, and the caller's position/index entries on first use.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Redeem every share the caller holds in a pool.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx)
    }

    /// Redeem only the caller's accrued fees, preserving principal.
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        instructions::withdraw_fees::handler_withdraw_fees(ctx)
    }

    // =========================================================================
    // Flash-Loan Protocol
    // =========================================================================

    /// Borrow `amount` of a single asset, invoke the receiver's
    /// `on_flash_loan` callback, and require it repaid with fees in the same
    /// transaction.
    pub fn flash_loan(ctx: Context<FlashLoan>, amount: u64, params: Vec<u8>) -> Result<()> {
        instructions::flash_loan::handler_flash_loan(ctx, amount, params)
    }

    /// Borrow several assets atomically in one receiver callback. See
    /// `multi_flash_loan.rs` for the required `remaining_accounts` layout.
    pub fn multi_flash_loan(
        ctx: Context<MultiFlashLoan>,
        assets: Vec<Pubkey>,
        amounts: Vec<u64>,
        params: Vec<u8>,
    ) -> Result<()> {
        instructions::multi_flash_loan::handler_multi_flash_loan(ctx, assets, amounts, params)
    }

    // =========================================================================
    // Fee Governance
    // =========================================================================

    /// Move the caller's share-weighted vote to `bps` for a pool's LP fee.
    pub fn vote_for_lp_fee(ctx: Context<VoteForLpFee>, bps: u16) -> Result<()> {
        instructions::governance::handler_vote_for_lp_fee(ctx, bps)
    }

    /// Snapshot a strict plurality winner behind the proposal timelock.
    pub fn propose_lp_fee_change(ctx: Context<ProposeLpFeeChange>, bps: u16) -> Result<()> {
        instructions::governance::handler_propose_lp_fee_change(ctx, bps)
    }

    /// Apply a proposal once its timelock has elapsed and it's still winning.
    pub fn execute_lp_fee_change(ctx: Context<ExecuteLpFeeChange>, bps: u16) -> Result<()> {
        instructions::governance::handler_execute_lp_fee_change(ctx, bps)
    }

    /// Owner-only: set a pool's LP fee directly, bypassing the vote.
    pub fn set_lp_fee(ctx: Context<SetLpFee>, bps: u16) -> Result<()> {
        instructions::governance::handler_set_lp_fee(ctx, bps)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Owner-only: adjust the engine-wide management fee percentage.
    pub fn set_management_fee(ctx: Context<SetManagementFee>, pct: u16) -> Result<()> {
        instructions::admin::handler_set_management_fee(ctx, pct)
    }

    /// Owner-only: sweep a pool's collected management-fee bucket.
    pub fn withdraw_management_fees(ctx: Context<WithdrawManagementFees>) -> Result<()> {
        instructions::admin::handler_withdraw_management_fees(ctx)
    }

    /// Owner-only: transfer engine ownership to a new account.
    pub fn transfer_ownership(ctx: Context<TransferOwnership>) -> Result<()> {
        instructions::admin::handler_transfer_ownership(ctx)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn get_deposited_tokens(ctx: Context<GetDepositedTokens>) -> Result<Vec<Pubkey>> {
        instructions::views::handler_get_deposited_tokens(ctx)
    }

    pub fn get_user_deposited_tokens(ctx: Context<GetUserDepositedTokens>) -> Result<Vec<Pubkey>> {
        instructions::views::handler_get_user_deposited_tokens(ctx)
    }

    pub fn total_liquidity(ctx: Context<PoolView>) -> Result<u64> {
        instructions::views::handler_total_liquidity(ctx)
    }

    pub fn total_shares(ctx: Context<PoolView>) -> Result<u64> {
        instructions::views::handler_total_shares(ctx)
    }

    pub fn get_effective_lp_fee(ctx: Context<PoolView>) -> Result<u16> {
        instructions::views::handler_get_effective_lp_fee(ctx)
    }

    pub fn get_withdrawable_amount(ctx: Context<GetWithdrawableAmount>) -> Result<(u64, u64, u64, u64, u64)> {
        instructions::views::handler_get_withdrawable_amount(ctx)
    }

    pub fn proposed_fee_changes(ctx: Context<ProposedFeeChangeView>, bps: u16) -> Result<u64> {
        instructions::views::handler_proposed_fee_changes(ctx, bps)
    }

    pub fn lp_fee_shares_total_votes(ctx: Context<ProposedFeeChangeView>, bps: u16) -> Result<u64> {
        instructions::views::handler_lp_fee_shares_total_votes(ctx, bps)
    }
}
