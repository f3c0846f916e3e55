// =============================================================================
// FlashVault Error Codes
// =============================================================================
// Custom errors that the FlashVault program can return. Each error has a
// unique code and a human-readable message. The error code is used on-chain
// (saves space), while the message helps developers debug issues.
// =============================================================================

use anchor_lang::prelude::*;

/// All possible errors that the FlashVault program can return.
///
/// In Anchor, errors are automatically assigned numeric codes starting from
/// 6000. When a transaction fails, you'll see the error code in logs - use
/// this enum to understand what went wrong.
#[error_code]
pub enum FlashVaultError {
    // =========================================================================
    // Input Errors (6000-6019)
    // =========================================================================
    /// The supplied asset mint doesn't match the pool it's paired with.
    #[msg("Asset does not match the pool's configured mint")]
    InvalidAsset,

    /// Trying to deposit/withdraw/borrow zero of something.
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    /// Deposit is below MINIMUM_DEPOSIT, or rounds to zero shares.
    #[msg("Deposit is too small to mint a share")]
    DepositTooSmall,

    /// A fee configuration value (management fee, LP fee) is out of its bound.
    #[msg("Fee value is outside its allowed range")]
    FeeOutOfRange,

    /// A candidate LP fee bps is 0 or exceeds MAX_LP_FEE_BPS.
    #[msg("LP fee bps is outside its allowed range")]
    BpsOutOfRange,

    /// multi_flash_loan was called with an empty asset list.
    #[msg("Asset list must not be empty")]
    EmptyAssetList,

    /// multi_flash_loan's assets/amounts/remaining_accounts didn't line up.
    #[msg("Argument lists have mismatched lengths")]
    LengthMismatch,

    // =========================================================================
    // Authorization Errors (6020-6029)
    // =========================================================================
    /// Caller is not the engine owner.
    #[msg("Only the engine owner can perform this action")]
    NotOwner,

    /// The engine singleton hasn't completed initialize() yet.
    #[msg("Engine has not been initialized")]
    NotInitialized,

    /// initialize() was called a second time.
    #[msg("Engine has already been initialized")]
    AlreadyInitialized,

    // =========================================================================
    // State Errors (6030-6049)
    // =========================================================================
    /// Requested flash-loan amount exceeds the pool's total_liquidity.
    #[msg("Pool does not have enough liquidity for this loan")]
    InsufficientLiquidity,

    /// Caller holds zero shares and therefore nothing is withdrawable.
    #[msg("Nothing to withdraw for this account")]
    NothingToWithdraw,

    /// Caller has no vote_selection_bps recorded for this pool.
    #[msg("No vote is currently recorded for this account")]
    NoVoteRecorded,

    /// proposed_fee_exec_block is zero for this (asset, bps) pair.
    #[msg("No live proposal exists for this fee candidate")]
    NoProposal,

    /// current_block < proposed_fee_exec_block.
    #[msg("Proposal timelock has not elapsed yet")]
    ProposalNotReady,

    /// The candidate no longer holds the strict plurality of votes.
    #[msg("Fee candidate is no longer the winning proposal")]
    ProposalNoLongerWinning,

    // =========================================================================
    // Atomicity Errors (6050-6059)
    // =========================================================================
    /// Post-loan balance delta was less than amount + total_fee.
    #[msg("Flash loan was not repaid in full")]
    NotRepaid,

    /// The CPI into the receiver's callback failed or the receiver program
    /// does not implement the expected instruction.
    #[msg("Receiver callback failed")]
    ReceiverCallFailed,

    /// A mutating entry point was re-entered while the guard was Entered.
    /// In practice unreachable: Solana's own runtime rejects a reentrant
    /// call before this guard's in-memory flag could ever be read back, so
    /// an actual nested flash-loan call surfaces as a runtime error instead.
    #[msg("Reentrant call into a mutating entry point")]
    Reentrant,

    // =========================================================================
    // Asset Errors (6060-6069)
    // =========================================================================
    /// An SPL token CPI transfer failed or moved a different amount than requested.
    #[msg("Asset transfer failed")]
    TransferFailed,

    /// The observed balance delta was less than the amount the caller claimed.
    #[msg("Observed balance delta was below the expected amount")]
    BalanceUnderflow,

    // =========================================================================
    // Math / Capacity Errors (6070-6079)
    // =========================================================================
    /// A checked arithmetic operation would overflow.
    #[msg("Math overflow")]
    MathOverflow,

    /// A checked arithmetic operation would underflow.
    #[msg("Math underflow")]
    MathUnderflow,

    /// deposited_assets or deposited_assets_by_account is already at capacity.
    #[msg("Too many distinct assets are already being tracked")]
    TooManyTrackedAssets,
}
