// =============================================================================
// Position State Account
// =============================================================================
// The Position account tracks an individual depositor's stake in one pool:
// their principal (deposits net of withdrawals, never including fees), their
// share balance (claim on total_liquidity), and which LP-fee candidate they
// currently vote for.
//
// Why do we need this account, instead of just an SPL token balance?
// - Shares here are unit-less ledger entries, not a transferable token (the
//   engine exposes no share-transfer instruction - only full withdraw and
//   redeposit change a share balance).
// - vote_selection_bps has to live somewhere the governance instructions can
//   cheaply read/write alongside shares, since every share change must be
//   mirrored into the pool's fee_votes tally for the account's current vote.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::FlashVaultError;

/// Tracks one account's stake in one pool.
///
/// PDA seeds: ["position", pool_pubkey, owner_pubkey]. One Position account
/// per (pool, owner) pair.
#[account]
#[derive(InitSpace)]
pub struct Position {
    /// The pool this position belongs to.
    pub pool: Pubkey,

    /// The wallet address that owns this position.
    pub owner: Pubkey,

    /// Deposits net of withdrawals. Never includes accrued LP fees - used
    /// only for reporting and the fees-only withdrawal helper.
    pub principal: u64,

    /// Share balance. Determines this account's claim on total_liquidity.
    pub shares: u64,

    /// The LP fee bps this account currently votes for, 0 = no vote.
    pub vote_selection_bps: u16,

    /// Bump seed for this Position PDA.
    pub bump: u8,
}

impl Position {
    /// Record a deposit: grows principal and shares together.
    pub fn record_deposit(&mut self, amount: u64, shares_issued: u64) -> Result<()> {
        self.principal = self
            .principal
            .checked_add(amount)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        self.shares = self
            .shares
            .checked_add(shares_issued)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        Ok(())
    }

    /// Zero out the position on a full withdrawal. Clears principal, shares,
    /// and the vote selection - the caller is responsible for unwinding the
    /// vote's contribution to the pool's fee_votes tally first.
    pub fn clear(&mut self) {
        self.principal = 0;
        self.shares = 0;
        self.vote_selection_bps = 0;
    }

    /// Redeem `shares_redeemed` shares for a fees-only withdrawal: shares
    /// shrink but principal is preserved so future reporting still reflects
    /// the account's un-withdrawn cost basis.
    pub fn redeem_fee_shares(&mut self, shares_redeemed: u64) -> Result<()> {
        self.shares = self
            .shares
            .checked_sub(shares_redeemed)
            .ok_or(error!(FlashVaultError::MathUnderflow))?;
        Ok(())
    }
}
