// =============================================================================
// Pool State Account
// =============================================================================
// The Pool account is the per-asset ledger of the FlashVault protocol. One
// Pool exists per deposited asset mint, tracking total liquidity, total
// shares, the active LP fee, the management-fee bucket, and the per-bps vote
// and proposal tallies that drive fee governance.
//
// Key Concepts:
// - PDA (Program Derived Address): an address derived from seeds that only
//   this program can sign for. This lets the program "own" the pool and its
//   vault.
// - Bump: the number (0-255) that makes a PDA valid. Stored to avoid
//   recomputing it on every instruction.
// - fee_votes / proposed_fee_exec_block are fixed-size arrays indexed by
//   `bps - 1`: candidate bps values range over a small closed interval
//   (1..=MAX_LP_FEE_BPS), so an array is the natural fixed-size encoding for
//   an on-chain account, and is exactly as large as the most bps that could
//   ever exist - there's no hash map to grow.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FlashVaultError;

/// The per-asset liquidity pool that backs deposits, withdrawals, and flash
/// loans for a single asset mint.
///
/// This account is a PDA derived from ["pool", asset_mint_pubkey].
#[account]
#[derive(InitSpace)]
pub struct Pool {
    // =========================================================================
    // Identification
    // =========================================================================
    /// The SPL mint of the asset this pool holds.
    pub asset_mint: Pubkey,

    /// The vault token account (PDA-owned) holding this pool's liquidity.
    pub vault: Pubkey,

    // =========================================================================
    // Ledger
    // =========================================================================
    /// Total units of the asset owed to depositors: principal + accrued LP
    /// fees. Monotone-increasing except on withdrawal and flash-loan out/in.
    pub total_liquidity: u64,

    /// Total outstanding shares across every depositor in this pool.
    pub total_shares: u64,

    /// Units held for the engine owner from the management-fee split.
    /// Withdrawable only by the owner; never counted in total_liquidity.
    pub collected_management_fee: u64,

    // =========================================================================
    // Fee Configuration
    // =========================================================================
    /// Active LP fee in basis points. 0 is the "unset" sentinel, which maps
    /// to DEFAULT_LP_FEE_BPS wherever the effective fee is read.
    pub lp_fee_bps: u16,

    // =========================================================================
    // Governance Tallies
    // =========================================================================
    /// fee_votes[bps - 1] = total shares currently voting for that bps.
    pub fee_votes: [u64; MAX_LP_FEE_BPS_USIZE],

    /// proposed_fee_exec_block[bps - 1] = earliest slot at which that bps may
    /// be executed. 0 means no live proposal for that candidate.
    pub proposed_fee_exec_block: [u64; MAX_LP_FEE_BPS_USIZE],

    // =========================================================================
    // PDA Bumps
    // =========================================================================
    pub bump: u8,
    pub vault_bump: u8,
}

impl Pool {
    /// The fee actually charged on a flash loan: the configured fee, or the
    /// protocol default when the pool has never had one set.
    pub fn effective_lp_fee_bps(&self) -> u16 {
        if self.lp_fee_bps == 0 {
            DEFAULT_LP_FEE_BPS
        } else {
            self.lp_fee_bps
        }
    }

    /// Shares to mint for a deposit of `amount` units.
    ///
    /// - First deposit into an empty pool: 1:1 (shares = amount).
    /// - Otherwise: shares = floor(amount * total_shares / total_liquidity).
    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        let shares = (amount as u128)
            .checked_mul(self.total_shares as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?
            .checked_div(self.total_liquidity as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        Ok(shares as u64)
    }

    /// Asset units owed for redeeming `shares` shares, floor-rounded. The
    /// floor-rounding remainder stays in the pool, benefiting every other
    /// depositor - this is intentional, not a bug.
    pub fn asset_for_shares(&self, shares: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(0);
        }
        let amount = (shares as u128)
            .checked_mul(self.total_liquidity as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?
            .checked_div(self.total_shares as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        Ok(amount as u64)
    }

    /// Flash-loan fee split for borrowing `amount` units, given the engine's
    /// management_fee_percentage (hundredths of a percent of the LP fee).
    ///
    /// Both components floor-round; mgmt_fee can legitimately be zero for
    /// small loans - that is by design, not an off-by-one.
    pub fn compute_flash_loan_fees(&self, amount: u64, management_fee_percentage: u16) -> Result<(u64, u64)> {
        let bps = self.effective_lp_fee_bps() as u128;
        let lp_fee = (amount as u128)
            .checked_mul(bps)
            .ok_or(error!(FlashVaultError::MathOverflow))?
            .checked_div(FEE_BPS_DENOMINATOR as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        let mgmt_fee = (amount as u128)
            .checked_mul(bps)
            .ok_or(error!(FlashVaultError::MathOverflow))?
            .checked_mul(management_fee_percentage as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?
            .checked_div(MGMT_FEE_DENOMINATOR)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        Ok((lp_fee as u64, mgmt_fee as u64))
    }

    /// Index into fee_votes / proposed_fee_exec_block for a candidate bps.
    /// Caller must have already validated `1 <= bps <= MAX_LP_FEE_BPS`.
    pub fn bps_index(bps: u16) -> usize {
        (bps - 1) as usize
    }

    /// Whether `bps` holds the strict plurality of all live vote tallies in
    /// this pool - i.e. every other candidate with nonzero votes has
    /// strictly fewer. Ties disqualify execution.
    pub fn is_strict_winner(&self, bps: u16) -> bool {
        let candidate_votes = self.fee_votes[Self::bps_index(bps)];
        if candidate_votes == 0 {
            return false;
        }
        for (idx, &votes) in self.fee_votes.iter().enumerate() {
            let other_bps = (idx + 1) as u16;
            if other_bps == bps {
                continue;
            }
            if votes >= candidate_votes {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with(total_liquidity: u64, total_shares: u64) -> Pool {
        Pool {
            asset_mint: Pubkey::default(),
            vault: Pubkey::default(),
            total_liquidity,
            total_shares,
            collected_management_fee: 0,
            lp_fee_bps: 0,
            fee_votes: [0u64; MAX_LP_FEE_BPS_USIZE],
            proposed_fee_exec_block: [0u64; MAX_LP_FEE_BPS_USIZE],
            bump: 0,
            vault_bump: 0,
        }
    }

    #[test]
    fn first_deposit_is_one_to_one() {
        let pool = pool_with(0, 0);
        assert_eq!(pool.shares_for_deposit(100_000).unwrap(), 100_000);
    }

    #[test]
    fn subsequent_deposit_is_proportional() {
        let pool = pool_with(200_000, 200_000);
        assert_eq!(pool.shares_for_deposit(50_000).unwrap(), 50_000);
    }

    #[test]
    fn withdrawal_floor_rounds_in_favor_of_the_pool() {
        // 3 shares out of 10, over a pool of 100_005 liquidity: 30001.5 -> 30001
        let pool = pool_with(100_005, 10);
        assert_eq!(pool.asset_for_shares(3).unwrap(), 30_001);
    }

    #[test]
    fn flash_loan_fee_matches_s1_scenario() {
        let mut pool = pool_with(200_000, 200_000);
        pool.lp_fee_bps = 0; // unset -> DEFAULT_LP_FEE_BPS = 1
        let (lp_fee, mgmt_fee) = pool.compute_flash_loan_fees(50_000, 100).unwrap();
        assert_eq!(lp_fee, 5);
        assert_eq!(mgmt_fee, 0);
    }

    #[test]
    fn flash_loan_fee_matches_s2_scenario() {
        let pool = pool_with(200_000, 200_000);
        let (lp_fee, mgmt_fee) = pool.compute_flash_loan_fees(1_000_000_000, 100).unwrap();
        assert_eq!(lp_fee, 100_000);
        assert_eq!(mgmt_fee, 1_000);
    }

    #[test]
    fn strict_plurality_winner() {
        let mut pool = pool_with(0, 0);
        pool.fee_votes[Pool::bps_index(25)] = 60;
        pool.fee_votes[Pool::bps_index(50)] = 40;
        assert!(pool.is_strict_winner(25));
        assert!(!pool.is_strict_winner(50));
    }

    #[test]
    fn tie_disqualifies_every_candidate() {
        let mut pool = pool_with(0, 0);
        pool.fee_votes[Pool::bps_index(25)] = 50;
        pool.fee_votes[Pool::bps_index(50)] = 50;
        assert!(!pool.is_strict_winner(25));
        assert!(!pool.is_strict_winner(50));
    }
}
