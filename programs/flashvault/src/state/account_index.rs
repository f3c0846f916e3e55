// =============================================================================
// Account Index State
// =============================================================================
// Per-depositor mirror of Engine.deposited_assets: the set of pool asset
// mints a single wallet currently holds a Position in. Lets off-chain and
// on-chain callers enumerate "every pool this account touches" without
// scanning every Position PDA on the program.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::MAX_TRACKED_ASSETS_PER_ACCOUNT;
use crate::error::FlashVaultError;

/// PDA seeds: ["account_index", owner_pubkey]. One per depositor wallet.
#[account]
#[derive(InitSpace)]
pub struct AccountIndex {
    /// The wallet this index belongs to.
    pub owner: Pubkey,

    /// Asset mints of every pool this account currently has open shares in.
    #[max_len(MAX_TRACKED_ASSETS_PER_ACCOUNT)]
    pub assets: Vec<Pubkey>,

    pub bump: u8,
}

impl AccountIndex {
    /// Record that `owner` now holds a position in `asset`'s pool.
    pub fn track_asset(&mut self, asset: Pubkey) -> Result<()> {
        if self.assets.contains(&asset) {
            return Ok(());
        }
        require!(
            self.assets.len() < MAX_TRACKED_ASSETS_PER_ACCOUNT,
            FlashVaultError::TooManyTrackedAssets
        );
        self.assets.push(asset);
        Ok(())
    }

    /// Remove `asset` after a full withdrawal zeroes the account's position.
    pub fn untrack_asset(&mut self, asset: Pubkey) {
        self.assets.retain(|a| a != &asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> AccountIndex {
        AccountIndex {
            owner: Pubkey::default(),
            assets: vec![],
            bump: 0,
        }
    }

    #[test]
    fn track_then_untrack_round_trips() {
        let mut idx = index();
        let asset = Pubkey::new_unique();
        idx.track_asset(asset).unwrap();
        assert_eq!(idx.assets.len(), 1);
        idx.untrack_asset(asset);
        assert!(idx.assets.is_empty());
    }
}
