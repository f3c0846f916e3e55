// =============================================================================
// Engine State Account
// =============================================================================
// The Engine is the protocol-wide singleton: one account, PDA-derived from
// a fixed seed, that holds the owner, the management-fee split, the
// reentrancy guard, and the list of every asset mint that has ever had a
// pool created for it.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::MAX_TRACKED_ASSETS;
use crate::error::FlashVaultError;

/// Reentrancy guard state for the engine's mutating entry points.
///
/// This flag is set and cleared in-memory only for the duration of
/// `handler_flash_loan` / `handler_multi_flash_loan`; Anchor doesn't
/// serialize account state back to the ledger until the top-level
/// instruction returns, so a nested call made by the receiver callback can
/// never actually observe `Entered` here. The real protection against a
/// receiver re-entering FlashVault mid-callback is Solana's own runtime
/// rule against a program calling back into an instruction still on its own
/// call stack, which aborts with a generic runtime error rather than
/// `FlashVaultError::Reentrant`. The flag is kept anyway as cheap
/// documentation of intent and a guard against a future refactor (e.g. a
/// yielding cross-instruction callback) that would make it load-bearing.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum ReentrancyStatus {
    NotEntered,
    Entered,
}

/// The protocol singleton.
///
/// PDA seeds: ["engine"]. Exactly one Engine account ever exists.
#[account]
#[derive(InitSpace)]
pub struct Engine {
    /// The account authorized to call admin and governance-execution
    /// instructions, set once at initialize() and changeable only via
    /// transfer_ownership.
    pub owner: Pubkey,

    /// Whether initialize() has already run. Guards against re-initialization
    /// past the Anchor `init` constraint, which only prevents re-creating the
    /// same PDA - this flag exists so callers get a named error instead of a
    /// generic account-already-in-use failure on any path that re-derives it.
    pub is_initialized: bool,

    /// Share of every LP fee, in hundredths of a percent, routed to
    /// collected_management_fee instead of total_liquidity.
    pub management_fee_percentage: u16,

    /// Guards every mutating entry point against reentrancy via the receiver
    /// callback in flash_loan / multi_flash_loan.
    pub reentrancy_status: ReentrancyStatus,

    /// Every asset mint that has had a pool created for it. Bounded so the
    /// account has a fixed max size; new-asset registration past the bound
    /// fails closed with TooManyTrackedAssets rather than silently dropping
    /// the mint.
    #[max_len(MAX_TRACKED_ASSETS)]
    pub deposited_assets: Vec<Pubkey>,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl Engine {
    /// Register `asset` in deposited_assets if it isn't already tracked.
    /// No-op (not an error) when the asset is already present.
    pub fn track_asset(&mut self, asset: Pubkey) -> Result<()> {
        if self.deposited_assets.contains(&asset) {
            return Ok(());
        }
        require!(
            self.deposited_assets.len() < MAX_TRACKED_ASSETS,
            FlashVaultError::TooManyTrackedAssets
        );
        self.deposited_assets.push(asset);
        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        require!(
            self.reentrancy_status == ReentrancyStatus::NotEntered,
            FlashVaultError::Reentrant
        );
        self.reentrancy_status = ReentrancyStatus::Entered;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.reentrancy_status = ReentrancyStatus::NotEntered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine {
            owner: Pubkey::default(),
            is_initialized: true,
            management_fee_percentage: 100,
            reentrancy_status: ReentrancyStatus::NotEntered,
            deposited_assets: vec![],
            bump: 0,
        }
    }

    #[test]
    fn tracking_same_asset_twice_is_a_no_op() {
        let mut e = engine();
        let asset = Pubkey::new_unique();
        e.track_asset(asset).unwrap();
        e.track_asset(asset).unwrap();
        assert_eq!(e.deposited_assets.len(), 1);
    }

    #[test]
    fn reentrant_enter_fails() {
        let mut e = engine();
        e.enter().unwrap();
        assert!(e.enter().is_err());
        e.exit();
        assert!(e.enter().is_ok());
    }
}
