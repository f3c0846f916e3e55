// =============================================================================
// Asset Adapter
// =============================================================================
// Thin wrapper around anchor_spl::token. Every transfer that matters for
// solvency is verified by the observed pre/post balance delta rather than
// trusted on the nominal instruction argument - this is what lets deposits
// and flash-loan repayment checks tolerate a fee-on-transfer or otherwise
// non-standard fungible without silently under-crediting the pool.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::FlashVaultError;

/// Transfer `amount` from a user-owned token account into the vault,
/// authorized by the user's own signature.
pub fn transfer_into_vault<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        token_program.to_account_info(),
        Transfer {
            from: from.to_account_info(),
            to: vault.to_account_info(),
            authority: authority.to_account_info(),
        },
    );
    token::transfer(cpi_ctx, amount)
}

/// Transfer `amount` out of a PDA-owned vault, signed with the vault's own
/// PDA seeds.
pub fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    vault_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        Transfer {
            from: vault.to_account_info(),
            to: to.to_account_info(),
            authority: vault_authority,
        },
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}

/// Reload `account` from the ledger and return how much its balance grew
/// since `pre_amount` was captured, failing if the growth doesn't clear
/// `expected_minimum`. Used as the authoritative "received amount" for
/// deposits instead of trusting the caller's nominal argument, so a
/// fee-on-transfer or otherwise non-standard fungible that delivers less
/// than the caller asked for surfaces as `BalanceUnderflow` rather than
/// silently crediting fewer shares than the minimum deposit implies.
pub fn require_observed_increase(
    account: &mut Account<TokenAccount>,
    pre_amount: u64,
    expected_minimum: u64,
) -> Result<u64> {
    account.reload()?;
    let delta = account
        .amount
        .checked_sub(pre_amount)
        .ok_or(error!(FlashVaultError::BalanceUnderflow))?;
    require!(delta >= expected_minimum, FlashVaultError::BalanceUnderflow);
    Ok(delta)
}
