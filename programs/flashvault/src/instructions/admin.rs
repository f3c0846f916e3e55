// =============================================================================
// Admin Instructions
// =============================================================================
// Engine-owner-only actions: adjusting the management fee split, sweeping a
// pool's collected_management_fee bucket, and transferring ownership.
// set_lp_fee lives in governance.rs alongside the vote/propose/execute path
// it bypasses.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::{ManagementFeeChanged, ManagementFeeWithdrawn, OwnershipTransferred};
use crate::state::{Engine, Pool};
use crate::token_util;

#[derive(Accounts)]
pub struct SetManagementFee<'info> {
    #[account(mut, constraint = owner.key() == engine.owner @ FlashVaultError::NotOwner)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,
}

pub fn handler_set_management_fee(ctx: Context<SetManagementFee>, pct: u16) -> Result<()> {
    require!(
        (MIN_MGMT_FEE_PCT..=MAX_MGMT_FEE_PCT).contains(&pct),
        FlashVaultError::FeeOutOfRange
    );

    let old_pct = ctx.accounts.engine.management_fee_percentage;
    ctx.accounts.engine.management_fee_percentage = pct;

    let clock = Clock::get()?;
    emit!(ManagementFeeChanged {
        old_pct,
        new_pct: pct,
        timestamp: clock.unix_timestamp,
    });

    msg!("Management fee percentage {} -> {}", old_pct, pct);

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawManagementFees<'info> {
    #[account(constraint = owner.key() == engine.owner @ FlashVaultError::NotOwner)]
    pub owner: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut, seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,

    #[account(mut, seeds = [VAULT_SEED, pool.key().as_ref()], bump = pool.vault_bump)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_asset_account.mint == asset_mint.key() @ FlashVaultError::InvalidAsset,
        constraint = owner_asset_account.owner == owner.key() @ FlashVaultError::NotOwner,
    )]
    pub owner_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw_management_fees(ctx: Context<WithdrawManagementFees>) -> Result<()> {
    let amount = ctx.accounts.pool.collected_management_fee;
    require!(amount > 0, FlashVaultError::NothingToWithdraw);

    ctx.accounts.pool.collected_management_fee = 0;

    let asset_mint_key = ctx.accounts.asset_mint.key();
    let pool_bump = ctx.accounts.pool.bump;
    let pool_seeds: &[&[u8]] = &[POOL_SEED, asset_mint_key.as_ref(), &[pool_bump]];
    let signer_seeds: &[&[&[u8]]] = &[pool_seeds];

    token_util::transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.owner_asset_account,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        amount,
    )?;

    let clock = Clock::get()?;
    emit!(ManagementFeeWithdrawn {
        asset: asset_mint_key,
        amount,
        timestamp: clock.unix_timestamp,
    });

    msg!("Owner withdrew {} in management fees for asset {}", amount, asset_mint_key);

    Ok(())
}

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(constraint = owner.key() == engine.owner @ FlashVaultError::NotOwner)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,

    /// CHECK: the new owner is recorded as a pubkey only; it doesn't need to
    /// sign this transaction or be loaded as typed state.
    pub new_owner: UncheckedAccount<'info>,
}

pub fn handler_transfer_ownership(ctx: Context<TransferOwnership>) -> Result<()> {
    let old_owner = ctx.accounts.engine.owner;
    let new_owner = ctx.accounts.new_owner.key();
    ctx.accounts.engine.owner = new_owner;

    let clock = Clock::get()?;
    emit!(OwnershipTransferred {
        old_owner,
        new_owner,
        timestamp: clock.unix_timestamp,
    });

    msg!("Ownership transferred: {} -> {}", old_owner, new_owner);

    Ok(())
}
