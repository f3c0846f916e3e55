// =============================================================================
// Withdraw Instruction
// =============================================================================
// Full withdrawal: redeems every share the caller holds in a pool, zeroes
// their Position, unwinds their vote contribution to fee_votes, and removes
// the asset from their AccountIndex.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::Withdrew;
use crate::state::{AccountIndex, Pool, Position};
use crate::token_util;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub withdrawer: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [POOL_SEED, asset_mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), withdrawer.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == withdrawer.key() @ FlashVaultError::NotOwner,
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        seeds = [ACCOUNT_INDEX_SEED, withdrawer.key().as_ref()],
        bump = account_index.bump,
        constraint = account_index.owner == withdrawer.key() @ FlashVaultError::NotOwner,
    )]
    pub account_index: Account<'info, AccountIndex>,

    #[account(
        mut,
        constraint = withdrawer_asset_account.mint == asset_mint.key() @ FlashVaultError::InvalidAsset,
        constraint = withdrawer_asset_account.owner == withdrawer.key() @ FlashVaultError::NotOwner,
    )]
    pub withdrawer_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let shares = ctx.accounts.position.shares;
    require!(shares > 0, FlashVaultError::NothingToWithdraw);

    let asset_owed = ctx.accounts.pool.asset_for_shares(shares)?;
    let principal = ctx.accounts.position.principal;
    let fees = asset_owed.saturating_sub(principal);

    ctx.accounts.pool.total_liquidity = ctx
        .accounts
        .pool
        .total_liquidity
        .checked_sub(asset_owed)
        .ok_or(error!(FlashVaultError::MathUnderflow))?;
    ctx.accounts.pool.total_shares = ctx
        .accounts
        .pool
        .total_shares
        .checked_sub(shares)
        .ok_or(error!(FlashVaultError::MathUnderflow))?;

    let vote_bps = ctx.accounts.position.vote_selection_bps;
    if vote_bps != 0 {
        let idx = Pool::bps_index(vote_bps);
        ctx.accounts.pool.fee_votes[idx] = ctx
            .accounts
            .pool
            .fee_votes[idx]
            .checked_sub(shares)
            .ok_or(error!(FlashVaultError::MathUnderflow))?;
    }

    ctx.accounts.position.clear();

    let asset_key = ctx.accounts.asset_mint.key();
    ctx.accounts.account_index.untrack_asset(asset_key);

    let pool_key = ctx.accounts.pool.key();
    let asset_mint_key = ctx.accounts.asset_mint.key();
    let pool_bump = ctx.accounts.pool.bump;
    let pool_seeds: &[&[u8]] = &[POOL_SEED, asset_mint_key.as_ref(), &[pool_bump]];
    let signer_seeds: &[&[&[u8]]] = &[pool_seeds];

    token_util::transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.withdrawer_asset_account,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        asset_owed,
    )?;

    let clock = Clock::get()?;
    emit!(Withdrew {
        user: ctx.accounts.withdrawer.key(),
        asset: asset_key,
        principal,
        fees,
        timestamp: clock.unix_timestamp,
    });

    msg!("Withdrew {} from pool {} (principal {}, fees {})", asset_owed, pool_key, principal, fees);

    Ok(())
}
