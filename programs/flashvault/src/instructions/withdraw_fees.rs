// =============================================================================
// Withdraw Fees Instruction
// =============================================================================
// Fees-only withdrawal: redeems the smallest number of shares whose asset
// value covers the caller's accrued LP fees, leaving principal untouched.
// The naive proportional share count can floor-round to an asset value
// just under the fee owed, so a correction loop nudges the redeemed share
// count up until its floor-rounded asset value clears `fees` - the
// withdrawer always receives at least as much as they're owed, never less.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::Withdrew;
use crate::state::Pool;
use crate::state::Position;
use crate::token_util;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
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
        constraint = withdrawer_asset_account.mint == asset_mint.key() @ FlashVaultError::InvalidAsset,
        constraint = withdrawer_asset_account.owner == withdrawer.key() @ FlashVaultError::NotOwner,
    )]
    pub withdrawer_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
    let shares = ctx.accounts.position.shares;
    require!(shares > 0, FlashVaultError::NothingToWithdraw);

    let gross = ctx.accounts.pool.asset_for_shares(shares)?;
    let principal = ctx.accounts.position.principal;
    let fees = gross.saturating_sub(principal);
    require!(fees > 0, FlashVaultError::NothingToWithdraw);

    // Smallest share count whose asset value is >= fees: ceiling-divide the
    // fee amount by the pool's per-share asset value.
    let shares_to_redeem = if ctx.accounts.pool.total_shares == 0 {
        0
    } else {
        let numerator = (fees as u128)
            .checked_mul(ctx.accounts.pool.total_shares as u128)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
        let denominator = ctx.accounts.pool.total_liquidity as u128;
        let mut redeemed = numerator.checked_div(denominator).ok_or(error!(FlashVaultError::MathOverflow))? as u64;
        while redeemed > 0 && ctx.accounts.pool.asset_for_shares(redeemed)? < fees {
            redeemed = redeemed.checked_add(1).ok_or(error!(FlashVaultError::MathOverflow))?;
        }
        redeemed.min(shares)
    };
    require!(shares_to_redeem > 0, FlashVaultError::NothingToWithdraw);

    let amount_out = ctx.accounts.pool.asset_for_shares(shares_to_redeem)?;

    ctx.accounts.pool.total_liquidity = ctx
        .accounts
        .pool
        .total_liquidity
        .checked_sub(amount_out)
        .ok_or(error!(FlashVaultError::MathUnderflow))?;
    ctx.accounts.pool.total_shares = ctx
        .accounts
        .pool
        .total_shares
        .checked_sub(shares_to_redeem)
        .ok_or(error!(FlashVaultError::MathUnderflow))?;

    let vote_bps = ctx.accounts.position.vote_selection_bps;
    if vote_bps != 0 {
        let idx = Pool::bps_index(vote_bps);
        ctx.accounts.pool.fee_votes[idx] = ctx
            .accounts
            .pool
            .fee_votes[idx]
            .checked_sub(shares_to_redeem)
            .ok_or(error!(FlashVaultError::MathUnderflow))?;
    }

    ctx.accounts.position.redeem_fee_shares(shares_to_redeem)?;

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
        amount_out,
    )?;

    let clock = Clock::get()?;
    emit!(Withdrew {
        user: ctx.accounts.withdrawer.key(),
        asset: asset_mint_key,
        principal: 0,
        fees: amount_out,
        timestamp: clock.unix_timestamp,
    });

    msg!("Withdrew {} in fees from pool {}", amount_out, ctx.accounts.pool.key());

    Ok(())
}
