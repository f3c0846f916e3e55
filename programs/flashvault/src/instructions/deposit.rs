// =============================================================================
// Deposit Instruction
// =============================================================================
// Pulls `amount` of an asset from the caller into that asset's pool vault and
// issues shares in return. A pool springs into existence on its first
// accepted deposit - this handler creates the Pool, its vault, the caller's
// Position, and the caller's AccountIndex on demand via init_if_needed.
//
// Share calculation:
// - First deposit into an empty pool: shares = received_amount (1:1)
// - Later deposits: shares = (received_amount * total_shares) / total_liquidity
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::Deposited;
use crate::state::{AccountIndex, Engine, Pool, Position};
use crate::token_util;

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + Pool::INIT_SPACE,
        seeds = [POOL_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init_if_needed,
        payer = depositor,
        token::mint = asset_mint,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + Position::INIT_SPACE,
        seeds = [POSITION_SEED, pool.key().as_ref(), depositor.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + AccountIndex::INIT_SPACE,
        seeds = [ACCOUNT_INDEX_SEED, depositor.key().as_ref()],
        bump
    )]
    pub account_index: Account<'info, AccountIndex>,

    #[account(
        mut,
        constraint = depositor_asset_account.mint == asset_mint.key() @ FlashVaultError::InvalidAsset,
        constraint = depositor_asset_account.owner == depositor.key() @ FlashVaultError::NotOwner
    )]
    pub depositor_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount >= MINIMUM_DEPOSIT, FlashVaultError::DepositTooSmall);
    require!(
        ctx.accounts.depositor_asset_account.amount >= amount,
        FlashVaultError::InvalidAmount
    );

    let pool_key = ctx.accounts.pool.key();
    let vault_key = ctx.accounts.vault.key();
    let asset_key = ctx.accounts.asset_mint.key();
    let pool_bump = ctx.bumps.pool;
    let vault_bump = ctx.bumps.vault;
    let position_bump = ctx.bumps.position;
    let account_index_bump = ctx.bumps.account_index;

    // Newly created accounts start zeroed; stamp identity fields once.
    if ctx.accounts.pool.asset_mint == Pubkey::default() {
        ctx.accounts.pool.asset_mint = asset_key;
        ctx.accounts.pool.vault = vault_key;
        ctx.accounts.pool.bump = pool_bump;
        ctx.accounts.pool.vault_bump = vault_bump;
    }
    if ctx.accounts.position.owner == Pubkey::default() {
        ctx.accounts.position.pool = pool_key;
        ctx.accounts.position.owner = ctx.accounts.depositor.key();
        ctx.accounts.position.bump = position_bump;
    }
    if ctx.accounts.account_index.owner == Pubkey::default() {
        ctx.accounts.account_index.owner = ctx.accounts.depositor.key();
        ctx.accounts.account_index.bump = account_index_bump;
    }

    let pre_vault_amount = ctx.accounts.vault.amount;
    token_util::transfer_into_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.depositor_asset_account,
        &ctx.accounts.vault,
        &ctx.accounts.depositor,
        amount,
    )?;
    let received = token_util::require_observed_increase(&mut ctx.accounts.vault, pre_vault_amount, MINIMUM_DEPOSIT)?;

    let shares_issued = ctx.accounts.pool.shares_for_deposit(received)?;
    require!(shares_issued > 0, FlashVaultError::DepositTooSmall);

    ctx.accounts.pool.total_liquidity = ctx
        .accounts
        .pool
        .total_liquidity
        .checked_add(received)
        .ok_or(error!(FlashVaultError::MathOverflow))?;
    ctx.accounts.pool.total_shares = ctx
        .accounts
        .pool
        .total_shares
        .checked_add(shares_issued)
        .ok_or(error!(FlashVaultError::MathOverflow))?;

    ctx.accounts.position.record_deposit(received, shares_issued)?;

    // Mirror the share increase into this depositor's live vote, if any.
    let vote_bps = ctx.accounts.position.vote_selection_bps;
    if vote_bps != 0 {
        let idx = Pool::bps_index(vote_bps);
        ctx.accounts.pool.fee_votes[idx] = ctx.accounts.pool.fee_votes[idx]
            .checked_add(shares_issued)
            .ok_or(error!(FlashVaultError::MathOverflow))?;
    }

    ctx.accounts.engine.track_asset(asset_key)?;
    ctx.accounts.account_index.track_asset(asset_key)?;

    let clock = Clock::get()?;
    emit!(Deposited {
        user: ctx.accounts.depositor.key(),
        asset: asset_key,
        amount: received,
        shares: shares_issued,
        timestamp: clock.unix_timestamp,
    });

    msg!("Deposited {} into pool {}", received, pool_key);
    msg!("Shares issued: {}", shares_issued);
    msg!("Pool total_liquidity: {}, total_shares: {}", ctx.accounts.pool.total_liquidity, ctx.accounts.pool.total_shares);

    Ok(())
}
