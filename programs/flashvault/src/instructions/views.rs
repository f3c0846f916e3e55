// =============================================================================
// View Instructions
// =============================================================================
// Read-only instructions that return a derived value instead of just the raw
// account bytes - the conventional Anchor pattern for reads that need
// computation (share-to-asset conversion, fee-bucket lookups) rather than a
// bare account fetch. Anchor returns the handler's Ok(value) as instruction
// return data, readable via a simulated transaction.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::state::{AccountIndex, Engine, Pool, Position};

#[derive(Accounts)]
pub struct GetDepositedTokens<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,
}

pub fn handler_get_deposited_tokens(ctx: Context<GetDepositedTokens>) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.engine.deposited_assets.clone())
}

#[derive(Accounts)]
pub struct GetUserDepositedTokens<'info> {
    #[account(seeds = [ACCOUNT_INDEX_SEED, account_index.owner.as_ref()], bump = account_index.bump)]
    pub account_index: Account<'info, AccountIndex>,
}

pub fn handler_get_user_deposited_tokens(ctx: Context<GetUserDepositedTokens>) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.account_index.assets.clone())
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    pub asset_mint: Account<'info, Mint>,

    #[account(seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,
}

pub fn handler_total_liquidity(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.total_liquidity)
}

pub fn handler_total_shares(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.total_shares)
}

pub fn handler_get_effective_lp_fee(ctx: Context<PoolView>) -> Result<u16> {
    Ok(ctx.accounts.pool.effective_lp_fee_bps())
}

#[derive(Accounts)]
pub struct ProposedFeeChangeView<'info> {
    pub asset_mint: Account<'info, Mint>,

    #[account(seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,
}

pub fn handler_proposed_fee_changes(ctx: Context<ProposedFeeChangeView>, bps: u16) -> Result<u64> {
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);
    Ok(ctx.accounts.pool.proposed_fee_exec_block[Pool::bps_index(bps)])
}

pub fn handler_lp_fee_shares_total_votes(ctx: Context<ProposedFeeChangeView>, bps: u16) -> Result<u64> {
    require!((1..=MAX_LP_FEE_BPS).contains(&bps), FlashVaultError::BpsOutOfRange);
    Ok(ctx.accounts.pool.fee_votes[Pool::bps_index(bps)])
}

/// `(net, gross, principal, fees, exit_fee)`. `exit_fee` is always 0 -
/// FlashVault charges no exit fee, but the tuple shape is kept stable for
/// callers anticipating one.
#[derive(Accounts)]
pub struct GetWithdrawableAmount<'info> {
    pub asset_mint: Account<'info, Mint>,

    #[account(seeds = [POOL_SEED, asset_mint.key().as_ref()], bump = pool.bump)]
    pub pool: Account<'info, Pool>,

    #[account(seeds = [POSITION_SEED, pool.key().as_ref(), position.owner.as_ref()], bump = position.bump)]
    pub position: Account<'info, Position>,
}

pub fn handler_get_withdrawable_amount(ctx: Context<GetWithdrawableAmount>) -> Result<(u64, u64, u64, u64, u64)> {
    let gross = ctx.accounts.pool.asset_for_shares(ctx.accounts.position.shares)?;
    let principal = ctx.accounts.position.principal;
    let fees = gross.saturating_sub(principal);
    let net = gross;
    Ok((net, gross, principal, fees, 0))
}
