// =============================================================================
// Flash Loan Instruction
// =============================================================================
// Single-asset flash loan: moves `amount` out of the pool vault into the
// borrower-controlled destination, invokes the receiver's on_flash_loan
// callback, then verifies the vault's observed balance grew by at least
// amount + total_fee. Any shortfall reverts the entire transaction - Solana's
// atomic-or-nothing transaction model is exactly the guarantee the spec's
// "fully repaid or reverted with no state change" language describes.
//
// `ctx.remaining_accounts` holds whatever accounts the receiver's own
// on_flash_loan implementation needs (besides the vault and its own token
// destination, which are passed explicitly below).
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FlashVaultError;
use crate::events::FlashLoaned;
use crate::receiver;
use crate::state::{Engine, Pool};
use crate::token_util;

#[derive(Accounts)]
pub struct FlashLoan<'info> {
    pub borrower: Signer<'info>,

    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, Engine>,

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

    /// Destination for the borrowed funds; must belong to the receiver's
    /// program-controlled authority so the callback can move it back.
    #[account(mut, constraint = receiver_asset_account.mint == asset_mint.key() @ FlashVaultError::InvalidAsset)]
    pub receiver_asset_account: Account<'info, TokenAccount>,

    /// CHECK: the receiver program is invoked via CPI with an Anchor sighash
    /// discriminator; the CPI itself fails if it doesn't implement
    /// on_flash_loan, which we surface as ReceiverCallFailed.
    pub receiver_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

// engine.enter()/exit() bracket the receiver callback below as documented
// intent, not as the mechanism that actually blocks reentrancy - see
// ReentrancyStatus's doc comment. A genuine nested call here is already
// rejected by Solana's runtime before this flag could ever be observed.
pub fn handler_flash_loan(ctx: Context<FlashLoan>, amount: u64, params: Vec<u8>) -> Result<()> {
    ctx.accounts.engine.enter()?;
    let result = run(&mut ctx, amount, params);
    ctx.accounts.engine.exit();
    result
}

fn run(ctx: &mut Context<FlashLoan>, amount: u64, params: Vec<u8>) -> Result<()> {
    require!(amount > 0, FlashVaultError::InvalidAmount);
    require!(
        amount <= ctx.accounts.pool.total_liquidity,
        FlashVaultError::InsufficientLiquidity
    );

    let (lp_fee, mgmt_fee) = ctx
        .accounts
        .pool
        .compute_flash_loan_fees(amount, ctx.accounts.engine.management_fee_percentage)?;
    let total_fee = lp_fee.checked_add(mgmt_fee).ok_or(error!(FlashVaultError::MathOverflow))?;

    let pre_vault_amount = ctx.accounts.vault.amount;

    let asset_mint_key = ctx.accounts.asset_mint.key();
    let pool_bump = ctx.accounts.pool.bump;
    let pool_seeds: &[&[u8]] = &[POOL_SEED, asset_mint_key.as_ref(), &[pool_bump]];
    let signer_seeds: &[&[&[u8]]] = &[pool_seeds];

    token_util::transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.receiver_asset_account,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        amount,
    )?;

    let receiver_metas = receiver::account_metas_from_infos(ctx.remaining_accounts);
    receiver::invoke_on_flash_loan(
        &ctx.accounts.receiver_program.to_account_info(),
        receiver_metas,
        ctx.remaining_accounts,
        asset_mint_key,
        amount,
        total_fee,
        params,
    )?;

    ctx.accounts.vault.reload()?;
    let required_post_balance = pre_vault_amount
        .checked_add(total_fee)
        .ok_or(error!(FlashVaultError::MathOverflow))?;
    require!(
        ctx.accounts.vault.amount >= required_post_balance,
        FlashVaultError::NotRepaid
    );

    ctx.accounts.pool.total_liquidity = ctx
        .accounts
        .pool
        .total_liquidity
        .checked_add(lp_fee)
        .ok_or(error!(FlashVaultError::MathOverflow))?;
    ctx.accounts.pool.collected_management_fee = ctx
        .accounts
        .pool
        .collected_management_fee
        .checked_add(mgmt_fee)
        .ok_or(error!(FlashVaultError::MathOverflow))?;

    let clock = Clock::get()?;
    emit!(FlashLoaned {
        borrower: ctx.accounts.borrower.key(),
        receiver: ctx.accounts.receiver_program.key(),
        asset: asset_mint_key,
        amount,
        fee: total_fee,
        timestamp: clock.unix_timestamp,
    });

    msg!("Flash loan of {} repaid with fee {} ({} lp, {} mgmt)", amount, total_fee, lp_fee, mgmt_fee);

    Ok(())
}
