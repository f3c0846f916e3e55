// =============================================================================
// on_flash_loan Callback
// =============================================================================
// The receiver capability FlashVault CPIs into mid-loan. `params` is the
// Borsh-encoded script the owner queued via execute_flash_loan /
// create_and_execute. Runs the script against whatever the loan's proceeds
// let it do, then repays FlashVault's vault with amount + fee before
// returning - the repayment is itself just another token transfer, observed
// by FlashVault as a vault balance delta, not something this callback
// reports out-of-band.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::EXECUTOR_SEED;
use crate::script;
use crate::state::{Executor, Operation};

#[derive(Accounts)]
pub struct OnFlashLoan<'info> {
    #[account(seeds = [EXECUTOR_SEED, executor.owner.as_ref()], bump = executor.bump)]
    pub executor: Account<'info, Executor>,

    #[account(mut, constraint = executor_asset_account.owner == executor.key())]
    pub executor_asset_account: Account<'info, TokenAccount>,

    /// CHECK: FlashVault's vault for this asset; repayment destination.
    /// Verified implicitly by FlashVault's own post-callback balance check.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_on_flash_loan(
    ctx: Context<OnFlashLoan>,
    _asset: Pubkey,
    amount: u64,
    fee: u64,
    params: Vec<u8>,
) -> Result<bool> {
    let script: Vec<Operation> = AnchorDeserialize::try_from_slice(&params)
        .map_err(|_| error!(crate::error::LoanExecutorError::OperationFailed))?;

    let owner_key = ctx.accounts.executor.owner;
    let bump = ctx.accounts.executor.bump;
    let seeds: &[&[u8]] = &[EXECUTOR_SEED, owner_key.as_ref(), &[bump]];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    script::run_script(
        &script,
        ctx.remaining_accounts,
        &ctx.accounts.executor.to_account_info(),
        signer_seeds,
    )?;

    let repay_amount = amount
        .checked_add(fee)
        .ok_or(error!(crate::error::LoanExecutorError::OperationFailed))?;

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        anchor_spl::token::Transfer {
            from: ctx.accounts.executor_asset_account.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.executor.to_account_info(),
        },
        signer_seeds,
    );
    anchor_spl::token::transfer(cpi_ctx, repay_amount)?;

    msg!("Executor repaid {} (amount {} + fee {})", repay_amount, amount, fee);

    Ok(true)
}
