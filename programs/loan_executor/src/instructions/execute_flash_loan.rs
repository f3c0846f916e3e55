// =============================================================================
// Execute Flash Loan Instruction
// =============================================================================
// Owner-only entry point: borrows `amount` of `asset` from FlashVault with
// this Executor as the receiver, running `script` against the proceeds
// inside FlashVault's on_flash_loan callback. CPIs straight into FlashVault's
// flash_loan instruction using its generated CPI client.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use flashvault::cpi::accounts::FlashLoan as FlashVaultFlashLoanAccounts;
use flashvault::program::Flashvault;
use flashvault::state::{Engine as FlashVaultEngine, Pool as FlashVaultPool};

use crate::constants::EXECUTOR_SEED;
use crate::error::LoanExecutorError;
use crate::state::{Executor, Operation};

#[derive(Accounts)]
pub struct ExecuteFlashLoan<'info> {
    #[account(constraint = owner.key() == executor.owner @ LoanExecutorError::NotOwner)]
    pub owner: Signer<'info>,

    #[account(seeds = [EXECUTOR_SEED, executor.owner.as_ref()], bump = executor.bump)]
    pub executor: Account<'info, Executor>,

    pub flashvault_program: Program<'info, Flashvault>,

    /// CHECK: this program's own id, passed so it can be named as the CPI
    /// callback target FlashVault invokes on_flash_loan against.
    #[account(constraint = loan_executor_program.key() == crate::ID)]
    pub loan_executor_program: UncheckedAccount<'info>,

    #[account(mut)]
    pub engine: Account<'info, FlashVaultEngine>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut)]
    pub pool: Account<'info, FlashVaultPool>,

    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut, constraint = executor_asset_account.owner == executor.key())]
    pub executor_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    // Every account the script's operations touch is supplied via
    // remaining_accounts and forwarded verbatim into the on_flash_loan CPI.
}

pub fn handler_execute_flash_loan(
    ctx: Context<ExecuteFlashLoan>,
    amount: u64,
    script: Vec<Operation>,
) -> Result<()> {
    require!(!script.is_empty(), LoanExecutorError::EmptyScript);

    let params = script.try_to_vec().map_err(|_| error!(LoanExecutorError::OperationFailed))?;

    let cpi_accounts = FlashVaultFlashLoanAccounts {
        borrower: ctx.accounts.owner.to_account_info(),
        engine: ctx.accounts.engine.to_account_info(),
        asset_mint: ctx.accounts.asset_mint.to_account_info(),
        pool: ctx.accounts.pool.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        receiver_asset_account: ctx.accounts.executor_asset_account.to_account_info(),
        receiver_program: ctx.accounts.loan_executor_program.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(ctx.accounts.flashvault_program.to_account_info(), cpi_accounts)
        .with_remaining_accounts(ctx.remaining_accounts.to_vec());

    flashvault::cpi::flash_loan(cpi_ctx, amount, params)?;

    msg!("Executor ran a {}-step script against a {} flash loan", script.len(), amount);

    Ok(())
}
