// =============================================================================
// Create And Execute Instruction
// =============================================================================
// Factory entry point: creates an Executor PDA and runs a flash-loan script
// against it in one instruction. Because the whole thing is one Solana
// transaction, there is no externally observable "temporary owner" window
// the distilled factory description describes - deployment, execution, and
// ownership assignment either all land together or the transaction reverts
// and nothing (including the Executor account) is created.
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
pub struct CreateAndExecute<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        init,
        payer = caller,
        space = 8 + Executor::INIT_SPACE,
        seeds = [EXECUTOR_SEED, caller.key().as_ref()],
        bump
    )]
    pub executor: Account<'info, Executor>,

    pub flashvault_program: Program<'info, Flashvault>,

    /// CHECK: this program's own id, named as the CPI callback target.
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
    pub system_program: Program<'info, System>,
}

pub fn handler_create_and_execute(
    ctx: Context<CreateAndExecute>,
    amount: u64,
    script: Vec<Operation>,
) -> Result<()> {
    require!(!script.is_empty(), LoanExecutorError::EmptyScript);

    ctx.accounts.executor.owner = ctx.accounts.caller.key();
    ctx.accounts.executor.bump = ctx.bumps.executor;

    let params = script.try_to_vec().map_err(|_| error!(LoanExecutorError::OperationFailed))?;

    let cpi_accounts = FlashVaultFlashLoanAccounts {
        borrower: ctx.accounts.caller.to_account_info(),
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

    msg!("Factory created an executor for {} and ran its script", ctx.accounts.caller.key());

    Ok(())
}
