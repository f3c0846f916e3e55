// =============================================================================
// Initialize Executor Instruction
// =============================================================================
// Creates a fresh Executor PDA owned by the caller - the "deploy a personal
// contract" step for callers who want to run their own script directly
// (rather than via the one-shot create_and_execute factory path).
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::EXECUTOR_SEED;
use crate::state::Executor;

#[derive(Accounts)]
pub struct InitializeExecutor<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + Executor::INIT_SPACE,
        seeds = [EXECUTOR_SEED, owner.key().as_ref()],
        bump
    )]
    pub executor: Account<'info, Executor>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_executor(ctx: Context<InitializeExecutor>) -> Result<()> {
    let executor = &mut ctx.accounts.executor;
    executor.owner = ctx.accounts.owner.key();
    executor.bump = ctx.bumps.executor;

    msg!("Executor initialized for owner {}", executor.owner);

    Ok(())
}
